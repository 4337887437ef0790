//! In-memory storage probe

use async_trait::async_trait;

use crate::domain::storage::StorageProbe;
use crate::domain::DomainError;

/// Probe for the in-memory backend, which is always reachable
#[derive(Debug, Default, Clone, Copy)]
pub struct InMemoryStorageProbe;

#[async_trait]
impl StorageProbe for InMemoryStorageProbe {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_probe_is_ready() {
        let probe = InMemoryStorageProbe;

        assert_eq!(probe.backend(), "memory");
        assert!(probe.ping().await.is_ok());
    }
}
