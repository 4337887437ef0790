//! Storage domain - backend-agnostic storage capabilities

use async_trait::async_trait;

use crate::domain::DomainError;

/// Connectivity check for the backing store, used by readiness probes
#[async_trait]
pub trait StorageProbe: Send + Sync {
    /// Short backend name reported in health checks
    fn backend(&self) -> &'static str;

    /// Verify the store can serve requests
    async fn ping(&self) -> Result<(), DomainError>;
}
