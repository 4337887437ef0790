//! Entry repository trait

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::entity::{Entry, EntryFilter, EntryId, EntryStatus, EntryType, NewEntry};
use crate::domain::user::UserId;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Repository for entry persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// Insert a new entry, assigning its ID and registration date
    async fn create(&self, entry: NewEntry) -> Result<Entry, DomainError>;

    /// Overwrite the fields of an existing entry, keeping its registration date
    ///
    /// Fails with `NotFound` if the ID is unknown.
    async fn update(&self, id: EntryId, entry: NewEntry) -> Result<Entry, DomainError>;

    /// Delete an entry by ID, returning whether a row was removed
    async fn delete(&self, id: EntryId) -> Result<bool, DomainError>;

    /// Get an entry by ID
    async fn get(&self, id: EntryId) -> Result<Option<Entry>, DomainError>;

    /// Find entries matching a filter, ordered by ID
    async fn find(&self, filter: &EntryFilter) -> Result<Vec<Entry>, DomainError>;

    /// Sum entry values for a user and type, optionally restricted to a status
    ///
    /// Returns `None` when no entry matches.
    async fn sum_values(
        &self,
        user_id: UserId,
        entry_type: EntryType,
        status: Option<EntryStatus>,
    ) -> Result<Option<Decimal>, DomainError>;
}
