//! In-memory entry repository implementation

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entry::{
    Entry, EntryFilter, EntryId, EntryRepository, EntryStatus, EntryType, NewEntry,
};
use crate::domain::user::UserId;
use crate::domain::DomainError;

const SUM_OUT_OF_RANGE: &str = "Sum of entry values out of range";

#[derive(Debug, Default)]
struct EntryTable {
    next_id: i64,
    entries: BTreeMap<EntryId, Entry>,
}

/// In-memory implementation of EntryRepository
///
/// Entries are kept ordered by ID, matching the store order of the
/// PostgreSQL implementation.
#[derive(Debug, Default, Clone)]
pub struct InMemoryEntryRepository {
    table: Arc<RwLock<EntryTable>>,
}

impl InMemoryEntryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntryRepository for InMemoryEntryRepository {
    async fn create(&self, entry: NewEntry) -> Result<Entry, DomainError> {
        let mut table = self.table.write().await;

        table.next_id += 1;
        let id = EntryId::new(table.next_id);
        let created = Entry::from_new(id, entry, Utc::now());

        table.entries.insert(id, created.clone());

        Ok(created)
    }

    async fn update(&self, id: EntryId, entry: NewEntry) -> Result<Entry, DomainError> {
        let mut table = self.table.write().await;

        let slot = table
            .entries
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found(format!("Entry '{}' not found", id)))?;

        *slot = Entry::from_new(id, entry, slot.registered_at());

        Ok(slot.clone())
    }

    async fn delete(&self, id: EntryId) -> Result<bool, DomainError> {
        let mut table = self.table.write().await;
        Ok(table.entries.remove(&id).is_some())
    }

    async fn get(&self, id: EntryId) -> Result<Option<Entry>, DomainError> {
        let table = self.table.read().await;
        Ok(table.entries.get(&id).cloned())
    }

    async fn find(&self, filter: &EntryFilter) -> Result<Vec<Entry>, DomainError> {
        let table = self.table.read().await;

        Ok(table
            .entries
            .values()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect())
    }

    async fn sum_values(
        &self,
        user_id: UserId,
        entry_type: EntryType,
        status: Option<EntryStatus>,
    ) -> Result<Option<Decimal>, DomainError> {
        let table = self.table.read().await;

        table
            .entries
            .values()
            .filter(|e| e.user_id() == user_id && e.entry_type() == entry_type)
            .filter(|e| status.is_none_or(|s| e.status() == s))
            .try_fold(None, |total: Option<Decimal>, entry| {
                let sum = match total {
                    Some(total) => total.checked_add(entry.value()),
                    None => Some(entry.value()),
                };

                sum.map(Some)
                    .ok_or_else(|| DomainError::validation(SUM_OUT_OF_RANGE))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_entry(user: i64, description: &str, entry_type: EntryType, value: i64) -> NewEntry {
        NewEntry {
            description: description.to_string(),
            month: 3,
            year: 2021,
            user_id: UserId::new(user),
            value: Decimal::new(value, 0),
            entry_type,
            status: EntryStatus::Pending,
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryEntryRepository::new();

        let created = repo
            .create(new_entry(1, "Rent", EntryType::Expense, 900))
            .await
            .unwrap();

        assert_eq!(created.id(), EntryId::new(1));

        let fetched = repo.get(created.id()).await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_update_keeps_registration_date() {
        let repo = InMemoryEntryRepository::new();
        let created = repo
            .create(new_entry(1, "Rent", EntryType::Expense, 900))
            .await
            .unwrap();

        let mut changed = new_entry(1, "Rent (adjusted)", EntryType::Expense, 950);
        changed.status = EntryStatus::Settled;

        let updated = repo.update(created.id(), changed).await.unwrap();

        assert_eq!(updated.description(), "Rent (adjusted)");
        assert_eq!(updated.status(), EntryStatus::Settled);
        assert_eq!(updated.registered_at(), created.registered_at());
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let repo = InMemoryEntryRepository::new();

        let result = repo
            .update(EntryId::new(5), new_entry(1, "Rent", EntryType::Expense, 900))
            .await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryEntryRepository::new();
        let created = repo
            .create(new_entry(1, "Rent", EntryType::Expense, 900))
            .await
            .unwrap();

        assert!(repo.delete(created.id()).await.unwrap());
        assert!(!repo.delete(created.id()).await.unwrap());
        assert!(repo.get(created.id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_preserves_store_order() {
        let repo = InMemoryEntryRepository::new();
        repo.create(new_entry(1, "Salary", EntryType::Income, 3000)).await.unwrap();
        repo.create(new_entry(2, "Salary", EntryType::Income, 5000)).await.unwrap();
        repo.create(new_entry(1, "Bonus salary", EntryType::Income, 500)).await.unwrap();

        let found = repo
            .find(&EntryFilter::for_user(UserId::new(1)).with_description("SALARY"))
            .await
            .unwrap();

        let ids: Vec<i64> = found.iter().map(|e| e.id().value()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_sum_values() {
        let repo = InMemoryEntryRepository::new();
        repo.create(new_entry(1, "Salary", EntryType::Income, 3000)).await.unwrap();
        repo.create(new_entry(1, "Freelance", EntryType::Income, 500)).await.unwrap();
        repo.create(new_entry(1, "Rent", EntryType::Expense, 900)).await.unwrap();
        repo.create(new_entry(2, "Salary", EntryType::Income, 7000)).await.unwrap();

        let income = repo
            .sum_values(UserId::new(1), EntryType::Income, None)
            .await
            .unwrap();
        assert_eq!(income, Some(Decimal::new(3500, 0)));

        let settled = repo
            .sum_values(UserId::new(1), EntryType::Income, Some(EntryStatus::Settled))
            .await
            .unwrap();
        assert_eq!(settled, None);

        let nobody = repo
            .sum_values(UserId::new(3), EntryType::Expense, None)
            .await
            .unwrap();
        assert_eq!(nobody, None);
    }

    #[tokio::test]
    async fn test_sum_values_overflow_is_an_error() {
        let repo = InMemoryEntryRepository::new();

        for _ in 0..2 {
            let mut entry = new_entry(1, "Jackpot", EntryType::Income, 0);
            entry.value = Decimal::MAX;
            repo.create(entry).await.unwrap();
        }

        let result = repo.sum_values(UserId::new(1), EntryType::Income, None).await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }
}
