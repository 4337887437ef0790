//! Entry service for bookkeeping operations

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::domain::entry::{
    validate_entry, Entry, EntryDraft, EntryFilter, EntryId, EntryRepository, EntryStatus,
    EntryType,
};
use crate::domain::user::UserId;
use crate::domain::DomainError;

const BALANCE_OUT_OF_RANGE: &str = "Balance out of range";

/// Entry service for creating, changing and aggregating entries
#[derive(Debug)]
pub struct EntryService<R: EntryRepository> {
    repository: Arc<R>,
}

impl<R: EntryRepository> EntryService<R> {
    /// Create a new entry service
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Validate and store a new entry
    ///
    /// New entries always start as `Pending`, whatever the draft says.
    pub async fn create(&self, draft: EntryDraft) -> Result<Entry, DomainError> {
        let mut entry = validate_entry(&draft)?;
        entry.status = EntryStatus::Pending;

        let created = self.repository.create(entry).await?;

        info!(
            entry_id = %created.id(),
            user_id = %created.user_id(),
            entry_type = %created.entry_type(),
            "Created entry"
        );

        Ok(created)
    }

    /// Validate and overwrite an existing entry
    pub async fn update(&self, draft: EntryDraft) -> Result<Entry, DomainError> {
        let id = require_id(&draft)?;
        let entry = validate_entry(&draft)?;

        let updated = self.repository.update(id, entry).await?;

        info!(entry_id = %id, status = %updated.status(), "Updated entry");

        Ok(updated)
    }

    /// Delete a stored entry
    pub async fn delete(&self, draft: &EntryDraft) -> Result<(), DomainError> {
        let id = require_id(draft)?;

        if !self.repository.delete(id).await? {
            return Err(DomainError::not_found(format!("Entry '{}' not found", id)));
        }

        info!(entry_id = %id, "Deleted entry");

        Ok(())
    }

    /// Find a user's entries matching the filter
    pub async fn search(&self, filter: &EntryFilter) -> Result<Vec<Entry>, DomainError> {
        let entries = self.repository.find(filter).await?;

        debug!(user_id = %filter.user_id, count = entries.len(), "Searched entries");

        Ok(entries)
    }

    /// Change the status of an entry and persist it
    pub async fn set_status(&self, entry: &Entry, status: EntryStatus) -> Result<Entry, DomainError> {
        let draft = EntryDraft {
            status: Some(status),
            ..EntryDraft::from(entry)
        };

        self.update(draft).await
    }

    /// Get an entry by ID
    pub async fn get(&self, id: EntryId) -> Result<Option<Entry>, DomainError> {
        self.repository.get(id).await
    }

    /// Sum a user's entries of one type, optionally restricted to a status
    ///
    /// Yields zero when nothing matches.
    pub async fn sum_by_type(
        &self,
        user_id: UserId,
        entry_type: EntryType,
        status: Option<EntryStatus>,
    ) -> Result<Decimal, DomainError> {
        let total = self
            .repository
            .sum_values(user_id, entry_type, status)
            .await?;

        Ok(total.unwrap_or(Decimal::ZERO))
    }

    /// Settled income minus settled expense for a user
    pub async fn balance_for_user(&self, user_id: UserId) -> Result<Decimal, DomainError> {
        let settled = Some(EntryStatus::Settled);

        let income = self.sum_by_type(user_id, EntryType::Income, settled).await?;
        let expense = self.sum_by_type(user_id, EntryType::Expense, settled).await?;

        income
            .checked_sub(expense)
            .ok_or_else(|| DomainError::validation(BALANCE_OUT_OF_RANGE))
    }
}

fn require_id(draft: &EntryDraft) -> Result<EntryId, DomainError> {
    draft
        .id
        .ok_or_else(|| DomainError::precondition("Entry must be saved before it can be changed"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entry::{MockEntryRepository, NewEntry};
    use crate::infrastructure::entry::repository::InMemoryEntryRepository;
    use chrono::Utc;

    fn create_service() -> EntryService<InMemoryEntryRepository> {
        EntryService::new(Arc::new(InMemoryEntryRepository::new()))
    }

    fn draft(user: i64, description: &str, entry_type: EntryType, value: i64) -> EntryDraft {
        EntryDraft {
            description: Some(description.to_string()),
            month: Some(1),
            year: Some(2021),
            user_id: Some(UserId::new(user)),
            value: Some(Decimal::new(value, 0)),
            entry_type: Some(entry_type),
            ..Default::default()
        }
    }

    fn stored(id: i64, entry: NewEntry) -> Entry {
        Entry::from_new(EntryId::new(id), entry, Utc::now())
    }

    #[tokio::test]
    async fn test_create_forces_pending() {
        let service = create_service();

        let mut input = draft(1, "Salary", EntryType::Income, 3000);
        input.status = Some(EntryStatus::Settled);

        let created = service.create(input).await.unwrap();

        assert_eq!(created.status(), EntryStatus::Pending);
        assert_eq!(created.id(), EntryId::new(1));
    }

    #[tokio::test]
    async fn test_create_invalid_never_saves() {
        let mut repository = MockEntryRepository::new();
        repository.expect_create().never();

        let service = EntryService::new(Arc::new(repository));

        let mut input = draft(1, "Salary", EntryType::Income, 3000);
        input.month = Some(13);

        let err = service.create(input).await.unwrap_err();

        assert!(matches!(err, DomainError::Validation { .. }));
        assert_eq!(err.message(), "Enter a valid 'month'");
    }

    #[tokio::test]
    async fn test_update_without_id_never_reaches_store() {
        let mut repository = MockEntryRepository::new();
        repository.expect_update().never();

        let service = EntryService::new(Arc::new(repository));

        let err = service
            .update(draft(1, "Salary", EntryType::Income, 3000))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Precondition { .. }));
    }

    #[tokio::test]
    async fn test_delete_without_id_never_reaches_store() {
        let mut repository = MockEntryRepository::new();
        repository.expect_delete().never();

        let service = EntryService::new(Arc::new(repository));

        let err = service
            .delete(&draft(1, "Salary", EntryType::Income, 3000))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Precondition { .. }));
    }

    #[tokio::test]
    async fn test_delete_unknown_entry() {
        let service = create_service();

        let mut input = draft(1, "Salary", EntryType::Income, 3000);
        input.id = Some(EntryId::new(99));

        let err = service.delete(&input).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_validates_before_saving() {
        let mut repository = MockEntryRepository::new();
        repository.expect_update().never();

        let service = EntryService::new(Arc::new(repository));

        let mut input = draft(1, "Salary", EntryType::Income, 0);
        input.id = Some(EntryId::new(1));

        let err = service.update(input).await.unwrap_err();
        assert_eq!(err.message(), "Enter a valid 'value'");
    }

    #[tokio::test]
    async fn test_set_status_persists_once() {
        let mut repository = MockEntryRepository::new();
        repository
            .expect_update()
            .withf(|id, entry| *id == EntryId::new(1) && entry.status == EntryStatus::Settled)
            .times(1)
            .returning(|id, entry| Ok(Entry::from_new(id, entry, Utc::now())));

        let service = EntryService::new(Arc::new(repository));

        let entry = stored(
            1,
            NewEntry {
                description: "Salary".to_string(),
                month: 1,
                year: 2021,
                user_id: UserId::new(1),
                value: Decimal::new(3000, 0),
                entry_type: EntryType::Income,
                status: EntryStatus::Pending,
            },
        );

        let updated = service.set_status(&entry, EntryStatus::Settled).await.unwrap();

        assert_eq!(updated.status(), EntryStatus::Settled);
        assert_eq!(updated.description(), "Salary");
    }

    #[tokio::test]
    async fn test_search_by_description() {
        let service = create_service();

        service.create(draft(1, "Salary", EntryType::Income, 3000)).await.unwrap();
        service.create(draft(1, "Rent", EntryType::Expense, 900)).await.unwrap();
        service.create(draft(2, "Salary", EntryType::Income, 5000)).await.unwrap();

        let found = service
            .search(&EntryFilter::for_user(UserId::new(1)).with_description("sal"))
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].description(), "Salary");
        assert_eq!(found[0].user_id(), UserId::new(1));
    }

    #[tokio::test]
    async fn test_sum_by_type_defaults_to_zero() {
        let service = create_service();

        let total = service
            .sum_by_type(UserId::new(1), EntryType::Expense, None)
            .await
            .unwrap();

        assert_eq!(total, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_balance_counts_only_settled_entries() {
        let service = create_service();
        let user = UserId::new(1);

        let salary = service.create(draft(1, "Salary", EntryType::Income, 3000)).await.unwrap();
        let rent = service.create(draft(1, "Rent", EntryType::Expense, 900)).await.unwrap();
        let gift = service.create(draft(1, "Gift", EntryType::Income, 200)).await.unwrap();
        let trip = service.create(draft(1, "Trip", EntryType::Expense, 400)).await.unwrap();

        assert_eq!(service.balance_for_user(user).await.unwrap(), Decimal::ZERO);

        service.set_status(&salary, EntryStatus::Settled).await.unwrap();
        service.set_status(&rent, EntryStatus::Settled).await.unwrap();
        service.set_status(&trip, EntryStatus::Canceled).await.unwrap();

        assert_eq!(service.balance_for_user(user).await.unwrap(), Decimal::new(2100, 0));
        assert_eq!(gift.status(), EntryStatus::Pending);
    }

    #[tokio::test]
    async fn test_balance_overflow_is_an_error() {
        let mut repository = MockEntryRepository::new();
        repository
            .expect_sum_values()
            .times(2)
            .returning(|_, entry_type, _| match entry_type {
                EntryType::Income => Ok(Some(Decimal::MIN)),
                EntryType::Expense => Ok(Some(Decimal::MAX)),
            });

        let service = EntryService::new(Arc::new(repository));

        let err = service.balance_for_user(UserId::new(1)).await.unwrap_err();

        assert!(matches!(err, DomainError::Validation { .. }));
        assert_eq!(err.message(), "Balance out of range");
    }

    #[tokio::test]
    async fn test_balance_with_oversized_settled_entries() {
        let repository = Arc::new(InMemoryEntryRepository::new());

        for _ in 0..2 {
            let entry = repository
                .create(NewEntry {
                    description: "Jackpot".to_string(),
                    month: 1,
                    year: 2021,
                    user_id: UserId::new(1),
                    value: Decimal::MAX,
                    entry_type: EntryType::Income,
                    status: EntryStatus::Settled,
                })
                .await
                .unwrap();
            assert_eq!(entry.status(), EntryStatus::Settled);
        }

        let service = EntryService::new(repository);

        let result = service.balance_for_user(UserId::new(1)).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_create_rejects_value_beyond_column_range() {
        let mut repository = MockEntryRepository::new();
        repository.expect_create().never();

        let service = EntryService::new(Arc::new(repository));

        let mut input = draft(1, "Jackpot", EntryType::Income, 0);
        input.value = Some(Decimal::MAX);

        let err = service.create(input).await.unwrap_err();
        assert_eq!(err.message(), "Enter a valid 'value'");
    }

    #[tokio::test]
    async fn test_balance_of_user_without_entries() {
        let service = create_service();

        let balance = service.balance_for_user(UserId::new(7)).await.unwrap();
        assert_eq!(balance, Decimal::ZERO);
    }
}
