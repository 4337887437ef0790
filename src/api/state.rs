//! Application state for shared services

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::entry::{Entry, EntryDraft, EntryFilter, EntryId, EntryRepository, EntryStatus};
use crate::domain::storage::StorageProbe;
use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::entry::{EntryService, InMemoryEntryRepository};
use crate::infrastructure::storage::InMemoryStorageProbe;
use crate::infrastructure::user::{
    Argon2Hasher, InMemoryUserRepository, PasswordHasher, RegisterUserRequest, UserService,
};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub entry_service: Arc<dyn EntryServiceTrait>,
    pub user_service: Arc<dyn UserServiceTrait>,
    pub storage: Arc<dyn StorageProbe>,
}

impl AppState {
    pub fn new(
        entry_service: Arc<dyn EntryServiceTrait>,
        user_service: Arc<dyn UserServiceTrait>,
        storage: Arc<dyn StorageProbe>,
    ) -> Self {
        Self {
            entry_service,
            user_service,
            storage,
        }
    }

    /// State backed by in-memory repositories
    pub fn in_memory() -> Self {
        Self::in_memory_with_hasher(Argon2Hasher::new())
    }

    pub fn in_memory_with_hasher(hasher: Argon2Hasher) -> Self {
        let entries = Arc::new(InMemoryEntryRepository::new());
        let users = Arc::new(InMemoryUserRepository::new());

        Self::new(
            Arc::new(EntryService::new(entries)),
            Arc::new(UserService::new(users, Arc::new(hasher))),
            Arc::new(InMemoryStorageProbe),
        )
    }
}

/// Trait for entry service operations
#[async_trait::async_trait]
pub trait EntryServiceTrait: Send + Sync {
    async fn create(&self, draft: EntryDraft) -> Result<Entry, DomainError>;
    async fn update(&self, draft: EntryDraft) -> Result<Entry, DomainError>;
    async fn delete(&self, draft: &EntryDraft) -> Result<(), DomainError>;
    async fn search(&self, filter: &EntryFilter) -> Result<Vec<Entry>, DomainError>;
    async fn set_status(&self, entry: &Entry, status: EntryStatus) -> Result<Entry, DomainError>;
    async fn get(&self, id: EntryId) -> Result<Option<Entry>, DomainError>;
    async fn balance_for_user(&self, user_id: UserId) -> Result<Decimal, DomainError>;
}

/// Trait for user service operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn authenticate(&self, email: &str, password: &str) -> Result<User, DomainError>;
    async fn register(&self, request: RegisterUserRequest) -> Result<User, DomainError>;
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError>;
}

#[async_trait::async_trait]
impl<R: EntryRepository + 'static> EntryServiceTrait for EntryService<R> {
    async fn create(&self, draft: EntryDraft) -> Result<Entry, DomainError> {
        EntryService::create(self, draft).await
    }

    async fn update(&self, draft: EntryDraft) -> Result<Entry, DomainError> {
        EntryService::update(self, draft).await
    }

    async fn delete(&self, draft: &EntryDraft) -> Result<(), DomainError> {
        EntryService::delete(self, draft).await
    }

    async fn search(&self, filter: &EntryFilter) -> Result<Vec<Entry>, DomainError> {
        EntryService::search(self, filter).await
    }

    async fn set_status(&self, entry: &Entry, status: EntryStatus) -> Result<Entry, DomainError> {
        EntryService::set_status(self, entry, status).await
    }

    async fn get(&self, id: EntryId) -> Result<Option<Entry>, DomainError> {
        EntryService::get(self, id).await
    }

    async fn balance_for_user(&self, user_id: UserId) -> Result<Decimal, DomainError> {
        EntryService::balance_for_user(self, user_id).await
    }
}

#[async_trait::async_trait]
impl<R, H> UserServiceTrait for UserService<R, H>
where
    R: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    async fn authenticate(&self, email: &str, password: &str) -> Result<User, DomainError> {
        UserService::authenticate(self, email, password).await
    }

    async fn register(&self, request: RegisterUserRequest) -> Result<User, DomainError> {
        UserService::register(self, request).await
    }

    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        UserService::get(self, id).await
    }
}
