//! Entry infrastructure module

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::{PostgresEntryRepository, USER_NOT_FOUND_FOR_ID};
pub use repository::InMemoryEntryRepository;
pub use service::EntryService;
