//! Domain layer - Core business logic and entities

pub mod entry;
pub mod error;
pub mod storage;
pub mod user;

pub use entry::{
    validate_entry, Entry, EntryDraft, EntryFilter, EntryId, EntryRepository, EntryStatus,
    EntryType, EntryValidationError, NewEntry,
};
pub use error::DomainError;
pub use storage::StorageProbe;
pub use user::{NewUser, User, UserId, UserRepository};
