//! Entry domain
//!
//! Income and expense records ("lançamentos") owned by a user, their
//! ordered validation rules and the repository trait used to store them.

mod entity;
mod repository;
mod validation;

pub use entity::{
    Entry, EntryDraft, EntryFilter, EntryId, EntryStatus, EntryType, NewEntry, UnknownVariant,
};
pub use repository::EntryRepository;
pub use validation::{
    max_entry_value, validate_entry, EntryValidationError, MAX_DESCRIPTION_CHARS, VALUE_SCALE,
};

#[cfg(test)]
pub use repository::MockEntryRepository;
