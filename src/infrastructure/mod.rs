//! Infrastructure layer - storage, services and observability

pub mod entry;
pub mod logging;
pub mod observability;
pub mod storage;
pub mod user;
