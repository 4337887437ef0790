//! HTTP request, response and error types

pub mod entry;
pub mod error;
pub mod json;
pub mod user;

pub use entry::{BalanceResponse, EntryRequest, EntrySearchParams, StatusUpdateRequest};
pub use error::{ApiError, ApiErrorResponse, ApiErrorType};
pub use json::Json;
pub use user::{AuthenticateRequest, RegisterRequest};
