//! Entry request and response types
//!
//! Field names are English. The Portuguese names used by existing clients
//! (`descricao`, `mes`, `ano`, `valor`, `tipo`, `usuario`) are accepted as
//! aliases on input.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::entry::{EntryDraft, EntryFilter, EntryId, EntryStatus, EntryType};
use crate::domain::user::UserId;

use super::error::ApiError;

/// Body of entry create and update requests
///
/// Every field is optional so that missing values surface as validation
/// messages rather than parse errors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryRequest {
    #[serde(default, alias = "descricao")]
    pub description: Option<String>,
    #[serde(default, alias = "mes")]
    pub month: Option<i64>,
    #[serde(default, alias = "ano")]
    pub year: Option<i64>,
    #[serde(default, alias = "usuario")]
    pub user: Option<i64>,
    #[serde(default, alias = "valor")]
    pub value: Option<Decimal>,
    #[serde(default, rename = "type", alias = "tipo")]
    pub entry_type: Option<EntryType>,
    #[serde(default)]
    pub status: Option<EntryStatus>,
}

impl EntryRequest {
    /// Convert into a draft
    ///
    /// Out-of-range numbers become missing values and fail validation.
    pub fn into_draft(self, id: Option<EntryId>) -> EntryDraft {
        EntryDraft {
            id,
            description: self.description,
            month: self.month.and_then(|m| u32::try_from(m).ok()),
            year: self.year.and_then(|y| i32::try_from(y).ok()),
            user_id: self.user.map(UserId::new),
            value: self.value,
            entry_type: self.entry_type,
            status: self.status,
        }
    }
}

/// Body of the status change request
#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

/// Query parameters of the entry search
///
/// Parsed by hand so that malformed values produce a message naming the
/// parameter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntrySearchParams {
    #[serde(default, alias = "description")]
    pub descricao: Option<String>,
    #[serde(default, alias = "month")]
    pub mes: Option<String>,
    #[serde(default, alias = "year")]
    pub ano: Option<String>,
    #[serde(default, alias = "type")]
    pub tipo: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, alias = "user")]
    pub usuario: Option<String>,
}

impl EntrySearchParams {
    /// The owning user, which every search requires
    pub fn user_id(&self) -> Result<UserId, ApiError> {
        let raw = present(&self.usuario)
            .ok_or_else(|| ApiError::bad_request("Enter a 'user'").with_param("usuario"))?;

        parse_param(raw, "usuario").map(UserId::new)
    }

    /// Build the filter for a resolved user
    pub fn into_filter(self, user_id: UserId) -> Result<EntryFilter, ApiError> {
        let mut filter = EntryFilter::for_user(user_id);

        if let Some(description) = present(&self.descricao) {
            filter = filter.with_description(description);
        }

        if let Some(month) = present(&self.mes) {
            filter = filter.with_month(parse_param(month, "mes")?);
        }

        if let Some(year) = present(&self.ano) {
            filter = filter.with_year(parse_param(year, "ano")?);
        }

        if let Some(entry_type) = present(&self.tipo) {
            filter = filter.with_type(parse_param(entry_type, "tipo")?);
        }

        if let Some(status) = present(&self.status) {
            filter = filter.with_status(parse_param(status, "status")?);
        }

        Ok(filter)
    }
}

/// Empty query values count as absent
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_param<T: std::str::FromStr>(raw: &str, name: &str) -> Result<T, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid value for '{}': {}", name, raw)).with_param(name))
}

/// Balance of a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub user: UserId,
    pub balance: Decimal,
}
