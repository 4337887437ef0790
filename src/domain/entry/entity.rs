//! Entry entity and related types

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::user::UserId;

/// Store-assigned entry identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(i64);

impl EntryId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for EntryId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether an entry is money coming in or going out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryType {
    #[serde(alias = "RECEITA")]
    Income,
    #[serde(alias = "DESPESA")]
    Expense,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
        }
    }
}

impl FromStr for EntryType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "INCOME" | "RECEITA" => Ok(Self::Income),
            "EXPENSE" | "DESPESA" => Ok(Self::Expense),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryStatus {
    #[default]
    #[serde(alias = "PENDENTE")]
    Pending,
    #[serde(alias = "EFETIVADO")]
    Settled,
    #[serde(alias = "CANCELADO")]
    Canceled,
}

impl EntryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Settled => "SETTLED",
            Self::Canceled => "CANCELED",
        }
    }
}

impl FromStr for EntryStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PENDING" | "PENDENTE" => Ok(Self::Pending),
            "SETTLED" | "EFETIVADO" => Ok(Self::Settled),
            "CANCELED" | "CANCELADO" => Ok(Self::Canceled),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unknown type or status name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown value: '{0}'")]
pub struct UnknownVariant(pub String);

/// A persisted income or expense record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    id: EntryId,
    description: String,
    month: u32,
    year: i32,
    #[serde(rename = "user")]
    user_id: UserId,
    value: Decimal,
    #[serde(rename = "type")]
    entry_type: EntryType,
    status: EntryStatus,
    registered_at: DateTime<Utc>,
}

impl Entry {
    /// Combine validated fields with the identity assigned by the store
    pub fn from_new(id: EntryId, entry: NewEntry, registered_at: DateTime<Utc>) -> Self {
        Self {
            id,
            description: entry.description,
            month: entry.month,
            year: entry.year,
            user_id: entry.user_id,
            value: entry.value,
            entry_type: entry.entry_type,
            status: entry.status,
            registered_at,
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn entry_type(&self) -> EntryType {
        self.entry_type
    }

    pub fn status(&self) -> EntryStatus {
        self.status
    }

    pub fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }
}

/// Validated entry fields, not yet persisted
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub description: String,
    pub month: u32,
    pub year: i32,
    pub user_id: UserId,
    pub value: Decimal,
    pub entry_type: EntryType,
    pub status: EntryStatus,
}

/// Unvalidated entry input
///
/// Every field may be missing. An `id` is required for updates and deletes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryDraft {
    pub id: Option<EntryId>,
    pub description: Option<String>,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub user_id: Option<UserId>,
    pub value: Option<Decimal>,
    pub entry_type: Option<EntryType>,
    pub status: Option<EntryStatus>,
}

impl From<&Entry> for EntryDraft {
    fn from(entry: &Entry) -> Self {
        Self {
            id: Some(entry.id),
            description: Some(entry.description.clone()),
            month: Some(entry.month),
            year: Some(entry.year),
            user_id: Some(entry.user_id),
            value: Some(entry.value),
            entry_type: Some(entry.entry_type),
            status: Some(entry.status),
        }
    }
}

/// Search criteria for a user's entries
///
/// Unset fields match everything. The description matches as a
/// case-insensitive substring.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryFilter {
    pub user_id: UserId,
    pub description: Option<String>,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub entry_type: Option<EntryType>,
    pub status: Option<EntryStatus>,
}

impl EntryFilter {
    pub fn for_user(user_id: UserId) -> Self {
        Self {
            user_id,
            description: None,
            month: None,
            year: None,
            entry_type: None,
            status: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_type(mut self, entry_type: EntryType) -> Self {
        self.entry_type = Some(entry_type);
        self
    }

    pub fn with_status(mut self, status: EntryStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Check whether an entry satisfies every set criterion
    pub fn matches(&self, entry: &Entry) -> bool {
        if entry.user_id != self.user_id {
            return false;
        }

        if let Some(description) = &self.description {
            let needle = description.to_lowercase();

            if !entry.description.to_lowercase().contains(&needle) {
                return false;
            }
        }

        self.month.is_none_or(|m| entry.month == m)
            && self.year.is_none_or(|y| entry.year == y)
            && self.entry_type.is_none_or(|t| entry.entry_type == t)
            && self.status.is_none_or(|s| entry.status == s)
    }
}
