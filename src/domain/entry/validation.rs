//! Entry validation rules
//!
//! Rules are checked in a fixed order and the first failure is reported:
//! description, month, year, user, value, type.
//!
//! Description length and value precision match the `entries` columns, so
//! anything that validates can be stored unchanged by every backend.

use rust_decimal::Decimal;
use thiserror::Error;

use super::entity::{EntryDraft, NewEntry};
use crate::domain::DomainError;

/// Errors that can occur during entry validation
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EntryValidationError {
    #[error("Enter a valid 'description'")]
    InvalidDescription,

    #[error("Enter a valid 'month'")]
    InvalidMonth,

    #[error("Enter a valid 'year'")]
    InvalidYear,

    #[error("Enter a 'user'")]
    MissingUser,

    #[error("Enter a valid 'value'")]
    InvalidValue,

    #[error("Enter an 'entry type'")]
    MissingType,
}

impl From<EntryValidationError> for DomainError {
    fn from(err: EntryValidationError) -> Self {
        DomainError::validation(err.to_string())
    }
}

const MIN_MONTH: u32 = 1;
const MAX_MONTH: u32 = 12;
const MIN_YEAR: i32 = 1000;
const MAX_YEAR: i32 = 9999;

/// Longest description, in characters
pub const MAX_DESCRIPTION_CHARS: usize = 255;

/// Digits kept after the decimal point
pub const VALUE_SCALE: u32 = 2;

/// Largest value a `NUMERIC(16, 2)` column holds
pub fn max_entry_value() -> Decimal {
    Decimal::new(9_999_999_999_999_999, VALUE_SCALE)
}

fn valid_description(description: &str) -> bool {
    !description.trim().is_empty() && description.chars().count() <= MAX_DESCRIPTION_CHARS
}

fn valid_value(value: &Decimal) -> bool {
    *value > Decimal::ZERO
        && *value <= max_entry_value()
        && value.normalize().scale() <= VALUE_SCALE
}

/// Validate a draft and extract its fields
///
/// The returned entry carries the draft's status, or `Pending` when the
/// draft has none.
pub fn validate_entry(draft: &EntryDraft) -> Result<NewEntry, EntryValidationError> {
    let description = draft
        .description
        .as_deref()
        .filter(|d| valid_description(d))
        .ok_or(EntryValidationError::InvalidDescription)?;

    let month = draft
        .month
        .filter(|m| (MIN_MONTH..=MAX_MONTH).contains(m))
        .ok_or(EntryValidationError::InvalidMonth)?;

    let year = draft
        .year
        .filter(|y| (MIN_YEAR..=MAX_YEAR).contains(y))
        .ok_or(EntryValidationError::InvalidYear)?;

    let user_id = draft.user_id.ok_or(EntryValidationError::MissingUser)?;

    let value = draft
        .value
        .filter(valid_value)
        .ok_or(EntryValidationError::InvalidValue)?;

    let entry_type = draft.entry_type.ok_or(EntryValidationError::MissingType)?;

    Ok(NewEntry {
        description: description.to_string(),
        month,
        year,
        user_id,
        value,
        entry_type,
        status: draft.status.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entry::{EntryStatus, EntryType};
    use crate::domain::user::UserId;

    fn valid_draft() -> EntryDraft {
        EntryDraft {
            id: None,
            description: Some("Salary".to_string()),
            month: Some(2),
            year: Some(2020),
            user_id: Some(UserId::new(1)),
            value: Some(Decimal::new(10, 0)),
            entry_type: Some(EntryType::Income),
            status: None,
        }
    }

    #[test]
    fn test_valid_draft() {
        let entry = validate_entry(&valid_draft()).unwrap();

        assert_eq!(entry.description, "Salary");
        assert_eq!(entry.month, 2);
        assert_eq!(entry.year, 2020);
        assert_eq!(entry.user_id, UserId::new(1));
        assert_eq!(entry.value, Decimal::new(10, 0));
        assert_eq!(entry.entry_type, EntryType::Income);
        assert_eq!(entry.status, EntryStatus::Pending);
    }

    #[test]
    fn test_draft_status_is_kept() {
        let draft = EntryDraft {
            status: Some(EntryStatus::Canceled),
            ..valid_draft()
        };

        assert_eq!(validate_entry(&draft).unwrap().status, EntryStatus::Canceled);
    }

    #[test]
    fn test_description_rule() {
        for description in [None, Some(""), Some("   "), Some("\t\n")] {
            let draft = EntryDraft {
                description: description.map(String::from),
                ..valid_draft()
            };
            assert_eq!(
                validate_entry(&draft),
                Err(EntryValidationError::InvalidDescription)
            );
        }
    }

    #[test]
    fn test_description_rule_wins_over_every_other_rule() {
        let draft = EntryDraft {
            description: Some(" ".to_string()),
            ..EntryDraft::default()
        };

        assert_eq!(
            validate_entry(&draft),
            Err(EntryValidationError::InvalidDescription)
        );
    }

    #[test]
    fn test_month_rule() {
        for month in [None, Some(0), Some(13), Some(15)] {
            let draft = EntryDraft {
                month,
                ..valid_draft()
            };
            assert_eq!(validate_entry(&draft), Err(EntryValidationError::InvalidMonth));
        }

        for month in [1, 12] {
            let draft = EntryDraft {
                month: Some(month),
                ..valid_draft()
            };
            assert!(validate_entry(&draft).is_ok());
        }
    }

    #[test]
    fn test_year_rule() {
        for year in [None, Some(0), Some(202), Some(999), Some(10000), Some(-2020)] {
            let draft = EntryDraft {
                year,
                ..valid_draft()
            };
            assert_eq!(validate_entry(&draft), Err(EntryValidationError::InvalidYear));
        }

        for year in [1000, 9999] {
            let draft = EntryDraft {
                year: Some(year),
                ..valid_draft()
            };
            assert!(validate_entry(&draft).is_ok());
        }
    }

    #[test]
    fn test_user_rule() {
        let draft = EntryDraft {
            user_id: None,
            ..valid_draft()
        };

        assert_eq!(validate_entry(&draft), Err(EntryValidationError::MissingUser));
    }

    #[test]
    fn test_value_rule() {
        for value in [None, Some(Decimal::ZERO), Some(Decimal::new(-1, 2))] {
            let draft = EntryDraft {
                value,
                ..valid_draft()
            };
            assert_eq!(validate_entry(&draft), Err(EntryValidationError::InvalidValue));
        }

        let draft = EntryDraft {
            value: Some(Decimal::new(1, 2)),
            ..valid_draft()
        };
        assert!(validate_entry(&draft).is_ok());
    }

    #[test]
    fn test_description_length_limit() {
        let longest = EntryDraft {
            description: Some("é".repeat(MAX_DESCRIPTION_CHARS)),
            ..valid_draft()
        };
        assert!(validate_entry(&longest).is_ok());

        let too_long = EntryDraft {
            description: Some("a".repeat(MAX_DESCRIPTION_CHARS + 1)),
            ..valid_draft()
        };
        assert_eq!(
            validate_entry(&too_long),
            Err(EntryValidationError::InvalidDescription)
        );
    }

    #[test]
    fn test_value_precision_is_cents() {
        for value in [Decimal::new(1, 3), Decimal::new(10005, 3)] {
            let draft = EntryDraft {
                value: Some(value),
                ..valid_draft()
            };
            assert_eq!(validate_entry(&draft), Err(EntryValidationError::InvalidValue));
        }

        // trailing zeros do not add precision
        let draft = EntryDraft {
            value: Some(Decimal::new(10500, 3)),
            ..valid_draft()
        };
        assert!(validate_entry(&draft).is_ok());
    }

    #[test]
    fn test_value_upper_bound() {
        let largest = EntryDraft {
            value: Some(max_entry_value()),
            ..valid_draft()
        };
        assert!(validate_entry(&largest).is_ok());

        for value in [max_entry_value() + Decimal::new(1, 2), Decimal::MAX] {
            let draft = EntryDraft {
                value: Some(value),
                ..valid_draft()
            };
            assert_eq!(validate_entry(&draft), Err(EntryValidationError::InvalidValue));
        }
    }

    #[test]
    fn test_type_rule() {
        let draft = EntryDraft {
            entry_type: None,
            ..valid_draft()
        };

        assert_eq!(validate_entry(&draft), Err(EntryValidationError::MissingType));
    }

    #[test]
    fn test_rules_are_reported_in_order() {
        let mut draft = EntryDraft::default();
        assert_eq!(
            validate_entry(&draft),
            Err(EntryValidationError::InvalidDescription)
        );

        draft.description = Some("Salary".to_string());
        assert_eq!(validate_entry(&draft), Err(EntryValidationError::InvalidMonth));

        draft.month = Some(2);
        assert_eq!(validate_entry(&draft), Err(EntryValidationError::InvalidYear));

        draft.year = Some(2020);
        assert_eq!(validate_entry(&draft), Err(EntryValidationError::MissingUser));

        draft.user_id = Some(UserId::new(1));
        assert_eq!(validate_entry(&draft), Err(EntryValidationError::InvalidValue));

        draft.value = Some(Decimal::new(20, 0));
        assert_eq!(validate_entry(&draft), Err(EntryValidationError::MissingType));

        draft.entry_type = Some(EntryType::Expense);
        assert!(validate_entry(&draft).is_ok());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            EntryValidationError::InvalidDescription.to_string(),
            "Enter a valid 'description'"
        );
        assert_eq!(EntryValidationError::MissingUser.to_string(), "Enter a 'user'");
        assert_eq!(
            EntryValidationError::MissingType.to_string(),
            "Enter an 'entry type'"
        );
    }
}
