//! PostgreSQL entry repository implementation

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

use crate::domain::entry::{
    Entry, EntryFilter, EntryId, EntryRepository, EntryStatus, EntryType, NewEntry,
};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Reported when an entry references a user that does not exist
pub const USER_NOT_FOUND_FOR_ID: &str = "User not found for the given id";

const ENTRY_COLUMNS: &str =
    "id, description, month, year, user_id, value, entry_type, status, registered_at";

/// PostgreSQL implementation of EntryRepository
#[derive(Debug, Clone)]
pub struct PostgresEntryRepository {
    pool: PgPool,
}

impl PostgresEntryRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntryRepository for PostgresEntryRepository {
    async fn create(&self, entry: NewEntry) -> Result<Entry, DomainError> {
        let sql = format!(
            r#"
            INSERT INTO entries (description, month, year, user_id, value, entry_type, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {ENTRY_COLUMNS}
            "#
        );

        let row = sqlx::query(&sql)
            .bind(&entry.description)
            .bind(month_to_db(entry.month)?)
            .bind(entry.year)
            .bind(entry.user_id.value())
            .bind(entry.value)
            .bind(entry.entry_type.as_str())
            .bind(entry.status.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| write_error("create", e))?;

        row_to_entry(&row)
    }

    async fn update(&self, id: EntryId, entry: NewEntry) -> Result<Entry, DomainError> {
        let sql = format!(
            r#"
            UPDATE entries
            SET description = $2, month = $3, year = $4, user_id = $5, value = $6,
                entry_type = $7, status = $8
            WHERE id = $1
            RETURNING {ENTRY_COLUMNS}
            "#
        );

        let row = sqlx::query(&sql)
            .bind(id.value())
            .bind(&entry.description)
            .bind(month_to_db(entry.month)?)
            .bind(entry.year)
            .bind(entry.user_id.value())
            .bind(entry.value)
            .bind(entry.entry_type.as_str())
            .bind(entry.status.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| write_error("update", e))?
            .ok_or_else(|| DomainError::not_found(format!("Entry '{}' not found", id)))?;

        row_to_entry(&row)
    }

    async fn delete(&self, id: EntryId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM entries WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete entry: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn get(&self, id: EntryId) -> Result<Option<Entry>, DomainError> {
        let sql = format!("SELECT {ENTRY_COLUMNS} FROM entries WHERE id = $1");

        let row = sqlx::query(&sql)
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get entry: {}", e)))?;

        row.as_ref().map(row_to_entry).transpose()
    }

    async fn find(&self, filter: &EntryFilter) -> Result<Vec<Entry>, DomainError> {
        let rows = build_find_query(filter)?
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to search entries: {}", e)))?;

        rows.iter().map(row_to_entry).collect()
    }

    async fn sum_values(
        &self,
        user_id: UserId,
        entry_type: EntryType,
        status: Option<EntryStatus>,
    ) -> Result<Option<Decimal>, DomainError> {
        sqlx::query_scalar(
            r#"
            SELECT SUM(value)
            FROM entries
            WHERE user_id = $1
              AND entry_type = $2
              AND ($3::VARCHAR IS NULL OR status = $3)
            "#,
        )
        .bind(user_id.value())
        .bind(entry_type.as_str())
        .bind(status.map(|s| s.as_str()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to sum entries: {}", e)))
    }
}

fn build_find_query(filter: &EntryFilter) -> Result<QueryBuilder<'static, Postgres>, DomainError> {
    let mut query = QueryBuilder::new(format!("SELECT {ENTRY_COLUMNS} FROM entries WHERE user_id = "));
    query.push_bind(filter.user_id.value());

    if let Some(description) = &filter.description {
        query
            .push(" AND description ILIKE ")
            .push_bind(format!("%{}%", escape_like(description)));
    }

    if let Some(month) = filter.month {
        query.push(" AND month = ").push_bind(month_to_db(month)?);
    }

    if let Some(year) = filter.year {
        query.push(" AND year = ").push_bind(year);
    }

    if let Some(entry_type) = filter.entry_type {
        query.push(" AND entry_type = ").push_bind(entry_type.as_str());
    }

    if let Some(status) = filter.status {
        query.push(" AND status = ").push_bind(status.as_str());
    }

    query.push(" ORDER BY id");

    Ok(query)
}

/// Escape LIKE wildcards so user input matches literally
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    escaped
}

/// Months are stored in an `INTEGER` column
fn month_to_db(month: u32) -> Result<i32, DomainError> {
    i32::try_from(month).map_err(|_| DomainError::validation(format!("Month {} out of range", month)))
}

fn write_error(operation: &str, e: sqlx::Error) -> DomainError {
    let foreign_key_violation = e
        .as_database_error()
        .is_some_and(|db| db.is_foreign_key_violation());

    if foreign_key_violation {
        DomainError::validation(USER_NOT_FOUND_FOR_ID)
    } else {
        DomainError::storage(format!("Failed to {} entry: {}", operation, e))
    }
}

fn row_to_entry(row: &PgRow) -> Result<Entry, DomainError> {
    let read = |e: sqlx::Error| DomainError::storage(format!("Invalid entry row: {}", e));

    let month: i32 = row.try_get("month").map_err(read)?;
    let entry_type: String = row.try_get("entry_type").map_err(read)?;
    let status: String = row.try_get("status").map_err(read)?;

    let entry = NewEntry {
        description: row.try_get("description").map_err(read)?,
        month: u32::try_from(month)
            .map_err(|_| DomainError::storage(format!("Invalid month in database: {}", month)))?,
        year: row.try_get("year").map_err(read)?,
        user_id: UserId::new(row.try_get("user_id").map_err(read)?),
        value: row.try_get("value").map_err(read)?,
        entry_type: entry_type
            .parse()
            .map_err(|e| DomainError::storage(format!("Invalid entry type in database: {}", e)))?,
        status: status
            .parse()
            .map_err(|e| DomainError::storage(format!("Invalid status in database: {}", e)))?,
    };

    Ok(Entry::from_new(
        EntryId::new(row.try_get("id").map_err(read)?),
        entry,
        row.try_get("registered_at").map_err(read)?,
    ))
}
