use async_trait::async_trait;
use jiff::Timestamp;
use portal_core::repository::{ReadRepository, Repository, Result};
use portal_core::{LinkRecord, ShortCode, StorageError};
use sqlx::{MySqlPool, Row};

/// MySQL implementation of the repository contract.
///
/// The `links` table carries a primary key on `short_code`, so uniqueness
/// is enforced by the engine: two racing inserts admit exactly one winner
/// and the loser surfaces as [`StorageError::Conflict`]. Visit counts are
/// bumped with a single `UPDATE ... visit_count + 1` so concurrent
/// redirects never lose updates.
///
/// Reads return rows regardless of expiry; classifying a record as expired
/// is the caller's read-time concern and rows are never deleted.
#[derive(Debug, Clone)]
pub struct MySqlRepository {
    pool: MySqlPool,
}

impl MySqlRepository {
    /// Creates a repository from an existing MySQL connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Creates a repository by opening a new MySQL connection pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = MySqlPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

fn parse_timestamp(seconds: i64) -> Result<Timestamp> {
    Timestamp::from_second(seconds)
        .map_err(|e| StorageError::InvalidData(format!("invalid timestamp '{}': {e}", seconds)))
}

fn parse_expires_at(seconds: Option<i64>) -> Result<Option<Timestamp>> {
    seconds.map(parse_timestamp).transpose()
}

fn parse_visit_count(raw: i64) -> Result<u64> {
    u64::try_from(raw)
        .map_err(|_| StorageError::InvalidData(format!("negative visit_count '{}'", raw)))
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

#[async_trait]
impl ReadRepository for MySqlRepository {
    async fn get(&self, code: &ShortCode) -> Result<Option<LinkRecord>> {
        let row = sqlx::query(
            r#"
            SELECT original_url, created_at, expires_at, visit_count
            FROM links
            WHERE short_code = ?
            LIMIT 1
            "#,
        )
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let original_url: String = row.try_get("original_url").map_err(map_sqlx_error)?;
        let created_at_raw: i64 = row.try_get("created_at").map_err(map_sqlx_error)?;
        let expires_at_raw: Option<i64> = row.try_get("expires_at").map_err(map_sqlx_error)?;
        let visit_count_raw: i64 = row.try_get("visit_count").map_err(map_sqlx_error)?;

        Ok(Some(LinkRecord {
            original_url,
            created_at: parse_timestamp(created_at_raw)?,
            expires_at: parse_expires_at(expires_at_raw)?,
            visit_count: parse_visit_count(visit_count_raw)?,
        }))
    }

    async fn exists(&self, code: &ShortCode) -> Result<bool> {
        let exists = sqlx::query(
            r#"
            SELECT 1
            FROM links
            WHERE short_code = ?
            LIMIT 1
            "#,
        )
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .is_some();

        Ok(exists)
    }
}

#[async_trait]
impl Repository for MySqlRepository {
    async fn insert(&self, code: &ShortCode, record: LinkRecord) -> Result<()> {
        let expires_at = record.expires_at.map(|ts| ts.as_second());
        let visit_count = i64::try_from(record.visit_count).map_err(|_| {
            StorageError::InvalidData(format!("visit_count overflow '{}'", record.visit_count))
        })?;

        let result = sqlx::query(
            r#"
            INSERT INTO links (short_code, original_url, created_at, expires_at, visit_count)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(code.as_str())
        .bind(record.original_url)
        .bind(record.created_at.as_second())
        .bind(expires_at)
        .bind(visit_count)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => Err(StorageError::Conflict(code.to_string())),
            Err(err) => Err(map_sqlx_error(err)),
        }
    }

    async fn increment_visit(&self, code: &ShortCode) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE links
            SET visit_count = visit_count + 1
            WHERE short_code = ?
            "#,
        )
        .bind(code.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(code.to_string()));
        }

        Ok(())
    }
}
