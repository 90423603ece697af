//! Staff directory repository.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use voltio_core::{StaffId, StaffRole};

use super::RepositoryError;
use crate::models::staff::StaffAccount;

const STAFF_COLUMNS: &str = "id, username, password_hash, display_name, role, created_at";

/// Raw staff row; the role string is validated on conversion.
#[derive(sqlx::FromRow)]
struct StaffRow {
    id: i64,
    username: String,
    password_hash: String,
    display_name: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<StaffRow> for StaffAccount {
    type Error = RepositoryError;

    fn try_from(row: StaffRow) -> Result<Self, Self::Error> {
        let role: StaffRole = row.role.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid role in database: {e}"))
        })?;

        Ok(Self {
            id: StaffId::new(row.id),
            username: row.username,
            password_hash: row.password_hash,
            display_name: row.display_name,
            role,
            created_at: row.created_at,
        })
    }
}

/// Repository for staff directory operations.
pub struct StaffRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> StaffRepository<'a> {
    /// Create a new staff repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Look up a staff account by its unique username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored role is invalid.
    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<StaffAccount>, RepositoryError> {
        let sql = format!("SELECT {STAFF_COLUMNS} FROM staff WHERE username = ?");
        let row = sqlx::query_as::<_, StaffRow>(&sql)
            .bind(username)
            .fetch_optional(self.pool)
            .await?;

        row.map(StaffAccount::try_from).transpose()
    }

    /// List every staff account, oldest first, for the employees page.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if any stored role is invalid.
    pub async fn list_all(&self) -> Result<Vec<StaffAccount>, RepositoryError> {
        let sql = format!("SELECT {STAFF_COLUMNS} FROM staff ORDER BY id ASC");
        let rows = sqlx::query_as::<_, StaffRow>(&sql)
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(StaffAccount::try_from).collect()
    }

    /// Insert a new staff account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        username: &str,
        password_hash: &str,
        display_name: &str,
        role: StaffRole,
    ) -> Result<StaffAccount, RepositoryError> {
        let sql = format!(
            "INSERT INTO staff (username, password_hash, display_name, role) \
             VALUES (?, ?, ?, ?) \
             RETURNING {STAFF_COLUMNS}"
        );
        let row = sqlx::query_as::<_, StaffRow>(&sql)
            .bind(username)
            .bind(password_hash)
            .bind(display_name)
            .bind(role.as_str())
            .fetch_one(self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_unique_violation()
                {
                    return RepositoryError::Conflict("username already exists".to_owned());
                }
                RepositoryError::Database(e)
            })?;

        StaffAccount::try_from(row)
    }
}
