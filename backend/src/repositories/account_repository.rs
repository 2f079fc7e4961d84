//! Database repository for account storage.
//!
//! Defines the `AccountDirectory` seam the credential service works against
//! and its SQLite implementation. Email uniqueness is enforced by the
//! `UNIQUE` constraint on `accounts.email`.

use crate::database::models::{Account, NewAccount};
use crate::errors::DirectoryError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

/// Persistent store of registered accounts keyed by email.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Looks up an account by exact (case-sensitive) email.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DirectoryError>;

    /// Stores a new account.
    ///
    /// # Errors
    /// `DirectoryError::DuplicateEmail` if the email is already taken,
    /// `DirectoryError::Storage` for any other failure
    async fn insert(&self, account: NewAccount) -> Result<Account, DirectoryError>;
}

/// Repository for account database operations.
pub struct AccountRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> AccountRepository<'a> {
    /// Creates a new AccountRepository instance.
    ///
    /// # Arguments
    /// * `pool` - Reference to SQLite connection pool
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountDirectory for AccountRepository<'_> {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DirectoryError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, email, name, password_hash, created_at
            FROM accounts WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| DirectoryError::Storage(e.into()))?;

        Ok(account)
    }

    async fn insert(&self, account: NewAccount) -> Result<Account, DirectoryError> {
        let created = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (id, email, name, password_hash, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, email, name, password_hash, created_at
            "#,
        )
        .bind(&account.id)
        .bind(&account.email)
        .bind(&account.name)
        .bind(&account.password_hash)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await
        .map_err(|e| DirectoryError::from_sqlx(e, &account.email))?;

        Ok(created)
    }
}
