//! User repository.

use chrono::Utc;
use sqlx::SqlitePool;

use super::{map_unique, RepositoryError};
use crate::domain::aggregates::User;
use crate::domain::value_objects::PhoneNumber;

#[derive(sqlx::FromRow)]
struct CredentialRow {
    id: i64,
    phone_number: String,
    password_hash: String,
    created_at: chrono::DateTime<Utc>,
}

pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Look up a user together with the stored password hash.
    pub async fn get_credentials(&self, phone: &PhoneNumber) -> Result<Option<(User, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            "SELECT id, phone_number, password_hash, created_at FROM users WHERE phone_number = ?",
        )
        .bind(phone.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|r| {
            let user = User { id: r.id, phone_number: r.phone_number, created_at: r.created_at };
            (user, r.password_hash)
        }))
    }

    /// Create a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the phone number is taken.
    pub async fn create(&self, phone: &PhoneNumber, password_hash: &str) -> Result<User, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (phone_number, password_hash, created_at) VALUES (?, ?, ?) \
             RETURNING id, phone_number, created_at",
        )
        .bind(phone.as_str())
        .bind(password_hash)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await
        .map_err(map_unique("phone number"))?;
        Ok(user)
    }
}
