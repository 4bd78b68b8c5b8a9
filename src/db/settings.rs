//! Site-wide settings. Only the first row is meaningful.

use sqlx::SqlitePool;

use super::RepositoryError;
use crate::domain::value_objects::Money;

pub struct SettingsRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SettingsRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Delivery fee from the first settings row; zero when none exists.
    pub async fn deliver_price(&self) -> Result<Money, RepositoryError> {
        let price = sqlx::query_scalar::<_, Money>("SELECT deliver_price FROM site_settings ORDER BY id LIMIT 1")
            .fetch_optional(self.pool)
            .await?;
        Ok(price.unwrap_or(Money::ZERO))
    }

    pub async fn insert(&self, deliver_price: Money) -> Result<i64, RepositoryError> {
        let id = sqlx::query_scalar::<_, i64>("INSERT INTO site_settings (deliver_price) VALUES (?) RETURNING id")
            .bind(deliver_price)
            .fetch_one(self.pool)
            .await?;
        Ok(id)
    }
}
