//! Wishlist repository.

use chrono::Utc;
use sqlx::SqlitePool;

use super::RepositoryError;
use crate::domain::aggregates::{WishListItem, WishToggle};

pub struct WishListRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> WishListRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get-or-create the (user, product) entry; an entry that already existed is deleted.
    pub async fn toggle(&self, user_id: i64, product_id: i64) -> Result<WishToggle, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            "INSERT INTO wishlists (user_id, product_id, created_at) VALUES (?, ?, ?) \
             ON CONFLICT (user_id, product_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(product_id)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let outcome = if inserted == 1 {
            WishToggle::Added
        } else {
            sqlx::query("DELETE FROM wishlists WHERE user_id = ? AND product_id = ?")
                .bind(user_id)
                .bind(product_id)
                .execute(&mut *tx)
                .await?;
            WishToggle::Removed
        };

        tx.commit().await?;
        Ok(outcome)
    }

    pub async fn product_ids(&self, user_id: i64) -> Result<Vec<i64>, RepositoryError> {
        let ids = sqlx::query_scalar::<_, i64>("SELECT product_id FROM wishlists WHERE user_id = ?")
            .bind(user_id)
            .fetch_all(self.pool)
            .await?;
        Ok(ids)
    }

    pub async fn count_for_user(&self, user_id: i64) -> Result<i64, RepositoryError> {
        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM wishlists WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(self.pool)
            .await?;
        Ok(total.0)
    }

    pub async fn list_for_user(&self, user_id: i64, limit: i64, offset: i64) -> Result<Vec<WishListItem>, RepositoryError> {
        let items = sqlx::query_as::<_, WishListItem>(
            "SELECT w.id, w.product_id, p.name AS product_name, p.slug AS product_slug, p.price, p.discount \
             FROM wishlists w JOIN products p ON p.id = w.product_id \
             WHERE w.user_id = ? ORDER BY w.id LIMIT ? OFFSET ?",
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;
        Ok(items)
    }
}
