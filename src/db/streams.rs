//! Stream repository and the per-owner statistics query.

use chrono::Utc;
use sqlx::SqlitePool;

use super::RepositoryError;
use crate::domain::aggregates::{Stream, StreamListing, StreamStatistics};
use crate::domain::value_objects::Money;

const STREAM_COLUMNS: &str = "id, name, owner_id, product_id, discount, count, created_at";

#[derive(Clone, Debug)]
pub struct NewStream {
    pub owner_id: i64,
    pub product_id: i64,
    pub name: String,
    pub discount: Money,
}

pub struct StreamRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> StreamRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: &NewStream) -> Result<Stream, RepositoryError> {
        let stream = sqlx::query_as::<_, Stream>(&format!(
            "INSERT INTO streams (name, owner_id, product_id, discount, count, created_at) \
             VALUES (?, ?, ?, ?, 0, ?) RETURNING {STREAM_COLUMNS}"
        ))
        .bind(&new.name)
        .bind(new.owner_id)
        .bind(new.product_id)
        .bind(new.discount)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await?;
        Ok(stream)
    }

    pub async fn get(&self, id: i64) -> Result<Option<Stream>, RepositoryError> {
        let stream = sqlx::query_as::<_, Stream>(&format!("SELECT {STREAM_COLUMNS} FROM streams WHERE id = ?"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(stream)
    }

    /// Bump the view counter in place. Returns false when the stream does not exist.
    pub async fn record_view(&self, id: i64) -> Result<bool, RepositoryError> {
        let done = sqlx::query("UPDATE streams SET count = count + 1 WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(done.rows_affected() == 1)
    }

    pub async fn list_for_owner(&self, owner_id: i64) -> Result<Vec<StreamListing>, RepositoryError> {
        let streams = sqlx::query_as::<_, StreamListing>(
            "SELECT s.id, s.name, p.name AS product_name, p.slug AS product_slug, \
                    p.price AS product_price, s.discount, s.count \
             FROM streams s JOIN products p ON p.id = s.product_id \
             WHERE s.owner_id = ? ORDER BY s.id DESC",
        )
        .bind(owner_id)
        .fetch_all(self.pool)
        .await?;
        Ok(streams)
    }

    pub async fn list_for_product_and_owner(&self, product_id: i64, owner_id: i64) -> Result<Vec<StreamListing>, RepositoryError> {
        let streams = sqlx::query_as::<_, StreamListing>(
            "SELECT s.id, s.name, p.name AS product_name, p.slug AS product_slug, \
                    p.price AS product_price, s.discount, s.count \
             FROM streams s JOIN products p ON p.id = s.product_id \
             WHERE s.product_id = ? AND s.owner_id = ? ORDER BY s.id",
        )
        .bind(product_id)
        .bind(owner_id)
        .fetch_all(self.pool)
        .await?;
        Ok(streams)
    }

    /// Every stream of the owner with its view count and per-status order counts.
    pub async fn statistics_for_owner(&self, owner_id: i64) -> Result<Vec<StreamStatistics>, RepositoryError> {
        let rows = sqlx::query_as::<_, StreamStatistics>(
            "SELECT s.id, s.name, p.name AS product_name, s.count, \
                    COUNT(CASE WHEN o.status = 'new' THEN 1 END) AS new_count, \
                    COUNT(CASE WHEN o.status = 'ready' THEN 1 END) AS ready_count, \
                    COUNT(CASE WHEN o.status = 'deliver' THEN 1 END) AS deliver_count, \
                    COUNT(CASE WHEN o.status = 'delivered' THEN 1 END) AS delivered_count, \
                    COUNT(CASE WHEN o.status = 'cant_phone' THEN 1 END) AS cant_phone_count, \
                    COUNT(CASE WHEN o.status = 'canceled' THEN 1 END) AS canceled_count, \
                    COUNT(CASE WHEN o.status = 'archived' THEN 1 END) AS archived_count \
             FROM streams s \
             JOIN products p ON p.id = s.product_id \
             LEFT JOIN orders o ON o.stream_id = s.id \
             WHERE s.owner_id = ? \
             GROUP BY s.id, s.name, p.name, s.count \
             ORDER BY s.id",
        )
        .bind(owner_id)
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }
}
