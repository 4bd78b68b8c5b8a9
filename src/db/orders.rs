//! Order repository.

use chrono::Utc;
use sqlx::SqlitePool;

use super::RepositoryError;
use crate::domain::aggregates::{NewOrder, Order, OrderLine, OrderStatus};

const ORDER_COLUMNS: &str = "id, user_id, product_id, stream_id, name, phone_number, quantity, status, created_at";

pub struct OrderRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a new order with status `new`.
    pub async fn create(&self, new: &NewOrder) -> Result<Order, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "INSERT INTO orders (user_id, product_id, stream_id, name, phone_number, quantity, status, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING {ORDER_COLUMNS}"
        ))
        .bind(new.user_id)
        .bind(new.product_id)
        .bind(new.stream_id)
        .bind(&new.name)
        .bind(&new.phone_number)
        .bind(new.quantity)
        .bind(OrderStatus::New)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await?;
        Ok(order)
    }

    /// The user's orders, newest first, priced with the stream discount when
    /// ordered through a stream and the product discount otherwise.
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<OrderLine>, RepositoryError> {
        let lines = sqlx::query_as::<_, OrderLine>(
            "SELECT o.id, p.name AS product_name, p.slug AS product_slug, o.stream_id, o.quantity, \
                    MAX(p.price - COALESCE(s.discount, p.discount), 0) AS unit_price, o.status, o.created_at \
             FROM orders o \
             JOIN products p ON p.id = o.product_id \
             LEFT JOIN streams s ON s.id = o.stream_id \
             WHERE o.user_id = ? ORDER BY o.created_at DESC, o.id DESC",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;
        Ok(lines)
    }

    /// Status changes happen in back-office tooling; tests use this to seed order states.
    /// Returns false when no order has that id.
    #[cfg(test)]
    pub(crate) async fn update_status(&self, id: i64, status: OrderStatus) -> Result<bool, RepositoryError> {
        let done = sqlx::query("UPDATE orders SET status = ? WHERE id = ?")
            .bind(status)
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(done.rows_affected() == 1)
    }
}
