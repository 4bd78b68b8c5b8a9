//! Catalog aggregates

use chrono::{DateTime, Utc};
use serde::Serialize;
use crate::domain::value_objects::Money;

#[derive(Clone, Debug, Serialize, sqlx::FromRow)]
pub struct Category { pub id: i64, pub name: String, pub slug: String }

#[derive(Clone, Debug, Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: Money,
    pub discount: Money,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Price shown on the product's own page: list price minus the product discount.
    pub fn display_price(&self) -> Money { self.price.discounted(self.discount) }

    /// Price under some other discount, e.g. a reseller stream's.
    pub fn price_with(&self, discount: Money) -> Money { self.price.discounted(discount) }

    pub fn has_discount(&self) -> bool { self.discount > Money::ZERO }
}

#[cfg(test)]
pub(crate) fn sample(id: i64, price: i64, discount: i64) -> Product {
    Product {
        id, category_id: 1, name: format!("Product {id}"), slug: format!("product-{id}"),
        description: String::new(), price: Money::new(price), discount: Money::new(discount), created_at: Utc::now(),
    }
}
