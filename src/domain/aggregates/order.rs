//! Order Aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use crate::domain::value_objects::Money;

/// Fulfilment state of an order. Stored as snake_case text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus { #[default] New, Ready, Deliver, Delivered, CantPhone, Canceled, Archived }

impl OrderStatus {
    pub const ALL: [OrderStatus; 7] = [
        Self::New, Self::Ready, Self::Deliver, Self::Delivered, Self::CantPhone, Self::Canceled, Self::Archived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Ready => "ready",
            Self::Deliver => "deliver",
            Self::Delivered => "delivered",
            Self::CantPhone => "cant_phone",
            Self::Canceled => "canceled",
            Self::Archived => "archived",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Ready => "Ready",
            Self::Deliver => "Delivering",
            Self::Delivered => "Delivered",
            Self::CantPhone => "Could not reach",
            Self::Canceled => "Canceled",
            Self::Archived => "Archived",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

#[derive(Clone, Debug, Serialize, sqlx::FromRow)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub product_id: i64,
    pub stream_id: Option<i64>,
    pub name: String,
    pub phone_number: String,
    pub quantity: i64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Order joined with the product it was placed for, as listed to its owner.
#[derive(Clone, Debug, Serialize, sqlx::FromRow)]
pub struct OrderLine {
    pub id: i64,
    pub product_name: String,
    pub product_slug: String,
    pub stream_id: Option<i64>,
    pub quantity: i64,
    pub unit_price: Money,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl OrderLine {
    pub fn total(&self) -> Money { self.unit_price.multiply(self.quantity) }
}

/// Insert payload; the owning user is mandatory.
#[derive(Clone, Debug)]
pub struct NewOrder {
    pub user_id: i64,
    pub product_id: i64,
    pub stream_id: Option<i64>,
    pub name: String,
    pub phone_number: String,
    pub quantity: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text_matches_storage() {
        assert_eq!(OrderStatus::CantPhone.as_str(), "cant_phone");
        assert_eq!(serde_json::to_string(&OrderStatus::CantPhone).unwrap(), "\"cant_phone\"");
        assert_eq!(OrderStatus::default(), OrderStatus::New);
        assert_eq!(OrderStatus::ALL.len(), 7);
    }

    #[test]
    fn test_order_line_total() {
        let line = OrderLine {
            id: 1, product_name: "Kettle".into(), product_slug: "kettle".into(), stream_id: None,
            quantity: 3, unit_price: Money::new(40_000), status: OrderStatus::New, created_at: Utc::now(),
        };
        assert_eq!(line.total(), Money::new(120_000));
    }
}
