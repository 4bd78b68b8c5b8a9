//! Stream Aggregate
//!
//! A stream is a reseller's link to one product, sold at the product price
//! minus the stream's own discount.

use chrono::{DateTime, Utc};
use serde::Serialize;
use crate::domain::aggregates::order::OrderStatus;
use crate::domain::value_objects::Money;

#[derive(Clone, Debug, Serialize, sqlx::FromRow)]
pub struct Stream {
    pub id: i64,
    pub name: String,
    pub owner_id: i64,
    pub product_id: i64,
    pub discount: Money,
    pub count: i64,
    pub created_at: DateTime<Utc>,
}

/// Stream joined with its product, for the owner's stream list.
#[derive(Clone, Debug, Serialize, sqlx::FromRow)]
pub struct StreamListing {
    pub id: i64,
    pub name: String,
    pub product_name: String,
    pub product_slug: String,
    pub product_price: Money,
    pub discount: Money,
    pub count: i64,
}

impl StreamListing {
    pub fn price(&self) -> Money { self.product_price.discounted(self.discount) }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct StatusCounts {
    pub new_count: i64,
    pub ready_count: i64,
    pub deliver_count: i64,
    pub delivered_count: i64,
    pub cant_phone_count: i64,
    pub canceled_count: i64,
    pub archived_count: i64,
}

impl StatusCounts {
    pub fn get(&self, status: OrderStatus) -> i64 {
        match status {
            OrderStatus::New => self.new_count,
            OrderStatus::Ready => self.ready_count,
            OrderStatus::Deliver => self.deliver_count,
            OrderStatus::Delivered => self.delivered_count,
            OrderStatus::CantPhone => self.cant_phone_count,
            OrderStatus::Canceled => self.canceled_count,
            OrderStatus::Archived => self.archived_count,
        }
    }

    pub fn total(&self) -> i64 { OrderStatus::ALL.iter().map(|s| self.get(*s)).sum() }

    fn accumulate(&mut self, other: &StatusCounts) {
        self.new_count += other.new_count;
        self.ready_count += other.ready_count;
        self.deliver_count += other.deliver_count;
        self.delivered_count += other.delivered_count;
        self.cant_phone_count += other.cant_phone_count;
        self.canceled_count += other.canceled_count;
        self.archived_count += other.archived_count;
    }
}

/// One row of the statistics page: a stream with its views and per-status order counts.
#[derive(Clone, Debug, Serialize, sqlx::FromRow)]
pub struct StreamStatistics {
    pub id: i64,
    pub name: String,
    pub product_name: String,
    pub count: i64,
    #[sqlx(flatten)]
    pub orders: StatusCounts,
}

/// Grand totals across every stream of one owner.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StreamTotals {
    pub count: i64,
    pub orders: StatusCounts,
}

impl StreamTotals {
    pub fn from_streams(streams: &[StreamStatistics]) -> Self {
        streams.iter().fold(Self::default(), |mut acc, s| {
            acc.count += s.count;
            acc.orders.accumulate(&s.orders);
            acc
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64, count: i64, new_count: i64, canceled_count: i64) -> StreamStatistics {
        StreamStatistics {
            id, name: format!("s{id}"), product_name: "p".into(), count,
            orders: StatusCounts { new_count, canceled_count, ..Default::default() },
        }
    }

    #[test]
    fn test_totals_sum_each_status() {
        let rows = vec![row(1, 10, 2, 1), row(2, 5, 3, 0), row(3, 0, 0, 4)];
        let totals = StreamTotals::from_streams(&rows);
        assert_eq!(totals.count, 15);
        assert_eq!(totals.orders.new_count, 5);
        assert_eq!(totals.orders.canceled_count, 5);
        assert_eq!(totals.orders.total(), 10);
        for status in OrderStatus::ALL {
            let expected: i64 = rows.iter().map(|r| r.orders.get(status)).sum();
            assert_eq!(totals.orders.get(status), expected);
        }
    }

    #[test]
    fn test_totals_empty() {
        assert_eq!(StreamTotals::from_streams(&[]), StreamTotals::default());
    }

    #[test]
    fn test_listing_price() {
        let s = StreamListing {
            id: 1, name: "a".into(), product_name: "p".into(), product_slug: "p".into(),
            product_price: Money::new(90_000), discount: Money::new(10_000), count: 0,
        };
        assert_eq!(s.price(), Money::new(80_000));
    }
}
