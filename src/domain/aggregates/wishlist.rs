//! Wishlist Aggregate

use serde::Serialize;
use crate::domain::value_objects::Money;

/// Outcome of liking a product: the entry was created, or an existing one removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WishToggle { Added, Removed }

/// Wishlist entry joined with its product.
#[derive(Clone, Debug, Serialize, sqlx::FromRow)]
pub struct WishListItem {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub product_slug: String,
    pub price: Money,
    pub discount: Money,
}

impl WishListItem {
    pub fn display_price(&self) -> Money { self.price.discounted(self.discount) }
}

/// Where the like action returns to, chosen by the `page_url` query parameter.
/// The product list template passes the value wrapped in single quotes.
pub fn like_redirect_target(page_url: Option<&str>) -> &'static str {
    match page_url.map(|v| v.trim_matches('\'')) {
        Some("products_page") => "/product/list",
        Some("home_page") => "/",
        // Unknown values return home as well.
        _ => "/",
    }
}
