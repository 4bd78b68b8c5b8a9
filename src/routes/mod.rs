//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                          - Home page, products 3 per page
//! GET  /product/list              - Product list (?category=<slug>)
//! GET  /product/detail/{slug}     - Product detail
//! POST /product/detail/{slug}     - Place an order for the product
//! GET  /login/                    - Login page (also /login)
//! POST /login/                    - Sign in, creating the account on first use
//! GET  /logout                    - Sign out
//! GET  /wishlist                  - The user's wishlist
//! GET  /product/liked/{slug}      - Toggle a wishlist entry
//! GET  /product/order-list        - The user's orders
//! GET  /admin_page/market         - Reseller market (?category=<slug>)
//! GET  /payments                  - Payments dashboard
//! GET  /diagram, /requests, /councourse, /buttons - Static dashboards
//! POST /stream/form               - Create a stream
//! GET  /stream/statistics         - Per-stream order statistics
//! GET  /stream/list               - The user's streams
//! GET  /stream/in_detail/{slug}   - Product with the user's streams for it
//! GET  /oqim/{pk}                 - Stream order page, counts a view
//! POST /oqim/{pk}                 - Place an order through a stream
//! GET  /health                    - Health check
//! ```

pub mod auth;
pub mod catalog;
pub mod orders;
pub mod pages;
pub mod streams;
pub mod wishlist;

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Deserializer};
use validator::ValidationErrors;

use crate::state::AppState;

/// Products and wishlist entries per page.
pub const PAGE_SIZE: i64 = 3;

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CategoryQuery {
    pub category: Option<String>,
}

impl CategoryQuery {
    /// The category slug, ignoring an empty parameter.
    pub fn slug(&self) -> Option<&str> {
        self.category.as_deref().filter(|s| !s.is_empty())
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::home))
        .route("/product/list", get(catalog::product_list))
        .route("/product/detail/{slug}", get(orders::product_detail).post(orders::order_product))
        .route("/login/", get(auth::login_page).post(auth::login))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/wishlist", get(wishlist::index))
        .route("/product/liked/{slug}", get(wishlist::toggle))
        .route("/product/order-list", get(orders::order_list))
        .route("/admin_page/market", get(catalog::market))
        .route("/diagram", get(pages::diagram))
        .route("/payments", get(catalog::payments))
        .route("/requests", get(pages::requests))
        .route("/councourse", get(pages::concourse))
        .route("/stream/form", post(streams::create))
        .route("/stream/statistics", get(streams::statistics))
        .route("/stream/list", get(streams::list))
        .route("/stream/in_detail/{slug}", get(streams::in_detail))
        .route("/oqim/{pk}", get(orders::stream_detail).post(orders::order_stream))
        .route("/buttons", get(pages::buttons))
        .route("/health", get(|| async { Json(serde_json::json!({"status": "healthy", "service": "alijahon"})) }))
}

/// Deserialize a text field with surrounding whitespace removed, so a blank
/// value fails `length(min = 1)`.
pub fn trimmed<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    String::deserialize(deserializer).map(|s| s.trim().to_string())
}

/// Parse a whole-number form field. A cleared input arrives as an empty string.
pub fn parse_whole(raw: &str, message: &str) -> Result<i64, String> {
    raw.trim().parse().map_err(|_| message.to_string())
}

/// Flatten validator output into sorted `field: message` lines for templates.
pub fn form_errors(errors: &ValidationErrors) -> Vec<String> {
    let mut lines: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("{field}: {}", e.code),
            })
        })
        .collect();
    lines.sort();
    lines
}
