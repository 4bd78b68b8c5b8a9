//! Alijahon storefront
//!
//! Dropship store where resellers open "streams" (oqim) on catalog products.
//!
//! ## Features
//! - Catalog browsing with category filters
//! - Phone-number login that creates accounts on first use
//! - Wishlists
//! - Orders, directly or through a reseller stream
//! - Per-stream order statistics

pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tower_sessions::{cookie::time::Duration, cookie::SameSite, Expiry, SessionManagerLayer, SessionStore};

use crate::auth::SESSION_COOKIE_NAME;
use crate::config::Config;
use crate::state::AppState;

/// Sessions expire after two weeks without a request.
const SESSION_IDLE_DAYS: i64 = 14;

/// Build the full application: routes, static files, sessions and request tracing.
pub fn app<S>(state: AppState, store: S, config: &Config) -> Router
where
    S: SessionStore + Clone,
{
    let sessions = SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(Duration::days(SESSION_IDLE_DAYS)))
        .with_secure(config.secure_cookie)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/");

    routes::router()
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .nest_service("/media", ServeDir::new(&config.media_dir))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(sessions))
        .with_state(state)
}
