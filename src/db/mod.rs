//! Database access over SQLite.
//!
//! # Tables
//!
//! - `users` - phone-number accounts with Argon2 password hashes
//! - `categories`, `products` - the catalog
//! - `wishlists` - one row per liked (user, product)
//! - `streams` - reseller links with their own discount and view counter
//! - `orders` - placed orders, optionally through a stream
//! - `site_settings` - global values; only the first row is read
//!
//! Migrations live in `migrations/` and are embedded into the binary.

pub mod catalog;
pub mod orders;
pub mod settings;
pub mod streams;
pub mod users;
pub mod wishlist;

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use thiserror::Error;

pub use catalog::{CatalogRepository, NewProduct};
pub use orders::OrderRepository;
pub use settings::SettingsRepository;
pub use streams::{NewStream, StreamRepository};
pub use users::UserRepository;
pub use wishlist::WishListRepository;

/// Errors raised by repositories.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A unique constraint rejected the write.
    #[error("conflict: {0}")]
    Conflict(String),
}

/// Maps unique violations to `Conflict`, everything else to `Database`.
pub(crate) fn map_unique(what: &str) -> impl FnOnce(sqlx::Error) -> RepositoryError + '_ {
    move |e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return RepositoryError::Conflict(format!("{what} already exists"));
            }
        }
        RepositoryError::Database(e)
    }
}

/// Open a SQLite pool, creating the database file if needed.
///
/// In-memory URLs give every connection its own database, so callers pass
/// `max_connections = 1` for them. Connections are never recycled for the
/// same reason.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is malformed or the connection fails.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}

/// Apply the embedded schema migrations.
///
/// # Errors
///
/// Returns `MigrateError` if a migration fails or the history diverges.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Single-connection in-memory database with the schema applied.
#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let pool = create_pool("sqlite::memory:", 1).await.unwrap();
    migrate(&pool).await.unwrap();
    pool
}
