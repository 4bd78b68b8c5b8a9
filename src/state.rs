//! Application state shared across handlers.

use sqlx::SqlitePool;

/// Cheap to clone: the pool is reference-counted internally.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
}

impl AppState {
    #[must_use]
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}
