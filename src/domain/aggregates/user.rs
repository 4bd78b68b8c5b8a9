//! User Aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account identified by its normalized phone number. The password hash is
/// never loaded into this type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
}
