//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use longbox_core::UserId;

/// A Longbox user.
///
/// The password hash is deliberately kept out of this type; it only ever
/// travels through `UserRepository::get_password_hash`.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address.
    pub email: String,
    /// Optional display name.
    pub name: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}
