use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// A user account row. The password hash never leaves the server; API
/// responses are built from the other fields plus a token
/// ([`crate::auth::AuthResponse`]).
#[derive(Debug, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
