use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct User {
    pub id: Uuid,
    pub session_id: Option<Uuid>, // current session token, overwritten on reissue
    pub name: String,
    pub email: String,
    pub avatar_url: String,
    pub created_at: OffsetDateTime,
}

/// Validated registration, session token already minted.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub session_id: Uuid,
    pub name: String,
    pub email: String,
    pub avatar_url: String,
}
