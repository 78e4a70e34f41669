use anyhow::Context;
use async_trait::async_trait;
use uuid::Uuid;

use super::repo_types::{NewUser, User};
use crate::db::PgStore;

/// Session store: users keyed by their opaque session token.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, user: NewUser) -> anyhow::Result<User>;
    async fn find_by_session(&self, session_id: Uuid) -> anyhow::Result<Option<User>>;
    /// Replaces the user's session token; the old one stops resolving.
    async fn rotate_session(
        &self,
        user_id: Uuid,
        session_id: Uuid,
    ) -> anyhow::Result<Option<User>>;
    /// Removes the user together with all of their meals.
    async fn delete(&self, user_id: Uuid) -> anyhow::Result<bool>;
}

const USER_COLUMNS: &str = "id, session_id, name, email, avatar_url, created_at";

#[async_trait]
impl UserStore for PgStore {
    async fn create(&self, user: NewUser) -> anyhow::Result<User> {
        let row = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (id, session_id, name, email, avatar_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(user.session_id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.avatar_url)
        .fetch_one(&self.db)
        .await
        .context("insert user")?;
        Ok(row)
    }

    async fn find_by_session(&self, session_id: Uuid) -> anyhow::Result<Option<User>> {
        let row = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE session_id = $1"
        ))
        .bind(session_id)
        .fetch_optional(&self.db)
        .await
        .context("find user by session")?;
        Ok(row)
    }

    async fn rotate_session(
        &self,
        user_id: Uuid,
        session_id: Uuid,
    ) -> anyhow::Result<Option<User>> {
        let row = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET session_id = $2 WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(user_id)
        .bind(session_id)
        .fetch_optional(&self.db)
        .await
        .context("rotate session")?;
        Ok(row)
    }

    async fn delete(&self, user_id: Uuid) -> anyhow::Result<bool> {
        // meals go with it through ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.db)
            .await
            .context("delete user")?;
        Ok(result.rows_affected() > 0)
    }
}
