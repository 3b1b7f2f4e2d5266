//! User domain methods on Repository

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::user::User,
};

impl Repository {
    /// Get user by ID
    pub async fn users_get_by_id(&self, id: i32) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    /// Look a user up by login name
    pub async fn users_get_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Insert a user with an already hashed password
    pub async fn users_create(
        &self,
        username: &str,
        password_hash: &str,
        is_staff: bool,
        can_mark_returned: bool,
    ) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash, is_staff, can_mark_returned)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(is_staff)
        .bind(can_mark_returned)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }
}
