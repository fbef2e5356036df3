use sqlx::SqlitePool;

use crate::core::database::map_db_error;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::services::password::hash_password;
use crate::features::users::dtos::{CreateUserDto, UpdateUserDto, UserResponseDto};
use crate::features::users::models::User;

const USER_COLUMNS: &str = "id, username, password_hash, email, created_at";
const DUPLICATE_USER: &str = "A user with this username or email already exists";

/// Service for admin user accounts
pub struct UserService {
    pool: SqlitePool,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(pool: SqlitePool, bcrypt_cost: u32) -> Self {
        Self { pool, bcrypt_cost }
    }

    /// List all users, newest first
    pub async fn list(&self) -> Result<Vec<UserResponseDto>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users ORDER BY created_at DESC, id DESC",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list users: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(users.into_iter().map(Into::into).collect())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<User> {
        sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch user {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE username = ?",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch user by username: {:?}", e);
            AppError::Database(e)
        })
    }

    pub async fn create(&self, dto: CreateUserDto) -> Result<UserResponseDto> {
        if self.find_by_username(&dto.username).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "User '{}' already exists",
                dto.username
            )));
        }

        let password_hash = hash_password(dto.password, self.bcrypt_cost).await?;

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, password_hash, email) VALUES (?, ?, ?) RETURNING {}",
            USER_COLUMNS
        ))
        .bind(&dto.username)
        .bind(&password_hash)
        .bind(&dto.email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error(e, DUPLICATE_USER))?;

        tracing::info!("User created: id={}, username={}", user.id, user.username);

        Ok(user.into())
    }

    pub async fn update(&self, id: i64, dto: UpdateUserDto) -> Result<UserResponseDto> {
        let password_hash = match dto.password {
            Some(password) => Some(hash_password(password, self.bcrypt_cost).await?),
            None => None,
        };

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET username = ?, email = ?, password_hash = COALESCE(?, password_hash)
            WHERE id = ?
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(&dto.username)
        .bind(&dto.email)
        .bind(password_hash)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error(e, DUPLICATE_USER))?
        .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))?;

        tracing::info!("User updated: id={}", user.id);

        Ok(user.into())
    }

    /// Delete a user; admins cannot delete the account they are logged in with
    pub async fn delete(&self, id: i64, current: &AuthenticatedUser) -> Result<()> {
        if id == current.user_id {
            return Err(AppError::BadRequest(
                "You cannot delete your own account".to_string(),
            ));
        }

        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete user {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User with id {} not found", id)));
        }

        tracing::info!("User deleted: id={}", id);
        Ok(())
    }

    /// Create the bootstrap admin account when it does not exist yet.
    ///
    /// Returns `true` when a user was created.
    pub async fn ensure_default_admin(
        &self,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<bool> {
        if self.find_by_username(username).await?.is_some() {
            return Ok(false);
        }

        let password_hash = hash_password(password.to_string(), self.bcrypt_cost).await?;

        sqlx::query("INSERT INTO users (username, password_hash, email) VALUES (?, ?, ?)")
            .bind(username)
            .bind(&password_hash)
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error(e, DUPLICATE_USER))?;

        Ok(true)
    }
}
