use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{AuthResponseDto, LoginRequestDto};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::services::password::verify_password;
use crate::features::auth::services::TokenService;
use crate::features::auth::SESSION_COOKIE;
use crate::features::users::UserService;

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Credential login and session cookie handling
pub struct AuthService {
    users: Arc<UserService>,
    tokens: Arc<TokenService>,
    secure_cookie: bool,
}

impl AuthService {
    pub fn new(users: Arc<UserService>, tokens: Arc<TokenService>, secure_cookie: bool) -> Self {
        Self {
            users,
            tokens,
            secure_cookie,
        }
    }

    /// Verify credentials and issue a session token
    pub async fn login(&self, dto: LoginRequestDto) -> Result<AuthResponseDto> {
        let user = self
            .users
            .find_by_username(&dto.username)
            .await?
            .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        if !verify_password(dto.password, user.password_hash.clone()).await? {
            tracing::info!("Failed login attempt for username={}", dto.username);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let authenticated = AuthenticatedUser {
            user_id: user.id,
            username: user.username,
        };
        let (access_token, expires_in) = self.tokens.issue_token(&authenticated)?;

        tracing::info!(
            "Admin logged in: id={}, username={}",
            authenticated.user_id,
            authenticated.username
        );

        Ok(AuthResponseDto {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
            user: authenticated,
        })
    }

    /// `Set-Cookie` value carrying the session token
    pub fn session_cookie(&self, token: &str) -> String {
        self.cookie(token, self.tokens.ttl().as_secs())
    }

    /// `Set-Cookie` value that removes the session cookie
    pub fn clear_cookie(&self) -> String {
        self.cookie("", 0)
    }

    fn cookie(&self, value: &str, max_age: u64) -> String {
        let mut cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            SESSION_COOKIE, value, max_age
        );
        if self.secure_cookie {
            cookie.push_str("; Secure");
        }
        cookie
    }
}
