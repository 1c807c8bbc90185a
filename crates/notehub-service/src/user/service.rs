//! Registration, login, and token refresh.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use notehub_auth::jwt::{JwtDecoder, JwtEncoder, TokenPair};
use notehub_auth::password::{PasswordHasher, PasswordValidator};
use notehub_core::error::AppError;
use notehub_core::result::AppResult;
use notehub_database::traits::UserStore;
use notehub_entity::user::{MAX_USERNAME_LEN, NewUser, User};

use crate::context::RequestContext;

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    /// The authenticated user.
    pub user: User,
    /// Freshly issued tokens.
    pub tokens: TokenPair,
}

/// Handles account registration and credential checks.
#[derive(Clone)]
pub struct AuthService {
    /// User collection.
    users: Arc<dyn UserStore>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password validator.
    validator: Arc<PasswordValidator>,
    /// Token issuer.
    encoder: Arc<JwtEncoder>,
    /// Token verifier.
    decoder: Arc<JwtDecoder>,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService").finish_non_exhaustive()
    }
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
    ) -> Self {
        Self {
            users,
            hasher,
            validator,
            encoder,
            decoder,
        }
    }

    /// Registers a new account.
    pub async fn register(&self, username: &str, password: &str) -> AppResult<User> {
        if username.is_empty() {
            return Err(AppError::validation("Username is required."));
        }
        if username.chars().count() > MAX_USERNAME_LEN {
            return Err(AppError::validation(format!(
                "Username must not exceed {MAX_USERNAME_LEN} characters."
            )));
        }
        self.validator.validate(password)?;

        if self.users.find_user_by_username(username).await?.is_some() {
            return Err(AppError::conflict("Username already exists"));
        }

        let password_hash = self.hasher.hash_password(password)?;
        let user = self
            .users
            .insert_user(&NewUser {
                username: username.to_string(),
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Checks credentials and issues an access/refresh token pair.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<LoginResult> {
        let user = match self.users.find_user_by_username(username).await? {
            Some(user) if self.hasher.verify_password(password, &user.password_hash)? => user,
            _ => {
                warn!(username = %username, "Login failed");
                return Err(AppError::authentication("Invalid credentials"));
            }
        };

        let tokens = self.encoder.generate_token_pair(user.id, &user.username)?;
        info!(user_id = %user.id, "User logged in");
        Ok(LoginResult { user, tokens })
    }

    /// Exchanges a refresh token for a new access token.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<(String, DateTime<Utc>)> {
        let claims = self
            .decoder
            .decode_refresh_token(refresh_token)
            .map_err(|_| AppError::authentication("Invalid or expired refresh token"))?;

        let user = self
            .users
            .find_user(claims.user_id())
            .await?
            .ok_or_else(|| AppError::authentication("Invalid or expired refresh token"))?;

        self.encoder.generate_access_token(user.id, &user.username)
    }

    /// Loads the account behind the current request.
    pub async fn me(&self, ctx: &RequestContext) -> AppResult<User> {
        self.users
            .find_user(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
