//! Authentication service - login, password change and token checks.
//!
//! Tokens are stateless HS256 JWTs. Nothing is stored server-side, so a
//! token stays valid until it expires even after logout or a password change.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::Config;
use crate::domain::{Password, User, UserResponse};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,
    pub username: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub user: UserResponse,
}

/// Password change request
#[derive(Debug, Clone)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
    /// Checked against `new_password` only when supplied
    pub confirm_password: Option<String>,
}

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check credentials and issue a token
    async fn login(&self, username: String, password: String) -> AppResult<LoginOutcome>;

    /// Replace the password of the authenticated account
    async fn change_password(&self, user_id: i32, change: PasswordChange) -> AppResult<()>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

fn generate_token(user: &User, config: &Config) -> AppResult<String> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.id,
        username: user.username.clone(),
        role: user.role.to_string(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?)
}

fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// Rules a new password must pass before the current one is checked
fn check_new_password(change: &PasswordChange) -> AppResult<()> {
    if change.current_password.is_empty() || change.new_password.is_empty() {
        return Err(AppError::validation(
            "Current password and new password are required",
        ));
    }
    Password::check_length(&change.new_password)?;
    if let Some(confirm) = &change.confirm_password {
        if confirm != &change.new_password {
            return Err(AppError::validation("Passwords do not match"));
        }
    }
    if change.new_password == change.current_password {
        return Err(AppError::validation(
            "New password must be different from current password",
        ));
    }
    Ok(())
}

/// `AuthService` over a Unit of Work
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn login(&self, username: String, password: String) -> AppResult<LoginOutcome> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AppError::validation("Username and password are required"));
        }

        let user = self.uow.users().find_by_username(username.trim()).await?;

        // Unknown usernames still pay for one hash verification
        let password_valid = match &user {
            Some(user) => Password::from_hash(user.password_hash.clone()).verify(&password),
            None => Password::dummy().verify(&password),
        };

        match user {
            Some(user) if password_valid => {
                let token = generate_token(&user, &self.config)?;
                tracing::info!(user_id = user.id, "User logged in");
                Ok(LoginOutcome {
                    token,
                    user: UserResponse::from(&user),
                })
            }
            _ => Err(AppError::InvalidCredentials),
        }
    }

    async fn change_password(&self, user_id: i32, change: PasswordChange) -> AppResult<()> {
        check_new_password(&change)?;

        let user = self
            .uow
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !Password::from_hash(user.password_hash).verify(&change.current_password) {
            return Err(AppError::InvalidCredentials);
        }

        let new_hash = Password::new(&change.new_password)?.into_string();
        self.uow.users().update_password(user_id, new_hash).await?;

        tracing::info!(user_id, "Password changed");
        Ok(())
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token_internal(token, &self.config)
    }
}
