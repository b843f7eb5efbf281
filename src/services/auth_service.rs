//! Authentication service - Registration, login and token verification.
//!
//! Depends on the credential store for lookups and writes, on the password
//! hasher for hash/verify and on the token issuer for bearer tokens.
//! Holds no state of its own beyond those collaborators.

use async_trait::async_trait;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::{Config, TOKEN_TYPE_BEARER};
use crate::domain::{Claims, NewAccount, NewUser, PasswordHasher, TokenIssuer, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

/// Token response returned after successful authentication
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "bearer")
    #[schema(example = "bearer")]
    pub token_type: String,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new account with the default role.
    ///
    /// Fails with `DuplicateAccount` if the email is already on file.
    async fn register(&self, account: NewAccount) -> AppResult<User>;

    /// Check credentials and issue an access token.
    ///
    /// Fails with `AccountNotFound` for an unknown email and
    /// `InvalidCredentials` for a wrong password.
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse>;

    /// Verify an access token and extract its claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Concrete implementation of AuthService.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    hasher: PasswordHasher,
    tokens: TokenIssuer,
    access_token_lifetime: Duration,
}

impl Authenticator {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: PasswordHasher,
        tokens: TokenIssuer,
        access_token_lifetime: Duration,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
            access_token_lifetime,
        }
    }

    /// Build from configuration: work factor, signing secret and token lifetime.
    pub fn from_config(users: Arc<dyn UserRepository>, config: &Config) -> AppResult<Self> {
        Ok(Self::new(
            users,
            PasswordHasher::new(config.hash_work_factor)?,
            TokenIssuer::new(config.jwt_secret_bytes()),
            config.access_token_lifetime(),
        ))
    }
}

/// Run CPU-bound password work off the async executor.
async fn run_blocking<F, T>(f: F) -> AppResult<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::internal(format!("Password hashing task failed: {}", e)))
}

#[async_trait]
impl AuthService for Authenticator {
    #[tracing::instrument(name = "AuthService::register", skip_all, fields(email = %account.email))]
    async fn register(&self, account: NewAccount) -> AppResult<User> {
        // Friendlier error only; the store's unique constraint is authoritative
        if self.users.find_by_email(&account.email).await?.is_some() {
            tracing::warn!("Registration rejected: email already registered");
            return Err(AppError::DuplicateAccount);
        }

        let hasher = self.hasher.clone();
        let password = account.password;
        let password_hash = run_blocking(move || hasher.hash(&password))
            .await??
            .into_string();

        let user = self
            .users
            .create(NewUser {
                email: account.email,
                password_hash,
                first_name: account.first_name,
                last_name: account.last_name,
                school_id: account.school_id,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    #[tracing::instrument(name = "AuthService::login", skip_all, fields(email = %email))]
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse> {
        let Some(user) = self.users.find_by_email(&email).await? else {
            tracing::warn!("Login failed: no account for email");
            return Err(AppError::AccountNotFound);
        };

        let hasher = self.hasher.clone();
        let stored_hash = user.password_hash.clone();
        let password_valid = run_blocking(move || hasher.verify(&password, &stored_hash)).await?;

        if !password_valid {
            tracing::warn!(user_id = %user.id, "Login failed: incorrect password");
            return Err(AppError::InvalidCredentials);
        }

        let issued = self.tokens.issue(user.id, self.access_token_lifetime)?;
        tracing::info!(user_id = %user.id, expires_at = issued.claims.exp, "Access token issued");

        Ok(TokenResponse {
            access_token: issued.token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
        })
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        Ok(self.tokens.verify(token)?)
    }
}
