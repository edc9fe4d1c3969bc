//! Authentication service
//!
//! Implements login and registration on top of the account repository,
//! the password hasher and the token service:
//! - Registration with unique usernames and salted password hashes
//! - Login issuing a signed session token with the account's role
//! - Token authentication for the HTTP middleware
//! - Demo account seeding

use crate::db::repositories::UserRepository;
use crate::models::{UserAccount, UserRole};
use crate::services::password::{hash_password, verify_password};
use crate::services::token::{Claims, TokenError, TokenService};
use anyhow::Context;
use serde::Serialize;
use std::sync::Arc;

/// Error types for authentication operations
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Unknown username or wrong password; both map to this one variant
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Username already taken
    #[error("Username '{0}' is already taken")]
    DuplicateUsername(String),

    /// Validation error (invalid input)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Token rejected
    #[error(transparent)]
    Token(#[from] TokenError),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// A login account created at startup for demonstrations
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DemoAccount {
    pub username: &'static str,
    pub password: &'static str,
    pub role: UserRole,
    #[serde(skip)]
    pub related_id: Option<i64>,
}

/// Demo accounts: one per role, linked to the first demo teacher and student
pub const DEMO_ACCOUNTS: [DemoAccount; 3] = [
    DemoAccount {
        username: "admin",
        password: "admin123",
        role: UserRole::Admin,
        related_id: None,
    },
    DemoAccount {
        username: "teacher",
        password: "teacher123",
        role: UserRole::Teacher,
        related_id: Some(1),
    },
    DemoAccount {
        username: "parent",
        password: "parent123",
        role: UserRole::Parent,
        related_id: Some(1),
    },
];

/// Input for account registration
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub username: String,
    pub password: String,
    pub role: UserRole,
    pub related_id: Option<i64>,
}

impl RegisterInput {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        role: UserRole,
        related_id: Option<i64>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            role,
            related_id,
        }
    }
}

/// Input for login
#[derive(Debug, Clone)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

impl LoginInput {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct LoginSession {
    /// Signed session token
    pub token: String,
    pub account: UserAccount,
}

/// Authentication service
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(user_repo: Arc<dyn UserRepository>, tokens: TokenService) -> Self {
        Self { user_repo, tokens }
    }

    /// Register a new account
    ///
    /// Ids are assigned by the repository (highest id so far plus one).
    /// The returned account never carries the plaintext password.
    ///
    /// # Errors
    ///
    /// - `ValidationError` if username or password is empty
    /// - `DuplicateUsername` if the username is taken
    pub async fn register(&self, input: RegisterInput) -> Result<UserAccount, AuthError> {
        let username = input.username.trim().to_string();
        if username.is_empty() {
            return Err(AuthError::ValidationError("Username is required".to_string()));
        }
        if input.password.is_empty() {
            return Err(AuthError::ValidationError("Password is required".to_string()));
        }

        // Checked before hashing; the insert below re-checks atomically.
        if self
            .user_repo
            .get_by_username(&username)
            .await
            .context("Failed to check username")?
            .is_some()
        {
            return Err(AuthError::DuplicateUsername(username));
        }

        let password = input.password;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .context("Password hashing task failed")??;

        let account = UserAccount::new(username.clone(), password_hash, input.role, input.related_id);
        let created = self
            .user_repo
            .create(&account)
            .await
            .context("Failed to create account")?
            .ok_or(AuthError::DuplicateUsername(username))?;

        tracing::info!("Registered account '{}' with role {}", created.username, created.role);
        Ok(created)
    }

    /// Login with credentials
    ///
    /// # Errors
    ///
    /// - `InvalidCredentials` if the username is unknown or the password is wrong
    pub async fn login(&self, input: LoginInput) -> Result<LoginSession, AuthError> {
        let username = input.username.trim();
        let account = match self
            .user_repo
            .get_by_username(username)
            .await
            .context("Failed to look up account")?
        {
            Some(account) => account,
            None => {
                tracing::warn!("Failed login for '{}'", username);
                return Err(AuthError::InvalidCredentials);
            }
        };

        let password = input.password;
        let hash = account.password_hash.clone();
        let password_valid = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .context("Password verification task failed")?;

        if !password_valid {
            tracing::warn!("Failed login for '{}'", account.username);
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(&account.username, account.role, account.id)?;
        tracing::info!("User '{}' logged in as {}", account.username, account.role);

        Ok(LoginSession { token, account })
    }

    /// Verify a presented session token
    pub fn authenticate(&self, token: &str) -> Result<Claims, AuthError> {
        Ok(self.tokens.verify(token)?)
    }

    /// Get an account by id
    pub async fn get_account(&self, id: i64) -> Result<Option<UserAccount>, AuthError> {
        let account = self
            .user_repo
            .get_by_id(id)
            .await
            .context("Failed to get account by ID")?;
        Ok(account)
    }

    /// Create the demo accounts if no account exists yet
    pub async fn seed_demo_accounts(&self) -> Result<(), AuthError> {
        if self.user_repo.count().await.context("Failed to count accounts")? > 0 {
            return Ok(());
        }

        for demo in DEMO_ACCOUNTS {
            self.register(RegisterInput::new(
                demo.username,
                demo.password,
                demo.role,
                demo.related_id,
            ))
            .await?;
        }
        tracing::info!("Seeded {} demo accounts", DEMO_ACCOUNTS.len());
        Ok(())
    }
}
