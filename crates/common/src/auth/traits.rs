//! Traits for identity and credential-store operations
//!
//! These traits enable dependency injection and testing by abstracting
//! external dependencies (identity provider, platform secret storage).

use async_trait::async_trait;
use thiserror::Error;

use super::client::IdentityError;
use super::types::{AuthTokens, IdentityUser, SignUpOutcome};

/// Errors raised by a credential store backend
#[derive(Debug, Error)]
pub enum CredentialStoreError {
    #[error("secret not found")]
    NotFound,

    #[error("secret storage error: {0}")]
    Storage(String),
}

/// Opaque key-value secret storage
///
/// Backed by the platform keychain in production and by an in-memory map in
/// tests. Operations are synchronous; the underlying platform APIs block only
/// briefly.
pub trait CredentialStore: Send + Sync {
    /// Store a secret, overwriting any existing value
    fn set(&self, key: &str, value: &str) -> Result<(), CredentialStoreError>;

    /// Retrieve a secret, `None` when absent
    fn get(&self, key: &str) -> Result<Option<String>, CredentialStoreError>;

    /// Delete a secret; deleting an absent key is not an error
    fn delete(&self, key: &str) -> Result<(), CredentialStoreError>;
}

/// Identity provider operations
///
/// One live implementation ([`super::CognitoClient`]) and mock
/// implementations for tests conform to this trait.
#[async_trait]
pub trait IdentityApi: Send + Sync {
    /// Register a new account
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        nickname: &str,
    ) -> Result<SignUpOutcome, IdentityError>;

    /// Submit the emailed confirmation code
    async fn confirm_sign_up(&self, email: &str, code: &str) -> Result<(), IdentityError>;

    /// Password sign-in; returns the full token set
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthTokens, IdentityError>;

    /// Exchange a refresh token for fresh id/access tokens
    async fn refresh_session(&self, refresh_token: &str) -> Result<AuthTokens, IdentityError>;

    /// Fetch the authenticated user's attributes
    async fn get_user(&self, access_token: &str) -> Result<IdentityUser, IdentityError>;

    /// Invalidate every session of the user
    async fn global_sign_out(&self, access_token: &str) -> Result<(), IdentityError>;

    /// Start the password-reset flow
    async fn forgot_password(&self, email: &str) -> Result<(), IdentityError>;

    /// Complete the password-reset flow
    async fn confirm_forgot_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<(), IdentityError>;
}
