//! Authentication stack
//!
//! Layering mirrors the session model of the client:
//! - [`CredentialStore`] persists the two session secrets (id token, refresh
//!   token) in opaque key-value secret storage
//! - [`TokenManager`] caches the session in memory, backed by the store, and
//!   serializes refresh attempts (at most one in flight)
//! - [`CognitoClient`] speaks the identity provider's JSON protocol
//! - [`AuthService`] orchestrates sign-up/sign-in/sign-out flows

pub mod client;
pub mod keychain;
pub mod service;
pub mod token_manager;
pub mod traits;
pub mod types;

pub use client::{CognitoClient, IdentityError};
pub use keychain::KeyringStore;
pub use service::AuthService;
pub use token_manager::TokenManager;
pub use traits::{CredentialStore, CredentialStoreError, IdentityApi};
pub use types::{AuthTokens, IdentityConfig, IdentityUser, SignUpOutcome};
