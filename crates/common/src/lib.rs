//! Shared client runtime for PositiveVoice crates.
//!
//! Contains the authentication stack (credential store, token manager,
//! identity client, auth service) and reusable test doubles.

pub mod auth;
pub mod testing;

pub use auth::{
    AuthService, AuthTokens, CognitoClient, CredentialStore, CredentialStoreError, IdentityApi,
    IdentityConfig, IdentityError, IdentityUser, KeyringStore, SignUpOutcome, TokenManager,
};
