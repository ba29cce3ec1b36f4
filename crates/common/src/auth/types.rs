//! Identity types and configuration

use serde::{Deserialize, Serialize};

/// Tokens issued by the identity provider
///
/// The refresh token is optional: the REFRESH_TOKEN_AUTH flow usually issues
/// new id/access tokens without rotating the refresh token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokens {
    pub id_token: String,
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: i64,
}

/// Result of a sign-up request
#[derive(Debug, Clone)]
pub struct SignUpOutcome {
    /// False until the emailed confirmation code is submitted
    pub user_confirmed: bool,
    pub user_id: String,
}

/// User attributes as known to the identity provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityUser {
    pub user_id: String,
    pub email: String,
    pub nickname: String,
}

/// Static identity-provider configuration
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Provider region (e.g. "ap-northeast-1")
    pub region: String,
    /// User pool app client id
    pub client_id: String,
    /// Endpoint override, mainly for tests; derived from `region` when `None`
    pub endpoint: Option<String>,
}

impl IdentityConfig {
    #[must_use]
    pub fn new(region: impl Into<String>, client_id: impl Into<String>) -> Self {
        Self { region: region.into(), client_id: client_id.into(), endpoint: None }
    }

    /// Point the client at a custom endpoint (used by tests and local stacks)
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Resolved identity endpoint URL
    #[must_use]
    pub fn endpoint_url(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.clone(),
            None => format!("https://cognito-idp.{}.amazonaws.com/", self.region),
        }
    }
}
