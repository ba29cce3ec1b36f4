//! Auth flow orchestration
//!
//! Ties the identity client and the token manager together. The access token
//! (needed for GetUser / GlobalSignOut) lives only in memory for the current
//! process; the persisted session is the id/refresh token pair.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use super::client::IdentityError;
use super::token_manager::TokenManager;
use super::traits::IdentityApi;
use super::types::{IdentityUser, SignUpOutcome};

/// High-level authentication flows
pub struct AuthService {
    identity: Arc<dyn IdentityApi>,
    tokens: Arc<TokenManager>,
    access_token: RwLock<Option<String>>,
}

impl AuthService {
    #[must_use]
    pub fn new(identity: Arc<dyn IdentityApi>, tokens: Arc<TokenManager>) -> Self {
        Self { identity, tokens, access_token: RwLock::new(None) }
    }

    /// Register a new account; the user stays unconfirmed until
    /// [`Self::confirm_sign_up`]
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        nickname: &str,
    ) -> Result<SignUpOutcome, IdentityError> {
        self.identity.sign_up(email, password, nickname).await
    }

    /// Submit the emailed confirmation code
    pub async fn confirm_sign_up(&self, email: &str, code: &str) -> Result<(), IdentityError> {
        self.identity.confirm_sign_up(email, code).await
    }

    /// Password sign-in; stores the session on success
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(), IdentityError> {
        let tokens = self.identity.sign_in(email, password).await?;

        // Without a refresh token the session cannot outlive the id token;
        // never persist an empty placeholder in its place.
        let persisted = match &tokens.refresh_token {
            Some(refresh) => self.tokens.set_tokens(&tokens.id_token, refresh).await,
            None => {
                warn!("sign-in response carried no refresh token");
                self.tokens.set_id_token(&tokens.id_token).await
            }
        };
        if let Err(e) = persisted {
            warn!(error = %e, "session could not be persisted");
        }
        *self.access_token.write().await = Some(tokens.access_token);

        info!("signed in");
        Ok(())
    }

    /// Fetch the authenticated user's identity attributes
    pub async fn current_user(&self) -> Result<IdentityUser, IdentityError> {
        let access_token = self
            .access_token
            .read()
            .await
            .clone()
            .ok_or(IdentityError::AuthenticationFailed)?;
        self.identity.get_user(&access_token).await
    }

    /// Whether a persisted session exists
    pub async fn is_signed_in(&self) -> bool {
        self.tokens.get_id_token().await.is_some()
    }

    /// Sign out: best-effort global sign-out, then wipe the local session.
    ///
    /// Callers are responsible for clearing their own local caches
    /// (bookmarks/follows) after this returns.
    pub async fn sign_out(&self) {
        let access_token = self.access_token.write().await.take();
        if let Some(access_token) = access_token {
            if let Err(e) = self.identity.global_sign_out(&access_token).await {
                warn!(error = %e, "global sign-out failed, clearing local session anyway");
            }
        }
        self.tokens.clear_tokens().await;
        info!("signed out");
    }

    /// Start the password-reset flow
    pub async fn forgot_password(&self, email: &str) -> Result<(), IdentityError> {
        self.identity.forgot_password(email).await
    }

    /// Complete the password-reset flow
    pub async fn confirm_forgot_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<(), IdentityError> {
        self.identity.confirm_forgot_password(email, code, new_password).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::types::AuthTokens;
    use crate::testing::{MockCredentialStore, MockIdentityApi};

    fn service_with(identity: MockIdentityApi) -> (AuthService, Arc<MockIdentityApi>) {
        let identity = Arc::new(identity);
        let store = Arc::new(MockCredentialStore::new());
        let tokens = Arc::new(TokenManager::new(identity.clone(), store));
        (AuthService::new(identity.clone(), tokens), identity)
    }

    fn sample_tokens() -> AuthTokens {
        AuthTokens {
            id_token: "id-1".into(),
            access_token: "access-1".into(),
            refresh_token: Some("refresh-1".into()),
            expires_in: 3600,
        }
    }

    #[tokio::test]
    async fn sign_in_stores_session() {
        let (service, _) =
            service_with(MockIdentityApi::new().with_sign_in_result(Ok(sample_tokens())));

        assert!(!service.is_signed_in().await);
        service.sign_in("user@example.com", "password").await.unwrap();
        assert!(service.is_signed_in().await);
    }

    #[tokio::test]
    async fn sign_in_without_refresh_token_persists_only_the_id_token() {
        use positivevoice_domain::constants::{ID_TOKEN_KEY, REFRESH_TOKEN_KEY};

        use crate::auth::traits::CredentialStore;

        let identity = Arc::new(MockIdentityApi::new().with_sign_in_result(Ok(AuthTokens {
            refresh_token: None,
            ..sample_tokens()
        })));
        let store = Arc::new(MockCredentialStore::new());
        let tokens = Arc::new(TokenManager::new(identity.clone(), store.clone()));
        let service = AuthService::new(identity, tokens.clone());

        service.sign_in("user@example.com", "password").await.unwrap();

        assert!(service.is_signed_in().await);
        assert_eq!(store.get(ID_TOKEN_KEY).unwrap().as_deref(), Some("id-1"));
        assert_eq!(store.get(REFRESH_TOKEN_KEY).unwrap(), None);
        // With nothing to refresh with, the session cannot be extended.
        assert!(!tokens.refresh_token_if_needed().await);
    }

    #[tokio::test]
    async fn current_user_requires_sign_in() {
        let (service, _) = service_with(MockIdentityApi::new().with_user(IdentityUser {
            user_id: "user-1".into(),
            email: "user@example.com".into(),
            nickname: "ユーザーA".into(),
        }));

        assert!(matches!(
            service.current_user().await,
            Err(IdentityError::AuthenticationFailed)
        ));
    }

    #[tokio::test]
    async fn sign_out_clears_session_and_calls_provider() {
        let (service, identity) =
            service_with(MockIdentityApi::new().with_sign_in_result(Ok(sample_tokens())));

        service.sign_in("user@example.com", "password").await.unwrap();
        service.sign_out().await;

        assert!(!service.is_signed_in().await);
        assert_eq!(identity.sign_out_calls(), 1);
    }

    #[tokio::test]
    async fn sign_out_without_session_skips_provider_call() {
        let (service, identity) = service_with(MockIdentityApi::new());
        service.sign_out().await;
        assert_eq!(identity.sign_out_calls(), 0);
    }
}
