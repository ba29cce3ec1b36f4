//! Token manager with single-flight refresh
//!
//! Owns the session (id token + refresh token):
//! - Tokens are cached in memory, backed by the credential store
//! - Every mutation is persisted to the store
//! - At most one refresh executes at a time; concurrent callers observe
//!   `false` instead of waiting
//! - A failed refresh is fatal to the session: all credentials are wiped

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use positivevoice_domain::constants::{ID_TOKEN_KEY, REFRESH_TOKEN_KEY};

use super::traits::{CredentialStore, IdentityApi};

#[derive(Default)]
struct SessionCache {
    id_token: Option<String>,
    refresh_token: Option<String>,
}

/// In-memory session cache over the credential store
pub struct TokenManager {
    identity: Arc<dyn IdentityApi>,
    store: Arc<dyn CredentialStore>,
    cache: RwLock<SessionCache>,
    refresh_in_flight: AtomicBool,
}

impl TokenManager {
    #[must_use]
    pub fn new(identity: Arc<dyn IdentityApi>, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            identity,
            store,
            cache: RwLock::new(SessionCache::default()),
            refresh_in_flight: AtomicBool::new(false),
        }
    }

    /// Current id token, falling back to the credential store.
    ///
    /// Never triggers a refresh. Store errors are treated as "no token" so a
    /// degraded keychain cannot wedge request building.
    pub async fn get_id_token(&self) -> Option<String> {
        if let Some(token) = self.cache.read().await.id_token.clone() {
            return Some(token);
        }

        let stored = match self.store.get(ID_TOKEN_KEY) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "credential store lookup failed");
                None
            }
        };

        if let Some(token) = &stored {
            self.cache.write().await.id_token = Some(token.clone());
        }
        stored
    }

    /// Overwrite the cached session and persist both tokens
    ///
    /// # Errors
    /// Returns the store error if persistence fails; the in-memory cache is
    /// updated regardless so the current process keeps a usable session.
    pub async fn set_tokens(
        &self,
        id_token: &str,
        refresh_token: &str,
    ) -> Result<(), super::CredentialStoreError> {
        {
            let mut cache = self.cache.write().await;
            cache.id_token = Some(id_token.to_string());
            cache.refresh_token = Some(refresh_token.to_string());
        }

        self.store.set(ID_TOKEN_KEY, id_token)?;
        self.store.set(REFRESH_TOKEN_KEY, refresh_token)?;

        debug!("session tokens stored");
        Ok(())
    }

    /// Update only the id token, leaving any stored refresh token in place
    ///
    /// # Errors
    /// Returns the store error if persistence fails; the in-memory cache is
    /// updated regardless.
    pub async fn set_id_token(&self, id_token: &str) -> Result<(), super::CredentialStoreError> {
        self.cache.write().await.id_token = Some(id_token.to_string());
        self.store.set(ID_TOKEN_KEY, id_token)?;
        debug!("id token stored");
        Ok(())
    }

    /// Clear cache and persisted values (sign-out or unrecoverable refresh
    /// failure)
    pub async fn clear_tokens(&self) {
        {
            let mut cache = self.cache.write().await;
            cache.id_token = None;
            cache.refresh_token = None;
        }

        if let Err(e) = self.store.delete(ID_TOKEN_KEY) {
            warn!(error = %e, "failed to delete id token");
        }
        if let Err(e) = self.store.delete(REFRESH_TOKEN_KEY) {
            warn!(error = %e, "failed to delete refresh token");
        }

        info!("session tokens cleared");
    }

    /// Attempt a token refresh, guarded so at most one executes at a time.
    ///
    /// Returns `true` when this call refreshed the session. Callers that
    /// arrive while a refresh is in flight get `false` immediately (no
    /// queueing) and must treat it as "not refreshed this time". A failed
    /// refresh wipes all credentials and returns `false`.
    pub async fn refresh_token_if_needed(&self) -> bool {
        if self
            .refresh_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("refresh already in flight, skipping");
            return false;
        }

        let refreshed = self.do_refresh().await;
        self.refresh_in_flight.store(false, Ordering::Release);
        refreshed
    }

    async fn do_refresh(&self) -> bool {
        let refresh_token = {
            let cached = self.cache.read().await.refresh_token.clone();
            match cached {
                Some(token) => Some(token),
                None => self.store.get(REFRESH_TOKEN_KEY).unwrap_or_default(),
            }
        };

        let Some(refresh_token) = refresh_token else {
            debug!("no refresh token available");
            return false;
        };

        match self.identity.refresh_session(&refresh_token).await {
            Ok(tokens) => {
                // Provider may not rotate the refresh token; keep the old one then.
                let next_refresh =
                    tokens.refresh_token.unwrap_or_else(|| refresh_token.clone());
                if let Err(e) = self.set_tokens(&tokens.id_token, &next_refresh).await {
                    warn!(error = %e, "refreshed tokens could not be persisted");
                }
                info!("session refreshed");
                true
            }
            Err(e) => {
                error!(error = %e, "token refresh failed, clearing session");
                self.clear_tokens().await;
                false
            }
        }
    }
}
