//! In-memory mock implementations of the auth traits

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};

use crate::auth::traits::{CredentialStore, CredentialStoreError, IdentityApi};
use crate::auth::types::{AuthTokens, IdentityUser, SignUpOutcome};
use crate::auth::IdentityError;

/// Deterministic in-memory credential store
#[derive(Default)]
pub struct MockCredentialStore {
    secrets: RwLock<HashMap<String, String>>,
    fail_writes: RwLock<bool>,
}

impl MockCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `set` calls fail, to exercise persistence errors
    pub fn fail_writes(&self, enabled: bool) {
        *self.fail_writes.write() = enabled;
    }
}

impl CredentialStore for MockCredentialStore {
    fn set(&self, key: &str, value: &str) -> Result<(), CredentialStoreError> {
        if *self.fail_writes.read() {
            return Err(CredentialStoreError::Storage("write disabled".into()));
        }
        self.secrets.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, CredentialStoreError> {
        Ok(self.secrets.read().get(key).cloned())
    }

    fn delete(&self, key: &str) -> Result<(), CredentialStoreError> {
        self.secrets.write().remove(key);
        Ok(())
    }
}

type RefreshResult = Result<AuthTokens, IdentityError>;
type SignInResult = Result<AuthTokens, IdentityError>;

/// Configurable identity-provider mock
///
/// Results are cloned on every call; delays and call counters make the
/// single-flight behavior of the token manager observable.
#[derive(Default)]
pub struct MockIdentityApi {
    refresh_result: Mutex<Option<RefreshResult>>,
    sign_in_result: Mutex<Option<SignInResult>>,
    user: Mutex<Option<IdentityUser>>,
    refresh_delay: Mutex<Option<Duration>>,
    refresh_calls: Mutex<Option<Arc<AtomicUsize>>>,
    sign_out_calls: AtomicUsize,
}

impl MockIdentityApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_refresh_result(self, result: RefreshResult) -> Self {
        *self.refresh_result.lock() = Some(result);
        self
    }

    #[must_use]
    pub fn with_sign_in_result(self, result: SignInResult) -> Self {
        *self.sign_in_result.lock() = Some(result);
        self
    }

    #[must_use]
    pub fn with_user(self, user: IdentityUser) -> Self {
        *self.user.lock() = Some(user);
        self
    }

    #[must_use]
    pub fn with_refresh_delay(self, delay: Duration) -> Self {
        *self.refresh_delay.lock() = Some(delay);
        self
    }

    #[must_use]
    pub fn with_refresh_counter(self, counter: Arc<AtomicUsize>) -> Self {
        *self.refresh_calls.lock() = Some(counter);
        self
    }

    pub fn sign_out_calls(&self) -> usize {
        self.sign_out_calls.load(Ordering::SeqCst)
    }
}

fn clone_result(result: &RefreshResult) -> RefreshResult {
    match result {
        Ok(tokens) => Ok(tokens.clone()),
        Err(IdentityError::AuthenticationFailed) => Err(IdentityError::AuthenticationFailed),
        Err(IdentityError::RefreshFailed) => Err(IdentityError::RefreshFailed),
        Err(IdentityError::InvalidResponse) => Err(IdentityError::InvalidResponse),
        Err(IdentityError::Http(code)) => Err(IdentityError::Http(*code)),
        Err(IdentityError::Api { code, message }) => {
            Err(IdentityError::Api { code: code.clone(), message: message.clone() })
        }
        Err(IdentityError::Network(msg)) => Err(IdentityError::Network(msg.clone())),
    }
}

#[async_trait]
impl IdentityApi for MockIdentityApi {
    async fn sign_up(
        &self,
        _email: &str,
        _password: &str,
        _nickname: &str,
    ) -> Result<SignUpOutcome, IdentityError> {
        Ok(SignUpOutcome { user_confirmed: false, user_id: "mock-user".into() })
    }

    async fn confirm_sign_up(&self, _email: &str, _code: &str) -> Result<(), IdentityError> {
        Ok(())
    }

    async fn sign_in(&self, _email: &str, _password: &str) -> Result<AuthTokens, IdentityError> {
        match &*self.sign_in_result.lock() {
            Some(result) => clone_result(result),
            None => Err(IdentityError::AuthenticationFailed),
        }
    }

    async fn refresh_session(&self, _refresh_token: &str) -> Result<AuthTokens, IdentityError> {
        if let Some(counter) = self.refresh_calls.lock().clone() {
            counter.fetch_add(1, Ordering::SeqCst);
        }
        let delay = *self.refresh_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        match &*self.refresh_result.lock() {
            Some(result) => clone_result(result),
            None => Err(IdentityError::RefreshFailed),
        }
    }

    async fn get_user(&self, _access_token: &str) -> Result<IdentityUser, IdentityError> {
        self.user.lock().clone().ok_or(IdentityError::AuthenticationFailed)
    }

    async fn global_sign_out(&self, _access_token: &str) -> Result<(), IdentityError> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn forgot_password(&self, _email: &str) -> Result<(), IdentityError> {
        Ok(())
    }

    async fn confirm_forgot_password(
        &self,
        _email: &str,
        _code: &str,
        _new_password: &str,
    ) -> Result<(), IdentityError> {
        Ok(())
    }
}
