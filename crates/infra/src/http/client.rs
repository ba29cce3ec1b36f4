//! REST client with the 401 refresh-and-retry cycle
//!
//! Every request attaches the current id token as a bearer header when one
//! exists. A 401 response triggers exactly one token refresh; if the refresh
//! reports success the request is rebuilt with the fresh token and retried
//! exactly once. Any other outcome surfaces as `ApiError::Unauthorized`.
//! There is no backoff and no retry for other statuses or network errors.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use positivevoice_common::TokenManager;
use positivevoice_domain::constants::{REQUEST_TIMEOUT_SECS, RESOURCE_TIMEOUT_SECS};

use crate::errors::ApiError;

/// Session token access for the HTTP layer
///
/// Implemented by `TokenManager`; tests substitute stubs.
#[async_trait]
pub trait BearerTokens: Send + Sync {
    /// Current id token, if a session exists
    async fn id_token(&self) -> Option<String>;

    /// Attempt a single-flight refresh; `true` means a fresh token is stored
    async fn refresh_token_if_needed(&self) -> bool;
}

#[async_trait]
impl BearerTokens for TokenManager {
    async fn id_token(&self) -> Option<String> {
        self.get_id_token().await
    }

    async fn refresh_token_if_needed(&self) -> bool {
        TokenManager::refresh_token_if_needed(self).await
    }
}

/// Configuration for [`ApiClient`]
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL of the REST backend, e.g. `https://api.example.com/v1`
    pub base_url: String,
    /// Per-attempt timeout
    pub request_timeout: Duration,
    /// Whole-call timeout covering the refresh-and-retry cycle
    pub resource_timeout: Duration,
}

impl ApiClientConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            resource_timeout: Duration::from_secs(RESOURCE_TIMEOUT_SECS),
        }
    }
}

/// Authenticated JSON client for the PositiveVoice REST backend
#[derive(Clone)]
pub struct ApiClient {
    client: ReqwestClient,
    tokens: Arc<dyn BearerTokens>,
    base_url: Url,
    resource_timeout: Duration,
}

impl ApiClient {
    pub fn new(config: ApiClientConfig, tokens: Arc<dyn BearerTokens>) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", config.base_url)))?;
        let client = ReqwestClient::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(ApiError::from)?;
        Ok(Self { client, tokens, base_url, resource_timeout: config.resource_timeout })
    }

    /// GET with optional query parameters, decoding a JSON body
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let response = self.execute(Method::GET, path, query, None).await?;
        Self::decode(response).await
    }

    /// POST a JSON body, decoding a JSON response
    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        let response = self.execute(Method::POST, path, &[], Some(body)).await?;
        Self::decode(response).await
    }

    /// POST without a body, ignoring the response body
    pub async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        self.execute(Method::POST, path, &[], None).await?;
        Ok(())
    }

    /// DELETE, ignoring the response body
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(Method::DELETE, path, &[], None).await?;
        Ok(())
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
    ) -> Result<Response, ApiError> {
        let call = self.execute_inner(method, path, query, body);
        match tokio::time::timeout(self.resource_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(ApiError::Timeout),
        }
    }

    async fn execute_inner(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
    ) -> Result<Response, ApiError> {
        let url = self.join(path)?;
        let token = self.tokens.id_token().await;

        debug!(%method, %url, "sending request");
        let response =
            self.send_once(method.clone(), url.clone(), query, body.as_ref(), token).await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return Self::check_status(response);
        }

        // One refresh, one retry. A second 401 is final.
        if !self.tokens.refresh_token_if_needed().await {
            warn!(%url, "token refresh unavailable after 401");
            return Err(ApiError::Unauthorized);
        }

        let token = self.tokens.id_token().await;
        debug!(%method, %url, "retrying request with refreshed token");
        let response = self.send_once(method, url, query, body.as_ref(), token).await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        Self::check_status(response)
    }

    async fn send_once(
        &self,
        method: Method,
        url: Url,
        query: &[(&str, String)],
        body: Option<&serde_json::Value>,
        token: Option<String>,
    ) -> Result<Response, ApiError> {
        let mut request = self.client.request(method, url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        Ok(request.send().await?)
    }

    fn check_status(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else if status == StatusCode::UNAUTHORIZED {
            Err(ApiError::Unauthorized)
        } else {
            Err(ApiError::Http(status.as_u16()))
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn join(&self, path: &str) -> Result<Url, ApiError> {
        // Joining strips the base path on absolute inputs; concatenate instead.
        let joined = format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path);
        Url::parse(&joined).map_err(|e| ApiError::InvalidUrl(format!("{joined}: {e}")))
    }
}
