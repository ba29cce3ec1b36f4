//! Identity provider client
//!
//! Speaks the Cognito-style JSON protocol: every operation is a POST to a
//! fixed endpoint with an `X-Amz-Target` action discriminator and an
//! `application/x-amz-json-1.1` body.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, warn};

use super::traits::IdentityApi;
use super::types::{AuthTokens, IdentityConfig, IdentityUser, SignUpOutcome};

const TARGET_PREFIX: &str = "AWSCognitoIdentityProviderService";
const CONTENT_TYPE: &str = "application/x-amz-json-1.1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors raised by the identity layer
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("認証に失敗しました")]
    AuthenticationFailed,

    #[error("セッションの更新に失敗しました")]
    RefreshFailed,

    #[error("サーバーからの応答が不正です")]
    InvalidResponse,

    #[error("サーバーエラー: {0}")]
    Http(u16),

    #[error("{}", user_message(.code, .message))]
    Api { code: String, message: String },

    #[error("ネットワークエラーが発生しました: {0}")]
    Network(String),
}

/// Fixed mapping from provider error codes to user-facing messages
fn user_message(code: &str, message: &str) -> String {
    match code {
        "UsernameExistsException" => "このメールアドレスは既に登録されています",
        "InvalidPasswordException" => "パスワードが要件を満たしていません",
        "UserNotFoundException" => "ユーザーが見つかりません",
        "NotAuthorizedException" => "メールアドレスまたはパスワードが正しくありません",
        "CodeMismatchException" => "確認コードが正しくありません",
        "ExpiredCodeException" => "確認コードの有効期限が切れています",
        "UserNotConfirmedException" => "メールアドレスの確認が完了していません",
        "TooManyRequestsException" => {
            "リクエストが多すぎます。しばらく待ってから再試行してください"
        }
        _ => message,
    }
    .to_string()
}

/// Live identity client
pub struct CognitoClient {
    http: reqwest::Client,
    config: IdentityConfig,
}

impl CognitoClient {
    /// Create a client for the configured user pool
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: IdentityConfig) -> Result<Self, IdentityError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| IdentityError::Network(e.to_string()))?;

        Ok(Self { http, config })
    }

    async fn call<T: DeserializeOwned>(
        &self,
        action: &str,
        body: Value,
    ) -> Result<T, IdentityError> {
        let url = self.config.endpoint_url();

        debug!(action = %action, "identity request");

        let response = self
            .http
            .post(&url)
            .header("Content-Type", CONTENT_TYPE)
            .header("X-Amz-Target", format!("{TARGET_PREFIX}.{action}"))
            .json(&body)
            .send()
            .await
            .map_err(|e| IdentityError::Network(e.to_string()))?;

        let status = response.status();
        let bytes =
            response.bytes().await.map_err(|e| IdentityError::Network(e.to_string()))?;

        if !status.is_success() {
            if let Ok(error) = serde_json::from_slice::<ProviderErrorResponse>(&bytes) {
                warn!(action = %action, code = %error.error_type, "identity request rejected");
                return Err(IdentityError::Api {
                    code: error.error_type,
                    message: error.message.unwrap_or_default(),
                });
            }
            return Err(IdentityError::Http(status.as_u16()));
        }

        serde_json::from_slice(&bytes).map_err(|_| IdentityError::InvalidResponse)
    }
}

#[async_trait]
impl IdentityApi for CognitoClient {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        nickname: &str,
    ) -> Result<SignUpOutcome, IdentityError> {
        let response: SignUpResponse = self
            .call(
                "SignUp",
                json!({
                    "ClientId": self.config.client_id,
                    "Username": email,
                    "Password": password,
                    "UserAttributes": [
                        { "Name": "email", "Value": email },
                        { "Name": "nickname", "Value": nickname },
                    ],
                }),
            )
            .await?;

        Ok(SignUpOutcome {
            user_confirmed: response.user_confirmed,
            user_id: response.user_sub,
        })
    }

    async fn confirm_sign_up(&self, email: &str, code: &str) -> Result<(), IdentityError> {
        let _: EmptyResponse = self
            .call(
                "ConfirmSignUp",
                json!({
                    "ClientId": self.config.client_id,
                    "Username": email,
                    "ConfirmationCode": code,
                }),
            )
            .await?;
        Ok(())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthTokens, IdentityError> {
        let response: InitiateAuthResponse = self
            .call(
                "InitiateAuth",
                json!({
                    "AuthFlow": "USER_PASSWORD_AUTH",
                    "ClientId": self.config.client_id,
                    "AuthParameters": { "USERNAME": email, "PASSWORD": password },
                }),
            )
            .await?;

        let result =
            response.authentication_result.ok_or(IdentityError::AuthenticationFailed)?;
        Ok(result.into())
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<AuthTokens, IdentityError> {
        let response: InitiateAuthResponse = self
            .call(
                "InitiateAuth",
                json!({
                    "AuthFlow": "REFRESH_TOKEN_AUTH",
                    "ClientId": self.config.client_id,
                    "AuthParameters": { "REFRESH_TOKEN": refresh_token },
                }),
            )
            .await?;

        let result = response.authentication_result.ok_or(IdentityError::RefreshFailed)?;
        Ok(result.into())
    }

    async fn get_user(&self, access_token: &str) -> Result<IdentityUser, IdentityError> {
        let response: GetUserResponse =
            self.call("GetUser", json!({ "AccessToken": access_token })).await?;

        let mut email = String::new();
        let mut nickname = String::new();
        for attr in response.user_attributes {
            match attr.name.as_str() {
                "email" => email = attr.value,
                "nickname" => nickname = attr.value,
                _ => {}
            }
        }

        Ok(IdentityUser { user_id: response.username, email, nickname })
    }

    async fn global_sign_out(&self, access_token: &str) -> Result<(), IdentityError> {
        let _: EmptyResponse =
            self.call("GlobalSignOut", json!({ "AccessToken": access_token })).await?;
        Ok(())
    }

    async fn forgot_password(&self, email: &str) -> Result<(), IdentityError> {
        let _: ForgotPasswordResponse = self
            .call(
                "ForgotPassword",
                json!({ "ClientId": self.config.client_id, "Username": email }),
            )
            .await?;
        Ok(())
    }

    async fn confirm_forgot_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<(), IdentityError> {
        let _: EmptyResponse = self
            .call(
                "ConfirmForgotPassword",
                json!({
                    "ClientId": self.config.client_id,
                    "Username": email,
                    "ConfirmationCode": code,
                    "Password": new_password,
                }),
            )
            .await?;
        Ok(())
    }
}

// Wire types (provider uses PascalCase field names)

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SignUpResponse {
    user_confirmed: bool,
    user_sub: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InitiateAuthResponse {
    authentication_result: Option<AuthenticationResult>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AuthenticationResult {
    id_token: String,
    access_token: String,
    refresh_token: Option<String>,
    expires_in: i64,
}

impl From<AuthenticationResult> for AuthTokens {
    fn from(result: AuthenticationResult) -> Self {
        Self {
            id_token: result.id_token,
            access_token: result.access_token,
            refresh_token: result.refresh_token,
            expires_in: result.expires_in,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GetUserResponse {
    username: String,
    user_attributes: Vec<UserAttribute>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct UserAttribute {
    name: String,
    value: String,
}

#[derive(Deserialize)]
struct ForgotPasswordResponse {
    #[serde(rename = "CodeDeliveryDetails")]
    _code_delivery_details: Option<Value>,
}

#[derive(Deserialize)]
struct EmptyResponse {}

#[derive(Deserialize)]
struct ProviderErrorResponse {
    #[serde(rename = "__type")]
    error_type: String,
    message: Option<String>,
}
