//! Presigned-URL image uploader

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use positivevoice_core::ImageUploader;
use positivevoice_domain::constants::REQUEST_TIMEOUT_SECS;
use positivevoice_domain::Result;

use crate::errors::ApiError;
use crate::http::ApiClient;

/// Uploads images through presigned URLs issued by the backend
pub struct RestImageUploader {
    api: Arc<ApiClient>,
    // Presigned PUTs carry their auth in the URL, so they bypass ApiClient.
    put_client: reqwest::Client,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadUrlRequest<'a> {
    post_id: &'a str,
    index: usize,
    content_type: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadUrlResponse {
    upload_url: String,
    public_url: String,
}

impl RestImageUploader {
    pub fn new(api: Arc<ApiClient>) -> Result<Self> {
        let put_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(ApiError::from)?;
        Ok(Self { api, put_client })
    }
}

#[async_trait]
impl ImageUploader for RestImageUploader {
    async fn upload(&self, jpeg_bytes: &[u8], post_id: &str, index: usize) -> Result<String> {
        let request = UploadUrlRequest { post_id, index, content_type: "image/jpeg" };
        let issued: UploadUrlResponse = self.api.post("/media/upload-url", &request).await?;

        debug!(post_id, index, bytes = jpeg_bytes.len(), "uploading image");
        let response = self
            .put_client
            .put(&issued.upload_url)
            .header("Content-Type", "image/jpeg")
            .body(jpeg_bytes.to_vec())
            .send()
            .await
            .map_err(ApiError::from)?;

        if !response.status().is_success() {
            return Err(ApiError::Http(response.status().as_u16()).into());
        }
        Ok(issued.public_url)
    }
}
