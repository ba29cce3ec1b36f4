//! AI endpoint adapter

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use positivevoice_core::{AiApi, Classification, Moderation, Sentiment};
use positivevoice_domain::{PostType, Result};

use crate::http::ApiClient;

/// `AiApi` implementation over the REST backend
pub struct AiClient {
    api: Arc<ApiClient>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ContentRequest<'a> {
    content: &'a str,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    post_type: Option<PostType>,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

impl AiClient {
    #[must_use]
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AiApi for AiClient {
    async fn classify(&self, content: &str, post_type: PostType) -> Result<Classification> {
        let request = ContentRequest { content, post_type: Some(post_type) };
        Ok(self.api.post("/ai/classify", &request).await?)
    }

    async fn moderate(&self, content: &str) -> Result<Moderation> {
        let request = ContentRequest { content, post_type: None };
        Ok(self.api.post("/ai/moderate", &request).await?)
    }

    async fn embedding(&self, content: &str) -> Result<Vec<f32>> {
        let request = ContentRequest { content, post_type: None };
        let response: EmbeddingResponse = self.api.post("/ai/embedding", &request).await?;
        Ok(response.embedding)
    }

    async fn sentiment(&self, content: &str) -> Result<Sentiment> {
        let request = ContentRequest { content, post_type: None };
        Ok(self.api.post("/ai/sentiment", &request).await?)
    }
}
