//! Port interface for the AI endpoints
//!
//! Classification and moderation also run server-side on every post create;
//! this port exposes them directly for preview and diagnostics.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use positivevoice_domain::{PostCategory, PostType, Result};

/// Category assignment for a piece of content
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub category: PostCategory,
    pub confidence: f32,
}

/// Moderation verdict for a piece of content
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Moderation {
    pub is_inappropriate: bool,
    pub reason: Option<String>,
    pub confidence: f32,
}

/// Sentiment breakdown for a piece of content
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sentiment {
    pub sentiment: String,
    pub positive_score: f32,
    pub negative_score: f32,
    pub neutral_score: f32,
    pub mixed_score: f32,
}

/// Trait for the AI endpoints
#[async_trait]
pub trait AiApi: Send + Sync {
    /// Classify content into a category valid for the given post type
    async fn classify(&self, content: &str, post_type: PostType) -> Result<Classification>;

    /// Check content for inappropriate material
    async fn moderate(&self, content: &str) -> Result<Moderation>;

    /// Embedding vector for similarity search
    async fn embedding(&self, content: &str) -> Result<Vec<f32>>;

    /// Sentiment analysis scores
    async fn sentiment(&self, content: &str) -> Result<Sentiment>;
}
