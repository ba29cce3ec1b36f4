//! Comments endpoint adapter

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use positivevoice_core::CommentsApi;
use positivevoice_domain::{comment_is_valid, Comment, Result, VoiceError};

use crate::http::ApiClient;

/// `CommentsApi` implementation over the REST backend
pub struct CommentsClient {
    api: Arc<ApiClient>,
}

#[derive(Serialize)]
struct CreateCommentRequest<'a> {
    content: &'a str,
}

impl CommentsClient {
    #[must_use]
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CommentsApi for CommentsClient {
    async fn fetch_comments(&self, post_id: &str) -> Result<Vec<Comment>> {
        Ok(self.api.get(&format!("/posts/{post_id}/comments"), &[]).await?)
    }

    async fn create_comment(&self, post_id: &str, content: &str) -> Result<Comment> {
        // Same 300-char trimming rule as posts, checked before any network call.
        if !comment_is_valid(content) {
            return Err(VoiceError::InvalidInput(
                "comment content must be 1-300 characters".into(),
            ));
        }
        let request = CreateCommentRequest { content: content.trim() };
        Ok(self.api.post(&format!("/posts/{post_id}/comments"), &request).await?)
    }

    async fn delete_comment(&self, id: &str) -> Result<()> {
        Ok(self.api.delete(&format!("/comments/{id}")).await?)
    }
}
