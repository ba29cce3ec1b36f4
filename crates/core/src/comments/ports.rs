//! Port interface for comment operations

use async_trait::async_trait;
use positivevoice_domain::{Comment, Result};

/// Trait for comment retrieval and mutation
#[async_trait]
pub trait CommentsApi: Send + Sync {
    /// All comments for a post, oldest first
    async fn fetch_comments(&self, post_id: &str) -> Result<Vec<Comment>>;

    /// Create a comment on a post
    async fn create_comment(&self, post_id: &str, content: &str) -> Result<Comment>;

    /// Delete a comment (author only, enforced server-side)
    async fn delete_comment(&self, id: &str) -> Result<()>;
}
