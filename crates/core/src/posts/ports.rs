//! Port interfaces for post operations
//!
//! These traits define the boundary between core logic and the REST adapter
//! in the infra crate.

use async_trait::async_trait;
use positivevoice_domain::{Post, PostCategory, PostType, PostsPage, Result, SortOrder};

/// Payload for creating a post
///
/// Category is assigned server-side by the classifier; the client only sends
/// content and type. Image URLs are attached after the upload pipeline runs.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub content: String,
    pub post_type: PostType,
    pub image_urls: Vec<String>,
}

/// Search parameters for the posts search endpoint
#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    pub query: String,
    pub post_type: Option<PostType>,
    pub category: Option<PostCategory>,
}

/// Trait for post retrieval and mutation
#[async_trait]
pub trait PostsApi: Send + Sync {
    /// Create a post; the server moderates and classifies the content
    async fn create_post(&self, new_post: NewPost) -> Result<Post>;

    /// Fetch one feed page for a post type
    async fn fetch_posts(
        &self,
        post_type: PostType,
        sort: SortOrder,
        limit: usize,
    ) -> Result<PostsPage>;

    /// Fetch a single post by id
    async fn fetch_post(&self, id: &str) -> Result<Option<Post>>;

    /// Fetch posts similar to the given one (embedding-based, server-side)
    async fn fetch_similar_posts(&self, post_id: &str, limit: usize) -> Result<Vec<Post>>;

    /// Fetch the authenticated user's own posts
    async fn fetch_my_posts(&self) -> Result<Vec<Post>>;

    /// Search posts by text, type and category
    async fn search_posts(&self, query: PostQuery) -> Result<Vec<Post>>;

    /// Hard-delete a post (author only, enforced server-side)
    async fn delete_post(&self, id: &str) -> Result<()>;
}
