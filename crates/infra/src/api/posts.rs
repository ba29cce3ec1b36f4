//! Posts endpoint adapter

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use positivevoice_core::{NewPost, PostQuery, PostsApi};
use positivevoice_domain::{Post, PostType, PostsPage, Result, SortOrder};

use crate::errors::ApiError;
use crate::http::ApiClient;

/// `PostsApi` implementation over the REST backend
pub struct PostsClient {
    api: Arc<ApiClient>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreatePostRequest<'a> {
    content: &'a str,
    #[serde(rename = "type")]
    post_type: PostType,
    image_urls: &'a [String],
}

impl PostsClient {
    #[must_use]
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl PostsApi for PostsClient {
    async fn create_post(&self, new_post: NewPost) -> Result<Post> {
        let request = CreatePostRequest {
            content: &new_post.content,
            post_type: new_post.post_type,
            image_urls: &new_post.image_urls,
        };
        let post: Post = self.api.post("/posts", &request).await?;
        debug!(post_id = %post.id, "post created");
        Ok(post)
    }

    async fn fetch_posts(
        &self,
        post_type: PostType,
        sort: SortOrder,
        limit: usize,
    ) -> Result<PostsPage> {
        let query = [
            ("type", post_type.as_str().to_string()),
            ("sort", sort.as_str().to_string()),
            ("limit", limit.to_string()),
        ];
        Ok(self.api.get("/posts", &query).await?)
    }

    async fn fetch_post(&self, id: &str) -> Result<Option<Post>> {
        match self.api.get(&format!("/posts/{id}"), &[]).await {
            Ok(post) => Ok(Some(post)),
            Err(ApiError::Http(404)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn fetch_similar_posts(&self, post_id: &str, limit: usize) -> Result<Vec<Post>> {
        let query = [("limit", limit.to_string())];
        Ok(self.api.get(&format!("/posts/{post_id}/similar"), &query).await?)
    }

    async fn fetch_my_posts(&self) -> Result<Vec<Post>> {
        Ok(self.api.get("/posts/me", &[]).await?)
    }

    async fn search_posts(&self, query: PostQuery) -> Result<Vec<Post>> {
        let mut params = vec![("q", query.query)];
        if let Some(post_type) = query.post_type {
            params.push(("type", post_type.as_str().to_string()));
        }
        if let Some(category) = query.category {
            params.push(("category", category.as_str().to_string()));
        }
        Ok(self.api.get("/posts/search", &params).await?)
    }

    async fn delete_post(&self, id: &str) -> Result<()> {
        Ok(self.api.delete(&format!("/posts/{id}")).await?)
    }
}
