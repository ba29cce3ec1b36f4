//! Bookmark, follow and profile endpoint adapter
//!
//! One client implements all three engagement-side ports; the endpoints share
//! auth and base URL and are always wired together.

use std::sync::Arc;

use async_trait::async_trait;

use positivevoice_core::{BookmarkApi, FollowApi, ProfilesApi};
use positivevoice_domain::{Bookmark, Follow, Post, Result, UserProfile};

use crate::http::ApiClient;

/// `BookmarkApi` + `FollowApi` + `ProfilesApi` over the REST backend
pub struct EngagementClient {
    api: Arc<ApiClient>,
}

impl EngagementClient {
    #[must_use]
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl BookmarkApi for EngagementClient {
    async fn list_bookmarked_ids(&self) -> Result<Vec<String>> {
        let edges: Vec<Bookmark> = self.api.get("/bookmarks", &[]).await?;
        Ok(edges.into_iter().map(|b| b.post_id).collect())
    }

    async fn fetch_bookmarked_posts(&self) -> Result<Vec<Post>> {
        Ok(self.api.get("/bookmarks/posts", &[]).await?)
    }

    async fn add_bookmark(&self, post_id: &str) -> Result<()> {
        Ok(self.api.post_empty(&format!("/bookmarks/{post_id}")).await?)
    }

    async fn remove_bookmark(&self, post_id: &str) -> Result<()> {
        Ok(self.api.delete(&format!("/bookmarks/{post_id}")).await?)
    }
}

#[async_trait]
impl FollowApi for EngagementClient {
    async fn list_following_ids(&self) -> Result<Vec<String>> {
        let edges: Vec<Follow> = self.api.get("/follows", &[]).await?;
        Ok(edges.into_iter().map(|f| f.followee_id).collect())
    }

    async fn follow(&self, user_id: &str) -> Result<()> {
        Ok(self.api.post_empty(&format!("/follows/{user_id}")).await?)
    }

    async fn unfollow(&self, user_id: &str) -> Result<()> {
        Ok(self.api.delete(&format!("/follows/{user_id}")).await?)
    }
}

#[async_trait]
impl ProfilesApi for EngagementClient {
    async fn fetch_followers(&self, user_id: &str) -> Result<Vec<UserProfile>> {
        Ok(self.api.get(&format!("/users/{user_id}/followers"), &[]).await?)
    }

    async fn fetch_following(&self, user_id: &str) -> Result<Vec<UserProfile>> {
        Ok(self.api.get(&format!("/users/{user_id}/following"), &[]).await?)
    }

    async fn fetch_user_profile(&self, user_id: &str) -> Result<UserProfile> {
        Ok(self.api.get(&format!("/users/{user_id}/profile"), &[]).await?)
    }
}
