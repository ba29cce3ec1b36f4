//! Post composition state
//!
//! Holds draft content and the selected post type, exposes the live
//! character budget, and submits through the posts port.

use std::sync::Arc;

use tracing::debug;

use positivevoice_domain::types::{characters_remaining, content_is_valid};
use positivevoice_domain::{Post, PostType, Result, VoiceError};

use crate::posts::ports::{NewPost, PostsApi};

/// Draft state for a new post
pub struct PostComposer {
    api: Arc<dyn PostsApi>,
    content: String,
    selected_type: PostType,
}

impl PostComposer {
    /// Empty draft defaulting to a good-thing post
    #[must_use]
    pub fn new(api: Arc<dyn PostsApi>) -> Self {
        Self { api, content: String::new(), selected_type: PostType::GoodThing }
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    #[must_use]
    pub fn selected_type(&self) -> PostType {
        self.selected_type
    }

    pub fn select_type(&mut self, post_type: PostType) {
        self.selected_type = post_type;
    }

    /// Characters left in the budget; negative once over the limit
    #[must_use]
    pub fn characters_remaining(&self) -> i64 {
        characters_remaining(&self.content)
    }

    /// Whether the draft can be submitted
    #[must_use]
    pub fn is_valid(&self) -> bool {
        content_is_valid(&self.content)
    }

    /// Discard the draft, keeping the selected type
    pub fn reset(&mut self) {
        self.content.clear();
    }

    /// Submit the draft with already-uploaded image URLs.
    ///
    /// Rejects invalid drafts without a network call; the draft is cleared
    /// only after the server accepts the post.
    pub async fn submit(&mut self, image_urls: Vec<String>) -> Result<Post> {
        if !self.is_valid() {
            return Err(VoiceError::InvalidInput(
                "post content must be 1-300 characters".into(),
            ));
        }

        let post = self
            .api
            .create_post(NewPost {
                content: self.content.trim().to_string(),
                post_type: self.selected_type,
                image_urls,
            })
            .await?;

        debug!(post_id = %post.id, "post created, clearing draft");
        self.reset();
        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::Utc;
    use positivevoice_domain::{PostCategory, PostsPage, SortOrder};

    use super::*;
    use crate::posts::ports::PostQuery;

    struct StubPostsApi;

    #[async_trait]
    impl PostsApi for StubPostsApi {
        async fn create_post(&self, new_post: NewPost) -> Result<Post> {
            Ok(Post {
                id: "post-1".into(),
                user_id: "user-1".into(),
                post_type: new_post.post_type,
                content: new_post.content,
                category: PostCategory::Other,
                is_visible: true,
                created_at: Utc::now(),
                image_urls: new_post.image_urls,
                comment_count: 0,
                is_bookmarked: false,
                user: None,
            })
        }

        async fn fetch_posts(
            &self,
            _post_type: PostType,
            _sort: SortOrder,
            _limit: usize,
        ) -> Result<PostsPage> {
            Ok(PostsPage { posts: vec![], next_token: None })
        }

        async fn fetch_post(&self, _id: &str) -> Result<Option<Post>> {
            Ok(None)
        }

        async fn fetch_similar_posts(&self, _post_id: &str, _limit: usize) -> Result<Vec<Post>> {
            Ok(vec![])
        }

        async fn fetch_my_posts(&self) -> Result<Vec<Post>> {
            Ok(vec![])
        }

        async fn search_posts(&self, _query: PostQuery) -> Result<Vec<Post>> {
            Ok(vec![])
        }

        async fn delete_post(&self, _id: &str) -> Result<()> {
            Ok(())
        }
    }

    fn composer() -> PostComposer {
        PostComposer::new(Arc::new(StubPostsApi))
    }

    #[test]
    fn budget_boundary_at_exactly_300_chars() {
        let mut c = composer();
        c.set_content("あ".repeat(300));
        assert_eq!(c.characters_remaining(), 0);
        assert!(c.is_valid());

        c.set_content("あ".repeat(301));
        assert_eq!(c.characters_remaining(), -1);
        assert!(!c.is_valid());
    }

    #[test]
    fn whitespace_only_draft_is_invalid() {
        let mut c = composer();
        c.set_content("   \n\t  ");
        assert!(!c.is_valid());
    }

    #[tokio::test]
    async fn submit_rejects_invalid_draft_without_clearing() {
        let mut c = composer();
        c.set_content("あ".repeat(301));

        let result = c.submit(vec![]).await;
        assert!(matches!(result, Err(VoiceError::InvalidInput(_))));
        assert_eq!(c.content().chars().count(), 301, "draft must survive a rejected submit");
    }

    #[tokio::test]
    async fn submit_clears_draft_on_success() {
        let mut c = composer();
        c.select_type(PostType::IdealWorld);
        c.set_content("みんなが安心して暮らせる世界");

        let post = c.submit(vec!["https://cdn.example.com/a.jpg".into()]).await.unwrap();
        assert_eq!(post.post_type, PostType::IdealWorld);
        assert_eq!(post.image_urls.len(), 1);
        assert!(c.content().is_empty());
        assert_eq!(c.selected_type(), PostType::IdealWorld, "type selection survives reset");
    }
}
