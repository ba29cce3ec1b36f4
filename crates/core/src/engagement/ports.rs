//! Port interfaces for bookmark/follow edges and the local edge cache

use async_trait::async_trait;
use positivevoice_domain::{Post, Result, UserProfile};

/// Remote bookmark operations
#[async_trait]
pub trait BookmarkApi: Send + Sync {
    /// Ids of every post the authenticated user has bookmarked
    async fn list_bookmarked_ids(&self) -> Result<Vec<String>>;

    /// Bookmarked posts, newest first
    async fn fetch_bookmarked_posts(&self) -> Result<Vec<Post>>;

    async fn add_bookmark(&self, post_id: &str) -> Result<()>;

    async fn remove_bookmark(&self, post_id: &str) -> Result<()>;
}

/// Remote follow operations
#[async_trait]
pub trait FollowApi: Send + Sync {
    /// Ids of every user the authenticated user follows
    async fn list_following_ids(&self) -> Result<Vec<String>>;

    async fn follow(&self, user_id: &str) -> Result<()>;

    async fn unfollow(&self, user_id: &str) -> Result<()>;
}

/// Remote profile reads used alongside the follow service
#[async_trait]
pub trait ProfilesApi: Send + Sync {
    async fn fetch_followers(&self, user_id: &str) -> Result<Vec<UserProfile>>;

    async fn fetch_following(&self, user_id: &str) -> Result<Vec<UserProfile>>;

    async fn fetch_user_profile(&self, user_id: &str) -> Result<UserProfile>;
}

/// Simple key-value cache for sets of string ids
///
/// Backed by a JSON file in production and an in-memory map in tests. Saving
/// a set also stamps its last-synced timestamp under the matching key.
pub trait EdgeCache: Send + Sync {
    /// Load a previously saved id set; empty when never saved
    fn load_ids(&self, key: &str) -> Result<Vec<String>>;

    /// Replace the id set and stamp its synced-at timestamp
    fn save_ids(&self, key: &str, ids: &[String]) -> Result<()>;

    /// Drop the id set and its timestamp
    fn clear(&self, key: &str) -> Result<()>;
}
