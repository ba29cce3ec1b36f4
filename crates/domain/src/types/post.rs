//! Post types and content rules

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::MAX_POST_CONTENT_CHARS;
use crate::types::category::PostCategory;
use crate::types::user::User;

/// The two kinds of entries a user can post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostType {
    GoodThing,
    IdealWorld,
}

impl PostType {
    /// Wire value used by the REST API and identity of the taxonomy
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GoodThing => "good_thing",
            Self::IdealWorld => "ideal_world",
        }
    }
}

/// Feed sort order for post listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Newest,
    Recommended,
}

impl SortOrder {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Recommended => "recommended",
        }
    }
}

/// A user post
///
/// Posts are created by user action and never edited; the only mutation is a
/// hard delete. `is_bookmarked` is relative to the viewing user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub post_type: PostType,
    pub content: String,
    pub category: PostCategory,
    pub is_visible: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub comment_count: u32,
    #[serde(default)]
    pub is_bookmarked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// One page of a post listing, with an opaque continuation token
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostsPage {
    pub posts: Vec<Post>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

/// Characters left before the content limit; negative when over
#[must_use]
pub fn characters_remaining(content: &str) -> i64 {
    MAX_POST_CONTENT_CHARS as i64 - content.chars().count() as i64
}

/// Content is valid when non-blank after trimming and within the limit.
///
/// Length counts Unicode scalar values, so 300 'あ' characters are exactly at
/// the boundary.
#[must_use]
pub fn content_is_valid(content: &str) -> bool {
    !content.trim().is_empty() && content.chars().count() <= MAX_POST_CONTENT_CHARS
}
