//! Follow and bookmark relationship edges
//!
//! Both edges are boolean per (subject, object) pair; they are toggled, not
//! versioned.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Directed follow relationship
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Follow {
    pub follower_id: String,
    pub followee_id: String,
    pub created_at: DateTime<Utc>,
}

/// Bookmark edge between a user and a post
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub user_id: String,
    pub post_id: String,
    pub created_at: DateTime<Utc>,
}
