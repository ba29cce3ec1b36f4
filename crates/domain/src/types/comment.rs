//! Comment type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::MAX_COMMENT_CONTENT_CHARS;
use crate::types::user::User;

/// A comment on a post; deletable by its author only (enforced server-side)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub user_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// Comment content follows the same trimming and length rule as posts
#[must_use]
pub fn comment_is_valid(content: &str) -> bool {
    !content.trim().is_empty() && content.chars().count() <= MAX_COMMENT_CONTENT_CHARS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_comment_is_invalid() {
        assert!(!comment_is_valid("  "));
        assert!(comment_is_valid("すごくいいですね！"));
    }

    #[test]
    fn comment_limit_counts_scalar_values() {
        let at_limit = "あ".repeat(MAX_COMMENT_CONTENT_CHARS);
        let over_limit = "あ".repeat(MAX_COMMENT_CONTENT_CHARS + 1);
        assert!(comment_is_valid(&at_limit));
        assert!(!comment_is_valid(&over_limit));
    }
}
