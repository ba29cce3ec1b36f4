//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! client.

// Content rules
pub const MAX_POST_CONTENT_CHARS: usize = 300;
pub const MAX_COMMENT_CONTENT_CHARS: usize = 300;

// HTTP timeouts (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
pub const RESOURCE_TIMEOUT_SECS: u64 = 60;

// Media upload pipeline
pub const UPLOAD_BATCH_SIZE: usize = 2;
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
pub const MAX_IMAGE_DIMENSION: u32 = 1080;
pub const JPEG_QUALITY: u8 = 80;

// Credential store keys
pub const ID_TOKEN_KEY: &str = "id_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

// Local edge-cache keys
pub const BOOKMARKED_POST_IDS_KEY: &str = "bookmarked_post_ids";
pub const BOOKMARKS_SYNCED_AT_KEY: &str = "bookmarks_synced_at";
pub const FOLLOWING_USER_IDS_KEY: &str = "following_user_ids";
pub const FOLLOWS_SYNCED_AT_KEY: &str = "follows_synced_at";
