//! # PositiveVoice Infrastructure
//!
//! Adapters connecting the core ports to the outside world:
//! - reqwest HTTP client with the 401 refresh-and-retry cycle
//! - typed REST adapters for posts, comments, engagement and AI endpoints
//! - JSON-file cache for bookmark/follow id sets
//! - environment/file configuration loader
//! - image processing and presigned-URL uploads

pub mod api;
pub mod cache;
pub mod config;
pub mod errors;
pub mod http;
pub mod media;

pub use api::{AiClient, CommentsClient, EngagementClient, PostsClient};
pub use cache::FileEdgeCache;
pub use config::AppConfig;
pub use errors::ApiError;
pub use http::{ApiClient, ApiClientConfig, BearerTokens};
pub use media::{prepare_for_upload, MediaError, RestImageUploader};
