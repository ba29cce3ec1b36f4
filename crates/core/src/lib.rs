//! # PositiveVoice Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits) for the REST backend and local caches
//! - Client-side services: optimistic bookmark/follow toggles, search state,
//!   post composition, batched media uploads
//!
//! ## Architecture Principles
//! - Only depends on `positivevoice-domain`
//! - No HTTP or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod ai;
pub mod comments;
pub mod composer;
pub mod engagement;
pub mod media;
pub mod posts;
pub mod search;

// Re-export specific items to avoid ambiguity
pub use ai::ports::{AiApi, Classification, Moderation, Sentiment};
pub use comments::ports::CommentsApi;
pub use composer::PostComposer;
pub use engagement::ports::{BookmarkApi, EdgeCache, FollowApi, ProfilesApi};
pub use engagement::{BookmarkService, FollowService};
pub use media::ports::ImageUploader;
pub use media::MediaService;
pub use posts::ports::{NewPost, PostQuery, PostsApi};
pub use search::{SearchService, SearchSnapshot};
