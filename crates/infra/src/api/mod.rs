//! Typed REST adapters implementing the core ports

pub mod ai;
pub mod comments;
pub mod engagement;
pub mod posts;

pub use ai::AiClient;
pub use comments::CommentsClient;
pub use engagement::EngagementClient;
pub use posts::PostsClient;
