//! Bookmark and follow edges with optimistic local state

pub mod ports;
pub mod service;

pub use service::{BookmarkService, FollowService};
