//! # PositiveVoice Domain
//!
//! Business domain types and models for the PositiveVoice client.
//!
//! This crate contains:
//! - Domain data types (Post, Comment, UserProfile, etc.)
//! - Domain error types and Result definitions
//! - Domain constants (content limits, cache keys)
//!
//! ## Architecture
//! - No dependencies on other PositiveVoice crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use errors::*;
pub use types::*;
