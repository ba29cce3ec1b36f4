//! HTTP transport

pub mod client;

pub use client::{ApiClient, ApiClientConfig, BearerTokens};
