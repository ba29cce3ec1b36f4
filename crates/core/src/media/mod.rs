//! Batched image uploads

pub mod ports;
pub mod service;

pub use service::MediaService;
