//! Image processing and uploads

pub mod processor;
pub mod uploader;

pub use processor::{prepare_for_upload, MediaError};
pub use uploader::RestImageUploader;
