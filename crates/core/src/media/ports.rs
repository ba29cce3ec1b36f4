//! Port interface for uploading a single processed image

use async_trait::async_trait;
use positivevoice_domain::Result;

/// Uploads one JPEG and returns its public URL
///
/// The live implementation requests a presigned URL and PUTs the bytes;
/// processing (resize/re-encode) happens before bytes reach this port.
#[async_trait]
pub trait ImageUploader: Send + Sync {
    async fn upload(&self, jpeg_bytes: &[u8], post_id: &str, index: usize) -> Result<String>;
}
