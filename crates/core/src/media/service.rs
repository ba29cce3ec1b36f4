//! Upload batching
//!
//! Images go up in fixed batches of two concurrent uploads; batches run
//! sequentially and the first failure aborts the whole pipeline.

use std::sync::Arc;

use futures::future::try_join_all;
use tracing::debug;

use positivevoice_domain::constants::UPLOAD_BATCH_SIZE;
use positivevoice_domain::Result;

use super::ports::ImageUploader;

/// Drives the upload pipeline for a post's images
pub struct MediaService {
    uploader: Arc<dyn ImageUploader>,
}

impl MediaService {
    #[must_use]
    pub fn new(uploader: Arc<dyn ImageUploader>) -> Self {
        Self { uploader }
    }

    /// Upload processed JPEGs, returning their URLs in input order.
    ///
    /// Fail-fast: a failure in any batch propagates immediately and later
    /// batches never start.
    pub async fn upload_images(&self, images: &[Vec<u8>], post_id: &str) -> Result<Vec<String>> {
        let mut urls = Vec::with_capacity(images.len());

        for (batch_index, batch) in images.chunks(UPLOAD_BATCH_SIZE).enumerate() {
            let uploads = batch.iter().enumerate().map(|(offset, bytes)| {
                let index = batch_index * UPLOAD_BATCH_SIZE + offset;
                self.uploader.upload(bytes, post_id, index)
            });
            let batch_urls = try_join_all(uploads).await?;
            debug!(batch = batch_index, count = batch_urls.len(), "upload batch finished");
            urls.extend(batch_urls);
        }

        Ok(urls)
    }
}
