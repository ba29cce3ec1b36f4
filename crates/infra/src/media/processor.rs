//! Pre-upload image processing
//!
//! Every image is decoded, scaled down so its long side fits 1080 px, and
//! re-encoded as JPEG quality 80. Re-encoding also strips EXIF metadata.

use image::codecs::jpeg::JpegEncoder;
use image::GenericImageView;
use thiserror::Error;
use tracing::debug;

use positivevoice_domain::constants::{JPEG_QUALITY, MAX_IMAGE_BYTES, MAX_IMAGE_DIMENSION};
use positivevoice_domain::VoiceError;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("image decode failed: {0}")]
    Decode(String),

    #[error("image encode failed: {0}")]
    Encode(String),

    #[error("processed image is {bytes} bytes, over the {MAX_IMAGE_BYTES} byte limit")]
    TooLarge { bytes: usize },
}

impl From<MediaError> for VoiceError {
    fn from(err: MediaError) -> Self {
        match err {
            MediaError::Decode(_) | MediaError::TooLarge { .. } => {
                VoiceError::InvalidInput(err.to_string())
            }
            MediaError::Encode(msg) => VoiceError::Internal(msg),
        }
    }
}

/// Normalize raw image bytes into an upload-ready JPEG
///
/// # Errors
/// `Decode` for unreadable input, `TooLarge` when the processed JPEG still
/// exceeds the size limit.
pub fn prepare_for_upload(bytes: &[u8]) -> Result<Vec<u8>, MediaError> {
    let decoded = image::load_from_memory(bytes).map_err(|e| MediaError::Decode(e.to_string()))?;

    let (width, height) = decoded.dimensions();
    let scaled = if width.max(height) > MAX_IMAGE_DIMENSION {
        debug!(width, height, "scaling image down to fit {MAX_IMAGE_DIMENSION} px");
        decoded.resize(MAX_IMAGE_DIMENSION, MAX_IMAGE_DIMENSION, image::imageops::FilterType::Lanczos3)
    } else {
        decoded
    };

    let mut jpeg = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY);
    scaled
        .into_rgb8()
        .write_with_encoder(encoder)
        .map_err(|e| MediaError::Encode(e.to_string()))?;

    if jpeg.len() > MAX_IMAGE_BYTES {
        return Err(MediaError::TooLarge { bytes: jpeg.len() });
    }
    Ok(jpeg)
}
