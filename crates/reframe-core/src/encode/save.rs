//! Writing images to disk in the format named by the output path.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::jpeg::{encode_jpeg, DEFAULT_JPEG_QUALITY};
use crate::decode::DecodedImage;

/// Errors that can occur while encoding or writing an image.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The output extension names no format this build can write
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// The encoder rejected the image
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    /// Creating the output directory or writing the file failed
    #[error("I/O error: {0}")]
    IoError(String),
}

/// Encoder settings for saved output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodeOptions {
    /// JPEG quality (1-100). Ignored for other formats.
    pub jpeg_quality: u8,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Encode an image in the given format.
pub fn encode_image(
    image: &DecodedImage,
    format: ImageFormat,
    options: &EncodeOptions,
) -> Result<Vec<u8>, EncodeError> {
    if image.width == 0 || image.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }

    if format == ImageFormat::Jpeg {
        return encode_jpeg(&image.pixels, image.width, image.height, options.jpeg_quality);
    }

    if !format.writing_enabled() {
        return Err(EncodeError::UnsupportedFormat(format!("{:?}", format)));
    }

    let expected = image.pixel_count() as usize * DecodedImage::CHANNELS;
    let actual = image.pixels.len();
    let rgb = image
        .clone()
        .into_rgb_image()
        .ok_or(EncodeError::InvalidPixelData { expected, actual })?;

    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(rgb)
        .write_to(&mut buffer, format)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Save an image to `path`, choosing the format from its extension.
///
/// Missing parent directories are created. The image is fully encoded in
/// memory before the file is opened, so an encoding failure leaves no file
/// behind.
///
/// # Errors
///
/// Returns `EncodeError::UnsupportedFormat` for an unknown extension and
/// `EncodeError::IoError` if the directory or file cannot be written.
pub fn save_image(
    image: &DecodedImage,
    path: &Path,
    options: &EncodeOptions,
) -> Result<(), EncodeError> {
    let format = ImageFormat::from_path(path)
        .map_err(|_| EncodeError::UnsupportedFormat(path.display().to_string()))?;

    let bytes = encode_image(image, format, options)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            tracing::debug!("Creating output directory {}", parent.display());
        }
        std::fs::create_dir_all(parent)
            .map_err(|e| EncodeError::IoError(format!("{}: {}", parent.display(), e)))?;
    }

    std::fs::write(path, bytes)
        .map_err(|e| EncodeError::IoError(format!("{}: {}", path.display(), e)))
}
