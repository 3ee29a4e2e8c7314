//! Errors raised by the geometric transform primitives.

use thiserror::Error;

use crate::decode::DecodedImage;

/// Errors that can occur while transforming an image.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransformError {
    /// The input image has no pixels.
    #[error("Cannot transform an empty image")]
    EmptyImage,

    /// A requested output dimension is zero.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The output pixel buffer could not be allocated.
    #[error("Output of {width}x{height} pixels is too large")]
    TooLarge { width: u32, height: u32 },

    /// Pixel data length doesn't match the image dimensions.
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    BufferMismatch { expected: usize, actual: usize },

    /// The resampler rejected the source or destination image.
    #[error("Resampling failed: {0}")]
    Resample(String),
}

/// Allocate a zeroed RGB buffer for a `width` x `height` image.
///
/// Fails with `TooLarge` instead of aborting when the allocator refuses.
pub(crate) fn alloc_rgb(width: u32, height: u32) -> Result<Vec<u8>, TransformError> {
    let too_large = TransformError::TooLarge { width, height };
    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(DecodedImage::CHANNELS))
        .ok_or_else(|| too_large.clone())?;

    let mut buffer = Vec::new();
    buffer.try_reserve_exact(len).map_err(|_| too_large)?;
    buffer.resize(len, 0);
    Ok(buffer)
}

/// Copy an image into an `image::RgbImage`, checking the buffer length.
pub(crate) fn to_rgb_image(image: &DecodedImage) -> Result<image::RgbImage, TransformError> {
    let expected = image.pixel_count() as usize * DecodedImage::CHANNELS;
    let actual = image.pixels.len();
    image
        .clone()
        .into_rgb_image()
        .ok_or(TransformError::BufferMismatch { expected, actual })
}
