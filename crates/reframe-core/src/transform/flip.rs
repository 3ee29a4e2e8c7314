//! Mirroring along the horizontal and vertical axes.

use image::imageops;

use super::error::{to_rgb_image, TransformError};
use crate::decode::DecodedImage;
use crate::request::FlipMode;

/// Apply a [`FlipMode`] to an image.
///
/// `Both` mirrors along both axes, which is the same as a half turn.
///
/// # Errors
///
/// Returns `TransformError::BufferMismatch` if the pixel buffer does not
/// match the image dimensions.
pub fn apply_flip(image: &DecodedImage, mode: FlipMode) -> Result<DecodedImage, TransformError> {
    if mode == FlipMode::None || image.is_empty() {
        return Ok(image.clone());
    }

    let mut rgb = to_rgb_image(image)?;
    match mode {
        FlipMode::Horizontal => imageops::flip_horizontal_in_place(&mut rgb),
        FlipMode::Vertical => imageops::flip_vertical_in_place(&mut rgb),
        FlipMode::Both => {
            imageops::flip_horizontal_in_place(&mut rgb);
            imageops::flip_vertical_in_place(&mut rgb);
        }
        FlipMode::None => {}
    }

    Ok(DecodedImage::from_rgb_image(rgb))
}
