//! Resizing with exact or aspect-derived target dimensions.
//!
//! Resampling is pixel-area based: a box convolution averages the covered
//! source pixels when shrinking, and enlarging interpolates linearly.

use fast_image_resize::images::{Image, ImageRef};
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};

use super::error::{alloc_rgb, TransformError};
use crate::decode::DecodedImage;
use crate::request::ResizePolicy;

/// Resize an image to exact dimensions.
///
/// # Arguments
///
/// * `image` - The source image to resize
/// * `width` - Target width in pixels
/// * `height` - Target height in pixels
///
/// # Errors
///
/// Returns `TransformError::InvalidDimensions` for a zero target dimension,
/// `TransformError::EmptyImage` for an empty source and
/// `TransformError::TooLarge` when the output buffer cannot be allocated.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
) -> Result<DecodedImage, TransformError> {
    if width == 0 || height == 0 {
        return Err(TransformError::InvalidDimensions { width, height });
    }
    if image.is_empty() {
        return Err(TransformError::EmptyImage);
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let expected = image.pixel_count() as usize * DecodedImage::CHANNELS;
    if image.pixels.len() != expected {
        return Err(TransformError::BufferMismatch {
            expected,
            actual: image.pixels.len(),
        });
    }

    let src = ImageRef::new(image.width, image.height, &image.pixels, PixelType::U8x3)
        .map_err(|e| TransformError::Resample(e.to_string()))?;
    let mut dst = Image::from_vec_u8(width, height, alloc_rgb(width, height)?, PixelType::U8x3)
        .map_err(|e| TransformError::Resample(e.to_string()))?;

    let options = ResizeOptions::new().resize_alg(area_algorithm(image, width, height));
    Resizer::new()
        .resize(&src, &mut dst, &options)
        .map_err(|e| TransformError::Resample(e.to_string()))?;

    Ok(DecodedImage::new(width, height, dst.into_vec()))
}

/// Box averaging when neither axis grows, bilinear otherwise.
fn area_algorithm(image: &DecodedImage, width: u32, height: u32) -> ResizeAlg {
    if width <= image.width && height <= image.height {
        ResizeAlg::Convolution(FilterType::Box)
    } else {
        ResizeAlg::Convolution(FilterType::Bilinear)
    }
}

/// Resize according to a [`ResizePolicy`], deriving a missing dimension
/// from the current aspect ratio.
///
/// Returns the image unchanged for [`ResizePolicy::Keep`].
pub fn apply_resize(
    image: &DecodedImage,
    policy: ResizePolicy,
) -> Result<DecodedImage, TransformError> {
    match target_dimensions(policy, image.width, image.height)? {
        Some((width, height)) => resize(image, width, height),
        None => Ok(image.clone()),
    }
}

/// Compute the output size a [`ResizePolicy`] produces for a `width` x
/// `height` image, or `None` when no resize applies.
///
/// Derived dimensions are rounded to the nearest pixel. A derived
/// dimension that rounds to zero is an error.
///
/// # Example
///
/// ```ignore
/// let dims = target_dimensions(ResizePolicy::FitWidth(100), 400, 300)?;
/// assert_eq!(dims, Some((100, 75)));
/// ```
pub fn target_dimensions(
    policy: ResizePolicy,
    width: u32,
    height: u32,
) -> Result<Option<(u32, u32)>, TransformError> {
    match policy {
        ResizePolicy::Keep => Ok(None),
        ResizePolicy::Exact { width: w, height: h } => Ok(Some((w, h))),
        ResizePolicy::FitWidth(w) => {
            if width == 0 || height == 0 {
                return Err(TransformError::EmptyImage);
            }
            let h = scale_dimension(w, height, width);
            if h == 0 {
                return Err(TransformError::InvalidDimensions { width: w, height: h });
            }
            Ok(Some((w, h)))
        }
        ResizePolicy::FitHeight(h) => {
            if width == 0 || height == 0 {
                return Err(TransformError::EmptyImage);
            }
            let w = scale_dimension(h, width, height);
            if w == 0 {
                return Err(TransformError::InvalidDimensions { width: w, height: h });
            }
            Ok(Some((w, h)))
        }
    }
}

/// `round(target * numerator / denominator)`, saturating at `u32::MAX`.
fn scale_dimension(target: u32, numerator: u32, denominator: u32) -> u32 {
    let scaled = (target as f64 * numerator as f64 / denominator as f64).round();
    scaled.min(u32::MAX as f64) as u32
}
