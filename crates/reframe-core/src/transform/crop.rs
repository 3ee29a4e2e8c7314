//! Pixel-space cropping with bound clamping.
//!
//! The crop origin is clamped into the image and the far edges are clipped
//! to the image size, so an oversized request yields a smaller crop instead
//! of an error.
//!
//! # Example
//!
//! ```ignore
//! // 50x40 region starting 10 pixels in and 5 pixels down
//! let rect = CropRect::new(5, 10, 50, 40);
//! let cropped = apply_crop(&image, rect);
//! ```

use crate::decode::DecodedImage;
use crate::request::CropRect;

/// A crop region after clamping, in pixel coordinates.
///
/// `left..right` and `top..bottom` are half-open and lie within the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropBounds {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CropBounds {
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

/// Clamp a crop request against a `width` x `height` source.
///
/// The origin is clamped into `[0, width - 1]` x `[0, height - 1]` and the
/// right/bottom edges are clipped to the source size.
///
/// Returns `None` when no valid origin exists, which only happens for an
/// empty source.
pub fn clamp_crop(rect: CropRect, width: u32, height: u32) -> Option<CropBounds> {
    let (w, h) = (width as i64, height as i64);

    let left = rect.left.min(w - 1).max(0);
    let top = rect.top.min(h - 1).max(0);

    if left >= w || top >= h {
        return None;
    }

    let right = (left + rect.width as i64).min(w);
    let bottom = (top + rect.height as i64).min(h);

    Some(CropBounds {
        left: left as u32,
        top: top as u32,
        right: right as u32,
        bottom: bottom as u32,
    })
}

/// Apply a pixel crop to an image.
///
/// # Arguments
///
/// * `image` - Source image to crop
/// * `rect` - Requested region; out-of-range parts are clamped
///
/// # Returns
///
/// A new `DecodedImage` holding rows `top..bottom` and columns
/// `left..right` of the source, or a copy of the source when the request
/// is degenerate.
pub fn apply_crop(image: &DecodedImage, rect: CropRect) -> DecodedImage {
    let Some(bounds) = clamp_crop(rect, image.width, image.height) else {
        tracing::warn!(
            "Ignoring crop {:?} on empty {}x{} image",
            rect,
            image.width,
            image.height
        );
        return image.clone();
    };

    extract_region(image, bounds)
}

/// Copy the pixels inside `bounds` into a new image.
pub fn extract_region(image: &DecodedImage, bounds: CropBounds) -> DecodedImage {
    const C: usize = DecodedImage::CHANNELS;

    // Fast path: full-frame crop returns a clone
    if bounds.left == 0
        && bounds.top == 0
        && bounds.right == image.width
        && bounds.bottom == image.height
    {
        return image.clone();
    }

    let out_width = bounds.width();
    let out_height = bounds.height();
    let src_stride = image.row_stride();
    let row_len = out_width as usize * C;

    let mut output = Vec::with_capacity(row_len * out_height as usize);

    // Copy pixel data row by row
    for src_y in bounds.top..bounds.bottom {
        let start = src_y as usize * src_stride + bounds.left as usize * C;
        output.extend_from_slice(&image.pixels[start..start + row_len]);
    }

    DecodedImage::new(out_width, out_height, output)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for generating image dimensions (keep reasonable for speed).
    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=100, 1u32..=100)
    }

    /// Strategy for generating crop requests, including out-of-range origins.
    fn crop_strategy() -> impl Strategy<Value = CropRect> {
        (-50i64..=150, -50i64..=150, 1u32..=150, 1u32..=150)
            .prop_map(|(top, left, width, height)| CropRect::new(top, left, width, height))
    }

    proptest! {
        /// Property: clamped bounds always lie inside the source.
        #[test]
        fn prop_bounds_within_source(
            (width, height) in dimensions_strategy(),
            rect in crop_strategy(),
        ) {
            let b = clamp_crop(rect, width, height).unwrap();
            prop_assert!(b.left < width);
            prop_assert!(b.top < height);
            prop_assert!(b.right <= width);
            prop_assert!(b.bottom <= height);
            prop_assert!(b.right > b.left);
            prop_assert!(b.bottom > b.top);
        }

        /// Property: output size never exceeds the requested size.
        #[test]
        fn prop_output_bounded_by_request(
            (width, height) in dimensions_strategy(),
            rect in crop_strategy(),
        ) {
            let img = DecodedImage::new(width, height, vec![0u8; (width * height * 3) as usize]);
            let result = apply_crop(&img, rect);

            prop_assert!(result.width >= 1 && result.width <= rect.width);
            prop_assert!(result.height >= 1 && result.height <= rect.height);
            prop_assert_eq!(result.pixels.len(), (result.width * result.height * 3) as usize);
        }
    }
}
