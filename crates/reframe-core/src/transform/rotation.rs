//! Arbitrary-angle rotation with canvas expansion.
//!
//! Rotation is expressed as a 2x3 affine matrix about the image center
//! (unit scale), then shifted so the rotated content sits in the middle of
//! a canvas just large enough to hold it.
//!
//! # Algorithm
//!
//! The warp uses inverse mapping: for each pixel in the output image we
//! invert the forward matrix to find the source position and sample it
//! with bilinear interpolation. Taps that fall outside the source read as
//! black.
//!
//! For rotation by angle θ about `(cx, cy)` the forward matrix is:
//! ```text
//! [  cos θ   sin θ   (1 - cos θ)·cx - sin θ·cy ]
//! [ -sin θ   cos θ   sin θ·cx + (1 - cos θ)·cy ]
//! ```
//! With the y axis pointing down this turns content counter-clockwise for
//! positive angles.

use super::error::{alloc_rgb, TransformError};
use crate::decode::DecodedImage;

/// A 2x3 affine transform mapping source to destination coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    pub m: [[f64; 3]; 2],
}

impl AffineTransform {
    /// Rotation by `angle_degrees` about `center` with the given scale.
    pub fn rotation(center: (f64, f64), angle_degrees: f64, scale: f64) -> Self {
        let angle_rad = angle_degrees.to_radians();
        let alpha = scale * angle_rad.cos();
        let beta = scale * angle_rad.sin();
        let (cx, cy) = center;

        Self {
            m: [
                [alpha, beta, (1.0 - alpha) * cx - beta * cy],
                [-beta, alpha, beta * cx + (1.0 - alpha) * cy],
            ],
        }
    }

    /// Shift the output by `(dx, dy)`.
    pub fn translate(mut self, dx: f64, dy: f64) -> Self {
        self.m[0][2] += dx;
        self.m[1][2] += dy;
        self
    }

    /// Map a point through the transform.
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let [r0, r1] = self.m;
        (
            r0[0] * x + r0[1] * y + r0[2],
            r1[0] * x + r1[1] * y + r1[2],
        )
    }

    /// Inverse transform, or `None` if the linear part is singular.
    pub fn invert(&self) -> Option<Self> {
        let [[a, b, tx], [c, d, ty]] = self.m;
        let det = a * d - b * c;
        if det.abs() < f64::EPSILON {
            return None;
        }
        let inv = 1.0 / det;
        let (ia, ib, ic, id) = (d * inv, -b * inv, -c * inv, a * inv);

        Some(Self {
            m: [
                [ia, ib, -(ia * tx + ib * ty)],
                [ic, id, -(ic * tx + id * ty)],
            ],
        })
    }
}

/// Compute the dimensions of the bounding box for a rotated image.
///
/// When an image is rotated, the corners extend beyond the original bounds.
/// This function calculates the canvas that contains the entire rotated
/// image, truncated to whole pixels.
///
/// # Arguments
///
/// * `width` - Original image width
/// * `height` - Original image height
/// * `angle_degrees` - Rotation angle in degrees (positive = counter-clockwise)
///
/// # Returns
///
/// Tuple of (new_width, new_height) for the rotated bounding box.
///
/// # Example
///
/// ```ignore
/// // 90-degree rotation swaps dimensions
/// let (w, h) = compute_rotated_bounds(100, 50, 90.0);
/// assert_eq!((w, h), (50, 100));
/// ```
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    let angle_normalized = angle_degrees % 360.0;
    let abs_angle = angle_normalized.abs();

    // Exact right angles: avoid floating-point drift in the truncation
    if abs_angle < 0.001 || (360.0 - abs_angle).abs() < 0.001 {
        return (width, height);
    }
    if (abs_angle - 90.0).abs() < 0.001 || (abs_angle - 270.0).abs() < 0.001 {
        return (height, width);
    }
    if (abs_angle - 180.0).abs() < 0.001 {
        return (width, height);
    }

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos().abs();
    let sin = angle_rad.sin().abs();

    let w = width as f64;
    let h = height as f64;

    // new_w = h*|sin| + w*|cos|, new_h = h*|cos| + w*|sin|
    let new_w = (h * sin + w * cos) as u32;
    let new_h = (h * cos + w * sin) as u32;

    (new_w.max(1), new_h.max(1))
}

/// Apply rotation to an image.
///
/// The image is rotated around its center `(width / 2, height / 2)`. The
/// output canvas is expanded to fit the entire rotated image (no clipping)
/// and uncovered areas are filled with black.
///
/// # Errors
///
/// Returns `TransformError::EmptyImage` for an empty source.
pub fn apply_rotation(
    image: &DecodedImage,
    angle_degrees: f64,
) -> Result<DecodedImage, TransformError> {
    if image.is_empty() {
        return Err(TransformError::EmptyImage);
    }

    let center = (image.width as f64 / 2.0, image.height as f64 / 2.0);
    let (dst_w, dst_h) = compute_rotated_bounds(image.width, image.height, angle_degrees);

    let transform = AffineTransform::rotation(center, angle_degrees, 1.0).translate(
        dst_w as f64 / 2.0 - center.0,
        dst_h as f64 / 2.0 - center.1,
    );

    warp_affine(image, &transform, dst_w, dst_h)
}

/// Warp `image` through `transform` onto a `width` x `height` canvas.
///
/// Coordinates are continuous: pixel `(x, y)` covers `[x, x + 1) x [y, y + 1)`,
/// so a quarter turn about `(width / 2, height / 2)` lands exactly on the
/// pixel grid.
pub fn warp_affine(
    image: &DecodedImage,
    transform: &AffineTransform,
    width: u32,
    height: u32,
) -> Result<DecodedImage, TransformError> {
    if width == 0 || height == 0 {
        return Err(TransformError::InvalidDimensions { width, height });
    }

    let inverse = transform
        .invert()
        .ok_or(TransformError::InvalidDimensions { width, height })?;

    let mut output = alloc_rgb(width, height)?;
    let stride = width as usize * DecodedImage::CHANNELS;

    for (dst_y, row) in output.chunks_exact_mut(stride).enumerate() {
        for (dst_x, out) in row.chunks_exact_mut(DecodedImage::CHANNELS).enumerate() {
            // Map pixel centers, then back to sample-grid coordinates
            let (src_x, src_y) = inverse.apply(dst_x as f64 + 0.5, dst_y as f64 + 0.5);
            out.copy_from_slice(&sample_bilinear(image, src_x - 0.5, src_y - 0.5));
        }
    }

    Ok(DecodedImage::new(width, height, output))
}

/// Get a pixel as [f64; 3], or black outside the image.
#[inline]
fn tap(image: &DecodedImage, px: i64, py: i64) -> [f64; 3] {
    if px < 0 || py < 0 || px >= image.width as i64 || py >= image.height as i64 {
        return [0.0; 3];
    }
    let [r, g, b] = image.pixel(px as u32, py as u32);
    [r as f64, g as f64, b as f64]
}

/// Sample a pixel using bilinear interpolation.
///
/// Bilinear interpolation considers the 4 nearest pixels and weights
/// their contribution based on distance.
fn sample_bilinear(image: &DecodedImage, x: f64, y: f64) -> [u8; 3] {
    let (w, h) = (image.width as f64, image.height as f64);

    // Entirely outside: every tap would be background
    if x <= -1.0 || x >= w || y <= -1.0 || y >= h {
        return [0, 0, 0];
    }

    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let p00 = tap(image, x0, y0);
    let p10 = tap(image, x0 + 1, y0);
    let p01 = tap(image, x0, y0 + 1);
    let p11 = tap(image, x0 + 1, y0 + 1);

    let mut result = [0u8; 3];
    for i in 0..3 {
        let v = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }

    result
}
