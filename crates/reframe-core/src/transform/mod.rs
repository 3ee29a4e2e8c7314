//! Geometric transform primitives: crop, rotation, flip and resize.
//!
//! Each primitive takes an image by reference and returns a new one; the
//! pipeline in [`crate::pipeline`] chains them in a fixed order.
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = counter-clockwise
//! - Crop coordinates are in pixels of the image being cropped
//! - Origin is top-left corner

mod crop;
mod error;
mod flip;
mod resize;
mod rotation;

pub use crop::{apply_crop, clamp_crop, extract_region, CropBounds};
pub use error::TransformError;
pub use flip::apply_flip;
pub use resize::{apply_resize, resize, target_dimensions};
pub use rotation::{apply_rotation, compute_rotated_bounds, warp_affine, AffineTransform};
