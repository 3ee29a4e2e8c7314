//! Image loading for reframe.
//!
//! This module provides functionality for:
//! - Reading an image file from disk and detecting its format from content
//! - Applying EXIF orientation so pixels are upright
//! - Converting every supported format to a single RGB8 representation
//!
//! # Examples
//!
//! ```ignore
//! use reframe_core::decode::load_image;
//!
//! let image = load_image(Path::new("photo.jpg"))?;
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod load;
mod types;

pub use load::{decode_bytes, load_image};
pub use types::{DecodeError, DecodedImage, Orientation};
