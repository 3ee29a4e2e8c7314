//! Image encoding and saving for reframe.
//!
//! This module provides functionality for:
//! - Encoding RGB pixel data to JPEG with a configurable quality
//! - Writing an image to disk in the format named by its extension,
//!   creating missing parent directories first
//!
//! # Examples
//!
//! ```ignore
//! use reframe_core::encode::{save_image, EncodeOptions};
//!
//! save_image(&image, Path::new("out/result.png"), &EncodeOptions::default())?;
//! ```

mod jpeg;
mod save;

pub use jpeg::{encode_jpeg, DEFAULT_JPEG_QUALITY};
pub use save::{encode_image, save_image, EncodeError, EncodeOptions};
