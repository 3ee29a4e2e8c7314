//! Reframe Core - geometric image transform library
//!
//! This crate loads a raster image, applies a fixed sequence of geometric
//! transforms (crop, rotate, flip, resize) and writes the result.
//!
//! # Module Structure
//!
//! - `decode` - Loading images from disk with EXIF orientation handling
//! - `encode` - Saving images in the format named by the output path
//! - `transform` - The crop, rotation, flip and resize primitives
//! - `request` - Parameters for one invocation
//! - `pipeline` - Runs the steps in order and tags failures

pub mod decode;
pub mod encode;
pub mod pipeline;
pub mod request;
pub mod transform;

pub use decode::{load_image, DecodeError, DecodedImage};
pub use encode::{save_image, EncodeError, EncodeOptions};
pub use pipeline::{process_file, PipelineError, ProcessReport, Step, TransformPipeline};
pub use request::{CropRect, FlipMode, ResizePolicy, TransformRequest};
pub use transform::TransformError;
