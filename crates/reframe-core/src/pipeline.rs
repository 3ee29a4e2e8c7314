//! The fixed crop → rotate → flip → resize pipeline.
//!
//! Steps run in [`Step::ALL`] order over a single image value. A step whose
//! parameters are absent is skipped; the order never changes.

use std::fmt;
use std::path::Path;

use thiserror::Error;

use crate::decode::{load_image, DecodeError, DecodedImage};
use crate::encode::{save_image, EncodeError, EncodeOptions};
use crate::request::{FlipMode, ResizePolicy, TransformRequest};
use crate::transform::{
    apply_crop, apply_flip, apply_resize, apply_rotation, clamp_crop, TransformError,
};

/// One stage of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Crop,
    Rotate,
    Flip,
    Resize,
}

impl Step {
    /// Every step, in execution order.
    pub const ALL: [Step; 4] = [Step::Crop, Step::Rotate, Step::Flip, Step::Resize];

    /// Whether this step does anything for `request`.
    pub fn is_triggered(self, request: &TransformRequest) -> bool {
        match self {
            Step::Crop => request.crop.is_some(),
            Step::Rotate => request.rotation().is_some(),
            Step::Flip => request.flip != FlipMode::None,
            Step::Resize => request.resize_policy() != ResizePolicy::Keep,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Crop => "crop",
            Step::Rotate => "rotate",
            Step::Flip => "flip",
            Step::Resize => "resize",
        };
        f.write_str(name)
    }
}

/// Why an invocation failed.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input could not be read or decoded. Nothing was written.
    #[error("Failed to load image: {0}")]
    Load(#[from] DecodeError),

    /// A transform step failed.
    #[error("Failed to {step} image: {source}")]
    Processing {
        step: Step,
        #[source]
        source: TransformError,
    },

    /// The result could not be encoded or written.
    #[error("Failed to save image: {0}")]
    Save(#[from] EncodeError),
}

/// Summary of a completed file-to-file run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessReport {
    /// Input dimensions after decoding.
    pub original: (u32, u32),
    /// Dimensions of the written image.
    pub output: (u32, u32),
}

/// Applies a [`TransformRequest`] to images.
#[derive(Debug, Clone)]
pub struct TransformPipeline {
    request: TransformRequest,
}

impl TransformPipeline {
    pub fn new(request: TransformRequest) -> Self {
        Self { request }
    }

    /// Run every triggered step over `image` in order.
    pub fn run(&self, image: DecodedImage) -> Result<DecodedImage, PipelineError> {
        Step::ALL.into_iter().try_fold(image, |image, step| {
            if !step.is_triggered(&self.request) {
                tracing::debug!("Skipping {} step", step);
                return Ok(image);
            }
            self.apply_step(step, image)
                .map_err(|source| PipelineError::Processing { step, source })
        })
    }

    fn apply_step(&self, step: Step, image: DecodedImage) -> Result<DecodedImage, TransformError> {
        let request = &self.request;

        match step {
            Step::Crop => {
                let Some(rect) = request.crop else {
                    return Ok(image);
                };
                if let Some(bounds) = clamp_crop(rect, image.width, image.height) {
                    tracing::info!(
                        "Crop area: ({}, {}, {}, {})",
                        bounds.left,
                        bounds.top,
                        bounds.right,
                        bounds.bottom
                    );
                }
                let cropped = apply_crop(&image, rect);
                tracing::info!("Cropped image size: {}x{}", cropped.width, cropped.height);
                Ok(cropped)
            }
            Step::Rotate => {
                let Some(degrees) = request.rotation() else {
                    return Ok(image);
                };
                let rotated = apply_rotation(&image, degrees as f64)?;
                tracing::info!(
                    "Rotated image by {} degrees: {}x{}",
                    degrees,
                    rotated.width,
                    rotated.height
                );
                Ok(rotated)
            }
            Step::Flip => {
                let flipped = apply_flip(&image, request.flip)?;
                tracing::info!("Flipped image ({:?})", request.flip);
                Ok(flipped)
            }
            Step::Resize => {
                let resized = apply_resize(&image, request.resize_policy())?;
                tracing::info!("Resized image: {}x{}", resized.width, resized.height);
                Ok(resized)
            }
        }
    }
}

/// Load `input`, run the pipeline and save the result to `output`.
///
/// Nothing is written when loading or any transform step fails.
pub fn process_file(
    input: &Path,
    output: &Path,
    request: &TransformRequest,
    options: &EncodeOptions,
) -> Result<ProcessReport, PipelineError> {
    let image = load_image(input)?;
    let original = (image.width, image.height);
    tracing::info!("Original image size: {}x{}", original.0, original.1);

    let result = TransformPipeline::new(request.clone()).run(image)?;

    save_image(&result, output, options)?;
    tracing::info!("Image processed and saved to {}", output.display());

    Ok(ProcessReport {
        original,
        output: (result.width, result.height),
    })
}
