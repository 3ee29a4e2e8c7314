//! Parameters for one pipeline invocation.

use serde::{Deserialize, Serialize};

/// Mirror axis selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlipMode {
    /// No mirroring.
    #[default]
    None,
    /// Mirror left-right.
    Horizontal,
    /// Mirror top-bottom.
    Vertical,
    /// Mirror along both axes.
    Both,
}

impl FlipMode {
    /// Parse a command-line token. Unknown tokens mean no flip.
    pub fn from_token(token: &str) -> Self {
        match token {
            "horizontal" => FlipMode::Horizontal,
            "vertical" => FlipMode::Vertical,
            "both" => FlipMode::Both,
            _ => FlipMode::None,
        }
    }
}

/// A requested crop region in pixels.
///
/// `top`/`left` may lie outside the image; they are clamped when applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    pub top: i64,
    pub left: i64,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    pub fn new(top: i64, left: i64, width: u32, height: u32) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }
}

/// Which resize applies, derived from the requested target dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizePolicy {
    /// Resize to exactly this size.
    Exact { width: u32, height: u32 },
    /// Fixed width, height follows the aspect ratio.
    FitWidth(u32),
    /// Fixed height, width follows the aspect ratio.
    FitHeight(u32),
    /// Leave the size alone.
    Keep,
}

/// The full set of transforms to apply to one image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformRequest {
    /// Output width in pixels.
    pub target_width: Option<u32>,
    /// Output height in pixels.
    pub target_height: Option<u32>,
    /// Rotation in degrees, positive = counter-clockwise.
    pub rotation_degrees: Option<i32>,
    /// Mirror mode.
    pub flip: FlipMode,
    /// Region to keep, taken before any other step.
    pub crop: Option<CropRect>,
}

impl TransformRequest {
    /// Create a request that leaves the image unchanged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a request from the legacy integer parameters.
    ///
    /// A non-positive width or height means "not requested", a rotation of
    /// zero means no rotation, and a crop is only present when both its
    /// width and height are positive.
    #[allow(clippy::too_many_arguments)]
    pub fn from_raw(
        width: i64,
        height: i64,
        rotation: i32,
        flip: &str,
        crop_top: i64,
        crop_left: i64,
        crop_width: i64,
        crop_height: i64,
    ) -> Self {
        let crop = match (positive(crop_width), positive(crop_height)) {
            (Some(w), Some(h)) => Some(CropRect::new(crop_top, crop_left, w, h)),
            _ => None,
        };

        Self {
            target_width: positive(width),
            target_height: positive(height),
            rotation_degrees: (rotation != 0).then_some(rotation),
            flip: FlipMode::from_token(flip),
            crop,
        }
    }

    /// The resize that applies to this request.
    pub fn resize_policy(&self) -> ResizePolicy {
        match (self.target_width, self.target_height) {
            (Some(width), Some(height)) => ResizePolicy::Exact { width, height },
            (Some(width), None) => ResizePolicy::FitWidth(width),
            (None, Some(height)) => ResizePolicy::FitHeight(height),
            (None, None) => ResizePolicy::Keep,
        }
    }

    /// Rotation angle, if a non-zero one was requested.
    pub fn rotation(&self) -> Option<i32> {
        self.rotation_degrees.filter(|&deg| deg != 0)
    }
}

/// Convert a positive integer to `u32`, saturating; anything else is absent.
fn positive(value: i64) -> Option<u32> {
    (value > 0).then(|| value.min(u32::MAX as i64) as u32)
}
