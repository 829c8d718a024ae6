//! Rasterizer trait and shared types.
//!
//! The [`Rasterizer`] trait is the seam between the laid-out letter and the
//! export pipeline. The production implementation is
//! [`SvgRasterizer`](super::svg_backend::SvgRasterizer); tests substitute a
//! mock that records what it was asked to capture.

use crate::layout::DocumentRegion;
use image::RgbImage;
use thiserror::Error;

/// Device pixels per CSS pixel in every capture.
pub const CAPTURE_SCALE: u32 = 2;

/// Largest bitmap side we are willing to allocate, in device pixels.
pub const MAX_SURFACE_SIDE: u32 = 16_384;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("asset '{name}' unavailable: {reason}")]
    Asset { name: String, reason: String },
    #[error("scene could not be built: {0}")]
    Scene(String),
    #[error("capture surface {width}x{height} out of range (max {MAX_SURFACE_SIDE} per side)")]
    Surface { width: u32, height: u32 },
}

/// An opaque RGB capture of a region at [`CAPTURE_SCALE`].
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedBitmap {
    pub pixels: RgbImage,
}

impl CapturedBitmap {
    pub fn new(pixels: RgbImage) -> Self {
        Self { pixels }
    }

    /// Device pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Device pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

/// Device-pixel size of a capture of `region`.
///
/// Fails for an empty region or one whose scaled side exceeds
/// [`MAX_SURFACE_SIDE`].
pub fn surface_size(region: &DocumentRegion) -> Result<(u32, u32), CaptureError> {
    let width = region.width.saturating_mul(CAPTURE_SCALE);
    let height = region.height.saturating_mul(CAPTURE_SCALE);
    if width == 0 || height == 0 || width > MAX_SURFACE_SIDE || height > MAX_SURFACE_SIDE {
        return Err(CaptureError::Surface { width, height });
    }
    Ok((width, height))
}

/// Something that can turn a laid-out region into pixels.
///
/// Capture must be side-effect free on the region: it is borrowed, never
/// modified, and the same region may be captured any number of times.
pub trait Rasterizer {
    fn capture(&self, region: &DocumentRegion) -> Result<CapturedBitmap, CaptureError>;
}
