//! Capture: [`DocumentRegion`](crate::layout::DocumentRegion) → RGB bitmap.
//!
//! | Step | Crate / function |
//! |---|---|
//! | **Scene** | region serialized to SVG with `maud` |
//! | **Text shaping** | `usvg` (rustybuzz) against system + configured fonts |
//! | **Render at 2×** | `resvg::render` into a `tiny_skia::Pixmap` on white |
//! | **Signature** | `image` decode, fit to slot, `imageops::overlay` |
//!
//! The module is split into:
//! - **Backend**: [`Rasterizer`] trait, [`CapturedBitmap`], [`CaptureError`]
//! - **Scene**: pure SVG serialization of a region (unit testable)
//! - **SvgRasterizer**: the production implementation

pub mod backend;
pub(crate) mod scene;
pub mod svg_backend;

pub use backend::{CAPTURE_SCALE, CaptureError, CapturedBitmap, Rasterizer, surface_size};
pub use svg_backend::SvgRasterizer;
