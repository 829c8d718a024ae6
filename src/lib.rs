//! # Birthday Letter
//!
//! Composes a personalised Gujarati birthday greeting letter and exports it
//! as a paginated PDF or a single PNG named `birthday-wishes-{name}.{ext}`.
//!
//! # Architecture: Compose, Lay Out, Capture, Export
//!
//! ```text
//! InputDraft ─validate─▶ InputRecord ─compose─▶ RenderableDocument
//!                                                   │
//!                              preview.html ◀───────┤ lay_out
//!                                                   ▼
//!                                            DocumentRegion
//!                                                   │ Rasterizer::capture (2×, white)
//!                                                   ▼
//!                                            CapturedBitmap
//!                                      paginate ┌───┴───┐ encode
//!                                               ▼       ▼
//!                                   birthday-wishes-Asha.pdf / .png
//! ```
//!
//! Everything up to the region is a pure function of the record and the
//! config, so two runs with the same input produce the same letter. Capture
//! is the one step that touches fonts and image assets; it sits behind the
//! [`raster::Rasterizer`] trait so pagination, PDF assembly and naming are
//! tested without rendering anything.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`record`] | Input boundary: `InputDraft` → validated `InputRecord`, or the missing fields |
//! | [`locale`] | Gujarati numerals, month names, full-date and birthday-phrase formatting |
//! | [`wishes`] | Fixed catalog of selectable wish paragraphs |
//! | [`compose`] | `InputRecord` → ordered letter blocks |
//! | [`layout`] | Blocks → absolutely positioned region (greedy wrap, fixed rhythm) |
//! | [`preview`] | Blocks → standalone HTML preview using Maud |
//! | [`raster`] | `Rasterizer` trait and the resvg-based `SvgRasterizer` |
//! | [`paginate`] | Sliding-window slicing of the capture into page bands |
//! | [`pdf`] | lopdf assembly: one shared image, one page per band |
//! | [`export`] | `ExportCoordinator`, artifact sinks, export errors |
//! | [`naming`] | `birthday-wishes-{name}.{ext}` filename convention |
//! | [`config`] | `letter.toml` loading, validation, merging, and preview CSS |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Capture Through SVG
//!
//! The region is serialized to SVG and rendered by `resvg`, whose text
//! pipeline shapes Gujarati conjuncts correctly given a Gujarati-capable
//! font. No browser, no system graphics stack: the binary renders the same
//! letter on any machine that has the font.
//!
//! ## Content-Agnostic Pagination
//!
//! The capture is one tall strip cut into page-height bands; a line of text
//! may straddle two pages. Paragraph-aware breaking is a possible future
//! enhancement, not a bug.
//!
//! ## Plain Dates
//!
//! Dates are `chrono::NaiveDate`. No timezone is ever applied, so a letter
//! dated 15 March always says ૧૫/૦૩.

pub mod compose;
pub mod config;
pub mod export;
pub mod layout;
pub mod locale;
pub mod naming;
pub mod output;
pub mod paginate;
pub mod pdf;
pub mod preview;
pub mod raster;
pub mod record;
pub mod wishes;

#[cfg(test)]
pub(crate) mod test_helpers;
