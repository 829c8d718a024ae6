//! Shared test utilities for the birthday-letter test suite.
//!
//! Provides the canonical "Asha" letter request and small image fixtures.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let record = asha_record();
//! let doc = compose(&record);
//! assert_eq!(record.recipient_name(), "Asha");
//! ```

use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};

use crate::record::{InputDraft, InputRecord};

// =========================================================================
// Letter requests
// =========================================================================

/// A complete draft: Asha's birthday letter from Ravi.
pub fn asha_draft() -> InputDraft {
    InputDraft {
        recipient_name: Some("Asha".into()),
        sender_name: Some("Ravi".into()),
        letter_date: Some("2024-03-15".into()),
        birth_date: Some("1990-07-04".into()),
        address: Some("12 Elm St, Springfield, 62704".into()),
        wishes: Vec::new(),
    }
}

/// [`asha_draft`], validated.
pub fn asha_record() -> InputRecord {
    asha_draft().validate().unwrap()
}

// =========================================================================
// Image fixtures
// =========================================================================

/// Encode a small opaque dark-blue PNG, `width`×`height`.
pub fn signature_png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([20, 40, 120, 255]));
    let mut buf = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    buf.into_inner()
}

/// Write a signature PNG into `dir` and return its path.
pub fn write_signature(dir: &Path) -> PathBuf {
    let path = dir.join("sign.png");
    std::fs::write(&path, signature_png_bytes(90, 36)).unwrap();
    path
}
