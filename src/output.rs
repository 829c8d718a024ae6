//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Letter
//! 001 date        તા. ૧૫/૦૩/૨૦૨૪
//! 002 motto       ।। जीवेत शरदः शतम् ।।
//! 003 salutation  સ્નેહીશ્રી, Asha
//! 004 paragraph   જુલાઈ મહીનાની ૦૪ તારીખે આવતા આપના જન્મદિવસ...
//! ...
//! 008 signature   signature
//! 009 recipient   પ્રતિ,
//!                 શ્રી Asha
//!                 12 Elm St,
//! ```
//!
//! ## Export
//!
//! ```text
//! birthday-wishes-Asha.pdf → out/birthday-wishes-Asha.pdf
//!     3 pages, 1536x2644 px, 412 KiB
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::compose::{Block, RenderableDocument};
use crate::export::ExportReport;
use crate::naming::ArtifactKind;
use crate::record::RequiredField;
use crate::wishes::WISHES;

/// Width of the block-kind column in the letter outline.
const KIND_COLUMN: usize = 12;

/// Longest text shown per outline line, in characters.
const OUTLINE_TEXT_MAX: usize = 48;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_text(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max).collect();
        format!("{}...", head.trim_end())
    }
}

fn format_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{} KiB", bytes / 1024)
    } else {
        format!("{:.1} MiB", bytes as f64 / (1024.0 * 1024.0))
    }
}

// ============================================================================
// check
// ============================================================================

/// Outline of a composed letter: one line per block, recipient lines stacked.
pub fn format_letter_outline(doc: &RenderableDocument) -> Vec<String> {
    let mut lines = vec!["Letter".to_string()];
    let continuation = " ".repeat(4 + KIND_COLUMN);

    for (i, block) in doc.blocks.iter().enumerate() {
        let head = format!(
            "{} {:<width$}",
            format_index(i + 1),
            block.kind(),
            width = KIND_COLUMN
        );
        match block {
            Block::DateLine(text)
            | Block::Motto(text)
            | Block::Salutation(text)
            | Block::Paragraph(text)
            | Block::Wish(text)
            | Block::Closing(text) => {
                lines.push(format!("{head}{}", truncate_text(text, OUTLINE_TEXT_MAX)));
            }
            Block::Signature { asset } => lines.push(format!("{head}{asset}")),
            Block::Recipient { lines: recipient } => {
                for (j, line) in recipient.iter().enumerate() {
                    if j == 0 {
                        lines.push(format!("{head}{line}"));
                    } else {
                        lines.push(format!("{continuation}{line}"));
                    }
                }
            }
        }
    }
    lines
}

pub fn print_letter_outline(doc: &RenderableDocument) {
    for line in format_letter_outline(doc) {
        println!("{}", line);
    }
}

/// The "go back and fill these in" message for an incomplete draft.
pub fn format_validation_gap(missing: &[RequiredField]) -> Vec<String> {
    let mut lines = vec!["Letter not rendered: required fields are missing".to_string()];
    for field in missing {
        lines.push(format!("{}{}", indent(1), field));
    }
    lines
}

// ============================================================================
// export
// ============================================================================

/// Format one export result.
pub fn format_export_report(report: &ExportReport) -> Vec<String> {
    let (w, h) = report.bitmap;
    let detail = match report.kind {
        ArtifactKind::Document => {
            let unit = if report.pages == 1 { "page" } else { "pages" };
            format!("{} {unit}, {w}x{h} px", report.pages)
        }
        ArtifactKind::Image => format!("{w}x{h} px"),
    };
    vec![
        format!("{} → {}", report.filename, report.saved_to.display()),
        format!(
            "{}{}, {}",
            indent(1),
            detail,
            format_size(report.size_bytes)
        ),
    ]
}

pub fn print_export_report(report: &ExportReport) {
    for line in format_export_report(report) {
        println!("{}", line);
    }
}

// ============================================================================
// wishes
// ============================================================================

/// The wish catalog with the indices a draft uses to select them.
pub fn format_wishes() -> Vec<String> {
    WISHES
        .iter()
        .enumerate()
        .map(|(i, wish)| format!("{:>2}  {}", i, wish))
        .collect()
}

pub fn print_wishes() {
    for line in format_wishes() {
        println!("{}", line);
    }
}
