//! Export orchestration: capture once, then route to PDF or PNG.
//!
//! ```text
//! DocumentRegion ──capture──▶ CapturedBitmap ──paginate──▶ pages ──lopdf──▶ .pdf
//!                                          └──────────────── PNG encode ──▶ .png
//! ```
//!
//! Each export call re-captures the region; nothing is cached between calls
//! and the coordinator holds no mutable state. The finished artifact is handed
//! to an [`ArtifactSink`], the "caller's environment" that decides where the
//! bytes end up.
//!
//! Errors keep the three-way split the user sees: capture problems surface
//! as [`ExportError::Capture`], assembly problems as [`ExportError::Encode`],
//! and save problems as [`ExportError::Save`].

use crate::layout::DocumentRegion;
use crate::naming::{ArtifactKind, artifact_filename, artifact_stem};
use crate::paginate::{PageSize, paginate};
use crate::pdf::{DocumentMeta, assemble_pdf};
use crate::raster::{CaptureError, CapturedBitmap, Rasterizer};
use crate::record::InputRecord;
use image::{DynamicImage, ImageFormat};
use std::io::{self, Cursor};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("capture failed: {0}")]
    Capture(#[from] CaptureError),
    #[error("could not assemble artifact: {0}")]
    Encode(String),
    #[error("could not save artifact: {0}")]
    Save(#[source] io::Error),
}

/// A finished artifact, not yet saved.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub kind: ArtifactKind,
    /// `birthday-wishes-{recipientName}.{ext}`, unsanitized.
    pub filename: String,
    pub bytes: Vec<u8>,
    /// Pages in the document; 1 for an image.
    pub pages: usize,
}

/// What an export produced and where it went.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    pub kind: ArtifactKind,
    pub filename: String,
    pub size_bytes: usize,
    pub pages: usize,
    /// Captured bitmap size in device pixels.
    pub bitmap: (u32, u32),
    pub saved_to: PathBuf,
}

/// Where finished artifacts go.
pub trait ArtifactSink {
    /// Persist `artifact` and return its final location.
    fn save(&self, artifact: &ExportArtifact) -> io::Result<PathBuf>;
}

/// Saves artifacts as files in one directory, creating it if needed.
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

/// Make an artifact filename usable as a single path component.
///
/// Path separators and control characters become `_`; everything else,
/// including non-ASCII letters and spaces, is kept.
pub fn on_disk_name(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c == '/' || c == '\\' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect()
}

impl ArtifactSink for DirectorySink {
    fn save(&self, artifact: &ExportArtifact) -> io::Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(on_disk_name(&artifact.filename));
        std::fs::write(&path, &artifact.bytes)?;
        Ok(path)
    }
}

/// Lossless PNG of the capture.
pub fn encode_png(bitmap: &CapturedBitmap) -> Result<Vec<u8>, ExportError> {
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(bitmap.pixels.clone())
        .write_to(&mut buf, ImageFormat::Png)
        .map_err(|e| ExportError::Encode(format!("png: {e}")))?;
    Ok(buf.into_inner())
}

/// Paginate a capture and assemble the PDF artifact for `record`.
pub fn document_artifact(
    bitmap: &CapturedBitmap,
    record: &InputRecord,
    page_size: PageSize,
) -> Result<ExportArtifact, ExportError> {
    let pages = paginate(bitmap.width(), bitmap.height(), page_size);
    let meta = DocumentMeta {
        title: artifact_stem(record.recipient_name()),
        author: record.sender_name().to_string(),
    };
    let bytes = assemble_pdf(bitmap, &pages, page_size, &meta)
        .map_err(|e| ExportError::Encode(format!("pdf: {e}")))?;
    Ok(ExportArtifact {
        kind: ArtifactKind::Document,
        filename: artifact_filename(record.recipient_name(), ArtifactKind::Document),
        bytes,
        pages: pages.len(),
    })
}

/// PNG artifact for `record`.
pub fn image_artifact(
    bitmap: &CapturedBitmap,
    record: &InputRecord,
) -> Result<ExportArtifact, ExportError> {
    Ok(ExportArtifact {
        kind: ArtifactKind::Image,
        filename: artifact_filename(record.recipient_name(), ArtifactKind::Image),
        bytes: encode_png(bitmap)?,
        pages: 1,
    })
}

/// Runs the two export paths against a rasterizer and a sink.
pub struct ExportCoordinator<'a, R: Rasterizer, S: ArtifactSink> {
    rasterizer: &'a R,
    sink: &'a S,
    page_size: PageSize,
}

impl<'a, R: Rasterizer, S: ArtifactSink> ExportCoordinator<'a, R, S> {
    pub fn new(rasterizer: &'a R, sink: &'a S, page_size: PageSize) -> Self {
        Self {
            rasterizer,
            sink,
            page_size,
        }
    }

    /// Capture, paginate and save `birthday-wishes-{name}.pdf`.
    #[tracing::instrument(skip_all, fields(recipient = record.recipient_name()))]
    pub fn export_as_document(
        &self,
        region: &DocumentRegion,
        record: &InputRecord,
    ) -> Result<ExportReport, ExportError> {
        let bitmap = self.rasterizer.capture(region)?;
        let artifact = document_artifact(&bitmap, record, self.page_size)?;
        self.hand_off(artifact, &bitmap)
    }

    /// Capture and save `birthday-wishes-{name}.png`.
    #[tracing::instrument(skip_all, fields(recipient = record.recipient_name()))]
    pub fn export_as_image(
        &self,
        region: &DocumentRegion,
        record: &InputRecord,
    ) -> Result<ExportReport, ExportError> {
        let bitmap = self.rasterizer.capture(region)?;
        let artifact = image_artifact(&bitmap, record)?;
        self.hand_off(artifact, &bitmap)
    }

    fn hand_off(
        &self,
        artifact: ExportArtifact,
        bitmap: &CapturedBitmap,
    ) -> Result<ExportReport, ExportError> {
        let saved_to = self.sink.save(&artifact).map_err(ExportError::Save)?;
        tracing::info!(
            file = %saved_to.display(),
            bytes = artifact.bytes.len(),
            pages = artifact.pages,
            "artifact saved"
        );
        Ok(ExportReport {
            kind: artifact.kind,
            filename: artifact.filename,
            size_bytes: artifact.bytes.len(),
            pages: artifact.pages,
            bitmap: (bitmap.width(), bitmap.height()),
            saved_to,
        })
    }
}
