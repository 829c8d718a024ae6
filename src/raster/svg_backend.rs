//! Production rasterizer: SVG scene rendered by `resvg`.
//!
//! ## Crate mapping
//!
//! | Step | Crate / function |
//! |---|---|
//! | Parse + shape text | `usvg::Tree::from_str` with a shared `fontdb` |
//! | Render | `resvg::render` at [`CAPTURE_SCALE`] onto white |
//! | Decode signature | `image::load_from_memory` |
//! | Fit + composite | `imageops::resize` (Lanczos3) + `imageops::overlay` |
//!
//! The font database is built once per rasterizer: system fonts first, then
//! every `.ttf`/`.otf`/`.ttc` in the configured font directories. A region
//! whose font family has no face in the database is refused, since `usvg`
//! would otherwise drop its text and leave a blank letter.

use super::backend::{CAPTURE_SCALE, CaptureError, CapturedBitmap, Rasterizer, surface_size};
use super::scene::scene_svg;
use crate::compose::SIGNATURE_ASSET;
use crate::config::LetterConfig;
use crate::layout::{DocumentRegion, SignatureSlot};
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};
use resvg::tiny_skia::{Color, Pixmap, Transform};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use usvg::fontdb::{Family, Query, Stretch, Style, Weight};

pub struct SvgRasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
    assets: HashMap<String, PathBuf>,
}

impl SvgRasterizer {
    /// A rasterizer with system fonts plus fonts found in `font_dirs`.
    pub fn new(font_dirs: &[PathBuf]) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        for dir in font_dirs {
            load_fonts_from_dir(&mut db, dir);
        }
        tracing::debug!(faces = db.len(), "font database ready");
        Self {
            fontdb: Arc::new(db),
            assets: HashMap::new(),
        }
    }

    /// Register an image asset under the reference used by signature slots.
    pub fn with_asset(mut self, name: &str, path: impl Into<PathBuf>) -> Self {
        self.assets.insert(name.to_string(), path.into());
        self
    }

    /// Fonts and the signature asset, as configured.
    pub fn from_config(config: &LetterConfig) -> Self {
        Self::new(&config.fonts.dirs).with_asset(SIGNATURE_ASSET, &config.signature.path)
    }

    fn load_asset(&self, name: &str) -> Result<DynamicImage, CaptureError> {
        let unavailable = |reason: String| CaptureError::Asset {
            name: name.to_string(),
            reason,
        };
        let path = self
            .assets
            .get(name)
            .ok_or_else(|| unavailable("no asset registered under this name".into()))?;
        let bytes = std::fs::read(path)
            .map_err(|e| unavailable(format!("{}: {e}", path.display())))?;
        image::load_from_memory(&bytes).map_err(|e| unavailable(format!("{}: {e}", path.display())))
    }

    /// Whether some loaded face belongs to `family`.
    pub fn has_family(&self, family: &str) -> bool {
        let query = Query {
            families: &[Family::Name(family)],
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        self.fontdb.query(&query).is_some()
    }

    fn require_family(&self, family: &str) -> Result<(), CaptureError> {
        if self.has_family(family) {
            return Ok(());
        }
        Err(CaptureError::Asset {
            name: family.to_string(),
            reason: "no installed font face has this family; install it or add its \
                     directory to [fonts] dirs"
                .into(),
        })
    }
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::warn!(path = %path.display(), error = %e, "skipping unreadable font");
        }
    }
}

/// Fit `asset` into `slot` (scaled to device pixels), keeping its aspect
/// ratio, and draw it right-aligned and vertically centred.
fn composite(canvas: &mut RgbaImage, asset: &DynamicImage, slot: &SignatureSlot) {
    let s = CAPTURE_SCALE as f32;
    let (box_w, box_h) = (slot.width * s, slot.height * s);
    let (iw, ih) = (asset.width() as f32, asset.height() as f32);
    if iw == 0.0 || ih == 0.0 || box_w <= 0.0 || box_h <= 0.0 {
        return;
    }
    let fit = (box_w / iw).min(box_h / ih);
    let w = ((iw * fit).round() as u32).max(1);
    let h = ((ih * fit).round() as u32).max(1);
    let resized = imageops::resize(&asset.to_rgba8(), w, h, FilterType::Lanczos3);

    let x = (slot.x * s + box_w - w as f32).round() as i64;
    let y = (slot.y * s + (box_h - h as f32) / 2.0).round() as i64;
    imageops::overlay(canvas, &resized, x, y);
}

impl Rasterizer for SvgRasterizer {
    #[tracing::instrument(skip_all, fields(width = region.width, height = region.height))]
    fn capture(&self, region: &DocumentRegion) -> Result<CapturedBitmap, CaptureError> {
        let (width, height) = surface_size(region)?;

        // Resolve every asset before spending time on rendering.
        let assets = region
            .signature_slots()
            .map(|slot| self.load_asset(&slot.asset).map(|img| (slot, img)))
            .collect::<Result<Vec<_>, _>>()?;
        if region.text_runs().next().is_some() {
            self.require_family(&region.font_family)?;
        }

        let svg = scene_svg(region);
        let opts = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            ..Default::default()
        };
        let tree =
            usvg::Tree::from_str(&svg, &opts).map_err(|e| CaptureError::Scene(e.to_string()))?;

        let mut pixmap = Pixmap::new(width, height).ok_or(CaptureError::Surface { width, height })?;
        pixmap.fill(Color::WHITE);
        let scale = CAPTURE_SCALE as f32;
        resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

        // Opaque background: premultiplied and straight RGBA coincide.
        let mut canvas = RgbaImage::from_raw(width, height, pixmap.take())
            .ok_or(CaptureError::Surface { width, height })?;
        for (slot, img) in &assets {
            composite(&mut canvas, img, slot);
        }

        tracing::debug!(width, height, slots = assets.len(), "region captured");
        Ok(CapturedBitmap::new(
            DynamicImage::ImageRgba8(canvas).to_rgb8(),
        ))
    }
}
