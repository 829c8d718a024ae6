//! Letter configuration module.
//!
//! Handles loading, validating, and merging `letter.toml`. Stock defaults are
//! overridden by whatever keys the user file sets; everything else keeps its
//! default.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [page]
//! width_mm = 210.0          # Physical page width (A4)
//! height_mm = 297.0         # Physical page height (A4)
//!
//! [layout]
//! width = 768               # Letter region width in CSS px
//! padding = 48              # Inner padding on all sides, CSS px
//! font_family = "Noto Sans Gujarati"
//! font_size = 16.0          # Body text size, CSS px
//! line_height = 1.6         # Body line height multiplier
//! address_font_size = 15.0  # Recipient block text size
//! address_line_height = 1.8 # Recipient block line height multiplier
//! glyph_width_em = 0.55     # Average glyph advance used for line wrapping
//! text_color = "#111111"
//! motto_color = "#dc2626"
//!
//! [signature]
//! path = "sign.png"         # Signature image, relative to the config file
//! width = 180               # Signature slot, CSS px
//! height = 72
//!
//! [fonts]
//! dirs = ["fonts"]          # Extra .ttf/.otf/.ttc directories for capture
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse: override just the values you want:
//!
//! ```toml
//! [page]
//! height_mm = 279.4
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up by [`load_config`].
pub const CONFIG_FILE_NAME: &str = "letter.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Letter configuration loaded from `letter.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LetterConfig {
    /// Physical page size of the PDF artifact.
    pub page: PageConfig,
    /// Letter region geometry and typography.
    pub layout: LayoutConfig,
    /// Signature image and its slot.
    pub signature: SignatureConfig,
    /// Font sources for capture.
    pub fonts: FontsConfig,
}

impl LetterConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |value: f32, key: &str| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Validation(format!("{key} must be positive")))
            }
        };
        positive(self.page.width_mm, "page.width_mm")?;
        positive(self.page.height_mm, "page.height_mm")?;
        positive(self.layout.font_size, "layout.font_size")?;
        positive(self.layout.line_height, "layout.line_height")?;
        positive(self.layout.address_font_size, "layout.address_font_size")?;
        positive(self.layout.address_line_height, "layout.address_line_height")?;
        positive(self.layout.glyph_width_em, "layout.glyph_width_em")?;

        match self.layout.padding.checked_mul(2) {
            Some(both) if self.layout.width > both => {}
            _ => {
                return Err(ConfigError::Validation(
                    "layout.width must exceed twice layout.padding".into(),
                ));
            }
        }
        if self.signature.width == 0 || self.signature.height == 0 {
            return Err(ConfigError::Validation(
                "signature.width and signature.height must be non-zero".into(),
            ));
        }
        if self.signature.width > self.layout.content_width() {
            return Err(ConfigError::Validation(
                "signature.width must fit inside the content width".into(),
            ));
        }
        for (key, value) in [
            ("layout.text_color", &self.layout.text_color),
            ("layout.motto_color", &self.layout.motto_color),
        ] {
            if parse_hex_color(value).is_none() {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a #rgb or #rrggbb color, got {value:?}"
                )));
            }
        }
        Ok(())
    }

    /// Resolve relative asset paths against the directory the config came from.
    pub fn resolve_paths(&mut self, base: &Path) {
        if self.signature.path.is_relative() {
            self.signature.path = base.join(&self.signature.path);
        }
        for dir in &mut self.fonts.dirs {
            if dir.is_relative() {
                *dir = base.join(&*dir);
            }
        }
    }
}

/// Physical page size in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    pub width_mm: f32,
    pub height_mm: f32,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            width_mm: 210.0,
            height_mm: 297.0,
        }
    }
}

/// Geometry and typography of the letter region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Region width in CSS px.
    pub width: u32,
    /// Inner padding on all four sides, CSS px.
    pub padding: u32,
    pub font_family: String,
    pub font_size: f32,
    pub line_height: f32,
    pub address_font_size: f32,
    pub address_line_height: f32,
    /// Average glyph advance in em, used for greedy line wrapping.
    pub glyph_width_em: f32,
    pub text_color: String,
    pub motto_color: String,
}

impl LayoutConfig {
    /// Width available to text: region width minus both paddings.
    pub fn content_width(&self) -> u32 {
        self.width.saturating_sub(self.padding.saturating_mul(2))
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 768,
            padding: 48,
            font_family: "Noto Sans Gujarati".to_string(),
            font_size: 16.0,
            line_height: 1.6,
            address_font_size: 15.0,
            address_line_height: 1.8,
            glyph_width_em: 0.55,
            text_color: "#111111".to_string(),
            motto_color: "#dc2626".to_string(),
        }
    }
}

/// Signature image settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SignatureConfig {
    /// Image file; any format the `image` crate decodes.
    pub path: PathBuf,
    /// Slot size in CSS px. The image is fitted inside, keeping aspect ratio.
    pub width: u32,
    pub height: u32,
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("sign.png"),
            width: 180,
            height: 72,
        }
    }
}

/// Extra font sources. System fonts are always loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontsConfig {
    /// Directories scanned (non-recursively) for `.ttf`, `.otf` and `.ttc` files.
    pub dirs: Vec<PathBuf>,
}

impl Default for FontsConfig {
    fn default() -> Self {
        Self {
            dirs: vec![PathBuf::from("fonts")],
        }
    }
}

/// Parse `#rgb` or `#rrggbb` into RGB bytes.
pub fn parse_hex_color(value: &str) -> Option<[u8; 3]> {
    let hex = value.strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                rgb[i] = channel(&c.to_string())? * 17;
            }
            Some(rgb)
        }
        6 => Some([
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        ]),
        _ => None,
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(LetterConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<LetterConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: LetterConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from an explicit file.
///
/// Relative signature and font paths are resolved against the file's directory.
pub fn load_config_file(path: &Path) -> Result<LetterConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let overlay: toml::Value = toml::from_str(&content)?;
    let mut config = resolve_config(Some(overlay))?;
    if let Some(base) = path.parent() {
        config.resolve_paths(base);
    }
    Ok(config)
}

/// Load `letter.toml` from the given directory, or stock defaults if absent.
pub fn load_config(dir: &Path) -> Result<LetterConfig, ConfigError> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.exists() {
        return load_config_file(&path);
    }
    let mut config = resolve_config(None)?;
    config.resolve_paths(dir);
    Ok(config)
}

/// Generate CSS custom properties for the HTML preview.
pub fn generate_preview_css(layout: &LayoutConfig) -> String {
    format!(
        r#":root {{
    --letter-width: {width}px;
    --letter-padding: {padding}px;
    --letter-font: "{font}", sans-serif;
    --letter-font-size: {font_size}px;
    --letter-line-height: {line_height};
    --address-font-size: {address_font_size}px;
    --address-line-height: {address_line_height};
    --letter-text: {text};
    --letter-motto: {motto};
}}"#,
        width = layout.width,
        padding = layout.padding,
        font = layout.font_family,
        font_size = layout.font_size,
        line_height = layout.line_height,
        address_font_size = layout.address_font_size,
        address_line_height = layout.address_line_height,
        text = layout.text_color,
        motto = layout.motto_color,
    )
}

/// Returns a fully-commented stock `letter.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Birthday Letter Configuration
# =============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Relative paths are resolved against the directory holding this file.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Page size of the PDF artifact
# ---------------------------------------------------------------------------
[page]
# A4. The captured letter is scaled to the page width and sliced into
# page-height bands.
width_mm = 210.0
height_mm = 297.0

# ---------------------------------------------------------------------------
# Letter region
# ---------------------------------------------------------------------------
[layout]
# Region width and padding in CSS px. Capture renders at 2x these sizes.
width = 768
padding = 48

# Font family used for all text. It must cover Gujarati script; install it
# system-wide or drop the font file into one of [fonts].dirs.
font_family = "Noto Sans Gujarati"

# Body text size (px) and line height multiplier.
font_size = 16.0
line_height = 1.6

# Recipient/address block text size (px) and line height multiplier.
address_font_size = 15.0
address_line_height = 1.8

# Average glyph advance in em. Used to wrap paragraphs; raise it if lines
# overflow the right edge with your font.
glyph_width_em = 0.55

text_color = "#111111"
motto_color = "#dc2626"

# ---------------------------------------------------------------------------
# Signature
# ---------------------------------------------------------------------------
[signature]
# Signature image (PNG). Export fails if it cannot be read.
path = "sign.png"

# Slot size in px; the image is fitted inside and right-aligned.
width = 180
height = 72

# ---------------------------------------------------------------------------
# Fonts
# ---------------------------------------------------------------------------
[fonts]
# Directories scanned for .ttf/.otf/.ttc files in addition to system fonts.
dirs = ["fonts"]
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_is_a4() {
        let config = LetterConfig::default();
        assert_eq!(config.page.width_mm, 210.0);
        assert_eq!(config.page.height_mm, 297.0);
    }

    #[test]
    fn default_config_passes_validation() {
        assert!(LetterConfig::default().validate().is_ok());
    }

    #[test]
    fn content_width_subtracts_padding() {
        assert_eq!(LayoutConfig::default().content_width(), 672);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[layout]
motto_color = "#b91c1c"
"##;
        let config: LetterConfig = toml::from_str(toml).unwrap();
        // Overridden value
        assert_eq!(config.layout.motto_color, "#b91c1c");
        // Default values preserved
        assert_eq!(config.layout.text_color, "#111111");
        assert_eq!(config.page.height_mm, 297.0);
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.layout, LayoutConfig::default());
        assert_eq!(config.signature.path, tmp.path().join("sign.png"));
    }

    #[test]
    fn load_config_reads_file_and_resolves_paths() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            r##"
[page]
height_mm = 279.4

[signature]
path = "assets/sig.png"

[fonts]
dirs = ["/usr/share/fonts/noto", "local-fonts"]
"##,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.page.height_mm, 279.4);
        assert_eq!(config.page.width_mm, 210.0);
        assert_eq!(config.signature.path, tmp.path().join("assets/sig.png"));
        assert_eq!(
            config.fonts.dirs,
            vec![
                PathBuf::from("/usr/share/fonts/noto"),
                tmp.path().join("local-fonts")
            ]
        );
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), "this is not valid toml [[[").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            "[page]\nwidth_mm = 0.0\n",
        )
        .unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2").unwrap();
        let overlay: toml::Value = toml::from_str("b = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"].as_integer(), Some(1));
        assert_eq!(merged["b"].as_integer(), Some(3));
    }

    #[test]
    fn merge_toml_deep_nested() {
        let base: toml::Value = toml::from_str("[x.y]\nz = 1\nw = 2").unwrap();
        let overlay: toml::Value = toml::from_str("[x.y]\nz = 9").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["x"]["y"]["z"].as_integer(), Some(9));
        assert_eq!(merged["x"]["y"]["w"].as_integer(), Some(2));
    }

    // =========================================================================
    // Unknown key rejection
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let result: Result<LetterConfig, _> = toml::from_str("colour = \"red\"");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_nested_key_rejected() {
        let result = resolve_config(Some(toml::from_str("[page]\ndepth_mm = 3.0").unwrap()));
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn validate_padding_too_wide() {
        let mut config = LetterConfig::default();
        config.layout.padding = 400;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_huge_padding_is_an_error_not_an_overflow() {
        let mut config = LetterConfig::default();
        config.layout.padding = u32::MAX;
        assert_eq!(config.layout.content_width(), 0);
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("layout.padding"));
    }

    #[test]
    fn validate_signature_slot_zero() {
        let mut config = LetterConfig::default();
        config.signature.height = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_bad_color() {
        let mut config = LetterConfig::default();
        config.layout.motto_color = "red".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("layout.motto_color"));
    }

    #[test]
    fn parse_hex_color_forms() {
        assert_eq!(parse_hex_color("#dc2626"), Some([0xdc, 0x26, 0x26]));
        assert_eq!(parse_hex_color("#fff"), Some([255, 255, 255]));
        assert_eq!(parse_hex_color("dc2626"), None);
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("#gggggg"), None);
    }

    // =========================================================================
    // Stock config / CSS
    // =========================================================================

    #[test]
    fn stock_config_toml_parses_to_defaults() {
        let config: LetterConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, LetterConfig::default());
    }

    #[test]
    fn preview_css_includes_layout_variables() {
        let css = generate_preview_css(&LayoutConfig::default());
        assert!(css.contains("--letter-width: 768px"));
        assert!(css.contains("--letter-motto: #dc2626"));
        assert!(css.contains("\"Noto Sans Gujarati\""));
    }
}
