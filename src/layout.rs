//! Deterministic layout: [`RenderableDocument`] → [`DocumentRegion`].
//!
//! The region is the letter as it appears on screen: a fixed-width white
//! sheet with every line of text placed at an absolute position. It is what
//! the [`Rasterizer`](crate::raster::Rasterizer) captures.
//!
//! Line breaking is greedy word wrap against a static glyph-advance estimate
//! (`glyph_width_em` × font size per character, with Indic combining marks
//! narrower). No font is consulted, so the same document and config always
//! produce the same region, on any machine.
//!
//! ## Vertical rhythm (CSS px)
//!
//! | Block | Size / line height | Space after |
//! |---|---|---|
//! | date line | body | 40 |
//! | motto | body, bold | 40 |
//! | salutation | body | 24 |
//! | paragraph / wish | body | 8 |
//! | closing | body | 12 |
//! | signature slot | `signature.height` | 8 |
//! | recipient block | address size / 1.8 | 8 |

use crate::compose::{Align, Block, RenderableDocument};
use crate::config::LetterConfig;

/// Horizontal anchor of a text run, as SVG `text-anchor` understands it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    pub fn as_svg(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

/// One positioned line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    /// Anchor point x, CSS px from the region's left edge.
    pub x: f32,
    /// Baseline y, CSS px from the region's top edge.
    pub baseline: f32,
    pub anchor: Anchor,
    pub font_size: f32,
    pub bold: bool,
    pub color: String,
    pub text: String,
}

/// Box reserved for an embedded image asset.
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureSlot {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub asset: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegionItem {
    Text(TextRun),
    Signature(SignatureSlot),
}

/// A fully laid-out letter, ready to capture.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRegion {
    /// CSS px.
    pub width: u32,
    /// CSS px, rounded up to whole pixels.
    pub height: u32,
    pub font_family: String,
    pub items: Vec<RegionItem>,
}

impl DocumentRegion {
    pub fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.items.iter().filter_map(|item| match item {
            RegionItem::Text(run) => Some(run),
            RegionItem::Signature(_) => None,
        })
    }

    pub fn signature_slots(&self) -> impl Iterator<Item = &SignatureSlot> {
        self.items.iter().filter_map(|item| match item {
            RegionItem::Signature(slot) => Some(slot),
            RegionItem::Text(_) => None,
        })
    }
}

/// Relative advance of one character, in units of the average glyph width.
///
/// Viramas and nuktas stack on their base consonant; other Indic vowel signs
/// are counted at half width.
fn advance_factor(c: char) -> f32 {
    match c as u32 {
        0x094D | 0x0ACD | 0x093C | 0x0ABC | 0x200C | 0x200D => 0.0,
        0x0900..=0x0903 | 0x093A..=0x094F | 0x0962..=0x0963 => 0.5,
        0x0A81..=0x0A83 | 0x0ABE..=0x0ACC | 0x0AE2..=0x0AE3 => 0.5,
        _ if c.is_whitespace() => 0.5,
        _ => 1.0,
    }
}

/// Estimated rendered width of `text` in px.
pub fn measure(text: &str, font_size: f32, glyph_width_em: f32) -> f32 {
    let units: f32 = text.chars().map(advance_factor).sum();
    units * glyph_width_em * font_size
}

/// Greedy word wrap.
///
/// Whitespace runs collapse to a single space. A word wider than
/// `max_width` gets a line of its own rather than being split.
pub fn wrap_text(text: &str, max_width: f32, font_size: f32, glyph_width_em: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if measure(&candidate, font_size, glyph_width_em) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Space after each block, CSS px.
fn space_after(block: &Block) -> f32 {
    match block {
        Block::DateLine(_) | Block::Motto(_) => 40.0,
        Block::Salutation(_) => 24.0,
        Block::Paragraph(_) | Block::Wish(_) => 8.0,
        Block::Closing(_) => 12.0,
        Block::Signature { .. } | Block::Recipient { .. } => 8.0,
    }
}

struct Cursor<'a> {
    config: &'a LetterConfig,
    y: f32,
    items: Vec<RegionItem>,
}

impl Cursor<'_> {
    fn anchor_x(&self, align: Align) -> (f32, Anchor) {
        let layout = &self.config.layout;
        let left = layout.padding as f32;
        match align {
            Align::Left => (left, Anchor::Start),
            Align::Center => (layout.width as f32 / 2.0, Anchor::Middle),
            Align::Right => (left + layout.content_width() as f32, Anchor::End),
        }
    }

    /// Place already-broken lines, one line box each.
    fn place_lines(
        &mut self,
        lines: Vec<String>,
        align: Align,
        font_size: f32,
        line_height: f32,
        bold: bool,
        color: &str,
    ) {
        let (x, anchor) = self.anchor_x(align);
        let box_height = font_size * line_height;
        // Half-leading above, then roughly the ascent.
        let baseline_offset = (box_height - font_size) / 2.0 + font_size * 0.8;
        for text in lines {
            self.items.push(RegionItem::Text(TextRun {
                x,
                baseline: self.y + baseline_offset,
                anchor,
                font_size,
                bold,
                color: color.to_string(),
                text,
            }));
            self.y += box_height;
        }
    }

    fn place_text(&mut self, text: &str, align: Align, bold: bool, color: &str) {
        let config = self.config;
        let layout = &config.layout;
        let (size, lh) = (layout.font_size, layout.line_height);
        let lines = wrap_text(
            text,
            layout.content_width() as f32,
            size,
            layout.glyph_width_em,
        );
        self.place_lines(lines, align, size, lh, bold, color);
    }
}

/// Lay out a composed letter into an absolutely positioned region.
pub fn lay_out(doc: &RenderableDocument, config: &LetterConfig) -> DocumentRegion {
    let layout = &config.layout;
    let text_color = layout.text_color.as_str();
    let mut cursor = Cursor {
        config,
        y: layout.padding as f32,
        items: Vec::new(),
    };

    for block in &doc.blocks {
        match block {
            Block::DateLine(text)
            | Block::Salutation(text)
            | Block::Paragraph(text)
            | Block::Wish(text)
            | Block::Closing(text) => {
                cursor.place_text(text, block.align(), false, text_color);
            }
            Block::Motto(text) => {
                cursor.place_text(text, block.align(), true, &layout.motto_color);
            }
            Block::Signature { asset } => {
                let sig = &config.signature;
                let right = layout.padding.saturating_add(layout.content_width()) as f32;
                cursor.items.push(RegionItem::Signature(SignatureSlot {
                    x: right - sig.width as f32,
                    y: cursor.y,
                    width: sig.width as f32,
                    height: sig.height as f32,
                    asset: asset.clone(),
                }));
                cursor.y += sig.height as f32;
            }
            Block::Recipient { lines } => {
                // Lines are short and never wrapped.
                cursor.place_lines(
                    lines.clone(),
                    block.align(),
                    layout.address_font_size,
                    layout.address_line_height,
                    false,
                    text_color,
                );
            }
        }
        cursor.y += space_after(block);
    }

    let height = (cursor.y + layout.padding as f32).ceil() as u32;
    DocumentRegion {
        width: layout.width,
        height,
        font_family: layout.font_family.clone(),
        items: cursor.items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::compose;
    use crate::test_helpers::asha_record;

    fn region() -> DocumentRegion {
        lay_out(&compose(&asha_record()), &LetterConfig::default())
    }

    // =========================================================================
    // Measurement and wrapping
    // =========================================================================

    #[test]
    fn measure_ascii() {
        // 4 glyphs × 0.5em × 10px
        assert_eq!(measure("abcd", 10.0, 0.5), 20.0);
    }

    #[test]
    fn measure_virama_is_zero_width() {
        assert_eq!(measure("ક્ષ", 10.0, 1.0), 20.0);
    }

    #[test]
    fn wrap_fits_on_one_line() {
        assert_eq!(wrap_text("a b c", 100.0, 10.0, 1.0), vec!["a b c"]);
    }

    #[test]
    fn wrap_breaks_greedily() {
        // Each word is 30px, a space 5px: "aaa bbb" = 65px.
        let lines = wrap_text("aaa bbb ccc", 70.0, 10.0, 1.0);
        assert_eq!(lines, vec!["aaa bbb", "ccc"]);
    }

    #[test]
    fn wrap_overlong_word_gets_own_line() {
        let lines = wrap_text("a bbbbbbbbbb c", 30.0, 10.0, 1.0);
        assert_eq!(lines, vec!["a", "bbbbbbbbbb", "c"]);
    }

    #[test]
    fn wrap_collapses_whitespace_and_handles_empty() {
        assert_eq!(wrap_text("  a \n  b ", 100.0, 10.0, 1.0), vec!["a b"]);
        assert!(wrap_text("   ", 100.0, 10.0, 1.0).is_empty());
    }

    // =========================================================================
    // Region layout
    // =========================================================================

    #[test]
    fn layout_is_deterministic() {
        assert_eq!(region(), region());
    }

    #[test]
    fn date_line_is_right_anchored_at_content_edge() {
        let region = region();
        let first = region.text_runs().next().unwrap();
        assert_eq!(first.anchor, Anchor::End);
        assert_eq!(first.x, 720.0);
        assert_eq!(first.text, "તા. ૧૫/૦૩/૨૦૨૪");
    }

    #[test]
    fn motto_is_centred_bold_red() {
        let region = region();
        let motto = region.text_runs().nth(1).unwrap();
        assert_eq!(motto.anchor, Anchor::Middle);
        assert_eq!(motto.x, 384.0);
        assert!(motto.bold);
        assert_eq!(motto.color, "#dc2626");
    }

    #[test]
    fn runs_flow_downwards() {
        let region = region();
        let baselines: Vec<f32> = region.text_runs().map(|r| r.baseline).collect();
        assert!(baselines.windows(2).all(|w| w[0] < w[1]));
        assert!(*baselines.last().unwrap() < region.height as f32);
    }

    #[test]
    fn long_paragraph_wraps_within_content_width() {
        let region = region();
        let config = LetterConfig::default();
        let content = config.layout.content_width() as f32;
        for run in region.text_runs() {
            let words = run.text.split_whitespace().count();
            if words > 1 {
                assert!(
                    measure(&run.text, run.font_size, config.layout.glyph_width_em) <= content,
                    "overflowing line: {}",
                    run.text
                );
            }
        }
        // Body paragraph 2 is long enough to need several lines.
        assert!(region.text_runs().count() > 12);
    }

    #[test]
    fn signature_slot_is_right_aligned_between_closing_and_recipient() {
        let region = region();
        let slots: Vec<&SignatureSlot> = region.signature_slots().collect();
        assert_eq!(slots.len(), 1);
        let slot = slots[0];
        assert_eq!(slot.x + slot.width, 720.0);
        assert_eq!(slot.asset, "signature");

        let closing = region
            .text_runs()
            .find(|r| r.text.starts_with("જન્મદિનની"))
            .unwrap();
        let label = region.text_runs().find(|r| r.text == "પ્રતિ,").unwrap();
        assert!(closing.baseline < slot.y);
        assert!(slot.y + slot.height < label.baseline);
    }

    #[test]
    fn recipient_block_sits_one_margin_below_signature() {
        let region = region();
        let slot = region.signature_slots().next().unwrap();
        let label = region.text_runs().find(|r| r.text == "પ્રતિ,").unwrap();
        // 27px address line box: 6px half-leading plus 12px ascent above the baseline.
        let label_top = label.baseline - 18.0;
        assert!((label_top - (slot.y + slot.height) - 8.0).abs() < 1e-3);
    }

    #[test]
    fn address_lines_use_address_typography() {
        let region = region();
        let last = region.text_runs().last().unwrap();
        assert_eq!(last.text, "62704,");
        assert_eq!(last.font_size, 15.0);
        assert_eq!(last.anchor, Anchor::Start);
        assert_eq!(last.x, 48.0);
    }

    #[test]
    fn height_includes_bottom_padding() {
        let region = region();
        let last = region.text_runs().last().unwrap();
        // last line box ends 27px after its top; then 8px margin + 48px padding.
        assert!(region.height as f32 >= last.baseline + 48.0);
    }

    #[test]
    fn narrower_region_produces_more_lines() {
        let doc = compose(&asha_record());
        let mut narrow = LetterConfig::default();
        narrow.layout.width = 480;
        let wide_runs = lay_out(&doc, &LetterConfig::default()).text_runs().count();
        let narrow_region = lay_out(&doc, &narrow);
        assert!(narrow_region.text_runs().count() > wide_runs);
        assert!(narrow_region.height > region().height);
    }
}
