//! Sliding-window pagination of a tall bitmap onto fixed-size pages.
//!
//! The bitmap is scaled to fill the page width and treated as one
//! continuous strip. Page *k* shows the band that starts `k × page_height`
//! down the strip, so consecutive pages are vertically contiguous. Slicing is
//! content-agnostic: a line of text may be cut across a page boundary.
//!
//! ```text
//!   strip (scaled)        pages
//!   ┌──────────┐ 0        ┌──────────┐ page 0, offset    0 mm
//!   │  band 0  │          │  band 0  │
//!   ├──────────┤ 297      └──────────┘
//!   │  band 1  │          ┌──────────┐ page 1, offset -297 mm
//!   ├──────────┤ 594      │  band 1  │
//!   │  band 2  │          └──────────┘
//!   └──────────┘ 700      ┌──────────┐ page 2, offset -594 mm
//!                         │ band 2   │ 106 mm shown, rest blank
//!                         └──────────┘
//! ```
//!
//! Everything here is pure arithmetic on dimensions.

use crate::config::PageConfig;

/// Tolerance, in pages, below which a remainder counts as no remainder.
/// Keeps an exact multiple of the page height from producing a blank page.
const PAGE_EPSILON: f64 = 1e-6;

/// Physical page size in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl PageSize {
    pub const A4: PageSize = PageSize {
        width_mm: 210.0,
        height_mm: 297.0,
    };
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4
    }
}

impl From<&PageConfig> for PageSize {
    fn from(page: &PageConfig) -> Self {
        Self {
            width_mm: f64::from(page.width_mm),
            height_mm: f64::from(page.height_mm),
        }
    }
}

/// One output page: which band of the strip it shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Page {
    pub index: usize,
    /// Where the top of the strip sits relative to the page top; always
    /// `-index × page height`.
    pub offset_mm: f64,
    /// Height of strip actually visible on this page. Equals the page height
    /// except possibly on the last page.
    pub band_height_mm: f64,
}

/// Height of a `width`×`height` bitmap once scaled to the page width.
pub fn scaled_height_mm(width: u32, height: u32, size: PageSize) -> f64 {
    if width == 0 {
        return 0.0;
    }
    f64::from(height) * size.width_mm / f64::from(width)
}

/// Number of pages needed for a strip of `scaled_mm`. Never less than one.
pub fn page_count(scaled_mm: f64, page_height_mm: f64) -> usize {
    let pages = (scaled_mm / page_height_mm - PAGE_EPSILON).ceil();
    if pages.is_finite() && pages >= 1.0 {
        pages as usize
    } else {
        1
    }
}

/// Slice a `width`×`height` bitmap into pages of `size`.
pub fn paginate(width: u32, height: u32, size: PageSize) -> Vec<Page> {
    let scaled = scaled_height_mm(width, height, size);
    let count = page_count(scaled, size.height_mm);

    let pages: Vec<Page> = (0..count)
        .map(|index| {
            let start = index as f64 * size.height_mm;
            Page {
                index,
                offset_mm: -start,
                band_height_mm: (scaled - start).clamp(0.0, size.height_mm),
            }
        })
        .collect();

    tracing::debug!(width, height, scaled_mm = scaled, pages = count, "paginated");
    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    const A4: PageSize = PageSize::A4;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    // =========================================================================
    // Page count
    // =========================================================================

    #[test]
    fn short_bitmap_is_one_page() {
        // 1536x1000 → 136.7 mm
        let pages = paginate(1536, 1000, A4);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].offset_mm, 0.0);
        assert!(approx(pages[0].band_height_mm, 1000.0 * 210.0 / 1536.0));
    }

    #[test]
    fn tall_bitmap_spans_three_pages() {
        // 1536x5000 → 683.6 mm → ceil(2.30) = 3
        let pages = paginate(1536, 5000, A4);
        assert_eq!(pages.len(), 3);
        let scaled = 5000.0 * 210.0 / 1536.0;
        assert!(approx(pages[2].band_height_mm, scaled - 2.0 * 297.0));
    }

    #[test]
    fn exact_multiple_has_no_trailing_blank_page() {
        // 210 px wide → 1 px = 1 mm; 594 px = exactly two pages.
        let pages = paginate(210, 594, A4);
        assert_eq!(pages.len(), 2);
        assert!(approx(pages[1].band_height_mm, 297.0));
    }

    #[test]
    fn exactly_one_page_high() {
        assert_eq!(paginate(210, 297, A4).len(), 1);
    }

    #[test]
    fn just_over_one_page_needs_two() {
        let pages = paginate(210, 298, A4);
        assert_eq!(pages.len(), 2);
        assert!(approx(pages[1].band_height_mm, 1.0));
    }

    #[test]
    fn degenerate_bitmap_still_yields_one_page() {
        assert_eq!(paginate(0, 0, A4).len(), 1);
        assert_eq!(paginate(100, 0, A4).len(), 1);
    }

    #[test]
    fn page_count_matches_ceiling_formula() {
        for h in [1u32, 500, 2000, 2177, 2178, 4355, 9000] {
            let scaled = scaled_height_mm(1536, h, A4);
            let expected = ((scaled / 297.0).ceil() as usize).max(1);
            assert_eq!(paginate(1536, h, A4).len(), expected, "height {h}");
        }
    }

    // =========================================================================
    // Band geometry
    // =========================================================================

    #[test]
    fn offsets_slide_one_page_height_each() {
        let pages = paginate(1536, 5000, A4);
        for page in &pages {
            assert!(approx(page.offset_mm, -(page.index as f64) * 297.0));
        }
    }

    #[test]
    fn bands_cover_the_strip_exactly() {
        let scaled = scaled_height_mm(1536, 7777, A4);
        let total: f64 = paginate(1536, 7777, A4)
            .iter()
            .map(|p| p.band_height_mm)
            .sum();
        assert!(approx(total, scaled));
    }

    #[test]
    fn all_but_last_band_are_full() {
        let pages = paginate(1536, 7777, A4);
        let (last, rest) = pages.split_last().unwrap();
        assert!(rest.iter().all(|p| approx(p.band_height_mm, 297.0)));
        assert!(last.band_height_mm > 0.0 && last.band_height_mm <= 297.0);
    }

    #[test]
    fn custom_page_size() {
        let letter = PageSize {
            width_mm: 216.0,
            height_mm: 279.0,
        };
        // 216 px wide → 1 px = 1 mm
        assert_eq!(paginate(216, 600, letter).len(), 3);
    }

    #[test]
    fn page_size_from_config() {
        let size = PageSize::from(&PageConfig::default());
        assert_eq!(size, PageSize::A4);
    }
}
