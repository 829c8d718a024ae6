//! SVG serialization of a laid-out region.
//!
//! The scene holds the page background and every text run. Signature slots
//! are left empty here; the rasterizer composites the decoded asset into
//! them after rendering. Output is plain XML (no void elements) so `usvg`
//! can parse it directly.

use crate::layout::{DocumentRegion, TextRun};
use maud::{Markup, html};

/// Coordinates are written with one decimal, enough at 2× capture.
fn coord(v: f32) -> String {
    format!("{v:.1}")
}

/// Configured family first, then the generic fallback for glyphs it lacks.
fn font_family_list(family: &str) -> String {
    format!("'{family}', sans-serif")
}

fn text_run(run: &TextRun, font_family: &str) -> Markup {
    html! {
        text
            x=(coord(run.x))
            y=(coord(run.baseline))
            font-family=(font_family)
            font-size=(coord(run.font_size))
            font-weight=(if run.bold { "bold" } else { "normal" })
            fill=(run.color)
            text-anchor=(run.anchor.as_svg())
        { (run.text) }
    }
}

/// Render the region as a standalone SVG document, in CSS px.
pub fn scene_svg(region: &DocumentRegion) -> String {
    let (w, h) = (region.width, region.height);
    html! {
        svg xmlns="http://www.w3.org/2000/svg"
            width=(w)
            height=(h)
            viewBox=(format!("0 0 {w} {h}"))
        {
            rect width=(w) height=(h) fill="#ffffff" {}
            @let families = font_family_list(&region.font_family);
            @for run in region.text_runs() {
                (text_run(run, &families))
            }
        }
    }
    .into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::compose;
    use crate::config::LetterConfig;
    use crate::layout::{Anchor, RegionItem, lay_out};
    use crate::test_helpers::asha_record;

    fn one_run(text: &str) -> DocumentRegion {
        DocumentRegion {
            width: 200,
            height: 100,
            font_family: "Noto Sans Gujarati".into(),
            items: vec![RegionItem::Text(TextRun {
                x: 10.0,
                baseline: 20.25,
                anchor: Anchor::End,
                font_size: 16.0,
                bold: true,
                color: "#dc2626".into(),
                text: text.into(),
            })],
        }
    }

    #[test]
    fn scene_has_sized_root_and_background() {
        let svg = scene_svg(&one_run("x"));
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.contains("viewBox=\"0 0 200 100\""));
        assert!(svg.contains("<rect width=\"200\" height=\"100\" fill=\"#ffffff\"></rect>"));
    }

    #[test]
    fn text_run_attributes() {
        let svg = scene_svg(&one_run("તા. ૧૫"));
        assert!(svg.contains("x=\"10.0\""));
        assert!(svg.contains("y=\"20.2\"") || svg.contains("y=\"20.3\""));
        assert!(svg.contains("font-weight=\"bold\""));
        assert!(svg.contains("text-anchor=\"end\""));
        assert!(svg.contains(">તા. ૧૫</text>"));
    }

    #[test]
    fn font_family_falls_back_to_sans_serif() {
        let svg = scene_svg(&one_run("x"));
        assert!(svg.contains("font-family=\"'Noto Sans Gujarati', sans-serif\""));
    }

    #[test]
    fn text_is_escaped() {
        let svg = scene_svg(&one_run("a < b & c"));
        assert!(svg.contains("a &lt; b &amp; c"));
    }

    #[test]
    fn whole_letter_scene_has_one_text_per_run() {
        let region = lay_out(&compose(&asha_record()), &LetterConfig::default());
        let svg = scene_svg(&region);
        assert_eq!(svg.matches("<text ").count(), region.text_runs().count());
        assert!(svg.contains("12 Elm St,"));
    }
}
