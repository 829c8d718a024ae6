//! HTML preview of a composed letter.
//!
//! Renders a [`RenderableDocument`] as one standalone page with Maud. Each
//! block becomes an element whose class is the block's
//! [`kind`](crate::compose::Block::kind), styled by `static/letter.css` plus
//! the `:root` variables from [`generate_preview_css`]. All text is escaped
//! by Maud; only the stylesheet is inserted pre-escaped.

use crate::compose::{Block, RenderableDocument};
use crate::config::{LetterConfig, generate_preview_css};
use maud::{DOCTYPE, Markup, PreEscaped, html};

const CSS_STATIC: &str = include_str!("../static/letter.css");

fn block(block: &Block, config: &LetterConfig) -> Markup {
    let class = block.kind();
    html! {
        @match block {
            Block::DateLine(text)
            | Block::Motto(text)
            | Block::Salutation(text)
            | Block::Paragraph(text)
            | Block::Wish(text)
            | Block::Closing(text) => {
                p class=(class) { (text) }
            }
            Block::Signature { asset } => {
                div class=(class) {
                    img src=(config.signature.path.display().to_string())
                        alt=(asset)
                        width=(config.signature.width)
                        height=(config.signature.height);
                }
            }
            Block::Recipient { lines } => {
                div class=(class) {
                    @for line in lines {
                        p { (line) }
                    }
                }
            }
        }
    }
}

/// Render the whole preview page.
pub fn render_preview(doc: &RenderableDocument, title: &str, config: &LetterConfig) -> String {
    let css = format!("{}\n\n{}", generate_preview_css(&config.layout), CSS_STATIC);
    html! {
        (DOCTYPE)
        html lang="gu" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body {
                article.letter {
                    @for b in &doc.blocks {
                        (block(b, config))
                    }
                }
            }
        }
    }
    .into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::compose;
    use crate::record::InputDraft;
    use crate::test_helpers::{asha_draft, asha_record};

    fn page() -> String {
        render_preview(
            &compose(&asha_record()),
            "birthday-wishes-Asha",
            &LetterConfig::default(),
        )
    }

    #[test]
    fn page_has_doctype_and_title() {
        let html = page();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>birthday-wishes-Asha</title>"));
    }

    #[test]
    fn blocks_appear_in_order_with_classes() {
        let html = page();
        let classes = [
            "class=\"date\"",
            "class=\"motto\"",
            "class=\"salutation\"",
            "class=\"paragraph\"",
            "class=\"closing\"",
            "class=\"signature\"",
            "class=\"recipient\"",
        ];
        let positions: Vec<usize> = classes
            .iter()
            .map(|c| html.find(c).unwrap_or_else(|| panic!("missing {c}")))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn signature_references_configured_asset() {
        let html = page();
        assert!(html.contains("src=\"sign.png\""));
        assert!(html.contains("width=\"180\""));
    }

    #[test]
    fn css_variables_are_not_escaped() {
        let html = page();
        assert!(html.contains("--letter-font: \"Noto Sans Gujarati\", sans-serif;"));
        assert!(html.contains(".motto {"));
    }

    #[test]
    fn user_text_is_escaped() {
        let record = InputDraft {
            recipient_name: Some("<b>Asha</b>".into()),
            ..asha_draft()
        }
        .validate()
        .unwrap();
        let html = render_preview(&compose(&record), "t", &LetterConfig::default());
        assert!(html.contains("&lt;b&gt;Asha&lt;/b&gt;"));
        assert!(!html.contains("<b>Asha</b>"));
    }
}
