//! Letter composition: [`InputRecord`] → [`RenderableDocument`].
//!
//! The document is a flat, ordered list of visual blocks. Composition is a
//! pure data transformation: the same record always yields an equal
//! document, and a changed record yields a new one. Nothing here knows about
//! pixels, fonts, or export.
//!
//! ## Block order
//!
//! ```text
//! DateLine        તા. ૧૫/૦૩/૨૦૨૪                         (right)
//! Motto           ।। जीवेत शरदः शतम् ।।                    (centre, bold, red)
//! Salutation      સ્નેહીશ્રી, Asha
//! Body ×3         first one carries the birthday phrase
//! Wish ×n         selected catalog wishes (usually none)
//! Closing         જન્મદિનની પુનઃ હાર્દિક શુભકામનાઓ...
//! Signature       signature image                        (right)
//! Recipient       પ્રતિ, / શ્રી Asha / one line per address fragment
//! ```

use crate::locale::{to_localized_birthday_phrase, to_localized_full_date};
use crate::record::InputRecord;
use crate::wishes;

/// Prefix of the date line ("dated").
pub const DATE_PREFIX: &str = "તા.";
/// Fixed motto line: "may you live a hundred autumns".
pub const MOTTO: &str = "।। जीवेत शरदः शतम् ।।";
/// Salutation prefix, followed by the recipient name.
pub const SALUTATION: &str = "સ્નેહીશ્રી,";
/// Appended to the birthday phrase in the first body paragraph.
pub const BODY_GREETING: &str = "તારીખે આવતા આપના જન્મદિવસ નિમિત્તે હાર્દિક શુભેચ્છાઓ...";
pub const BODY_SECOND: &str = "જન્મદિવસ એ જીવનમાં નવી ઉર્જા, આશા અને સંકલ્પ લઈને આવે છે. આ નવા વર્ષ \
આપના માટે નવી શક્તિ, નવી પ્રેરણા અને નવી સફળતાઓ લઈને આવે તેવી અભિલાષા \
તથા જીવનના દરેક ક્ષેત્રમાં આપની ગતિ થતી રહે અને જીવનમાં આવતી દરેક પળો \
આનંદમય, મંગલમય તેમજ યશસ્વીમય બની રહે તેવી શુભેચ્છાઓ પાઠવું છું.";
pub const BODY_THIRD: &str = "આજની પેઢી અને સમાજ માટે તમે વધુ ઉપયોગી થશો, વધુ સેવાકાર્ય કરશો અને લોકોને \
પ્રેરણા આપતા રહેશો એવી આશા સાથે..";
pub const CLOSING: &str = "જન્મદિનની પુનઃ હાર્દિક શુભકામનાઓ...";
/// First line of the recipient block ("to,").
pub const RECIPIENT_LABEL: &str = "પ્રતિ,";
/// Honorific placed before the recipient name in the recipient block.
pub const RECIPIENT_HONORIFIC: &str = "શ્રી";
/// Stands in for the recipient name when it is empty ("your friend").
pub const RECIPIENT_FALLBACK: &str = "તમારો મિત્ર";
/// Asset reference of the signature image.
pub const SIGNATURE_ASSET: &str = "signature";

/// How a line of text sits in the content box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// One visual block of the letter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Issue date, right-aligned.
    DateLine(String),
    /// Fixed motto, centred, bold, red.
    Motto(String),
    Salutation(String),
    /// Body paragraph (fixed text or interpolated birthday greeting).
    Paragraph(String),
    /// A selected catalog wish, rendered like a body paragraph.
    Wish(String),
    Closing(String),
    /// Right-aligned signature image, by asset reference.
    Signature { asset: String },
    /// Label line, "to" line, then one line per address fragment.
    Recipient { lines: Vec<String> },
}

impl Block {
    /// Alignment of every line in the block.
    pub fn align(&self) -> Align {
        match self {
            Block::DateLine(_) | Block::Signature { .. } => Align::Right,
            Block::Motto(_) => Align::Center,
            _ => Align::Left,
        }
    }

    /// Short name used in CLI outlines and the HTML preview classes.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::DateLine(_) => "date",
            Block::Motto(_) => "motto",
            Block::Salutation(_) => "salutation",
            Block::Paragraph(_) => "paragraph",
            Block::Wish(_) => "wish",
            Block::Closing(_) => "closing",
            Block::Signature { .. } => "signature",
            Block::Recipient { .. } => "recipient",
        }
    }
}

/// The composed letter, ready for preview layout or capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderableDocument {
    pub blocks: Vec<Block>,
}

impl RenderableDocument {
    /// The recipient block's lines, if present.
    pub fn recipient_lines(&self) -> &[String] {
        self.blocks
            .iter()
            .find_map(|b| match b {
                Block::Recipient { lines } => Some(lines.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }
}

/// Split a comma-delimited address into display lines.
///
/// Each fragment is trimmed and suffixed with a comma; fragments that are
/// empty after trimming (e.g. from a trailing comma) are dropped.
pub fn split_address(address: &str) -> Vec<String> {
    address
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| format!("{part},"))
        .collect()
}

/// The "to" line of the recipient block.
pub fn recipient_line(recipient_name: &str) -> String {
    let name = recipient_name.trim();
    let name = if name.is_empty() { RECIPIENT_FALLBACK } else { name };
    format!("{RECIPIENT_HONORIFIC} {name}")
}

/// Compose the letter for a validated record.
pub fn compose(record: &InputRecord) -> RenderableDocument {
    let mut blocks = vec![
        Block::DateLine(format!(
            "{DATE_PREFIX} {}",
            to_localized_full_date(record.letter_date())
        )),
        Block::Motto(MOTTO.to_string()),
        Block::Salutation(format!("{SALUTATION} {}", record.recipient_name())),
        Block::Paragraph(format!(
            "{} {BODY_GREETING}",
            to_localized_birthday_phrase(record.birth_date())
        )),
        Block::Paragraph(BODY_SECOND.to_string()),
        Block::Paragraph(BODY_THIRD.to_string()),
    ];

    blocks.extend(
        record
            .wishes()
            .iter()
            .filter_map(|&i| wishes::wish(i))
            .map(|w| Block::Wish(w.to_string())),
    );

    let mut recipient = vec![
        RECIPIENT_LABEL.to_string(),
        recipient_line(record.recipient_name()),
    ];
    recipient.extend(split_address(record.address()));

    blocks.push(Block::Closing(CLOSING.to_string()));
    blocks.push(Block::Signature {
        asset: SIGNATURE_ASSET.to_string(),
    });
    blocks.push(Block::Recipient { lines: recipient });

    RenderableDocument { blocks }
}
