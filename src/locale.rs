//! Gujarati date and numeral formatting.
//!
//! The letter is written in Gujarati, so every number that appears in it is
//! written with Gujarati digits and months are spelled out in Gujarati:
//!
//! | Input (`NaiveDate`) | [`to_localized_full_date`] | [`to_localized_birthday_phrase`] |
//! |---|---|---|
//! | `2024-03-15` | `૧૫/૦૩/૨૦૨૪` | `માર્ચ મહીનાની ૧૫` |
//! | `1990-07-04` | `૦૪/૦૭/૧૯૯૦` | `જુલાઈ મહીનાની ૦૪` |
//!
//! Dates are plain calendar dates. No timezone is ever applied, so a date
//! can never shift by a day on its way to the page.
//!
//! All functions here are pure and total over valid dates.

use chrono::{Datelike, NaiveDate};

/// Gujarati digit glyphs, indexed by the ASCII digit they replace.
pub const GUJARATI_DIGITS: [char; 10] = ['૦', '૧', '૨', '૩', '૪', '૫', '૬', '૭', '૮', '૯'];

/// Gujarati month names, indexed by zero-based month (January = 0).
pub const GUJARATI_MONTHS: [&str; 12] = [
    "જાન્યુઆરી",
    "ફેબ્રુઆરી",
    "માર્ચ",
    "એપ્રિલ",
    "મે",
    "જૂન",
    "જુલાઈ",
    "ઓગસ્ટ",
    "સપ્ટેમ્બર",
    "ઓક્ટોમ્બર",
    "નવેમ્બર",
    "ડિસેમ્બર",
];

/// Joins the month name and the day: "{month} મહીનાની {day}".
pub const BIRTHDAY_CONNECTIVE: &str = "મહીનાની";

/// Map a single ASCII digit to its Gujarati glyph; any other char passes through.
pub fn localize_digit(c: char) -> char {
    if c.is_ascii_digit() {
        GUJARATI_DIGITS[(c as u8 - b'0') as usize]
    } else {
        c
    }
}

/// Replace every ASCII digit in `text` with its Gujarati glyph.
///
/// Separators, letters and any non-ASCII text are left untouched.
pub fn localize_digits(text: &str) -> String {
    text.chars().map(localize_digit).collect()
}

/// Gujarati month name for a zero-based month index.
///
/// # Panics
///
/// Panics when `month0 > 11`. Callers derive the index from a valid date,
/// so an out-of-range value is a programming error.
pub fn month_name(month0: u32) -> &'static str {
    GUJARATI_MONTHS[month0 as usize]
}

/// Format as `DD/MM/YYYY` with every digit written in Gujarati.
///
/// ```
/// # use birthday_letter::locale::to_localized_full_date;
/// let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// assert_eq!(to_localized_full_date(date), "૧૫/૦૩/૨૦૨૪");
/// ```
pub fn to_localized_full_date(date: NaiveDate) -> String {
    let ascii = format!("{:02}/{:02}/{:04}", date.day(), date.month(), date.year());
    localize_digits(&ascii)
}

/// Format as "{month name} મહીનાની {DD}", the year is ignored.
///
/// ```
/// # use birthday_letter::locale::to_localized_birthday_phrase;
/// let date = chrono::NaiveDate::from_ymd_opt(1990, 7, 4).unwrap();
/// assert_eq!(to_localized_birthday_phrase(date), "જુલાઈ મહીનાની ૦૪");
/// ```
pub fn to_localized_birthday_phrase(date: NaiveDate) -> String {
    let day = localize_digits(&format!("{:02}", date.day()));
    format!("{} {} {}", month_name(date.month0()), BIRTHDAY_CONNECTIVE, day)
}
