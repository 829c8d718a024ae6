//! The input boundary: a form draft in, a validated [`InputRecord`] out.
//!
//! The input form is a separate producer. It hands over an [`InputDraft`]
//! (every field optional, dates as `YYYY-MM-DD` text) and the core only ever
//! sees the [`InputRecord`] produced by [`InputDraft::validate`]. A draft with
//! any required field missing yields [`InputError::ValidationGap`] and never
//! reaches the composer: the caller goes back to input collection instead.
//!
//! Drafts deserialize from TOML or JSON using the form's field names:
//!
//! ```toml
//! recipientName = "Asha"
//! senderName = "Ravi"
//! letterDate = "2024-03-15"
//! birthDate = "1990-07-04"
//! address = "12 Elm St, Springfield, 62704"
//! wishes = [0, 4]
//! ```

use crate::wishes;
use chrono::NaiveDate;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Date format accepted from the form (`<input type="date">` values).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A field that must be present before the letter can be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    RecipientName,
    LetterDate,
    BirthDate,
    Address,
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RequiredField::RecipientName => "recipientName",
            RequiredField::LetterDate => "letterDate",
            RequiredField::BirthDate => "birthDate",
            RequiredField::Address => "address",
        })
    }
}

fn join_fields(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Error, Debug, PartialEq)]
pub enum InputError {
    #[error("missing required fields: {}", join_fields(.0))]
    ValidationGap(Vec<RequiredField>),
    #[error("invalid date for {field}: {value:?} (expected YYYY-MM-DD)")]
    InvalidDate { field: RequiredField, value: String },
    #[error("unknown wish template #{0}")]
    UnknownWish(usize),
}

#[derive(Error, Debug)]
pub enum DraftError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Raw form data, exactly as the form hands it over.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct InputDraft {
    #[serde(alias = "recipient_name")]
    pub recipient_name: Option<String>,
    #[serde(alias = "sender_name")]
    pub sender_name: Option<String>,
    #[serde(alias = "letter_date")]
    pub letter_date: Option<String>,
    #[serde(alias = "birth_date")]
    pub birth_date: Option<String>,
    pub address: Option<String>,
    /// Selected wish template indices (see [`crate::wishes::WISHES`]).
    pub wishes: Vec<usize>,
}

/// Trimmed, non-empty text or `None`.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_date(field: RequiredField, value: &str) -> Result<NaiveDate, InputError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| InputError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

impl InputDraft {
    /// Read a draft file. `.json` files are parsed as JSON, anything else as TOML.
    pub fn load(path: &Path) -> Result<InputDraft, DraftError> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json {
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(toml::from_str(&content)?)
        }
    }

    /// Check the draft and produce an immutable record.
    ///
    /// Missing fields are reported together, in form order, before any
    /// date parsing happens.
    pub fn validate(&self) -> Result<InputRecord, InputError> {
        let recipient = present(&self.recipient_name);
        let letter_date = present(&self.letter_date);
        let birth_date = present(&self.birth_date);
        let address = present(&self.address);

        let (Some(recipient), Some(letter_date), Some(birth_date), Some(address)) =
            (recipient, letter_date, birth_date, address)
        else {
            let missing = [
                (recipient.is_none(), RequiredField::RecipientName),
                (letter_date.is_none(), RequiredField::LetterDate),
                (birth_date.is_none(), RequiredField::BirthDate),
                (address.is_none(), RequiredField::Address),
            ]
            .into_iter()
            .filter_map(|(is_missing, field)| is_missing.then_some(field))
            .collect();
            return Err(InputError::ValidationGap(missing));
        };

        let letter_date = parse_date(RequiredField::LetterDate, letter_date)?;
        let birth_date = parse_date(RequiredField::BirthDate, birth_date)?;

        if let Some(&bad) = self.wishes.iter().find(|&&i| wishes::wish(i).is_none()) {
            return Err(InputError::UnknownWish(bad));
        }

        Ok(InputRecord {
            recipient_name: recipient.to_string(),
            sender_name: present(&self.sender_name).unwrap_or_default().to_string(),
            letter_date,
            birth_date,
            address: address.to_string(),
            wishes: wishes::dedup_selection(&self.wishes),
        })
    }
}

/// A validated letter request. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRecord {
    recipient_name: String,
    sender_name: String,
    letter_date: NaiveDate,
    birth_date: NaiveDate,
    address: String,
    wishes: Vec<usize>,
}

impl InputRecord {
    pub fn recipient_name(&self) -> &str {
        &self.recipient_name
    }

    /// Sender name; empty when the form left it blank.
    pub fn sender_name(&self) -> &str {
        &self.sender_name
    }

    /// The date the letter is issued.
    pub fn letter_date(&self) -> NaiveDate {
        self.letter_date
    }

    /// The celebrated birthday. Only month and day are ever displayed.
    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    /// Comma-delimited address fragments, as entered.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Selected wish template indices, deduplicated, in selection order.
    pub fn wishes(&self) -> &[usize] {
        &self.wishes
    }
}
