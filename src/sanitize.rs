//! Removal of non-printable and non-ASCII characters from API text.

use crate::model::FieldValue;

/// Returns `true` for characters in the printable ASCII range (space to `~`).
pub fn is_printable_ascii(ch: char) -> bool {
    (' '..='~').contains(&ch)
}

/// Copies `text`, dropping every character outside printable ASCII.
pub fn clean_text(text: &str) -> String {
    text.chars().filter(|ch| is_printable_ascii(*ch)).collect()
}

/// Cleans textual values; numbers, booleans and empty values pass through.
pub fn clean_value(value: FieldValue) -> FieldValue {
    match value {
        FieldValue::Text(text) => FieldValue::Text(clean_text(&text)),
        other => other,
    }
}
