//! Calendar dates on the wire.
//!
//! Dates are written as `YYYY-MM-DD`. The API may send either that form or a
//! full ISO timestamp (`2024-03-10T00:00:00.000Z`); only the date part is kept.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serializer};

const FORMAT: &str = "%Y-%m-%d";

/// Parse `YYYY-MM-DD`, ignoring any time part after it.
pub fn parse(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, FORMAT).ok()
}

/// Format a date for a request body.
pub fn format(date: &NaiveDate) -> String {
    date.format(FORMAT).to_string()
}

/// `Option<NaiveDate>` fields: null and empty strings read as `None`.
///
/// Any other string that is not a date fails the decode, like a malformed amount does.
pub mod option {
    use super::*;

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_str(&format(date)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => parse(text)
                .map(Some)
                .ok_or_else(|| {
                    <D::Error as serde::de::Error>::custom(format!("invalid date `{}`", text))
                }),
        }
    }
}
