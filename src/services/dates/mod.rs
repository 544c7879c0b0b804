//! Turns free-form date text into a calendar date.
//!
//! Rules are tried in a fixed order and the first one to produce a valid date
//! wins, even when a later rule would read the same text differently:
//!
//! 1. strict ISO `YYYY-MM-DD`
//! 2. natural language (English, Hindi, Hinglish) relative to a reference date
//! 3. `DD-MM-YYYY`, `DD/MM/YYYY`, `DD Month YYYY`

mod lexicon;
mod natural;

use chrono::NaiveDate;

use crate::errors::DateParseError;
use crate::models::booking::DATE_FORMAT;

const FALLBACK_FORMATS: [&str; 3] = ["%d-%m-%Y", "%d/%m/%Y", "%d %B %Y"];

pub fn parse_date(text: &str, reference: NaiveDate) -> Result<NaiveDate, DateParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DateParseError::Missing);
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, DATE_FORMAT) {
        return Ok(date);
    }

    if let Some(date) = natural::parse(text, reference) {
        return Ok(date);
    }

    for format in FALLBACK_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Ok(date);
        }
    }

    Err(DateParseError::Unrecognized(text.to_string()))
}
