//! Draw record representation.
//!
//! One record per published draw. The `date` field keeps the string form the
//! ingestor supplied (and the history file persists), but every consumer that
//! needs to order or window records parses it strictly via [`DrawRecord::parsed_date`].

use crate::domain::error::FourdError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawRecord {
    pub operator: String,
    pub date: String,
    pub first: String,
    pub second: String,
    pub third: String,
    #[serde(default)]
    pub special: Vec<String>,
    #[serde(default)]
    pub consolation: Vec<String>,
}

impl DrawRecord {
    /// Strict ISO-8601 date. Unparsable dates are an error, never a
    /// sort-anywhere sentinel.
    pub fn parsed_date(&self) -> Result<NaiveDate, FourdError> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").map_err(|_| {
            FourdError::MalformedRecord {
                date: self.date.clone(),
            }
        })
    }

    /// Dedup identity: two records with the same (date, first) are the same draw.
    pub fn dedup_key(&self) -> (String, String) {
        (self.date.clone(), self.first.clone())
    }

    /// Non-empty prize numbers in tier order: first, second, third, then each
    /// special, then each consolation. A number drawn in two tiers appears
    /// once per occurrence.
    pub fn prize_numbers(&self) -> Vec<&str> {
        [&self.first, &self.second, &self.third]
            .into_iter()
            .chain(self.special.iter())
            .chain(self.consolation.iter())
            .map(String::as_str)
            .filter(|num| !num.is_empty())
            .collect()
    }
}

/// The four digits of a candidate-shaped number, or `None` when the string is
/// not exactly four ASCII digits (scraper noise the engine skips over).
pub fn four_digits(num: &str) -> Option<[usize; 4]> {
    let bytes = num.as_bytes();
    if bytes.len() != 4 {
        return None;
    }
    let mut digits = [0usize; 4];
    for (i, b) in bytes.iter().enumerate() {
        if !b.is_ascii_digit() {
            return None;
        }
        digits[i] = (b - b'0') as usize;
    }
    Some(digits)
}
