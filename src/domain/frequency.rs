//! Frequency engine: digit, positional, pair and prize statistics derived
//! from a history snapshot.
//!
//! Tables are dense fixed-size arrays indexed by digit; the sparse
//! digit→count maps only appear in the exported analytics document. Absent
//! numbers simply read as zero counts.

use crate::domain::draw::{four_digits, DrawRecord};
use crate::domain::error::FourdError;
use std::collections::HashMap;

/// How often a specific 4-digit number landed in each prize tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrizeCounts {
    pub first: u64,
    pub second: u64,
    pub third: u64,
    pub special: u64,
    pub consolation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTables {
    /// Occurrences of each digit across all prize-tier numbers.
    digit_freq: [u64; 10],
    /// Occurrences of each digit at each of the four positions.
    pos_freq: [[u64; 10]; 4],
    /// Occurrences of the ordered digit pair (position i, position j), i < j,
    /// indexed `d_i * 10 + d_j`.
    pair_freq: [u64; 100],
    prize_dist: HashMap<String, PrizeCounts>,
    /// Most recent draw date (string form) each number appeared on.
    last_seen: HashMap<String, String>,
}

// Not derivable: std::array::Default stops at length 32.
impl Default for FrequencyTables {
    fn default() -> Self {
        Self {
            digit_freq: [0; 10],
            pos_freq: [[0; 10]; 4],
            pair_freq: [0; 100],
            prize_dist: HashMap::new(),
            last_seen: HashMap::new(),
        }
    }
}

impl FrequencyTables {
    /// Derive all tables from a history snapshot.
    ///
    /// History is re-sorted by parsed date ascending before the pass so
    /// `last_seen` reflects chronological recency regardless of storage
    /// order. Entries that are not exactly four ASCII digits are skipped
    /// (malformed-input recovery is the ingestor's job); an unparsable date
    /// still fails the whole computation.
    pub fn compute(history: &[DrawRecord]) -> Result<Self, FourdError> {
        let mut dated: Vec<(chrono::NaiveDate, &DrawRecord)> = history
            .iter()
            .map(|record| record.parsed_date().map(|date| (date, record)))
            .collect::<Result<_, _>>()?;
        dated.sort_by_key(|(date, _)| *date);

        let mut tables = Self::default();
        for (_, record) in dated {
            tables.absorb(record);
        }
        Ok(tables)
    }

    fn absorb(&mut self, record: &DrawRecord) {
        for num in record.prize_numbers() {
            let Some(digits) = four_digits(num) else {
                continue;
            };
            for (pos, &digit) in digits.iter().enumerate() {
                self.digit_freq[digit] += 1;
                self.pos_freq[pos][digit] += 1;
            }
            for i in 0..4 {
                for j in (i + 1)..4 {
                    self.pair_freq[digits[i] * 10 + digits[j]] += 1;
                }
            }

            // First-match priority: an occurrence matching a higher tier is
            // attributed there even when it was drawn in a lower one.
            let counts = self.prize_dist.entry(num.to_string()).or_default();
            if num == record.first {
                counts.first += 1;
            } else if num == record.second {
                counts.second += 1;
            } else if num == record.third {
                counts.third += 1;
            } else if record.special.iter().any(|s| s == num) {
                counts.special += 1;
            } else if record.consolation.iter().any(|c| c == num) {
                counts.consolation += 1;
            }

            self.last_seen
                .insert(num.to_string(), record.date.clone());
        }
    }

    pub fn digit_count(&self, digit: usize) -> u64 {
        self.digit_freq[digit]
    }

    pub fn pos_count(&self, pos: usize, digit: usize) -> u64 {
        self.pos_freq[pos][digit]
    }

    /// Count for the ordered pair (digit at the earlier position, digit at
    /// the later position).
    pub fn pair_count(&self, earlier: usize, later: usize) -> u64 {
        self.pair_freq[earlier * 10 + later]
    }

    pub fn prize_counts(&self, num: &str) -> PrizeCounts {
        self.prize_dist.get(num).copied().unwrap_or_default()
    }

    pub fn prize_dist(&self) -> &HashMap<String, PrizeCounts> {
        &self.prize_dist
    }

    pub fn last_seen(&self) -> &HashMap<String, String> {
        &self.last_seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(date: &str, first: &str, second: &str, third: &str) -> DrawRecord {
        DrawRecord {
            operator: "Magnum".into(),
            date: date.into(),
            first: first.into(),
            second: second.into(),
            third: third.into(),
            special: vec![],
            consolation: vec![],
        }
    }

    #[test]
    fn single_number_digit_and_positional_counts() {
        let history = vec![draw("2024-01-01", "1234", "", "")];
        let tables = FrequencyTables::compute(&history).unwrap();

        for digit in 1..=4 {
            assert_eq!(tables.digit_count(digit), 1);
        }
        assert_eq!(tables.digit_count(0), 0);
        assert_eq!(tables.pos_count(0, 1), 1);
        assert_eq!(tables.pos_count(1, 2), 1);
        assert_eq!(tables.pos_count(2, 3), 1);
        assert_eq!(tables.pos_count(3, 4), 1);
        assert_eq!(tables.pos_count(0, 2), 0);
    }

    #[test]
    fn repeated_digit_counts_each_occurrence() {
        let history = vec![draw("2024-01-01", "1111", "", "")];
        let tables = FrequencyTables::compute(&history).unwrap();
        assert_eq!(tables.digit_count(1), 4);
        for pos in 0..4 {
            assert_eq!(tables.pos_count(pos, 1), 1);
        }
        // All six position pairs collapse onto the (1,1) key.
        assert_eq!(tables.pair_count(1, 1), 6);
    }

    #[test]
    fn pair_keys_follow_position_order_not_digit_order() {
        let history = vec![draw("2024-01-01", "1212", "", "")];
        let tables = FrequencyTables::compute(&history).unwrap();
        // Positions (0,2) and (1,3) hold equal digits.
        assert_eq!(tables.pair_count(1, 1), 1);
        assert_eq!(tables.pair_count(2, 2), 1);
        // (0,1), (0,3) give "12"; (2,3) gives "12"; (1,2) gives "21".
        assert_eq!(tables.pair_count(1, 2), 3);
        assert_eq!(tables.pair_count(2, 1), 1);
    }

    #[test]
    fn prize_attribution_uses_first_match_priority() {
        let mut record = draw("2024-01-01", "7777", "", "");
        record.special = vec!["7777".into()];
        let tables = FrequencyTables::compute(&[record]).unwrap();

        let counts = tables.prize_counts("7777");
        // Both occurrences match the first tier, so special gets nothing.
        assert_eq!(counts.first, 2);
        assert_eq!(counts.special, 0);
        // Both occurrences still feed the digit tables.
        assert_eq!(tables.digit_count(7), 8);
    }

    #[test]
    fn last_seen_tracks_chronological_recency_despite_storage_order() {
        let history = vec![
            draw("2024-01-20", "4321", "", ""),
            draw("2024-01-05", "4321", "", ""),
        ];
        let tables = FrequencyTables::compute(&history).unwrap();
        assert_eq!(tables.last_seen()["4321"], "2024-01-20");
    }

    #[test]
    fn skips_non_candidate_entries() {
        let mut record = draw("2024-01-01", "1234", "12", "abcd");
        record.special = vec!["".into()];
        let tables = FrequencyTables::compute(&[record]).unwrap();
        assert_eq!(tables.digit_count(1), 1);
        assert_eq!(tables.prize_dist().len(), 1);
    }

    #[test]
    fn malformed_date_fails_compute() {
        let history = vec![draw("yesterday", "1234", "", "")];
        assert!(matches!(
            FrequencyTables::compute(&history),
            Err(FourdError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn absent_numbers_read_as_zero() {
        let tables = FrequencyTables::compute(&[]).unwrap();
        assert_eq!(tables.digit_count(5), 0);
        assert_eq!(tables.pair_count(3, 7), 0);
        assert_eq!(tables.prize_counts("0000"), PrizeCounts::default());
        assert!(tables.last_seen().is_empty());
    }
}
