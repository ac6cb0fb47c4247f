//! Bounded history store: merge, dedup and retention windowing.

use crate::domain::draw::DrawRecord;
use crate::domain::error::FourdError;
use chrono::{Days, NaiveDate};
use std::collections::HashMap;

/// Days of history kept when the config does not say otherwise.
pub const DEFAULT_RETENTION_DAYS: u64 = 60;

/// Merge `incoming` draws into `existing`, dedup by (date, first) with
/// incoming winning on collision, sort ascending by date and evict everything
/// older than `today - retention_days`.
///
/// Transactional: any record with an unparsable date fails the whole merge
/// and the inputs are left untouched.
pub fn merge(
    existing: &[DrawRecord],
    incoming: &[DrawRecord],
    retention_days: u64,
    today: NaiveDate,
) -> Result<Vec<DrawRecord>, FourdError> {
    let mut by_key: HashMap<(String, String), DrawRecord> = HashMap::new();
    for record in existing.iter().chain(incoming.iter()) {
        by_key.insert(record.dedup_key(), record.clone());
    }

    // Parse every date up front so a bad record rejects the batch instead of
    // mis-sorting it.
    let mut dated: Vec<(NaiveDate, DrawRecord)> = by_key
        .into_values()
        .map(|record| record.parsed_date().map(|date| (date, record)))
        .collect::<Result<_, _>>()?;

    dated.sort_by(|a, b| {
        (a.0, &a.1.first, &a.1.operator).cmp(&(b.0, &b.1.first, &b.1.operator))
    });

    let cutoff = today
        .checked_sub_days(Days::new(retention_days))
        .unwrap_or(NaiveDate::MIN);

    Ok(dated
        .into_iter()
        .filter(|(date, _)| *date >= cutoff)
        .map(|(_, record)| record)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn draw(date: &str, first: &str) -> DrawRecord {
        DrawRecord {
            operator: "Magnum".into(),
            date: date.into(),
            first: first.into(),
            second: "".into(),
            third: "".into(),
            special: vec![],
            consolation: vec![],
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn merges_and_sorts_ascending() {
        let existing = vec![draw("2024-02-20", "1234")];
        let incoming = vec![draw("2024-02-10", "5678"), draw("2024-02-25", "9012")];
        let merged = merge(&existing, &incoming, 60, today()).unwrap();
        let dates: Vec<&str> = merged.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-02-10", "2024-02-20", "2024-02-25"]);
    }

    #[test]
    fn dedup_prefers_incoming() {
        let mut stale = draw("2024-02-20", "1234");
        stale.second = "0000".into();
        let mut fresh = draw("2024-02-20", "1234");
        fresh.second = "5678".into();

        let merged = merge(&[stale], &[fresh], 60, today()).unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].second, "5678");
    }

    #[test]
    fn same_date_different_first_are_distinct_draws() {
        let merged = merge(
            &[draw("2024-02-20", "1234")],
            &[draw("2024-02-20", "5678")],
            60,
            today(),
        )
        .unwrap();
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn retention_boundary_is_inclusive() {
        // 60 days before 2024-03-01 is 2024-01-01.
        let on_boundary = draw("2024-01-01", "1234");
        let one_day_older = draw("2023-12-31", "5678");
        let merged = merge(&[on_boundary, one_day_older], &[], 60, today()).unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].date, "2024-01-01");
    }

    #[test]
    fn malformed_date_rejects_the_batch() {
        let result = merge(
            &[draw("2024-02-20", "1234")],
            &[draw("not-a-date", "5678")],
            60,
            today(),
        );
        assert!(matches!(result, Err(FourdError::MalformedRecord { date }) if date == "not-a-date"));
    }

    #[test]
    fn empty_inputs_merge_to_empty() {
        assert!(merge(&[], &[], 60, today()).unwrap().is_empty());
    }

    #[test]
    fn zero_retention_keeps_only_today() {
        let merged = merge(
            &[draw("2024-03-01", "1234"), draw("2024-02-29", "5678")],
            &[],
            0,
            today(),
        )
        .unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].date, "2024-03-01");
    }

    proptest! {
        /// merge(merge(A, B, d), [], d) == merge(A, B, d)
        #[test]
        fn merge_is_idempotent(
            days_back in proptest::collection::vec(0u64..90, 0..20),
            retention in 0u64..90,
        ) {
            let records: Vec<DrawRecord> = days_back
                .iter()
                .enumerate()
                .map(|(i, back)| {
                    let date = today() - Days::new(*back);
                    draw(&date.format("%Y-%m-%d").to_string(), &format!("{:04}", i % 7))
                })
                .collect();

            let (existing, incoming) = records.split_at(records.len() / 2);
            let once = merge(existing, incoming, retention, today()).unwrap();
            let twice = merge(&once, &[], retention, today()).unwrap();
            prop_assert_eq!(once, twice);
        }

        /// Every key in the output is unique, and every retained record came
        /// from one of the inputs.
        #[test]
        fn merge_output_is_deduped(
            days_back in proptest::collection::vec(0u64..30, 0..20),
        ) {
            let records: Vec<DrawRecord> = days_back
                .iter()
                .enumerate()
                .map(|(i, back)| {
                    let date = today() - Days::new(*back);
                    draw(&date.format("%Y-%m-%d").to_string(), &format!("{:04}", i % 3))
                })
                .collect();

            let merged = merge(&records, &[], 60, today()).unwrap();
            let mut keys: Vec<_> = merged.iter().map(|d| d.dedup_key()).collect();
            let before = keys.len();
            keys.sort();
            keys.dedup();
            prop_assert_eq!(before, keys.len());
            for record in &merged {
                prop_assert!(records.contains(record));
            }
        }
    }
}
