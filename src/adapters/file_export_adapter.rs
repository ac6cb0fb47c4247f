//! File exporter: analytics JSON document and denormalized history CSV.

use crate::domain::draw::DrawRecord;
use crate::domain::error::FourdError;
use crate::domain::frequency::{FrequencyTables, PrizeCounts};
use crate::domain::ranker::CandidateScore;
use crate::ports::export_port::ExportPort;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// The persisted analytics layout: sparse digit→count maps keyed by digit
/// strings, camelCase field names. Internal tables are dense arrays; the
/// sparse form exists only at this boundary.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsDocument {
    pub digit_freq: BTreeMap<String, u64>,
    pub pos_freq: [BTreeMap<String, u64>; 4],
    pub pair_freq: BTreeMap<String, u64>,
    pub prize_dist: BTreeMap<String, PrizeCountsDoc>,
    pub last_seen: BTreeMap<String, String>,
    pub top_picks: Vec<TopPick>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrizeCountsDoc {
    pub first: u64,
    pub second: u64,
    pub third: u64,
    pub special: u64,
    pub consolation: u64,
}

impl From<PrizeCounts> for PrizeCountsDoc {
    fn from(counts: PrizeCounts) -> Self {
        Self {
            first: counts.first,
            second: counts.second,
            third: counts.third,
            special: counts.special,
            consolation: counts.consolation,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TopPick {
    pub number: String,
    pub score: u64,
}

impl AnalyticsDocument {
    pub fn build(tables: &FrequencyTables, top_picks: &[CandidateScore]) -> Self {
        let mut digit_freq = BTreeMap::new();
        for digit in 0..10 {
            if tables.digit_count(digit) > 0 {
                digit_freq.insert(digit.to_string(), tables.digit_count(digit));
            }
        }

        let pos_freq = std::array::from_fn(|pos| {
            let mut map = BTreeMap::new();
            for digit in 0..10 {
                if tables.pos_count(pos, digit) > 0 {
                    map.insert(digit.to_string(), tables.pos_count(pos, digit));
                }
            }
            map
        });

        let mut pair_freq = BTreeMap::new();
        for earlier in 0..10 {
            for later in 0..10 {
                if tables.pair_count(earlier, later) > 0 {
                    pair_freq.insert(
                        format!("{earlier}{later}"),
                        tables.pair_count(earlier, later),
                    );
                }
            }
        }

        let prize_dist = tables
            .prize_dist()
            .iter()
            .map(|(num, counts)| (num.clone(), PrizeCountsDoc::from(*counts)))
            .collect();

        let last_seen = tables
            .last_seen()
            .iter()
            .map(|(num, date)| (num.clone(), date.clone()))
            .collect();

        let top_picks = top_picks
            .iter()
            .map(|c| TopPick {
                number: c.number.clone(),
                score: c.score,
            })
            .collect();

        Self {
            digit_freq,
            pos_freq,
            pair_freq,
            prize_dist,
            last_seen,
            top_picks,
        }
    }
}

pub struct FileExportAdapter;

impl ExportPort for FileExportAdapter {
    fn write_analytics(
        &self,
        tables: &FrequencyTables,
        top_picks: &[CandidateScore],
        path: &Path,
    ) -> Result<(), FourdError> {
        let doc = AnalyticsDocument::build(tables, top_picks);
        let json = serde_json::to_string_pretty(&doc).map_err(|e| FourdError::Store {
            reason: format!("failed to encode analytics: {}", e),
        })?;
        fs::write(path, json).map_err(|e| FourdError::Store {
            reason: format!("failed to write {}: {}", path.display(), e),
        })
    }

    fn write_history_csv(&self, history: &[DrawRecord], path: &Path) -> Result<(), FourdError> {
        let mut writer = csv::Writer::from_path(path).map_err(|e| FourdError::Store {
            reason: format!("failed to open {}: {}", path.display(), e),
        })?;

        writer
            .write_record([
                "Date",
                "Operator",
                "1st Prize",
                "2nd Prize",
                "3rd Prize",
                "Special",
                "Consolation",
            ])
            .map_err(|e| FourdError::Store {
                reason: format!("CSV write error: {}", e),
            })?;

        for record in history {
            let special = record.special.join(" ");
            let consolation = record.consolation.join(" ");
            writer
                .write_record([
                    record.date.as_str(),
                    record.operator.as_str(),
                    record.first.as_str(),
                    record.second.as_str(),
                    record.third.as_str(),
                    special.as_str(),
                    consolation.as_str(),
                ])
                .map_err(|e| FourdError::Store {
                    reason: format!("CSV write error: {}", e),
                })?;
        }

        writer.flush().map_err(|e| FourdError::Store {
            reason: format!("failed to flush {}: {}", path.display(), e),
        })
    }
}
