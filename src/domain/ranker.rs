//! Candidate ranker: score every 4-digit number against the frequency tables.

use crate::domain::error::FourdError;
use crate::domain::frequency::FrequencyTables;

/// Prize-tier score weights (first, second, third). Special and consolation
/// occurrences carry no weight beyond their frequency contributions.
const FIRST_WEIGHT: u64 = 5;
const SECOND_WEIGHT: u64 = 3;
const THIRD_WEIGHT: u64 = 2;

pub const DEFAULT_TOP_PICKS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateScore {
    pub number: String,
    pub score: u64,
}

/// Parse a comma-separated digit list ("1,2,3") into filter digits.
/// Empty input means no filter; anything that is not a single digit 0-9 is
/// rejected rather than silently matching nothing.
pub fn parse_digit_filter(input: &str) -> Result<Vec<char>, FourdError> {
    let mut digits = Vec::new();
    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            continue;
        }
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_digit() => digits.push(c),
            _ => {
                return Err(FourdError::InvalidDigit {
                    value: trimmed.to_string(),
                })
            }
        }
    }
    Ok(digits)
}

/// Score all 10,000 candidates, keep those passing the digit filters, sort by
/// score descending (ties ascending by number) and truncate to `limit`.
pub fn rank(
    tables: &FrequencyTables,
    must_contain: &[char],
    exclude: &[char],
    limit: usize,
) -> Result<Vec<CandidateScore>, FourdError> {
    for &c in must_contain.iter().chain(exclude.iter()) {
        if !c.is_ascii_digit() {
            return Err(FourdError::InvalidDigit {
                value: c.to_string(),
            });
        }
    }

    let mut candidates = Vec::new();
    for i in 0..10_000u32 {
        let number = format!("{i:04}");
        if !must_contain.iter().all(|&d| number.contains(d)) {
            continue;
        }
        if exclude.iter().any(|&d| number.contains(d)) {
            continue;
        }
        let score = score_candidate(tables, &number);
        candidates.push(CandidateScore { number, score });
    }

    candidates.sort_by(|a, b| b.score.cmp(&a.score).then(a.number.cmp(&b.number)));
    candidates.truncate(limit);
    Ok(candidates)
}

fn score_candidate(tables: &FrequencyTables, number: &str) -> u64 {
    let digits: Vec<usize> = number
        .bytes()
        .map(|b| (b - b'0') as usize)
        .collect();

    let mut score = 0u64;
    for (pos, &digit) in digits.iter().enumerate() {
        score += tables.digit_count(digit) + tables.pos_count(pos, digit);
    }
    for i in 0..4 {
        for j in (i + 1)..4 {
            score += tables.pair_count(digits[i], digits[j]);
        }
    }

    let prizes = tables.prize_counts(number);
    score
        + prizes.first * FIRST_WEIGHT
        + prizes.second * SECOND_WEIGHT
        + prizes.third * THIRD_WEIGHT
}
