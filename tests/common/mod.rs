#![allow(dead_code)]

use chrono::NaiveDate;
use fourd::domain::draw::DrawRecord;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_draw(date: &str, first: &str) -> DrawRecord {
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

pub fn make_full_draw(
    date: &str,
    first: &str,
    second: &str,
    third: &str,
    special: &[&str],
    consolation: &[&str],
) -> DrawRecord {
    DrawRecord {
        operator: "Magnum".into(),
        date: date.into(),
        first: first.into(),
        second: second.into(),
        third: third.into(),
        special: special.iter().map(|s| s.to_string()).collect(),
        consolation: consolation.iter().map(|s| s.to_string()).collect(),
    }
}
