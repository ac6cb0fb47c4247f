//! Core domain types and logic.

pub mod draw;
pub mod history;
pub mod frequency;
pub mod ranker;
pub mod error;
