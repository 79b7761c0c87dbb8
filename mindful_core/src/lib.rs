#![forbid(unsafe_code)]

//! Core domain model and insight logic for the Mindful wellness tracker.
//!
//! This crate provides:
//! - Domain types (journal entries, meditation sessions, insight results)
//! - Streak calculation over activity dates
//! - Journal analytics and mood trends
//! - Rule-based and externally inferred recommendations
//! - A JSONL entry store, CSV export and configuration

pub mod types;
pub mod error;
pub mod clock;
pub mod config;
pub mod logging;
pub mod store;
pub mod streak;
pub mod analytics;
pub mod rules;
pub mod inference;
pub mod resolver;
pub mod insights;
pub mod export;
pub mod calm;

// Re-export commonly used types
pub use error::{Error, InferenceError, Result};
pub use types::*;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use store::{EntryRepository, JsonlStore};
pub use streak::ActivityDates;
pub use analytics::MoodTrend;
pub use rules::RuleKind;
pub use inference::{DisabledInference, InferenceEngine, ProcessInference};
pub use resolver::{RecommendationResolver, GET_STARTED_MESSAGE};
pub use insights::Insights;
pub use export::export_journal_csv;
