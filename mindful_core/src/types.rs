//! Core domain types for the Mindful wellness tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - Journal entries and meditation sessions (read-only snapshots)
//! - Streak and analytics results
//! - Recommendations and where they came from

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::{Error, Result};

// ============================================================================
// Identity
// ============================================================================

/// Identifier of the user owning a record
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct UserId(pub u32);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Recorded Signals
// ============================================================================

/// A self-reported journal entry
///
/// Mood and stress are expected on a 1-10 scale and sleep in 0-24 hours.
/// The insight algorithms take the values as they are; range checks happen
/// in [`JournalEntry::new`] before anything is stored.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct JournalEntry {
    pub id: Uuid,
    pub user_id: UserId,
    pub recorded_at: DateTime<Utc>,
    #[serde(default)]
    pub content: String,
    pub mood: i32,
    pub stress: i32,
    pub sleep_hours: f64,
}

impl JournalEntry {
    /// Build a validated entry
    pub fn new(
        user_id: UserId,
        recorded_at: DateTime<Utc>,
        content: impl Into<String>,
        mood: i32,
        stress: i32,
        sleep_hours: f64,
    ) -> Result<Self> {
        check_range("mood", mood, 1, 10)?;
        check_range("stress", stress, 1, 10)?;
        if !(0.0..=24.0).contains(&sleep_hours) {
            return Err(Error::InvalidInput(format!(
                "sleep hours must be between 0 and 24, got {}",
                sleep_hours
            )));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            recorded_at,
            content: content.into(),
            mood,
            stress,
            sleep_hours,
        })
    }

    /// Qualitative label for this entry's mood score
    pub fn mood_description(&self) -> MoodDescription {
        MoodDescription::from_score(self.mood)
    }
}

/// A logged meditation session
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MeditationSession {
    pub id: Uuid,
    pub user_id: UserId,
    pub performed_at: DateTime<Utc>,
    pub duration_minutes: u32,
    pub kind: String,
    pub quality: u8,
}

impl MeditationSession {
    /// Build a validated session (1-120 minutes, quality 1-5)
    pub fn new(
        user_id: UserId,
        performed_at: DateTime<Utc>,
        duration_minutes: u32,
        kind: impl Into<String>,
        quality: u8,
    ) -> Result<Self> {
        check_range("duration", duration_minutes as i32, 1, 120)?;
        check_range("quality", quality as i32, 1, 5)?;

        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            performed_at,
            duration_minutes,
            kind: kind.into(),
            quality,
        })
    }
}

fn check_range(field: &str, value: i32, min: i32, max: i32) -> Result<()> {
    if value < min || value > max {
        return Err(Error::InvalidInput(format!(
            "{} must be between {} and {}, got {}",
            field, min, max, value
        )));
    }
    Ok(())
}

/// Which activity stream a streak is computed over
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Journal,
    Meditation,
}

// ============================================================================
// Derived Insights
// ============================================================================

/// Current and best consecutive-day runs
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct StreakResult {
    pub current: u32,
    pub best: u32,
    pub last_activity: Option<DateTime<Utc>>,
}

/// Averages over a collection of journal entries
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct AnalyticsSummary {
    pub average_mood: f64,
    pub average_sleep: f64,
    pub total_entries: usize,
}

/// Qualitative label for a mood score
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MoodDescription {
    VeryLow,
    Low,
    Moderate,
    Good,
    Excellent,
    Unknown,
}

impl MoodDescription {
    pub fn from_score(score: i32) -> Self {
        match score {
            i32::MIN..=3 => MoodDescription::VeryLow,
            4..=5 => MoodDescription::Low,
            6..=7 => MoodDescription::Moderate,
            8..=9 => MoodDescription::Good,
            10 => MoodDescription::Excellent,
            _ => MoodDescription::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MoodDescription::VeryLow => "Very Low",
            MoodDescription::Low => "Low",
            MoodDescription::Moderate => "Moderate",
            MoodDescription::Good => "Good",
            MoodDescription::Excellent => "Excellent",
            MoodDescription::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for MoodDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Recommendations
// ============================================================================

/// Which path produced a recommendation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecommendationSource {
    /// No journal entries yet
    GetStarted,
    /// The external inference process answered
    External,
    /// The local rule table answered
    Rule(crate::rules::RuleKind),
}

/// A single suggested action for the user
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recommendation {
    pub text: String,
    pub source: RecommendationSource,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
