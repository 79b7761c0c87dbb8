//! Local recommendation rules.
//!
//! ## Rule order (first match wins)
//!
//! 1. stress >= 8 and sleep < 6 → guided meditation
//! 2. stress >= 7 → breathing exercise
//! 3. mood <= 3 → journal prompts
//! 4. sleep < 6 → sleep story
//! 5. 5 <= stress < 7 → light stretching
//! 6. mood >= 7, stress <= 4, sleep >= 7 → maintenance meditation
//! 7. always → mindful breathing
//!
//! Only the latest journal entry is consulted. The history-aware variant in
//! [`recommend_with_history`] is additive instead of first-match.

use crate::JournalEntry;
use serde::{Deserialize, Serialize};

/// One row of the rule table
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    GuidedMeditation,
    BreathingExercise,
    ReflectiveJournal,
    SleepStory,
    LightStretching,
    MaintenanceMeditation,
    MindfulBreathing,
}

/// Evaluation order of the rule table
pub const RULES: [RuleKind; 7] = [
    RuleKind::GuidedMeditation,
    RuleKind::BreathingExercise,
    RuleKind::ReflectiveJournal,
    RuleKind::SleepStory,
    RuleKind::LightStretching,
    RuleKind::MaintenanceMeditation,
    RuleKind::MindfulBreathing,
];

impl RuleKind {
    /// Whether this rule fires for the entry
    pub fn matches(&self, entry: &JournalEntry) -> bool {
        let (stress, mood, sleep) = (entry.stress, entry.mood, entry.sleep_hours);
        match self {
            RuleKind::GuidedMeditation => stress >= 8 && sleep < 6.0,
            RuleKind::BreathingExercise => stress >= 7,
            RuleKind::ReflectiveJournal => mood <= 3,
            RuleKind::SleepStory => sleep < 6.0,
            RuleKind::LightStretching => (5..7).contains(&stress),
            RuleKind::MaintenanceMeditation => mood >= 7 && stress <= 4 && sleep >= 7.0,
            RuleKind::MindfulBreathing => true,
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            RuleKind::GuidedMeditation => "Guided Meditation (high stress + poor sleep)",
            RuleKind::BreathingExercise => "5-Minute Breathing Exercise (high stress)",
            RuleKind::ReflectiveJournal => "Reflective Journal Prompts (low mood)",
            RuleKind::SleepStory => "Sleep Story Audio (poor sleep)",
            RuleKind::LightStretching => "Light Stretching Exercise (moderate stress)",
            RuleKind::MaintenanceMeditation => "Maintenance Meditation (doing great)",
            RuleKind::MindfulBreathing => "Mindful Breathing (general wellness)",
        }
    }
}

/// First rule in table order that matches the entry
pub fn evaluate(entry: &JournalEntry) -> RuleKind {
    RULES
        .iter()
        .copied()
        .find(|rule| rule.matches(entry))
        // The table ends in an always-true row
        .unwrap_or(RuleKind::MindfulBreathing)
}

/// Recommendation text for the latest entry
pub fn recommend(entry: &JournalEntry) -> &'static str {
    let rule = evaluate(entry);
    tracing::debug!(
        "Rule {:?} fired (stress={}, mood={}, sleep={})",
        rule,
        entry.stress,
        entry.mood,
        entry.sleep_hours
    );
    rule.text()
}

pub const STRESS_RELIEF_BUNDLE: &str = "Stress Relief Bundle: Meditation + Breathing";
pub const SLEEP_IMPROVEMENT_PROGRAM: &str = "Sleep Improvement Program";
pub const MOOD_BOOSTING_ACTIVITIES: &str = "Mood Boosting Activities";
pub const DAILY_WELLNESS_ROUTINE: &str = "Daily Wellness Routine";

/// Every history-aware recommendation that applies
///
/// `recent` is the trailing week of entries. An empty window contributes
/// no sleep or mood signal.
pub fn recommend_with_history(latest: &JournalEntry, recent: &[JournalEntry]) -> Vec<&'static str> {
    let mut recommendations = Vec::new();

    if latest.stress >= 7 {
        recommendations.push(STRESS_RELIEF_BUNDLE);
    }

    if !recent.is_empty() {
        let n = recent.len() as f64;
        let avg_sleep = recent.iter().map(|e| e.sleep_hours).sum::<f64>() / n;
        let avg_mood = recent.iter().map(|e| f64::from(e.mood)).sum::<f64>() / n;

        if avg_sleep < 6.5 {
            recommendations.push(SLEEP_IMPROVEMENT_PROGRAM);
        }
        if avg_mood < 5.0 {
            recommendations.push(MOOD_BOOSTING_ACTIVITIES);
        }
    }

    if recommendations.is_empty() {
        recommendations.push(DAILY_WELLNESS_ROUTINE);
    }

    recommendations
}
