//! Caller-facing insight operations for a single user.
//!
//! Each operation reads a fresh snapshot from the repository and reduces it;
//! nothing is cached between calls. Repository failures propagate, inference
//! failures never do.

use crate::analytics::{self, MoodTrend};
use crate::inference::InferenceEngine;
use crate::resolver::RecommendationResolver;
use crate::store::EntryRepository;
use crate::streak::{self, ActivityDates};
use crate::{
    rules, ActivityKind, AnalyticsSummary, Clock, JournalEntry, MoodDescription, Recommendation,
    Result, StreakResult, UserId,
};
use chrono::{DateTime, Utc};

/// Streak, analytics and recommendation queries over one repository
pub struct Insights<R, I, C> {
    repo: R,
    resolver: RecommendationResolver<I>,
    clock: C,
}

impl<R, I, C> Insights<R, I, C>
where
    R: EntryRepository,
    I: InferenceEngine,
    C: Clock,
{
    pub fn new(repo: R, engine: I, clock: C) -> Self {
        Self {
            repo,
            resolver: RecommendationResolver::new(engine),
            clock,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Current and best streak for journal entries or meditation sessions
    pub fn compute_streak(&self, user: UserId, kind: ActivityKind) -> Result<StreakResult> {
        let timestamps = match kind {
            ActivityKind::Journal => self.repo.journal_entry_dates(user)?,
            ActivityKind::Meditation => self.repo.meditation_session_dates(user)?,
        };

        let last_activity = timestamps.iter().max().copied();
        let dates = ActivityDates::from_timestamps(timestamps, &self.clock);

        tracing::info!("Computing {:?} streak for user {}", kind, user);
        Ok(streak::streak(&dates, self.clock.today(), last_activity))
    }

    /// Averages over the user's whole journal history
    pub fn compute_analytics(&self, user: UserId) -> Result<AnalyticsSummary> {
        let entries = self.repo.journal_entries(user)?;
        Ok(analytics::overall_stats(&entries))
    }

    /// Per-weekday display lines for the trailing week
    pub fn weekly_summary(&self, user: UserId) -> Result<Vec<String>> {
        let entries = self.repo.journal_entries(user)?;
        Ok(analytics::weekly_summary(&entries, &self.clock))
    }

    /// Full plain-text weekly report
    pub fn weekly_report(&self, user: UserId) -> Result<String> {
        let entries = self.repo.journal_entries(user)?;
        Ok(analytics::weekly_report(
            &analytics::weekly_summary(&entries, &self.clock),
            &analytics::overall_stats(&entries),
            &analytics::mood_history(&entries),
            &self.clock,
        ))
    }

    /// Trend of this week's average mood against the week before
    ///
    /// Reports [`MoodTrend::Stable`] when either week has no entries, since
    /// there is nothing to compare against.
    pub fn weekly_mood_trend(&self, user: UserId) -> Result<MoodTrend> {
        let entries = self.repo.journal_entries(user)?;
        let now = self.clock.now();
        let week = chrono::Duration::days(analytics::WEEKLY_WINDOW_DAYS);

        let in_current = |e: &JournalEntry| e.recorded_at >= now - week;
        let in_previous =
            |e: &JournalEntry| e.recorded_at >= now - week - week && e.recorded_at < now - week;

        if !entries.iter().any(in_current) || !entries.iter().any(in_previous) {
            tracing::debug!("Not enough history for a weekly mood trend");
            return Ok(MoodTrend::Stable);
        }

        let current = analytics::average_mood_where(&entries, in_current);
        let previous = analytics::average_mood_where(&entries, in_previous);
        Ok(analytics::mood_trend(current, previous))
    }

    /// Mood labels, newest first
    pub fn mood_history(&self, user: UserId) -> Result<Vec<(DateTime<Utc>, MoodDescription)>> {
        let entries = self.repo.journal_entries(user)?;
        Ok(analytics::mood_history(&entries))
    }

    /// Single recommendation for the user's latest entry
    pub async fn resolve_recommendation(&self, user: UserId) -> Result<Recommendation> {
        let entries = self.repo.journal_entries(user)?;
        Ok(self.resolver.resolve(latest_entry(&entries)).await)
    }

    /// All history-aware recommendations that apply
    pub fn history_recommendations(&self, user: UserId) -> Result<Vec<&'static str>> {
        let entries = self.repo.journal_entries(user)?;
        let Some(latest) = latest_entry(&entries) else {
            return Ok(Vec::new());
        };

        let recent = analytics::trailing_week(&entries, self.clock.now());
        Ok(rules::recommend_with_history(latest, &recent))
    }
}

fn latest_entry(entries: &[JournalEntry]) -> Option<&JournalEntry> {
    entries.iter().max_by_key(|e| e.recorded_at)
}
