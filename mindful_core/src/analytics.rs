//! Journal analytics: overall averages, weekly day-of-week breakdown and
//! mood trend classification.

use crate::{AnalyticsSummary, Clock, JournalEntry, MoodDescription};
use chrono::{DateTime, Datelike, Duration, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Days covered by the weekly window
pub const WEEKLY_WINDOW_DAYS: i64 = 7;

/// Fixed display order of the weekly breakdown
pub const WEEK_ORDER: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Mean mood and sleep over all supplied entries
///
/// An empty slice yields zeros.
pub fn overall_stats(entries: &[JournalEntry]) -> AnalyticsSummary {
    if entries.is_empty() {
        return AnalyticsSummary::default();
    }

    let (mood_sum, sleep_sum) = entries.iter().fold((0.0, 0.0), |(mood, sleep), e| {
        (mood + f64::from(e.mood), sleep + e.sleep_hours)
    });
    let count = entries.len();

    AnalyticsSummary {
        average_mood: mood_sum / count as f64,
        average_sleep: sleep_sum / count as f64,
        total_entries: count,
    }
}

/// Mean mood of the entries matching `filter`, 0 when none match
pub fn average_mood_where<F>(entries: &[JournalEntry], filter: F) -> f64
where
    F: Fn(&JournalEntry) -> bool,
{
    let moods: Vec<f64> = entries
        .iter()
        .filter(|e| filter(e))
        .map(|e| f64::from(e.mood))
        .collect();

    if moods.is_empty() {
        return 0.0;
    }
    moods.iter().sum::<f64>() / moods.len() as f64
}

/// Entries recorded at or after `now - 7 days`
pub fn trailing_week(entries: &[JournalEntry], now: DateTime<Utc>) -> Vec<JournalEntry> {
    let cutoff = now - Duration::days(WEEKLY_WINDOW_DAYS);
    entries
        .iter()
        .filter(|e| e.recorded_at >= cutoff)
        .cloned()
        .collect()
}

/// Averages for one weekday of the trailing week
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub weekday: Weekday,
    pub average_mood: f64,
    pub average_sleep: f64,
    pub entries: usize,
}

impl fmt::Display for DaySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: Avg Mood {:.1}, Avg Sleep {:.1}h",
            weekday_name(self.weekday),
            self.average_mood,
            self.average_sleep
        )
    }
}

/// Trailing-week entries grouped by local weekday, Sunday first
///
/// Weekdays without entries are omitted.
pub fn weekly_breakdown(entries: &[JournalEntry], clock: &dyn Clock) -> Vec<DaySummary> {
    let recent = trailing_week(entries, clock.now());
    tracing::debug!("{} entries inside the weekly window", recent.len());

    WEEK_ORDER
        .iter()
        .filter_map(|&weekday| {
            let day: Vec<&JournalEntry> = recent
                .iter()
                .filter(|e| clock.local_date(e.recorded_at).weekday() == weekday)
                .collect();
            if day.is_empty() {
                return None;
            }

            let n = day.len() as f64;
            Some(DaySummary {
                weekday,
                average_mood: day.iter().map(|e| f64::from(e.mood)).sum::<f64>() / n,
                average_sleep: day.iter().map(|e| e.sleep_hours).sum::<f64>() / n,
                entries: day.len(),
            })
        })
        .collect()
}

/// Display lines of [`weekly_breakdown`]
pub fn weekly_summary(entries: &[JournalEntry], clock: &dyn Clock) -> Vec<String> {
    weekly_breakdown(entries, clock)
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Direction of mood change between two averages
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MoodTrend {
    SignificantlyImproved,
    SlightlyImproved,
    Stable,
    SlightlyWorsened,
    SignificantlyWorsened,
}

impl MoodTrend {
    pub fn label(&self) -> &'static str {
        match self {
            MoodTrend::SignificantlyImproved => "Significantly Improved",
            MoodTrend::SlightlyImproved => "Slightly Improved",
            MoodTrend::Stable => "Stable",
            MoodTrend::SlightlyWorsened => "Slightly Worsened",
            MoodTrend::SignificantlyWorsened => "Significantly Worsened",
        }
    }
}

impl fmt::Display for MoodTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify `current - previous`; thresholds are exclusive
pub fn mood_trend(current: f64, previous: f64) -> MoodTrend {
    let difference = current - previous;

    if difference > 1.0 {
        MoodTrend::SignificantlyImproved
    } else if difference > 0.1 {
        MoodTrend::SlightlyImproved
    } else if difference < -1.0 {
        MoodTrend::SignificantlyWorsened
    } else if difference < -0.1 {
        MoodTrend::SlightlyWorsened
    } else {
        MoodTrend::Stable
    }
}

/// Entries newest first with their mood labels
pub fn mood_history(entries: &[JournalEntry]) -> Vec<(DateTime<Utc>, MoodDescription)> {
    let mut history: Vec<_> = entries
        .iter()
        .map(|e| (e.recorded_at, e.mood_description()))
        .collect();
    history.sort_by(|a, b| b.0.cmp(&a.0));
    history
}

/// Plain-text weekly wellness report
pub fn weekly_report(
    summary: &[String],
    stats: &AnalyticsSummary,
    history: &[(DateTime<Utc>, MoodDescription)],
    clock: &dyn Clock,
) -> String {
    let mut report = String::new();

    report.push_str("WEEKLY WELLNESS REPORT\n");
    report.push_str("======================\n\n");
    if summary.is_empty() {
        report.push_str("  No entries in the last 7 days\n");
    }
    for line in summary {
        report.push_str(&format!("  {}\n", line));
    }

    report.push_str("\nOVERALL STATISTICS\n");
    report.push_str("------------------\n");
    report.push_str(&format!("  Average Mood:   {:.1}/10\n", stats.average_mood));
    report.push_str(&format!("  Average Sleep:  {:.1} hours\n", stats.average_sleep));
    report.push_str(&format!("  Total Entries:  {}\n", stats.total_entries));

    if !history.is_empty() {
        report.push_str("\nRECENT MOOD HISTORY\n");
        report.push_str("-------------------\n");
        for (at, mood) in history.iter().take(5) {
            report.push_str(&format!(
                "  {}  ->  {}\n",
                clock.local_date(*at).format("%m/%d/%Y"),
                mood
            ));
        }
    }

    report
}
