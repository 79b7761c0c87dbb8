//! Consecutive-day streaks over sparse activity dates.
//!
//! Timestamps are collapsed to calendar dates in the clock's timezone, so
//! several entries on the same day count once.

use crate::{Clock, StreakResult};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeSet;

/// Distinct calendar dates with at least one activity
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActivityDates(BTreeSet<NaiveDate>);

impl ActivityDates {
    /// Collapse timestamps to local calendar dates
    pub fn from_timestamps<I>(timestamps: I, clock: &dyn Clock) -> Self
    where
        I: IntoIterator<Item = DateTime<Utc>>,
    {
        timestamps
            .into_iter()
            .map(|ts| clock.local_date(ts))
            .collect()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.0.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Dates in ascending order
    pub fn iter(&self) -> impl Iterator<Item = &NaiveDate> {
        self.0.iter()
    }
}

impl FromIterator<NaiveDate> for ActivityDates {
    fn from_iter<T: IntoIterator<Item = NaiveDate>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Consecutive days ending today
///
/// Walks backward from `today` and stops at the first missing day, so a
/// set without `today` yields 0.
pub fn current_streak(dates: &ActivityDates, today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut day = Some(today);

    while let Some(d) = day {
        if !dates.contains(d) {
            break;
        }
        streak += 1;
        day = d.pred_opt();
    }

    streak
}

/// Longest run of consecutive days anywhere in the set
pub fn best_streak(dates: &ActivityDates) -> u32 {
    let mut ordered = dates.iter();
    let Some(mut previous) = ordered.next() else {
        return 0;
    };

    let mut best = 1;
    let mut run = 1;

    for date in ordered {
        if previous.succ_opt().as_ref() == Some(date) {
            run += 1;
        } else {
            best = best.max(run);
            run = 1;
        }
        previous = date;
    }

    best.max(run)
}

/// Current and best streak plus the most recent activity
pub fn streak(
    dates: &ActivityDates,
    today: NaiveDate,
    last_activity: Option<DateTime<Utc>>,
) -> StreakResult {
    let result = StreakResult {
        current: current_streak(dates, today),
        best: best_streak(dates),
        last_activity,
    };

    tracing::debug!(
        "Streak over {} dates: current={}, best={}",
        dates.len(),
        result.current,
        result.best
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixedClock;
    use chrono::{Duration, FixedOffset, TimeZone};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn run_ending(end: NaiveDate, len: i64) -> Vec<NaiveDate> {
        (0..len).map(|i| end - Duration::days(i)).collect()
    }

    #[test]
    fn test_empty_set_has_no_streaks() {
        let dates = ActivityDates::default();
        assert_eq!(current_streak(&dates, day(2024, 5, 10)), 0);
        assert_eq!(best_streak(&dates), 0);
    }

    #[test]
    fn test_current_streak_counts_unbroken_run_ending_today() {
        let today = day(2024, 5, 10);
        for n in 1..=10 {
            let dates: ActivityDates = run_ending(today, n).into_iter().collect();
            assert_eq!(current_streak(&dates, today), n as u32);
        }
    }

    #[test]
    fn test_current_streak_is_zero_without_today() {
        let today = day(2024, 5, 10);
        let dates: ActivityDates = run_ending(today - Duration::days(1), 6).into_iter().collect();
        assert_eq!(current_streak(&dates, today), 0);
        assert_eq!(best_streak(&dates), 6);
    }

    #[test]
    fn test_current_streak_stops_at_first_gap() {
        let today = day(2024, 5, 10);
        let dates: ActivityDates = [today, day(2024, 5, 9), day(2024, 5, 7), day(2024, 5, 6)]
            .into_iter()
            .collect();
        assert_eq!(current_streak(&dates, today), 2);
    }

    #[test]
    fn test_best_streak_single_date() {
        let dates: ActivityDates = [day(2023, 1, 1)].into_iter().collect();
        assert_eq!(best_streak(&dates), 1);
    }

    #[test]
    fn test_best_streak_picks_longest_run() {
        let mut raw = run_ending(day(2024, 1, 10), 3);
        raw.extend(run_ending(day(2024, 2, 20), 5));
        raw.push(day(2024, 3, 1));
        let dates: ActivityDates = raw.into_iter().collect();
        assert_eq!(best_streak(&dates), 5);
    }

    #[test]
    fn test_best_streak_crosses_month_and_year_boundaries() {
        let dates: ActivityDates = [day(2023, 12, 30), day(2023, 12, 31), day(2024, 1, 1)]
            .into_iter()
            .collect();
        assert_eq!(best_streak(&dates), 3);
    }

    #[test]
    fn test_non_contiguous_dates_never_merge() {
        let dates: ActivityDates = [day(2024, 4, 1), day(2024, 4, 3), day(2024, 4, 5)]
            .into_iter()
            .collect();
        assert_eq!(best_streak(&dates), 1);
    }

    #[test]
    fn test_best_streak_ignores_order_and_duplicates() {
        let ordered = vec![day(2024, 6, 1), day(2024, 6, 2), day(2024, 6, 3), day(2024, 6, 8)];
        let mut shuffled = vec![day(2024, 6, 8), day(2024, 6, 2), day(2024, 6, 3), day(2024, 6, 1)];
        shuffled.extend(ordered.clone());

        let a: ActivityDates = ordered.into_iter().collect();
        let b: ActivityDates = shuffled.into_iter().collect();
        assert_eq!(a, b);
        assert_eq!(best_streak(&a), best_streak(&b));
        assert_eq!(best_streak(&b), 3);
    }

    #[test]
    fn test_same_day_timestamps_collapse() {
        let clock = FixedClock::utc(Utc.with_ymd_and_hms(2024, 5, 10, 20, 0, 0).unwrap());
        let dates = ActivityDates::from_timestamps(
            [
                Utc.with_ymd_and_hms(2024, 5, 10, 8, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 5, 10, 19, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 5, 9, 12, 0, 0).unwrap(),
            ],
            &clock,
        );
        assert_eq!(dates.len(), 2);
        assert_eq!(current_streak(&dates, clock.today()), 2);
    }

    #[test]
    fn test_local_timezone_shifts_dates() {
        // 22:00 UTC is the next morning in UTC+9
        let offset = FixedOffset::east_opt(9 * 3600).unwrap();
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 5, 10, 22, 0, 0).unwrap(), offset);
        let dates = ActivityDates::from_timestamps(
            [Utc.with_ymd_and_hms(2024, 5, 10, 22, 0, 0).unwrap()],
            &clock,
        );
        assert!(dates.contains(day(2024, 5, 11)));
        assert_eq!(current_streak(&dates, clock.today()), 1);
    }

    #[test]
    fn test_streak_result_composition() {
        let today = day(2024, 5, 10);
        let last = Utc.with_ymd_and_hms(2024, 5, 10, 7, 0, 0).unwrap();
        let dates: ActivityDates = run_ending(today, 4).into_iter().collect();

        let result = streak(&dates, today, Some(last));
        assert_eq!(
            result,
            StreakResult {
                current: 4,
                best: 4,
                last_activity: Some(last),
            }
        );
    }
}
