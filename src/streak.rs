//! Streak calculators for daily and weekly habits.
//!
//! Every function here is a pure derivation from a set of completion days and
//! an explicit reference day. Nothing reads the clock.

use crate::errors::StreakError;
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeSet;

/// Upper bound on the backward day walk of [`daily_streak_at`].
pub const DAILY_WALK_LIMIT: u32 = 365;

/// Upper bound on the backward week walk of [`weekly_streak_at`].
pub const WEEKLY_WALK_LIMIT: u32 = 52;

/// Parses a strict `YYYY-MM-DD` calendar day.
pub fn parse_day(value: &str) -> Result<NaiveDate, StreakError> {
    // chrono accepts unpadded fields, so check the shape first.
    let canonical = value.len() == 10
        && value.bytes().enumerate().all(|(index, byte)| match index {
            4 | 7 => byte == b'-',
            _ => byte.is_ascii_digit(),
        });
    if !canonical {
        return Err(StreakError::InvalidDateFormat(value.to_string()));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| StreakError::InvalidDateFormat(value.to_string()))
}

/// Parses completion logs into a set, collapsing duplicates.
pub fn parse_logs<S: AsRef<str>>(logs: &[S]) -> Result<BTreeSet<NaiveDate>, StreakError> {
    logs.iter().map(|day| parse_day(day.as_ref())).collect()
}

pub fn compute_daily_streak<S: AsRef<str>>(logs: &[S], today: &str) -> Result<u32, StreakError> {
    let logs = parse_logs(logs)?;
    Ok(daily_streak_at(&logs, parse_day(today)?))
}

pub fn compute_weekly_streak<S: AsRef<str>>(
    logs: &[S],
    target_per_week: u32,
    today: &str,
) -> Result<u32, StreakError> {
    let logs = parse_logs(logs)?;
    Ok(weekly_streak_at(&logs, target_per_week, parse_day(today)?))
}

pub fn compute_longest_streak<S: AsRef<str>>(logs: &[S]) -> Result<u32, StreakError> {
    Ok(longest_streak_in(&parse_logs(logs)?))
}

/// Consecutive logged days ending at `today`, or at yesterday when today has
/// not been logged yet.
pub fn daily_streak_at(logs: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    if logs.is_empty() {
        return 0;
    }

    let start = if logs.contains(&today) {
        today
    } else {
        let yesterday = today - Duration::days(1);
        if !logs.contains(&yesterday) {
            return 0;
        }
        yesterday
    };

    let mut streak = 0;
    for offset in 0..DAILY_WALK_LIMIT {
        let day = start - Duration::days(i64::from(offset));
        if !logs.contains(&day) {
            break;
        }
        streak += 1;
    }
    streak
}

/// Consecutive Monday-start weeks, walking back from the week containing
/// `today`, whose log count reaches `target_per_week`.
///
/// The current week is still in progress: when it has some logs but is below
/// target it adds nothing and the walk carries on into earlier weeks. A current
/// week with no logs at all, or any earlier week below target, ends the walk.
pub fn weekly_streak_at(logs: &BTreeSet<NaiveDate>, target_per_week: u32, today: NaiveDate) -> u32 {
    if logs.is_empty() {
        return 0;
    }

    let target = target_per_week as usize;
    let mut start = week_start(today);
    let mut streak = 0;

    for offset in 0..WEEKLY_WALK_LIMIT {
        let end = start + Duration::days(6);
        let count = logs.range(start..=end).count();

        if count >= target {
            streak += 1;
        } else if offset > 0 || count == 0 {
            break;
        }

        start = start - Duration::weeks(1);
    }
    streak
}

/// Longest run of consecutive days anywhere in the history.
pub fn longest_streak_in(logs: &BTreeSet<NaiveDate>) -> u32 {
    let mut days = logs.iter().copied();
    let Some(mut previous) = days.next() else {
        return 0;
    };

    let mut longest = 1;
    let mut run = 1;
    // Set iteration is ascending and unique, so every gap is at least one day.
    for day in days {
        if (day - previous).num_days() == 1 {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 1;
        }
        previous = day;
    }
    longest
}

pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}
