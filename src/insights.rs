use crate::models::{
    Cadence, Habit, HabitSummary, HeatmapCell, HeatmapWeek, Overview, ProgressTier,
};
use chrono::{Duration, NaiveDate};
use std::collections::BTreeSet;

/// Days looked back (inclusive of both ends) when computing completion rates.
pub const COMPLETION_WINDOW_DAYS: i64 = 30;

pub const HEATMAP_WEEKS: usize = 12;

/// Percentage of expected completions reached in the recent window.
///
/// Daily habits expect one log per day of the window; weekly habits expect
/// `target_per_week` over four weeks. The result is not capped at 100.
pub fn completion_rate(habit: &Habit, today: NaiveDate) -> u32 {
    let window_start = today - Duration::days(COMPLETION_WINDOW_DAYS);
    let recent = habit.logs.range(window_start..=today).count() as f64;

    let expected = match habit.cadence {
        Cadence::Daily => COMPLETION_WINDOW_DAYS as f64,
        Cadence::Weekly { target_per_week } => f64::from(target_per_week) * 4.0,
    };

    percent(recent, expected)
}

pub fn summarize_habit(habit: &Habit, today: NaiveDate) -> HabitSummary {
    HabitSummary {
        title: habit.title.clone(),
        cadence: habit.cadence.kind(),
        target_per_week: habit.cadence.target_per_week(),
        current_streak: habit.current_streak(today),
        longest_streak: habit.longest_streak(),
        completion_rate: completion_rate(habit, today),
        total_logs: habit.logs.len(),
        done_today: habit.is_done_on(today),
    }
}

pub fn build_overview(habits: &[Habit], today: NaiveDate) -> Overview {
    let summaries: Vec<HabitSummary> = habits
        .iter()
        .map(|habit| summarize_habit(habit, today))
        .collect();

    let total_habits = summaries.len();
    let total_completions = summaries.iter().map(|summary| summary.total_logs).sum();
    let completed_today = summaries.iter().filter(|summary| summary.done_today).count();

    let avg_completion_rate = if total_habits == 0 {
        0
    } else {
        let sum: u64 = summaries
            .iter()
            .map(|summary| u64::from(summary.completion_rate))
            .sum();
        (sum as f64 / total_habits as f64).round() as u32
    };

    let progress_percent = percent(completed_today as f64, total_habits as f64);

    Overview {
        today: today.to_string(),
        total_habits,
        total_completions,
        avg_completion_rate,
        completed_today,
        progress_percent,
        progress: progress_tier(progress_percent),
        habits: summaries,
    }
}

pub fn progress_tier(percent: u32) -> ProgressTier {
    match percent {
        100.. => ProgressTier::AllDone,
        70..=99 => ProgressTier::Great,
        40..=69 => ProgressTier::KeepGoing,
        1..=39 => ProgressTier::GoodStart,
        0 => ProgressTier::NotStarted,
    }
}

/// Completion grid for the last [`HEATMAP_WEEKS`] weeks ending at `today`,
/// oldest day first, in rows of seven.
pub fn build_heatmap(logs: &BTreeSet<NaiveDate>, today: NaiveDate) -> Vec<HeatmapWeek> {
    let total_days = (HEATMAP_WEEKS * 7) as i64;

    let mut weeks = Vec::with_capacity(HEATMAP_WEEKS);
    let mut current = HeatmapWeek {
        days: Vec::with_capacity(7),
    };

    for offset in (0..total_days).rev() {
        let date = today - Duration::days(offset);
        current.days.push(HeatmapCell {
            date: date.to_string(),
            done: logs.contains(&date),
            is_today: offset == 0,
        });

        if current.days.len() == 7 {
            weeks.push(std::mem::replace(
                &mut current,
                HeatmapWeek {
                    days: Vec::with_capacity(7),
                },
            ));
        }
    }

    weeks
}

fn percent(part: f64, whole: f64) -> u32 {
    if whole <= 0.0 {
        return 0;
    }
    (part / whole * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CadenceKind, HabitInput};
    use crate::streak::parse_day;

    fn habit(title: &str, cadence: CadenceKind, target: Option<u32>, logs: &[&str]) -> Habit {
        Habit::try_from(HabitInput {
            title: title.to_string(),
            cadence,
            target_per_week: target,
            logs: logs.iter().map(|day| day.to_string()).collect(),
        })
        .unwrap()
    }

    fn day(value: &str) -> NaiveDate {
        parse_day(value).unwrap()
    }

    #[test]
    fn completion_rate_daily_uses_thirty_day_window() {
        let logs = ["2025-10-09", "2025-10-10", "2025-11-01", "2025-11-08", "2025-11-09"];
        let read = habit("Read", CadenceKind::Daily, None, &logs);
        // 2025-10-09 falls just outside the window.
        assert_eq!(completion_rate(&read, day("2025-11-09")), 13);
    }

    #[test]
    fn completion_rate_weekly_uses_four_weeks_of_target() {
        let logs = ["2025-10-20", "2025-10-27", "2025-11-03", "2025-11-05", "2025-11-07"];
        let gym = habit("Gym", CadenceKind::Weekly, Some(2), &logs);
        assert_eq!(completion_rate(&gym, day("2025-11-09")), 63);
    }

    #[test]
    fn completion_rate_is_not_capped() {
        let logs: Vec<String> = (0..10)
            .map(|offset| (day("2025-11-09") - Duration::days(offset)).to_string())
            .collect();
        let logs: Vec<&str> = logs.iter().map(String::as_str).collect();
        let walk = habit("Walk", CadenceKind::Weekly, Some(1), &logs);
        assert_eq!(completion_rate(&walk, day("2025-11-09")), 250);
    }

    #[test]
    fn overview_aggregates_habits() {
        let today = day("2025-11-09");
        let habits = vec![
            habit("Read", CadenceKind::Daily, None, &["2025-11-07", "2025-11-08", "2025-11-09"]),
            habit("Gym", CadenceKind::Weekly, Some(2), &["2025-11-04", "2025-11-06"]),
        ];

        let overview = build_overview(&habits, today);
        assert_eq!(overview.today, "2025-11-09");
        assert_eq!(overview.total_habits, 2);
        assert_eq!(overview.total_completions, 5);
        assert_eq!(overview.completed_today, 1);
        assert_eq!(overview.progress_percent, 50);
        assert_eq!(overview.progress, ProgressTier::KeepGoing);
        // Read: 3/30 -> 10, Gym: 2/8 -> 25.
        assert_eq!(overview.avg_completion_rate, 18);

        let read = &overview.habits[0];
        assert_eq!(read.current_streak, 3);
        assert_eq!(read.longest_streak, 3);
        assert!(read.done_today);
        assert_eq!(read.target_per_week, None);

        let gym = &overview.habits[1];
        assert_eq!(gym.current_streak, 1);
        assert_eq!(gym.target_per_week, Some(2));
        assert!(!gym.done_today);
    }

    #[test]
    fn overview_without_habits_is_zeroed() {
        let overview = build_overview(&[], day("2025-11-09"));
        assert_eq!(overview.total_habits, 0);
        assert_eq!(overview.avg_completion_rate, 0);
        assert_eq!(overview.progress_percent, 0);
        assert_eq!(overview.progress, ProgressTier::NotStarted);
        assert!(overview.habits.is_empty());
    }

    #[test]
    fn progress_tiers() {
        assert_eq!(progress_tier(100), ProgressTier::AllDone);
        assert_eq!(progress_tier(70), ProgressTier::Great);
        assert_eq!(progress_tier(69), ProgressTier::KeepGoing);
        assert_eq!(progress_tier(40), ProgressTier::KeepGoing);
        assert_eq!(progress_tier(1), ProgressTier::GoodStart);
        assert_eq!(progress_tier(0), ProgressTier::NotStarted);
    }

    #[test]
    fn heatmap_covers_twelve_weeks_ending_today() {
        let today = day("2025-11-09");
        let logs: BTreeSet<NaiveDate> = [day("2025-11-09"), day("2025-08-18"), day("2025-08-17")]
            .into_iter()
            .collect();

        let weeks = build_heatmap(&logs, today);
        assert_eq!(weeks.len(), HEATMAP_WEEKS);
        assert!(weeks.iter().all(|week| week.days.len() == 7));

        let first = &weeks[0].days[0];
        assert_eq!(first.date, "2025-08-18");
        assert!(first.done);

        let last = &weeks[HEATMAP_WEEKS - 1].days[6];
        assert_eq!(last.date, "2025-11-09");
        assert!(last.done);
        assert!(last.is_today);

        let done = weeks
            .iter()
            .flat_map(|week| week.days.iter())
            .filter(|cell| cell.done)
            .count();
        assert_eq!(done, 2);
    }
}
