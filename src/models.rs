use crate::errors::StreakError;
use crate::streak::{self, parse_day, parse_logs};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const MAX_TITLE_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CadenceKind {
    Daily,
    Weekly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    Daily,
    Weekly { target_per_week: u8 },
}

impl Cadence {
    pub fn weekly(target_per_week: u32) -> Result<Self, StreakError> {
        match u8::try_from(target_per_week) {
            Ok(target @ 1..=7) => Ok(Self::Weekly {
                target_per_week: target,
            }),
            _ => Err(StreakError::InvalidTarget(target_per_week)),
        }
    }

    pub fn resolve(kind: CadenceKind, target_per_week: Option<u32>) -> Result<Self, StreakError> {
        match kind {
            CadenceKind::Daily => Ok(Self::Daily),
            CadenceKind::Weekly => Self::weekly(target_per_week.ok_or(StreakError::MissingTarget)?),
        }
    }

    pub fn kind(&self) -> CadenceKind {
        match self {
            Self::Daily => CadenceKind::Daily,
            Self::Weekly { .. } => CadenceKind::Weekly,
        }
    }

    /// Current streak of `logs` under this cadence.
    pub fn current_streak(&self, logs: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
        match *self {
            Self::Daily => streak::daily_streak_at(logs, today),
            Self::Weekly { target_per_week } => {
                streak::weekly_streak_at(logs, u32::from(target_per_week), today)
            }
        }
    }

    pub fn target_per_week(&self) -> Option<u8> {
        match self {
            Self::Daily => None,
            Self::Weekly { target_per_week } => Some(*target_per_week),
        }
    }
}

/// A validated habit together with its completion days.
#[derive(Debug, Clone)]
pub struct Habit {
    pub title: String,
    pub cadence: Cadence,
    pub logs: BTreeSet<NaiveDate>,
}

impl Habit {
    pub fn current_streak(&self, today: NaiveDate) -> u32 {
        self.cadence.current_streak(&self.logs, today)
    }

    pub fn longest_streak(&self) -> u32 {
        streak::longest_streak_in(&self.logs)
    }

    pub fn is_done_on(&self, day: NaiveDate) -> bool {
        self.logs.contains(&day)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HabitInput {
    pub title: String,
    pub cadence: CadenceKind,
    #[serde(default)]
    pub target_per_week: Option<u32>,
    #[serde(default)]
    pub logs: Vec<String>,
}

impl TryFrom<HabitInput> for Habit {
    type Error = StreakError;

    fn try_from(input: HabitInput) -> Result<Self, Self::Error> {
        let title = input.title.trim();
        if title.is_empty() || title.chars().count() > MAX_TITLE_CHARS {
            return Err(StreakError::InvalidTitle(input.title));
        }

        Ok(Self {
            title: title.to_string(),
            cadence: Cadence::resolve(input.cadence, input.target_per_week)?,
            logs: parse_logs(&input.logs)?,
        })
    }
}

/// Resolves an optional `today` from a request body against a fallback.
pub fn resolve_today(requested: Option<&str>, fallback: NaiveDate) -> Result<NaiveDate, StreakError> {
    requested.map(parse_day).transpose().map(|day| day.unwrap_or(fallback))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodayResponse {
    pub date: String,
}

#[derive(Debug, Deserialize)]
pub struct StreakRequest {
    pub cadence: CadenceKind,
    #[serde(default)]
    pub target_per_week: Option<u32>,
    #[serde(default)]
    pub logs: Vec<String>,
    #[serde(default)]
    pub today: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StreakResponse {
    pub today: String,
    pub cadence: CadenceKind,
    pub current_streak: u32,
    pub longest_streak: u32,
}

#[derive(Debug, Deserialize)]
pub struct InsightsRequest {
    #[serde(default)]
    pub today: Option<String>,
    #[serde(default)]
    pub habits: Vec<HabitInput>,
}

#[derive(Debug, Deserialize)]
pub struct HeatmapRequest {
    #[serde(default)]
    pub today: Option<String>,
    #[serde(default)]
    pub logs: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct HeatmapResponse {
    pub today: String,
    pub weeks: Vec<HeatmapWeek>,
}

#[derive(Debug, Serialize)]
pub struct HeatmapCell {
    pub date: String,
    pub done: bool,
    pub is_today: bool,
}

#[derive(Debug, Serialize)]
pub struct HeatmapWeek {
    pub days: Vec<HeatmapCell>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressTier {
    AllDone,
    Great,
    KeepGoing,
    GoodStart,
    NotStarted,
}

#[derive(Debug, Serialize)]
pub struct HabitSummary {
    pub title: String,
    pub cadence: CadenceKind,
    pub target_per_week: Option<u8>,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub completion_rate: u32,
    pub total_logs: usize,
    pub done_today: bool,
}

#[derive(Debug, Serialize)]
pub struct Overview {
    pub today: String,
    pub total_habits: usize,
    pub total_completions: usize,
    pub avg_completion_rate: u32,
    pub completed_today: usize,
    pub progress_percent: u32,
    pub progress: ProgressTier,
    pub habits: Vec<HabitSummary>,
}
