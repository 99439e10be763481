use crate::errors::{AppError, StreakError};
use crate::insights::{build_heatmap, build_overview};
use crate::models::{
    resolve_today, Cadence, Habit, HeatmapRequest, HeatmapResponse, InsightsRequest, Overview,
    StreakRequest, StreakResponse, TodayResponse,
};
use crate::state::AppState;
use crate::streak::{longest_streak_in, parse_logs};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::{debug, warn};

pub async fn get_today(State(state): State<AppState>) -> Json<TodayResponse> {
    Json(TodayResponse {
        date: state.today().to_string(),
    })
}

pub async fn post_streak(
    State(state): State<AppState>,
    payload: Result<Json<StreakRequest>, JsonRejection>,
) -> Result<Json<StreakResponse>, AppError> {
    let Json(payload) = payload.inspect_err(reject_body)?;
    let today = resolve_today(payload.today.as_deref(), state.today()).inspect_err(reject)?;
    let cadence = Cadence::resolve(payload.cadence, payload.target_per_week).inspect_err(reject)?;
    let logs = parse_logs(&payload.logs).inspect_err(reject)?;

    let current_streak = cadence.current_streak(&logs, today);
    let longest_streak = longest_streak_in(&logs);

    debug!(%today, logs = logs.len(), current_streak, longest_streak, "computed streak");

    Ok(Json(StreakResponse {
        today: today.to_string(),
        cadence: cadence.kind(),
        current_streak,
        longest_streak,
    }))
}

pub async fn post_insights(
    State(state): State<AppState>,
    payload: Result<Json<InsightsRequest>, JsonRejection>,
) -> Result<Json<Overview>, AppError> {
    let Json(payload) = payload.inspect_err(reject_body)?;
    let today = resolve_today(payload.today.as_deref(), state.today()).inspect_err(reject)?;
    let habits = payload
        .habits
        .into_iter()
        .map(Habit::try_from)
        .collect::<Result<Vec<_>, _>>()
        .inspect_err(reject)?;

    let overview = build_overview(&habits, today);
    debug!(
        %today,
        habits = overview.total_habits,
        completed_today = overview.completed_today,
        "built overview"
    );

    Ok(Json(overview))
}

pub async fn post_heatmap(
    State(state): State<AppState>,
    payload: Result<Json<HeatmapRequest>, JsonRejection>,
) -> Result<Json<HeatmapResponse>, AppError> {
    let Json(payload) = payload.inspect_err(reject_body)?;
    let today = resolve_today(payload.today.as_deref(), state.today()).inspect_err(reject)?;
    let logs = parse_logs(&payload.logs).inspect_err(reject)?;

    Ok(Json(HeatmapResponse {
        today: today.to_string(),
        weeks: build_heatmap(&logs, today),
    }))
}

fn reject(err: &StreakError) {
    warn!("rejected request: {err}");
}

fn reject_body(rejection: &JsonRejection) {
    warn!("rejected request body: {}", rejection.body_text());
}
