pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod insights;
pub mod models;
pub mod state;
pub mod streak;

pub use app::router;
pub use config::Config;
pub use errors::StreakError;
pub use state::AppState;
pub use streak::{compute_daily_streak, compute_longest_streak, compute_weekly_streak};
