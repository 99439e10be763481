use crate::config::Config;
use chrono::{Local, NaiveDate};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Reference day used when a request does not supply one.
    pub fn today(&self) -> NaiveDate {
        self.config
            .today
            .unwrap_or_else(|| Local::now().date_naive())
    }
}
