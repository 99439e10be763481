use crate::errors::StreakError;
use crate::streak::parse_day;
use chrono::NaiveDate;
use std::env;

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    /// Fixed reference day. `None` means the host's local date.
    pub today: Option<NaiveDate>,
}

impl Config {
    pub fn from_env() -> Result<Self, StreakError> {
        Self::from_vars(env::var("PORT").ok(), env::var("APP_TODAY").ok())
    }

    fn from_vars(port: Option<String>, today: Option<String>) -> Result<Self, StreakError> {
        let port = port
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let today = match today.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(value) => Some(parse_day(value)?),
        };

        Ok(Self { port, today })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_vars(None, None).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.today, None);
    }

    #[test]
    fn bad_port_falls_back() {
        let config = Config::from_vars(Some("http".into()), None).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn fixed_today_is_parsed() {
        let config = Config::from_vars(Some("9000".into()), Some("2025-11-09".into())).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.today.map(|day| day.to_string()).as_deref(), Some("2025-11-09"));
    }

    #[test]
    fn invalid_today_is_rejected() {
        let err = Config::from_vars(None, Some("11/09/2025".into())).unwrap_err();
        assert_eq!(err, StreakError::InvalidDateFormat("11/09/2025".into()));
    }
}
