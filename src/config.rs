use anyhow::{bail, Context};
use chrono::{Local, NaiveDate};
use tracing::{debug, info};

const DEFAULT_ENV: &str = "development";
const DEFAULT_TEACHER: &str = "Вы";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub environment: String,
    /// Date treated as "today" for default filters.
    pub today: NaiveDate,
    /// Seed generated bookings the first time a date is opened.
    pub mock_bookings: bool,
    /// Teacher recorded when a booking is saved without one.
    pub default_teacher: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            let v = lookup(key).map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
            if v.is_none() {
                debug!("{key} not set, using default");
            }
            v
        };

        let environment = var("ROOMBOOKD_ENV").unwrap_or_else(|| DEFAULT_ENV.to_string());
        let today = match var("ROOMBOOKD_TODAY") {
            Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                .with_context(|| format!("ROOMBOOKD_TODAY must be YYYY-MM-DD, got {raw:?}"))?,
            None => Local::now().date_naive(),
        };
        let mock_bookings = match var("ROOMBOOKD_MOCK_BOOKINGS") {
            Some(raw) => parse_flag("ROOMBOOKD_MOCK_BOOKINGS", &raw)?,
            None => true,
        };
        let default_teacher =
            var("ROOMBOOKD_DEFAULT_TEACHER").unwrap_or_else(|| DEFAULT_TEACHER.to_string());

        let config = Config {
            environment,
            today,
            mock_bookings,
            default_teacher,
        };
        info!(
            environment = %config.environment,
            today = %config.today,
            mock_bookings = config.mock_bookings,
            "configuration loaded"
        );
        Ok(config)
    }
}

fn parse_flag(key: &str, raw: &str) -> anyhow::Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        other => bail!("{key} must be a boolean flag, got {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let c = load(&[]).expect("config");
        assert_eq!(c.environment, "development");
        assert!(c.mock_bookings);
        assert_eq!(c.default_teacher, "Вы");
    }

    #[test]
    fn overrides_are_parsed() {
        let c = load(&[
            ("ROOMBOOKD_ENV", "production"),
            ("ROOMBOOKD_TODAY", "2024-09-02"),
            ("ROOMBOOKD_MOCK_BOOKINGS", "off"),
            ("ROOMBOOKD_DEFAULT_TEACHER", " Козлов К.К. "),
        ])
        .expect("config");
        assert_eq!(c.environment, "production");
        assert_eq!(c.today, NaiveDate::from_ymd_opt(2024, 9, 2).expect("date"));
        assert!(!c.mock_bookings);
        assert_eq!(c.default_teacher, "Козлов К.К.");
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let err = load(&[("ROOMBOOKD_TODAY", "02.09.2024")]).unwrap_err();
        assert!(format!("{err:#}").contains("ROOMBOOKD_TODAY"));

        let err = load(&[("ROOMBOOKD_MOCK_BOOKINGS", "maybe")]).unwrap_err();
        assert!(err.to_string().contains("ROOMBOOKD_MOCK_BOOKINGS"));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let c = load(&[("ROOMBOOKD_DEFAULT_TEACHER", "   ")]).expect("config");
        assert_eq!(c.default_teacher, "Вы");
    }
}
