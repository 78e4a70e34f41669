use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub max_age_days: i64,
}

const SECONDS_PER_DAY: i64 = 86_400;

impl SessionConfig {
    /// Always in range: `from_env` rejects day counts that overflow.
    pub fn max_age_seconds(&self) -> i64 {
        self.max_age_days.saturating_mul(SECONDS_PER_DAY)
    }
}

fn parse_max_age_days(raw: &str) -> anyhow::Result<i64> {
    let days = raw
        .trim()
        .parse::<i64>()
        .with_context(|| format!("SESSION_MAX_AGE_DAYS is not a number: {raw}"))?;
    anyhow::ensure!(days > 0, "SESSION_MAX_AGE_DAYS must be positive: {days}");
    days.checked_mul(SECONDS_PER_DAY)
        .with_context(|| format!("SESSION_MAX_AGE_DAYS is too large: {days}"))?;
    Ok(days)
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "sessionId".into(),
            max_age_days: 7,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// `None` runs the API on the in-process memory store.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub session: SessionConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty());
        let db_max_connections = match std::env::var("DB_MAX_CONNECTIONS") {
            Ok(v) => v
                .parse::<u32>()
                .with_context(|| format!("DB_MAX_CONNECTIONS is not a number: {v}"))?,
            Err(_) => 10,
        };

        let defaults = SessionConfig::default();
        let max_age_days = match std::env::var("SESSION_MAX_AGE_DAYS") {
            Ok(v) => parse_max_age_days(&v)?,
            Err(_) => defaults.max_age_days,
        };
        let session = SessionConfig {
            cookie_name: std::env::var("SESSION_COOKIE_NAME").unwrap_or(defaults.cookie_name),
            max_age_days,
        };

        Ok(Self {
            database_url,
            db_max_connections,
            session,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_session_lasts_a_week() {
        let session = SessionConfig::default();
        assert_eq!(session.cookie_name, "sessionId");
        assert_eq!(session.max_age_seconds(), 604_800);
    }

    #[test]
    fn max_age_days_is_validated() {
        assert_eq!(parse_max_age_days("30").unwrap(), 30);
        assert_eq!(parse_max_age_days(" 1 ").unwrap(), 1);

        let err = parse_max_age_days("week").unwrap_err();
        assert!(err.to_string().contains("not a number"));
        assert!(parse_max_age_days("0").is_err());
        assert!(parse_max_age_days("-3").is_err());

        let huge = (i64::MAX / SECONDS_PER_DAY + 1).to_string();
        let err = parse_max_age_days(&huge).unwrap_err();
        assert!(err.to_string().contains("too large"));
        assert!(parse_max_age_days(&(i64::MAX / SECONDS_PER_DAY).to_string()).is_ok());
    }
}
