use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::quiz::SessionConfig;

pub const COUNTDOWN_VAR: &str = "QUIZ_COUNTDOWN_SECS";
pub const DISPLAY_DELAY_VAR: &str = "QUIZ_DISPLAY_DELAY_MS";
pub const QUESTIONS_FILE_VAR: &str = "QUIZ_QUESTIONS_FILE";
pub const SEED_VAR: &str = "QUIZ_SEED";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} has invalid value {value:?}")]
    Invalid { var: &'static str, value: String },
    #[error("{0} must be at least 1")]
    Zero(&'static str),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub session: SessionConfig,
    pub questions_file: Option<PathBuf>,
    pub seed: Option<u64>,
}

impl Config {
    /// Reads the process environment. Call `dotenv()` first to pick up a
    /// `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(secs) = parse::<u32>(COUNTDOWN_VAR, lookup(COUNTDOWN_VAR))? {
            if secs == 0 {
                return Err(ConfigError::Zero(COUNTDOWN_VAR));
            }
            config.session.countdown_secs = secs;
        }
        if let Some(millis) = parse::<u64>(DISPLAY_DELAY_VAR, lookup(DISPLAY_DELAY_VAR))? {
            config.session.display_delay = Duration::from_millis(millis);
        }
        config.questions_file = lookup(QUESTIONS_FILE_VAR)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);
        config.seed = parse::<u64>(SEED_VAR, lookup(SEED_VAR))?;

        Ok(config)
    }
}

fn parse<T: FromStr>(var: &'static str, value: Option<String>) -> Result<Option<T>, ConfigError> {
    match value {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { var, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&'static str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<&'static str, String> =
            vars.iter().map(|(k, v)| (*k, v.to_string())).collect();
        Config::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults_match_fixed_constants() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.session.countdown_secs, 10);
        assert_eq!(config.session.display_delay, Duration::from_millis(1200));
        assert!(config.questions_file.is_none());
        assert!(config.seed.is_none());
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            (COUNTDOWN_VAR, "15"),
            (DISPLAY_DELAY_VAR, " 500 "),
            (QUESTIONS_FILE_VAR, "questions.json"),
            (SEED_VAR, "99"),
        ])
        .unwrap();
        assert_eq!(config.session.countdown_secs, 15);
        assert_eq!(config.session.display_delay, Duration::from_millis(500));
        assert_eq!(config.questions_file, Some(PathBuf::from("questions.json")));
        assert_eq!(config.seed, Some(99));
    }

    #[test]
    fn rejects_garbage_and_zero() {
        assert!(matches!(
            config_from(&[(SEED_VAR, "abc")]),
            Err(ConfigError::Invalid { var: SEED_VAR, .. })
        ));
        assert!(matches!(
            config_from(&[(COUNTDOWN_VAR, "0")]),
            Err(ConfigError::Zero(COUNTDOWN_VAR))
        ));
    }
}
