// Configuration structs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::constants::*;
use crate::errors::{Result, TermfolioError};

/// Runtime configuration, read from `~/.termfolio/config.toml`.
///
/// Every field has a default so a partial (or missing) file is fine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Nominal per-character typewriter delay in milliseconds (0 = instant)
    #[serde(default = "default_typewriter_speed_ms")]
    pub typewriter_speed_ms: u64,

    /// Probability (0.0..=1.0) of a glitch flash per revealed character
    #[serde(default = "default_glitch_probability")]
    pub glitch_probability: f64,

    /// Duration of a single glitch flash in milliseconds
    #[serde(default = "default_glitch_flash_ms")]
    pub glitch_flash_ms: u64,

    /// Number of remembered commands
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Fake authentication delay
    #[serde(default = "default_login_delay_ms")]
    pub login_delay_ms: u64,

    /// Pause between the messages shown after a successful login
    #[serde(default = "default_login_step_ms")]
    pub login_step_ms: u64,

    /// Delay between `logout` and the end of the session
    #[serde(default = "default_logout_delay_ms")]
    pub logout_delay_ms: u64,

    /// Seconds without input before the idle overlay appears (0 disables it)
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,

    #[serde(default = "default_hack_line_delay_ms")]
    pub hack_line_delay_ms: u64,

    #[serde(default = "default_matrix_frame_ms")]
    pub matrix_frame_ms: u64,

    /// Optional profile TOML replacing the embedded one
    #[serde(default)]
    pub profile_path: Option<PathBuf>,

    /// Theme used when no theme was persisted yet
    #[serde(default = "default_theme")]
    pub default_theme: String,

    /// Seed for the random effects (tests and reproducible demos)
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_typewriter_speed_ms() -> u64 {
    DEFAULT_TYPEWRITER_SPEED_MS
}

fn default_glitch_probability() -> f64 {
    DEFAULT_GLITCH_PROBABILITY
}

fn default_glitch_flash_ms() -> u64 {
    DEFAULT_GLITCH_FLASH_MS
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

fn default_login_delay_ms() -> u64 {
    DEFAULT_LOGIN_DELAY_MS
}

fn default_login_step_ms() -> u64 {
    LOGIN_STEP_MS
}

fn default_logout_delay_ms() -> u64 {
    DEFAULT_LOGOUT_DELAY_MS
}

fn default_idle_timeout_secs() -> u64 {
    DEFAULT_IDLE_TIMEOUT_SECS
}

fn default_hack_line_delay_ms() -> u64 {
    DEFAULT_HACK_LINE_DELAY_MS
}

fn default_matrix_frame_ms() -> u64 {
    DEFAULT_MATRIX_FRAME_MS
}

fn default_theme() -> String {
    DEFAULT_THEME.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            typewriter_speed_ms: default_typewriter_speed_ms(),
            glitch_probability: default_glitch_probability(),
            glitch_flash_ms: default_glitch_flash_ms(),
            history_limit: default_history_limit(),
            login_delay_ms: default_login_delay_ms(),
            login_step_ms: default_login_step_ms(),
            logout_delay_ms: default_logout_delay_ms(),
            idle_timeout_secs: default_idle_timeout_secs(),
            hack_line_delay_ms: default_hack_line_delay_ms(),
            matrix_frame_ms: default_matrix_frame_ms(),
            profile_path: None,
            default_theme: default_theme(),
            seed: None,
        }
    }
}

impl Config {
    /// Configuration with every delay set to zero, used by `--exec` and tests.
    pub fn instant() -> Self {
        Self {
            typewriter_speed_ms: 0,
            login_delay_ms: 0,
            login_step_ms: 0,
            logout_delay_ms: 0,
            idle_timeout_secs: 0,
            hack_line_delay_ms: 0,
            matrix_frame_ms: 0,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.glitch_probability) {
            return Err(TermfolioError::InvalidConfig(format!(
                "glitch_probability must be between 0 and 1, got {}",
                self.glitch_probability
            )));
        }
        if self.history_limit == 0 {
            return Err(TermfolioError::InvalidConfig(
                "history_limit must be at least 1".to_string(),
            ));
        }
        if self.default_theme.trim().is_empty() {
            return Err(TermfolioError::InvalidConfig(
                "default_theme must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn logout_delay(&self) -> Duration {
        Duration::from_millis(self.logout_delay_ms)
    }

    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.login_delay_ms)
    }

    pub fn login_step(&self) -> Duration {
        Duration::from_millis(self.login_step_ms)
    }

    pub fn idle_timeout(&self) -> Option<Duration> {
        (self.idle_timeout_secs > 0).then(|| Duration::from_secs(self.idle_timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("typewriter_speed_ms = 3").unwrap();
        assert_eq!(config.typewriter_speed_ms, 3);
        assert_eq!(config.history_limit, DEFAULT_HISTORY_LIMIT);
        assert_eq!(config.default_theme, "matrix");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_probability() {
        let config = Config {
            glitch_probability: 1.5,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_instant_has_no_delays() {
        let config = Config::instant();
        assert_eq!(config.typewriter_speed_ms, 0);
        assert_eq!(config.logout_delay(), Duration::ZERO);
        assert!(config.idle_timeout().is_none());
    }
}
