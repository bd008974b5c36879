// Configuration loader
// Loads settings from ~/.termfolio/config.toml, falling back to defaults

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::constants::APP_DIR;
use super::settings::Config;
use crate::errors::{Result, TermfolioError};

/// Directory holding config, session state and logs.
pub fn app_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

pub fn default_config_path() -> PathBuf {
    app_dir().join("config.toml")
}

/// Load configuration from `path`, or the default location when `None`.
///
/// A missing file is not an error: the defaults are returned instead.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(default_config_path);

    if !path.exists() {
        debug!(path = %path.display(), "No config file, using defaults");
        return Ok(Config::default());
    }

    let contents = fs::read_to_string(&path).map_err(|source| TermfolioError::Read {
        what: "configuration file",
        path: path.clone(),
        source,
    })?;

    let mut config: Config = toml::from_str(&contents).map_err(|source| TermfolioError::Parse {
        what: "configuration file",
        source,
    })?;

    // Expand tilde in profile_path
    if let Some(profile) = config.profile_path.as_ref() {
        let raw = profile.to_string_lossy();
        if let Some(rest) = raw.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                config.profile_path = Some(home.join(rest));
            }
        }
    }

    config.validate()?;
    debug!(path = %path.display(), "Loaded config");
    Ok(config)
}
