// Tracing setup
//
// The TUI owns the terminal, so interactive sessions log to a file under the
// app directory. Batch runs (`--exec`) log to stderr. The filter comes from
// TERMFOLIO_LOG and defaults to `warn`.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::app_dir;
use crate::errors::{Result, TermfolioError};

pub const LOG_ENV: &str = "TERMFOLIO_LOG";
const DEFAULT_FILTER: &str = "warn";

pub enum LogTarget {
    File(PathBuf),
    Stderr,
}

pub fn default_log_path() -> PathBuf {
    app_dir().join("logs").join("termfolio.log")
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn open_log(path: &Path) -> Result<fs::File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|source| TermfolioError::Write {
            what: "log directory",
            path: dir.to_path_buf(),
            source,
        })?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| TermfolioError::Write {
            what: "log file",
            path: path.to_path_buf(),
            source,
        })
}

/// Install the global subscriber and bridge `log` records into it. Calling
/// it twice is harmless: the second call keeps the first subscriber.
pub fn init(target: LogTarget) -> Result<()> {
    let registry = tracing_subscriber::registry().with(env_filter());
    let installed = match target {
        LogTarget::File(path) => {
            let file = open_log(&path)?;
            let layer = fmt::layer().with_ansi(false).with_writer(Arc::new(file));
            tracing::subscriber::set_global_default(registry.with(layer)).is_ok()
        }
        LogTarget::Stderr => {
            let layer = fmt::layer().with_writer(std::io::stderr);
            tracing::subscriber::set_global_default(registry.with(layer)).is_ok()
        }
    };
    if installed {
        let _ = tracing_log::LogTracer::init();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_log_creates_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("termfolio.log");
        open_log(&path).unwrap();
        assert!(path.exists());
    }
}
