// Error types
//
// Library-level failures. The binary edge wraps these in anyhow with context;
// nothing in here is fatal to a running terminal session.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TermfolioError {
    #[error("could not read {what} at {path}: {source}")]
    Read {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write {what} at {path}: {source}")]
    Write {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid {what}: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: toml::de::Error,
    },

    #[error("could not serialize {what}: {source}")]
    Serialize {
        what: &'static str,
        #[source]
        source: toml::ser::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("could not open {url}: {source}")]
    Navigation {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, TermfolioError>;
