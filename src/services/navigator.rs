// Browser navigation
//
// `open` and `code` hand a URL to the system browser. The trait keeps that
// side effect observable in tests.

use std::sync::Mutex;
use tracing::info;

use crate::errors::{Result, TermfolioError};

pub trait Navigator: Send + Sync {
    /// Open `url` in a new browsing context.
    fn open(&self, url: &str) -> Result<()>;
}

/// Opens URLs with the platform's default browser.
#[derive(Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn open(&self, url: &str) -> Result<()> {
        info!(url, "Opening browser");
        webbrowser::open(url).map_err(|source| TermfolioError::Navigation {
            url: url.to_string(),
            source,
        })
    }
}

/// Remembers every URL instead of opening it.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    opened: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn open(&self, url: &str) -> Result<()> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}
