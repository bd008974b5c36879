// Session state persistence
//
// Stores the login flag and the active theme in ~/.termfolio/state.toml.
// Failures are logged and otherwise ignored: losing this file only means
// logging in again.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;
use tracing::{debug, warn};

use crate::errors::{Result, TermfolioError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default)]
    pub theme: Option<String>,
}

pub struct StateStore {
    /// None keeps the state in memory only
    path: Option<PathBuf>,
    state: RwLock<SessionState>,
}

impl StateStore {
    /// Open the store at `path`, starting from defaults when the file is
    /// missing or unreadable.
    pub fn open(path: PathBuf) -> Self {
        let state = match Self::read(&path) {
            Ok(state) => state,
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable session state");
                SessionState::default()
            }
        };
        Self {
            path: Some(path),
            state: RwLock::new(state),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            path: None,
            state: RwLock::new(SessionState::default()),
        }
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.read().unwrap().clone()
    }

    /// Mutate the state and write it back to disk.
    pub fn update(&self, f: impl FnOnce(&mut SessionState)) {
        let snapshot = {
            let mut state = self.state.write().unwrap();
            f(&mut state);
            state.clone()
        };
        if let Err(e) = self.save(&snapshot) {
            warn!(error = %e, "Failed to persist session state");
        }
    }

    fn read(path: &PathBuf) -> Result<SessionState> {
        if !path.exists() {
            return Ok(SessionState::default());
        }
        let contents = fs::read_to_string(path).map_err(|source| TermfolioError::Read {
            what: "session state",
            path: path.clone(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| TermfolioError::Parse {
            what: "session state",
            source,
        })
    }

    fn save(&self, state: &SessionState) -> Result<()> {
        let Some(path) = self.path.as_ref() else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| TermfolioError::Write {
                what: "state directory",
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let contents = toml::to_string_pretty(state).map_err(|source| TermfolioError::Serialize {
            what: "session state",
            source,
        })?;
        fs::write(path, contents).map_err(|source| TermfolioError::Write {
            what: "session state",
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "Session state saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.toml");

        let store = StateStore::open(path.clone());
        assert_eq!(store.snapshot(), SessionState::default());
        store.update(|s| {
            s.authenticated = true;
            s.theme = Some("retro".into());
        });

        let reopened = StateStore::open(path);
        assert!(reopened.snapshot().authenticated);
        assert_eq!(reopened.snapshot().theme.as_deref(), Some("retro"));
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.toml");
        fs::write(&path, "authenticated = 12").unwrap();
        assert_eq!(StateStore::open(path).snapshot(), SessionState::default());
    }
}
