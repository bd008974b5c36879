// Login screen
//
// Username/password form in front of the terminal. Nothing is verified: the
// form only insists that both fields are filled in, then plays the
// authentication sequence and hands over to the auth gate.

use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::info;

use super::background::BackgroundTask;
use super::renderer::Display;
use crate::services::AuthGate;

const PROGRESS_PERIOD: Duration = Duration::from_millis(200);
/// Cells of the progress bar
pub const PROGRESS_WIDTH: usize = 20;

const BOOT_MESSAGES: [&str; 3] = [
    "Initializing terminal...",
    "Loading user profile...",
    "Establishing secure connection...",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

/// Everything the login view shows
#[derive(Debug, Clone, Default)]
pub struct LoginState {
    pub username: String,
    password: String,
    pub focus: LoginField,
    /// Status lines under the form
    pub messages: Vec<String>,
    /// Filled cells of the progress bar while authenticating
    pub progress: Option<usize>,
    /// Input is ignored while the sequence runs
    pub busy: bool,
}

impl LoginState {
    pub fn masked_password(&self) -> String {
        "*".repeat(self.password.chars().count())
    }

    pub fn progress_bar(&self) -> Option<String> {
        self.progress.map(|filled| {
            let filled = filled.min(PROGRESS_WIDTH);
            format!(
                "[{}{}]",
                "█".repeat(filled),
                "░".repeat(PROGRESS_WIDTH - filled)
            )
        })
    }
}

pub struct LoginScreen {
    state: Arc<RwLock<LoginState>>,
    display: Arc<dyn Display>,
    step_delay: Duration,
}

impl LoginScreen {
    pub fn new(display: Arc<dyn Display>, step_delay: Duration) -> Self {
        Self {
            state: Arc::new(RwLock::new(LoginState::default())),
            display,
            step_delay,
        }
    }

    pub fn view(&self) -> LoginState {
        self.state.read().unwrap().clone()
    }

    /// Back to an empty form
    pub fn reset(&self) {
        *self.state.write().unwrap() = LoginState::default();
        self.display.refresh();
    }

    fn edit(&self, f: impl FnOnce(&mut LoginState)) {
        {
            let mut state = self.state.write().unwrap();
            if state.busy {
                return;
            }
            f(&mut state);
        }
        self.display.refresh();
    }

    pub fn type_char(&self, c: char) {
        self.edit(|s| match s.focus {
            LoginField::Username => s.username.push(c),
            LoginField::Password => s.password.push(c),
        });
    }

    pub fn backspace(&self) {
        self.edit(|s| {
            match s.focus {
                LoginField::Username => s.username.pop(),
                LoginField::Password => s.password.pop(),
            };
        });
    }

    pub fn toggle_field(&self) {
        self.edit(|s| {
            s.focus = match s.focus {
                LoginField::Username => LoginField::Password,
                LoginField::Password => LoginField::Username,
            }
        });
    }

    /// Enter on the form. On the username field this just moves on to the
    /// password; on the password field it runs the whole sequence. Returns
    /// true once the session has started.
    pub async fn submit(&self, auth: &AuthGate) -> bool {
        let (username, password) = {
            let mut state = self.state.write().unwrap();
            if state.busy {
                return false;
            }
            if state.focus == LoginField::Username && state.password.is_empty() {
                state.focus = LoginField::Password;
                drop(state);
                self.display.refresh();
                return false;
            }
            if state.username.trim().is_empty() || state.password.is_empty() {
                state.messages = vec!["Username and password required".to_string()];
                drop(state);
                self.display.refresh();
                return false;
            }
            state.busy = true;
            state.messages = vec!["Authenticating".to_string()];
            state.progress = Some(0);
            (state.username.clone(), state.password.clone())
        };
        self.display.refresh();

        let spinner = {
            let state = self.state.clone();
            let display = self.display.clone();
            let mut tick = 0usize;
            BackgroundTask::every("login-progress", PROGRESS_PERIOD, move || {
                tick += 1;
                let mut state = state.write().unwrap();
                state.messages = vec![format!("Authenticating{}", ".".repeat(tick % 4))];
                state.progress = Some(tick.min(PROGRESS_WIDTH - 1));
                drop(state);
                display.refresh();
            })
        };

        let granted = auth.login(&username, &password).await;
        spinner.stop();
        if !granted {
            let mut state = self.state.write().unwrap();
            state.busy = false;
            state.progress = None;
            state.messages = vec!["Access Denied".to_string()];
            return false;
        }

        self.show(|s| {
            s.progress = Some(PROGRESS_WIDTH);
            s.messages = vec!["Access Granted".to_string()];
        });
        for message in BOOT_MESSAGES {
            self.pause().await;
            self.show(|s| s.messages.push(message.to_string()));
        }
        self.pause().await;

        info!(username = %username, "Login complete");
        auth.complete_authentication();
        self.reset();
        true
    }

    fn show(&self, f: impl FnOnce(&mut LoginState)) {
        f(&mut self.state.write().unwrap());
        self.display.refresh();
    }

    async fn pause(&self) {
        if !self.step_delay.is_zero() {
            tokio::time::sleep(self.step_delay).await;
        }
    }
}
