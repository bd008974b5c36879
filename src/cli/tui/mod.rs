// TuiRenderer - ratatui full-screen terminal UI
//
// Layout
// ──────
// Output pane:  bordered block with every row of the output surface, styled
//               per row, scrolled so the newest row is visible unless the
//               user paged up. Replaced by the idle overlay while idling.
// Input line:   `> ` prompt with the text being typed.
// Status line:  clock, fake metrics and network dots.
//
// Login mode replaces all of it with the centred login form.
//
// Drawing happens on its own task, woken by `ScreenHandle` (the renderer's
// `Display`), so animations keep redrawing while a command is running.

mod async_input;
mod widgets;

pub use async_input::{spawn_input_task, InputEvent};

use anyhow::{Context, Result};
use crossterm::{
    cursor, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use super::idle::{IdleOverlay, Slide};
use super::login::{LoginScreen, LoginState};
use super::output_manager::{OutputLine, OutputManager};
use super::renderer::Display;
use super::status_bar::StatusBar;
use crate::config::Palette;
use crate::services::ThemeRegistry;

/// Upper bound on redraws per second
const FRAME_BUDGET: Duration = Duration::from_millis(16);
/// Redraw at least this often (clock, idle timers)
const IDLE_REDRAW: Duration = Duration::from_millis(250);

/// `Display` for the TUI: wakes the draw task and tracks the scroll position.
#[derive(Debug, Default)]
pub struct ScreenHandle {
    notify: Notify,
    /// Rows scrolled up from the bottom
    scroll_back: Mutex<usize>,
}

impl ScreenHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scroll_up(&self, rows: usize) {
        *self.scroll_back.lock().unwrap() += rows;
        self.notify.notify_one();
    }

    pub fn scroll_down(&self, rows: usize) {
        let mut back = self.scroll_back.lock().unwrap();
        *back = back.saturating_sub(rows);
        drop(back);
        self.notify.notify_one();
    }

    pub fn scroll_back(&self) -> usize {
        *self.scroll_back.lock().unwrap()
    }

    async fn changed(&self) {
        self.notify.notified().await;
    }
}

impl Display for ScreenHandle {
    fn refresh(&self) {
        self.notify.notify_one();
    }

    fn scroll_to_bottom(&self) {
        *self.scroll_back.lock().unwrap() = 0;
        self.notify.notify_one();
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Login,
    Terminal,
}

/// UI state owned by the event loop and read by the draw task
#[derive(Default)]
pub struct UiState {
    pub mode: Mode,
    pub input: String,
    pub overlay: Option<IdleOverlay>,
}

/// Everything one frame needs, copied out of the shared state
pub struct ViewModel {
    pub mode: Mode,
    pub palette: Palette,
    pub lines: Vec<OutputLine>,
    pub scroll_back: usize,
    pub input: String,
    pub status: String,
    pub login: LoginState,
    pub idle: Option<(Vec<String>, Option<Slide>)>,
}

/// Shared sources the draw task reads from
#[derive(Clone)]
pub struct ViewSources {
    pub screen: Arc<ScreenHandle>,
    pub output: OutputManager,
    pub status: Arc<StatusBar>,
    pub themes: Arc<ThemeRegistry>,
    pub login: Arc<LoginScreen>,
    pub ui: Arc<Mutex<UiState>>,
}

impl ViewSources {
    pub fn snapshot(&self) -> ViewModel {
        let ui = self.ui.lock().unwrap();
        ViewModel {
            mode: ui.mode,
            palette: self.themes.current_theme().palette.clone(),
            lines: self.output.lines(),
            scroll_back: self.screen.scroll_back(),
            input: ui.input.clone(),
            status: self.status.render(),
            login: self.login.view(),
            idle: ui
                .overlay
                .as_ref()
                .map(|o| (o.log_lines(), o.current_slide())),
        }
    }
}

pub struct TuiRenderer {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    is_active: bool,
}

impl TuiRenderer {
    pub fn new() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)
            .context("Failed to enter alternate screen")?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))
            .context("Failed to create terminal")?;
        Ok(Self {
            terminal,
            is_active: true,
        })
    }

    pub fn draw(&mut self, view: &ViewModel) -> Result<()> {
        self.terminal
            .draw(|f| widgets::draw(f, view))
            .context("Failed to draw frame")?;
        Ok(())
    }

    pub fn shutdown(&mut self) -> Result<()> {
        if !self.is_active {
            return Ok(());
        }
        self.is_active = false;
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        );
        disable_raw_mode().context("Failed to disable raw mode")?;
        Ok(())
    }
}

impl Drop for TuiRenderer {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}

/// Redraw whenever something changed (at most once per frame budget) and
/// periodically, until `token` is cancelled. Restores the terminal on exit.
pub fn spawn_draw_task(
    mut tui: TuiRenderer,
    sources: ViewSources,
    token: CancellationToken,
) -> JoinHandle<Result<()>> {
    tokio::spawn(async move {
        loop {
            if let Err(e) = tui.draw(&sources.snapshot()) {
                warn!(error = %e, "Draw failed");
            }
            tokio::select! {
                _ = token.cancelled() => break,
                _ = sources.screen.changed() => {}
                _ = tokio::time::sleep(IDLE_REDRAW) => {}
            }
            tokio::time::sleep(FRAME_BUDGET).await;
        }
        tui.shutdown()
    })
}
