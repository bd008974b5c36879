// Interactive REPL
//
// Owns the full-screen session: login form, the terminal itself, status bar
// and idle overlay. Key presses arrive on a channel and are handled one at a
// time; a submitted command is awaited to completion before the next key is
// read, while the draw task keeps the animation on screen.

use anyhow::{Context, Result};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::dispatcher::Dispatcher;
use super::handlers::Services;
use super::idle::{IdleMonitor, IdleOverlay};
use super::login::LoginScreen;
use super::output_manager::OutputManager;
use super::renderer::{Display, LineRenderer, RenderSettings};
use super::status_bar::StatusBar;
use super::tui::{
    spawn_draw_task, spawn_input_task, InputEvent, Mode, ScreenHandle, TuiRenderer, UiState,
    ViewSources,
};
use crate::config::Config;

const IDLE_CHECK: Duration = Duration::from_millis(500);
/// Rows moved by PageUp/PageDown
const PAGE_ROWS: usize = 10;

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct Repl {
    config: Config,
    dispatcher: Dispatcher,
    output: OutputManager,
    screen: Arc<ScreenHandle>,
    login: Arc<LoginScreen>,
    status: Arc<StatusBar>,
    ui: Arc<Mutex<UiState>>,
    idle: IdleMonitor,
    skip_login: bool,
}

impl Repl {
    pub fn new(config: Config, services: Services, skip_login: bool) -> Self {
        let screen = Arc::new(ScreenHandle::new());
        let output = OutputManager::new();
        let renderer = Arc::new(LineRenderer::new(
            output.clone(),
            screen.clone(),
            RenderSettings::from(&config),
            config.seed,
        ));
        let login = Arc::new(LoginScreen::new(screen.clone(), config.login_step()));

        Self {
            dispatcher: Dispatcher::new(renderer, services, &config),
            output,
            login,
            status: Arc::new(StatusBar::new()),
            ui: Arc::new(Mutex::new(UiState::default())),
            idle: IdleMonitor::new(config.idle_timeout()),
            screen,
            skip_login,
            config,
        }
    }

    fn sources(&self) -> ViewSources {
        ViewSources {
            screen: self.screen.clone(),
            output: self.output.clone(),
            status: self.status.clone(),
            themes: self.dispatcher.services().themes.clone(),
            login: self.login.clone(),
            ui: self.ui.clone(),
        }
    }

    pub async fn run(mut self) -> Result<()> {
        let tui = TuiRenderer::new().context("Failed to initialize terminal UI")?;
        let token = CancellationToken::new();
        let draw = spawn_draw_task(tui, self.sources(), token.child_token());
        let mut input = spawn_input_task(token.child_token());

        let auth = self.dispatcher.services().auth.clone();
        let mut session = auth.subscribe();
        if auth.is_authenticated() {
            self.enter_terminal().await;
        } else if self.skip_login {
            auth.complete_authentication();
        }

        let result = self.event_loop(&mut input, &mut session).await;

        token.cancel();
        self.status.stop();
        draw.await.context("Draw task panicked")??;
        result
    }

    async fn event_loop(
        &mut self,
        input: &mut mpsc::UnboundedReceiver<InputEvent>,
        session: &mut watch::Receiver<bool>,
    ) -> Result<()> {
        let mut idle_check = tokio::time::interval(IDLE_CHECK);

        loop {
            tokio::select! {
                event = input.recv() => {
                    let Some(event) = event else {
                        debug!("Input channel closed");
                        break;
                    };
                    if self.handle_key(event).await == Flow::Quit {
                        break;
                    }
                }
                changed = session.changed() => {
                    changed.context("Authentication gate dropped")?;
                    let authenticated = *session.borrow_and_update();
                    if authenticated {
                        self.enter_terminal().await;
                    } else {
                        self.leave_terminal();
                    }
                }
                _ = idle_check.tick() => self.check_idle(),
            }
        }

        info!("Session closed");
        Ok(())
    }

    fn mode(&self) -> Mode {
        self.ui.lock().unwrap().mode
    }

    async fn handle_key(&mut self, event: InputEvent) -> Flow {
        self.idle.touch();

        // Any key only dismisses the idle overlay
        if self.ui.lock().unwrap().overlay.take().is_some() {
            self.screen.refresh();
            return Flow::Continue;
        }
        if event == InputEvent::Quit {
            return Flow::Quit;
        }

        match self.mode() {
            Mode::Login => self.handle_login_key(event).await,
            Mode::Terminal => self.handle_terminal_key(event).await,
        }
        Flow::Continue
    }

    async fn handle_login_key(&mut self, event: InputEvent) {
        match event {
            InputEvent::Char(c) => self.login.type_char(c),
            InputEvent::Backspace => self.login.backspace(),
            InputEvent::Tab | InputEvent::Up | InputEvent::Down => self.login.toggle_field(),
            InputEvent::Enter => {
                let auth = self.dispatcher.services().auth.clone();
                self.login.submit(&auth).await;
            }
            _ => {}
        }
    }

    async fn handle_terminal_key(&mut self, event: InputEvent) {
        match event {
            InputEvent::Char(c) => self.edit_input(|input| input.push(c)),
            InputEvent::Backspace => self.edit_input(|input| {
                input.pop();
            }),
            InputEvent::Up => {
                let recalled = self.dispatcher.recall_previous();
                self.edit_input(|input| *input = recalled);
            }
            InputEvent::Down => {
                let recalled = self.dispatcher.recall_next();
                self.edit_input(|input| *input = recalled);
            }
            InputEvent::Enter => {
                let line = std::mem::take(&mut self.ui.lock().unwrap().input);
                self.screen.refresh();
                self.dispatcher.submit(&line).await;
            }
            InputEvent::PageUp => self.screen.scroll_up(PAGE_ROWS),
            InputEvent::PageDown => self.screen.scroll_down(PAGE_ROWS),
            InputEvent::ClearScreen => self.dispatcher.renderer().clear(),
            InputEvent::Tab | InputEvent::Other | InputEvent::Quit => {}
        }
    }

    fn edit_input(&self, f: impl FnOnce(&mut String)) {
        f(&mut self.ui.lock().unwrap().input);
        self.screen.refresh();
    }

    async fn enter_terminal(&mut self) {
        {
            let mut ui = self.ui.lock().unwrap();
            ui.mode = Mode::Terminal;
            ui.input.clear();
        }
        self.idle.touch();
        self.dispatcher.renderer().clear();
        self.status.start(self.screen.clone(), self.config.seed);
        self.dispatcher.welcome().await;
    }

    fn leave_terminal(&mut self) {
        self.status.stop();
        {
            let mut ui = self.ui.lock().unwrap();
            ui.mode = Mode::Login;
            ui.input.clear();
            ui.overlay = None;
        }
        self.dispatcher.renderer().clear();
        self.login.reset();
    }

    fn check_idle(&mut self) {
        if self.mode() != Mode::Terminal || !self.idle.is_idle() {
            return;
        }
        let mut ui = self.ui.lock().unwrap();
        if ui.overlay.is_none() {
            debug!("Idle, showing overlay");
            let profile = &self.dispatcher.services().profile;
            ui.overlay = Some(IdleOverlay::start(profile, self.screen.clone(), self.config.seed));
        }
    }
}
