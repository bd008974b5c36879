// Command dispatcher
//
// Turns a submitted line into a sequence of render calls. Every animated
// render is awaited before the next one starts, and `submit` takes `&mut
// self`, so two commands can never interleave their output.

use std::sync::Arc;
use tracing::{debug, info};

use super::background::BackgroundTask;
use super::commands::{Command, CommandLine};
use super::handlers::{cv, effects, info as about, showcase, theme, Services, Timings, Writer};
use super::history::History;
use super::output_manager::LineStyle;
use super::renderer::LineRenderer;
use crate::config::Config;

pub struct Dispatcher {
    renderer: Arc<LineRenderer>,
    services: Services,
    timings: Timings,
    history: History,
    glitch: bool,
    /// Delayed logout signal, replaced if `logout` is typed again
    pending_logout: Option<BackgroundTask>,
}

impl Dispatcher {
    pub fn new(renderer: Arc<LineRenderer>, services: Services, config: &Config) -> Self {
        Self {
            renderer,
            services,
            timings: Timings::from(config),
            history: History::new(config.history_limit),
            glitch: false,
            pending_logout: None,
        }
    }

    pub fn renderer(&self) -> &Arc<LineRenderer> {
        &self.renderer
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn recall_previous(&mut self) -> String {
        self.history.recall_previous()
    }

    pub fn recall_next(&mut self) -> String {
        self.history.recall_next()
    }

    pub fn glitch_enabled(&self) -> bool {
        self.glitch
    }

    /// Whether a `logout` is waiting for its delay to pass
    pub fn logout_pending(&self) -> bool {
        self.pending_logout
            .as_ref()
            .is_some_and(BackgroundTask::is_running)
    }

    fn writer(&self) -> Writer<'_> {
        Writer::new(&self.renderer, self.timings.typewriter_speed_ms, self.glitch)
    }

    /// Run one submitted line to completion.
    pub async fn submit(&mut self, raw: &str) {
        let Some(line) = CommandLine::parse(raw) else {
            return;
        };
        self.history.record(raw.trim());

        self.renderer
            .render_animated_styled(
                &format!("> {raw}"),
                LineStyle::Echo,
                self.timings.typewriter_speed_ms,
                self.glitch,
            )
            .await;

        if line.is_easter_egg() {
            debug!("Easter egg");
            effects::easter_egg(&self.writer());
        } else {
            match Command::lookup(&line) {
                Some(command) => {
                    debug!(command = ?command, args = %line.args, "Dispatching command");
                    self.run(command, &line).await;
                }
                None => {
                    debug!(input = %line.raw, "Unknown command");
                    effects::unknown(&self.writer(), &line.raw).await;
                }
            }
        }

        self.renderer.render_instant("");
        self.renderer.scroll_to_bottom();
    }

    async fn run(&mut self, command: Command, line: &CommandLine) {
        let services = self.services.clone();
        let profile = services.profile.as_ref();
        let args = line.args.as_str();

        match command {
            Command::Help => about::help(&self.writer()).await,
            Command::About => about::about(&self.writer(), profile).await,
            Command::Skills => about::skills(&self.writer(), profile).await,
            Command::Projects => about::projects(&self.writer(), profile).await,
            Command::Contact => about::contact(&self.writer(), profile).await,
            Command::Cv => cv::cv(&self.writer(), profile, args).await,
            Command::Showcase => showcase::showcase(&self.writer(), profile, args).await,
            Command::Open => {
                showcase::open_link(
                    &self.writer(),
                    profile,
                    services.navigator.as_ref(),
                    args,
                    showcase::Link::LiveDemo,
                )
                .await
            }
            Command::Code => {
                showcase::open_link(
                    &self.writer(),
                    profile,
                    services.navigator.as_ref(),
                    args,
                    showcase::Link::SourceCode,
                )
                .await
            }
            Command::Theme => theme::theme(&self.writer(), &services.themes, args).await,
            Command::Glitch => {
                self.glitch = !self.glitch;
                info!(enabled = self.glitch, "Glitch mode toggled");
                effects::glitch_toggled(&self.writer(), self.glitch).await;
            }
            Command::Hack => effects::hack(&self.writer(), self.timings.hack_line_delay).await,
            Command::Matrix => effects::matrix(&self.writer(), self.timings.matrix_frame).await,
            Command::Echo => about::echo(&self.writer(), args).await,
            Command::Date => about::date(&self.writer()).await,
            Command::Whoami => about::whoami(&self.writer(), profile).await,
            Command::Ls => about::list_directory(&self.writer()).await,
            Command::Clear => self.renderer.clear(),
            Command::Logout => self.logout().await,
        }
    }

    async fn logout(&mut self) {
        self.writer().line("Logging out...").await;

        let auth = self.services.auth.clone();
        self.pending_logout = Some(BackgroundTask::after(
            "logout",
            self.timings.logout_delay,
            move || auth.logout(),
        ));
    }

    /// Banner shown when a session starts.
    pub async fn welcome(&self) {
        let out = self.writer();
        for row in BANNER {
            out.instant(row);
        }
        out.blank().await;
        out.line("Matrix Terminal v1.0").await;
        out.line(format!("Welcome, {}.", self.services.profile.name))
            .await;
        out.line("Type \"help\" to see available commands.").await;
        out.instant("─".repeat(60));
        out.instant("");
        self.renderer.scroll_to_bottom();
    }
}

const BANNER: &[&str] = &[
    r" _____                    __       _ _       ",
    r"|_   _|__ _ __ _ __ ___  / _| ___ | (_) ___  ",
    r"  | |/ _ \ '__| '_ ` _ \| |_ / _ \| | |/ _ \ ",
    r"  | |  __/ |  | | | | | |  _| (_) | | | (_) |",
    r"  |_|\___|_|  |_| |_| |_|_|  \___/|_|_|\___/ ",
];
