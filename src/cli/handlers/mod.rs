// Command handlers
//
// One function per command. Handlers hold no state of their own: they read
// the collaborators and issue render calls through a `Writer`, awaiting each
// animated line before starting the next.

pub mod cv;
pub mod effects;
pub mod info;
pub mod showcase;
pub mod theme;

use std::sync::Arc;
use std::time::Duration;

use super::output_manager::LineStyle;
use super::renderer::LineRenderer;
use crate::config::Config;
use crate::services::{AuthGate, Navigator, Profile, ThemeRegistry};

/// Read-only collaborators the handlers work against
#[derive(Clone)]
pub struct Services {
    pub profile: Arc<Profile>,
    pub themes: Arc<ThemeRegistry>,
    pub auth: Arc<AuthGate>,
    pub navigator: Arc<dyn Navigator>,
}

/// Timings of the effects
#[derive(Debug, Clone)]
pub struct Timings {
    pub typewriter_speed_ms: u64,
    pub hack_line_delay: Duration,
    pub matrix_frame: Duration,
    pub logout_delay: Duration,
}

impl From<&Config> for Timings {
    fn from(config: &Config) -> Self {
        Self {
            typewriter_speed_ms: config.typewriter_speed_ms,
            hack_line_delay: Duration::from_millis(config.hack_line_delay_ms),
            matrix_frame: Duration::from_millis(config.matrix_frame_ms),
            logout_delay: config.logout_delay(),
        }
    }
}

/// Render calls bound to the current speed and glitch flag
pub struct Writer<'a> {
    renderer: &'a LineRenderer,
    speed_ms: u64,
    glitch: bool,
}

impl<'a> Writer<'a> {
    pub fn new(renderer: &'a LineRenderer, speed_ms: u64, glitch: bool) -> Self {
        Self {
            renderer,
            speed_ms,
            glitch,
        }
    }

    pub fn renderer(&self) -> &'a LineRenderer {
        self.renderer
    }

    /// Typewriter line with the session's glitch flag
    pub async fn line(&self, text: impl AsRef<str>) {
        self.renderer
            .render_animated(text.as_ref(), self.speed_ms, self.glitch)
            .await;
    }

    pub async fn blank(&self) {
        self.line("").await;
    }

    pub async fn lines<S: AsRef<str>>(&self, lines: &[S]) {
        for line in lines {
            self.line(line).await;
        }
    }

    pub fn instant(&self, text: impl AsRef<str>) {
        self.renderer.render_instant(text.as_ref());
    }

    /// Instant error/hacker styled line
    pub fn glitch_line(&self, text: impl AsRef<str>) {
        self.renderer.render_styled(text.as_ref(), LineStyle::Glitch);
    }
}
