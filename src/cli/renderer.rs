// Line Renderer - the animation engine
//
// Appends rows to the output surface either instantly or one character at a
// time. Every animated render is awaited to completion by the caller, which is
// what keeps the rows of one command in program order even though each reveal
// is timer driven.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::background::BackgroundTask;
use super::output_manager::{LineId, LineStyle, OutputManager, RenderState};
use crate::config::constants::{DEFAULT_GLITCH_FLASH_MS, DEFAULT_GLITCH_PROBABILITY, SCROLL_KEEPALIVE_MS};
use crate::config::Config;

/// Symbols flashed over a character in glitch mode
const GLITCH_SYMBOLS: &[char] = &['#', '%', '&', '@', '$', '!', '?', '*', '█', '▓', '░'];

/// Where rendered rows end up on screen
pub trait Display: Send + Sync {
    /// The output changed, redraw when convenient.
    fn refresh(&self);
    /// Bring the newest row into view.
    fn scroll_to_bottom(&self);
}

/// Display that ignores everything (non-interactive mode, tests)
#[derive(Debug, Default)]
pub struct NullDisplay;

impl Display for NullDisplay {
    fn refresh(&self) {}
    fn scroll_to_bottom(&self) {}
}

#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub glitch_probability: f64,
    pub glitch_flash: Duration,
    pub scroll_keepalive: Duration,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            glitch_probability: DEFAULT_GLITCH_PROBABILITY,
            glitch_flash: Duration::from_millis(DEFAULT_GLITCH_FLASH_MS),
            scroll_keepalive: Duration::from_millis(SCROLL_KEEPALIVE_MS),
        }
    }
}

impl From<&Config> for RenderSettings {
    fn from(config: &Config) -> Self {
        Self {
            glitch_probability: config.glitch_probability,
            glitch_flash: Duration::from_millis(config.glitch_flash_ms),
            ..Self::default()
        }
    }
}

pub struct LineRenderer {
    output: OutputManager,
    display: Arc<dyn Display>,
    settings: RenderSettings,
    rng: Mutex<SmallRng>,
}

impl LineRenderer {
    pub fn new(
        output: OutputManager,
        display: Arc<dyn Display>,
        settings: RenderSettings,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self {
            output,
            display,
            settings,
            rng: Mutex::new(rng),
        }
    }

    pub fn output(&self) -> &OutputManager {
        &self.output
    }

    /// Run `f` with the renderer's random source.
    pub fn with_rng<T>(&self, f: impl FnOnce(&mut SmallRng) -> T) -> T {
        f(&mut self.rng.lock().unwrap())
    }

    /// Append a plain row immediately.
    pub fn render_instant(&self, text: &str) {
        self.render_styled(text, LineStyle::Normal);
    }

    /// Append a row immediately with the given style.
    pub fn render_styled(&self, text: &str, style: LineStyle) {
        self.output
            .push(text, style, RenderState::Complete, style == LineStyle::Glitch);
        self.display.refresh();
        self.display.scroll_to_bottom();
    }

    /// Type `text` out character by character. Resolves once every character
    /// is on the surface. Multi-line text becomes one row per line.
    pub async fn render_animated(&self, text: &str, speed_ms: u64, glitch: bool) {
        self.render_animated_styled(text, LineStyle::Normal, speed_ms, glitch)
            .await;
    }

    pub async fn render_animated_styled(
        &self,
        text: &str,
        style: LineStyle,
        speed_ms: u64,
        glitch: bool,
    ) {
        // split always yields at least one item, even for ""
        for line in text.split('\n') {
            self.animate_line(line.trim_end_matches('\r'), style, speed_ms, glitch)
                .await;
        }
    }

    async fn animate_line(&self, text: &str, style: LineStyle, speed_ms: u64, glitch: bool) {
        let id = self
            .output
            .push(String::new(), style, RenderState::Pending, glitch);

        let chars: Vec<char> = text.chars().collect();
        if chars.is_empty() {
            self.finish(id);
            return;
        }

        self.output.set_state(id, RenderState::Animating);
        let keepalive = (speed_ms > 0).then(|| {
            let display = self.display.clone();
            BackgroundTask::every("scroll-keepalive", self.settings.scroll_keepalive, move || {
                display.scroll_to_bottom()
            })
        });

        for (i, c) in chars.iter().enumerate() {
            self.output.push_char(id, *c);
            if glitch {
                self.maybe_glitch(id, i);
            }
            self.display.refresh();

            if speed_ms > 0 && i + 1 < chars.len() {
                tokio::time::sleep(self.jittered(speed_ms)).await;
            }
        }

        if let Some(task) = keepalive {
            task.stop();
        }
        self.finish(id);
    }

    fn finish(&self, id: LineId) {
        self.output.set_state(id, RenderState::Complete);
        self.display.refresh();
        self.display.scroll_to_bottom();
    }

    /// Nominal delay scaled by a random factor in 0.8..1.2
    fn jittered(&self, speed_ms: u64) -> Duration {
        let factor = self.with_rng(|rng| 0.8 + rng.gen::<f64>() * 0.4);
        Duration::from_secs_f64(speed_ms as f64 * factor / 1000.0)
    }

    /// Possibly flash a random symbol over the character just revealed. The
    /// restore runs on its own timer so the reveal schedule is unaffected.
    fn maybe_glitch(&self, id: LineId, position: usize) {
        let symbol = self.with_rng(|rng| {
            rng.gen_bool(self.settings.glitch_probability)
                .then(|| GLITCH_SYMBOLS[rng.gen_range(0..GLITCH_SYMBOLS.len())])
        });
        let Some(symbol) = symbol else {
            return;
        };
        let Some(token) = self.output.set_overlay(id, position, symbol) else {
            return;
        };

        let output = self.output.clone();
        let display = self.display.clone();
        let flash = self.settings.glitch_flash;
        tokio::spawn(async move {
            tokio::time::sleep(flash).await;
            output.remove_overlay(id, token);
            display.refresh();
        });
    }

    /// Show the frames of a cascade reveal in one row, `frame_delay` apart.
    pub async fn render_cascade(&self, frames: &[String], frame_delay: Duration) {
        let Some(first) = frames.first() else {
            return;
        };
        let id = self
            .output
            .push(first.clone(), LineStyle::Normal, RenderState::Animating, false);
        self.display.refresh();

        for frame in &frames[1..] {
            if !frame_delay.is_zero() {
                tokio::time::sleep(frame_delay).await;
            }
            self.output.set_content(id, frame.clone());
            self.display.refresh();
        }
        self.finish(id);
    }

    /// Empty the whole output surface.
    pub fn clear(&self) {
        self.output.clear();
        self.display.refresh();
    }

    pub fn scroll_to_bottom(&self) {
        self.display.scroll_to_bottom();
    }
}
