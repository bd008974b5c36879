// Project-wide constants
//
// Centralised here so timings and sizes have one source of truth.
// Import via `use crate::config::constants::*;`.

/// Nominal per-character typewriter delay.
pub const DEFAULT_TYPEWRITER_SPEED_MS: u64 = 15;

/// Chance that a single character reveal flashes a glitch glyph.
pub const DEFAULT_GLITCH_PROBABILITY: f64 = 0.05;

/// How long a glitch glyph stays on screen before the real text returns.
pub const DEFAULT_GLITCH_FLASH_MS: u64 = 100;

/// Interval of the scroll keep-alive while a line is animating.
pub const SCROLL_KEEPALIVE_MS: u64 = 100;

/// Maximum number of remembered commands.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Artificial delay of the authentication gate.
pub const DEFAULT_LOGIN_DELAY_MS: u64 = 2000;

/// Pause between the login success messages.
pub const LOGIN_STEP_MS: u64 = 800;

/// Delay between `logout` and the end of the session.
pub const DEFAULT_LOGOUT_DELAY_MS: u64 = 1000;

/// Inactivity before the idle overlay takes over the output pane.
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 25;

/// Pause between the hex lines of the `hack` command.
pub const DEFAULT_HACK_LINE_DELAY_MS: u64 = 100;

/// Frame time of one matrix cascade iteration.
pub const DEFAULT_MATRIX_FRAME_MS: u64 = 25;

/// Interior width of the project detail header box.
pub const PROJECT_BOX_WIDTH: usize = 60;

/// Interior widths of the CV panels.
pub const CV_WIDE_PANEL_WIDTH: usize = 58;
pub const CV_LANGUAGE_PANEL_WIDTH: usize = 40;
pub const CV_CERTIFICATION_PANEL_WIDTH: usize = 50;

/// Matrix rain geometry.
pub const MATRIX_LINES: usize = 8;
pub const MATRIX_LINE_WIDTH: usize = 50;
pub const MATRIX_ITERATIONS: usize = 12;
pub const MATRIX_ALPHABET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789$#@!*%&";

/// Hack sequence geometry.
pub const HACK_LINES: usize = 10;
pub const HACK_MIN_LINE_LEN: usize = 30;
pub const HACK_MAX_LINE_LEN: usize = 80;

/// Theme used when nothing else is configured or persisted.
pub const DEFAULT_THEME: &str = "matrix";

/// Directory under $HOME holding config, state and logs.
pub const APP_DIR: &str = ".termfolio";
