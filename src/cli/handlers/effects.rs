// Visual effects: hack, matrix rain, glitch toggle and the canned replies for
// the easter egg and unknown commands.

use std::time::Duration;

use super::Writer;
use crate::cli::layout::{cascade_frames, hex_line, rain_line};
use crate::config::constants::{
    HACK_LINES, HACK_MAX_LINE_LEN, HACK_MIN_LINE_LEN, MATRIX_ALPHABET, MATRIX_ITERATIONS,
    MATRIX_LINES, MATRIX_LINE_WIDTH,
};

pub async fn hack(out: &Writer<'_>, line_delay: Duration) {
    out.glitch_line("INITIATING HACK SEQUENCE...");
    for _ in 0..HACK_LINES {
        let line = out
            .renderer()
            .with_rng(|rng| hex_line(HACK_MIN_LINE_LEN, HACK_MAX_LINE_LEN, rng));
        if !line_delay.is_zero() {
            tokio::time::sleep(line_delay).await;
        }
        out.glitch_line(line);
    }
    out.glitch_line("HACK COMPLETE. ACCESS GRANTED.");
}

pub async fn matrix(out: &Writer<'_>, frame_delay: Duration) {
    out.line("Initiating Matrix rain sequence...").await;
    out.blank().await;
    for _ in 0..MATRIX_LINES {
        let frames = out.renderer().with_rng(|rng| {
            let target = rain_line(MATRIX_LINE_WIDTH, MATRIX_ALPHABET, rng);
            cascade_frames(&target, MATRIX_ITERATIONS, MATRIX_ALPHABET, rng)
        });
        out.renderer().render_cascade(&frames, frame_delay).await;
    }
    out.blank().await;
    out.line("Matrix rain sequence complete.").await;
}

/// Confirmation after `glitch` flipped the flag to `enabled`
pub async fn glitch_toggled(out: &Writer<'_>, enabled: bool) {
    if enabled {
        out.glitch_line("Glitch mode enabled. System unstable.");
    } else {
        out.line("Glitch mode disabled. System stabilized.").await;
    }
}

pub fn easter_egg(out: &Writer<'_>) {
    out.glitch_line("Nice try. This terminal has advanced security features!");
}

pub async fn unknown(out: &Writer<'_>, raw: &str) {
    out.glitch_line(format!("Command not found: {raw}"));
    out.line("Type \"help\" to see available commands.").await;
}
