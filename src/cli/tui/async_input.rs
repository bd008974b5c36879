// Async input handler for TUI - keyboard polling off the runtime thread

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::error;

const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Key presses the event loop cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Char(char),
    Backspace,
    Enter,
    Tab,
    Up,
    Down,
    PageUp,
    PageDown,
    /// Ctrl+L
    ClearScreen,
    /// Ctrl+C or Esc
    Quit,
    /// Any other key: still counts as activity
    Other,
}

/// Printable characters only. Control characters and private use areas
/// (used by some terminals for inline images) would break the layout.
fn accept_char(c: char) -> bool {
    match c {
        ' '..='~' => true,
        '\u{0080}'..='\u{10FFFF}' => {
            !matches!(c, '\u{E000}'..='\u{F8FF}' | '\u{F0000}'..='\u{FFFFD}' | '\u{100000}'..='\u{10FFFD}')
        }
        _ => false,
    }
}

pub fn translate(key: KeyEvent) -> InputEvent {
    if key.kind == KeyEventKind::Release {
        return InputEvent::Other;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => InputEvent::Quit,
        KeyCode::Char('l') if ctrl => InputEvent::ClearScreen,
        KeyCode::Char(c) if !ctrl && accept_char(c) => InputEvent::Char(c),
        KeyCode::Esc => InputEvent::Quit,
        KeyCode::Enter => InputEvent::Enter,
        KeyCode::Backspace => InputEvent::Backspace,
        KeyCode::Tab => InputEvent::Tab,
        KeyCode::Up => InputEvent::Up,
        KeyCode::Down => InputEvent::Down,
        KeyCode::PageUp => InputEvent::PageUp,
        KeyCode::PageDown => InputEvent::PageDown,
        _ => InputEvent::Other,
    }
}

/// Spawn a blocking task that polls the keyboard and forwards key presses.
///
/// Polling blocks for up to 100ms, so it runs on the blocking pool rather
/// than the runtime thread that drives the animations. Stops when `token` is
/// cancelled or the receiver is dropped.
pub fn spawn_input_task(token: CancellationToken) -> mpsc::UnboundedReceiver<InputEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || {
        while !token.is_cancelled() {
            match event::poll(POLL_TIMEOUT) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(e) => {
                    error!("Input poll failed: {}", e);
                    break;
                }
            }
            match event::read() {
                Ok(Event::Key(key)) => {
                    if tx.send(translate(key)).is_err() {
                        break;
                    }
                }
                Ok(_) => {} // mouse, resize, focus
                Err(e) => {
                    error!("Failed to read input: {}", e);
                    break;
                }
            }
        }
    });

    rx
}
