// CLI module
// Command interpreter, animation engine and the terminal UI around them

mod background;
mod commands;
mod dispatcher;
mod exec;
mod handlers;
mod history;
mod idle;
mod layout;
mod login;
mod output_manager;
mod renderer;
mod repl;
mod status_bar;
mod tui;

pub use background::BackgroundTask;
pub use commands::{Arity, Command, CommandLine, CommandSpec, COMMANDS, EASTER_EGG};
pub use dispatcher::Dispatcher;
pub use exec::run_commands;
pub use handlers::{Services, Timings};
pub use history::History;
pub use idle::{IdleMonitor, IdleOverlay, Slide};
pub use layout::{cascade_frames, header_box, wrap_text, Panel};
pub use login::{LoginField, LoginScreen, LoginState};
pub use output_manager::{LineId, LineStyle, OutputLine, OutputManager, RenderState};
pub use renderer::{Display, LineRenderer, NullDisplay, RenderSettings};
pub use repl::Repl;
pub use status_bar::{StatusBar, StatusLineType};
