// Batch mode
//
// Runs a list of commands without the TUI and with every delay at zero, then
// hands back the rows they produced.

use std::sync::Arc;

use super::dispatcher::Dispatcher;
use super::handlers::Services;
use super::output_manager::OutputManager;
use super::renderer::{LineRenderer, NullDisplay, RenderSettings};
use crate::config::Config;

/// Submit `commands` in order and return the output rows.
pub async fn run_commands(config: &Config, services: Services, commands: &[String]) -> Vec<String> {
    let config = Config {
        seed: config.seed,
        history_limit: config.history_limit,
        ..Config::instant()
    };
    let renderer = Arc::new(LineRenderer::new(
        OutputManager::new(),
        Arc::new(NullDisplay),
        RenderSettings::from(&config),
        config.seed,
    ));
    let mut dispatcher = Dispatcher::new(renderer, services, &config);
    for command in commands {
        dispatcher.submit(command).await;
    }
    dispatcher.renderer().output().contents()
}
