// Termfolio - portfolio terminal
// Main entry point

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use termfolio::cli::{run_commands, Repl, Services};
use termfolio::config::{app_dir, load_config, Config};
use termfolio::logging::{self, LogTarget};
use termfolio::services::{AuthGate, BrowserNavigator, Profile, StateStore, ThemeRegistry};

#[derive(Parser, Debug)]
#[command(name = "termfolio", version, about = "A portfolio you explore from a fake hacker terminal")]
struct Args {
    /// Typewriter delay per character in milliseconds (0 = instant)
    #[arg(long)]
    speed: Option<u64>,

    /// Theme to start with (matrix, cyberpunk, retro, hacker)
    #[arg(long)]
    theme: Option<String>,

    /// Profile TOML to show instead of the built-in one
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Go straight to the terminal
    #[arg(long)]
    skip_login: bool,

    /// Configuration file (default: ~/.termfolio/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run a command without the UI and print its output (repeatable)
    #[arg(short = 'e', long = "exec", value_name = "COMMAND")]
    exec: Vec<String>,
}

impl Args {
    fn apply(&self, config: &mut Config) {
        if let Some(speed) = self.speed {
            config.typewriter_speed_ms = speed;
        }
        if let Some(theme) = &self.theme {
            config.default_theme = theme.clone();
        }
        if let Some(profile) = &self.profile {
            config.profile_path = Some(profile.clone());
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let batch = !args.exec.is_empty();

    let target = if batch {
        LogTarget::Stderr
    } else {
        LogTarget::File(logging::default_log_path())
    };
    logging::init(target).context("Failed to initialize logging")?;

    let mut config = load_config(args.config.as_deref()).context("Failed to load configuration")?;
    args.apply(&mut config);

    if !batch && !std::io::stdout().is_terminal() {
        bail!("termfolio needs an interactive terminal; use --exec to run commands");
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    runtime.block_on(run(args, config))
}

async fn run(args: Args, config: Config) -> Result<()> {
    let profile = Profile::load(config.profile_path.as_deref()).context("Failed to load profile")?;

    if !args.exec.is_empty() {
        // Batch runs never touch the persisted session
        let store = Arc::new(StateStore::in_memory());
        let services = build_services(&config, profile, store, Duration::ZERO);
        for row in run_commands(&config, services, &args.exec).await {
            println!("{row}");
        }
        return Ok(());
    }

    let store = Arc::new(StateStore::open(app_dir().join("state.toml")));
    let services = build_services(&config, profile, store, config.login_delay());
    if let Some(theme) = &args.theme {
        // An explicit flag beats the persisted theme
        if !services.themes.set_theme(theme) {
            warn!(theme = %theme, "Unknown theme, keeping the current one");
        }
    }

    info!(version = env!("CARGO_PKG_VERSION"), "Starting termfolio");
    Repl::new(config, services, args.skip_login).run().await
}

fn build_services(
    config: &Config,
    profile: Profile,
    store: Arc<StateStore>,
    login_delay: Duration,
) -> Services {
    Services {
        profile: Arc::new(profile),
        themes: Arc::new(ThemeRegistry::new(store.clone(), &config.default_theme)),
        auth: Arc::new(AuthGate::new(store, login_delay)),
        navigator: Arc::new(BrowserNavigator),
    }
}
