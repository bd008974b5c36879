// Configuration module
// Public interface for configuration loading

mod colors;
pub mod constants;
mod loader;
mod settings;

pub use colors::{ColorSpec, Palette};
pub use loader::{app_dir, default_config_path, load_config};
pub use settings::Config;
