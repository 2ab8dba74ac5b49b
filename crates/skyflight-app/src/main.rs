//! The binary entry point for the Skyflight viewer.

use clap::Parser;
use skyflight_app::{AppState, PlatformDirs, Viewer, run};
use skyflight_config::{CliArgs, Config};
use skyflight_input::InputMap;
use skyflight_input::keybindings::INPUT_FILE_NAME;
use tracing::{error, info, warn};

fn main() {
    let args = CliArgs::parse();

    let dirs = match PlatformDirs::resolve() {
        Ok(dirs) => dirs,
        Err(e) => {
            eprintln!("Failed to resolve platform directories: {e}");
            std::process::exit(1);
        }
    };
    let dirs_error = dirs.create_dirs().err();
    let config_dir = args.config.clone().unwrap_or_else(|| dirs.config_dir.clone());

    let (mut config, config_error) = match Config::load_or_create(&config_dir) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    config.apply_cli_overrides(&args);

    skyflight_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    info!(config_dir = %config_dir.display(), "Skyflight starting");
    if let Some(e) = dirs_error {
        warn!("Could not create platform directories: {e}");
    }
    if let Some(e) = config_error {
        error!("Config load failed, using defaults: {e}");
    }

    let input_path = config_dir.join(INPUT_FILE_NAME);
    if !input_path.exists()
        && let Err(e) = InputMap::default().save(&input_path)
    {
        warn!("Could not write default keybindings: {e}");
    }
    let input_map = InputMap::load(&input_path);

    let viewer = Viewer::from_config(&config, input_map);
    if let Err(e) = run(AppState::new(config, viewer)) {
        error!("Event loop failed: {e}");
        std::process::exit(1);
    }
}
