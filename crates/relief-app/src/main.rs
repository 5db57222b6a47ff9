//! Headless relief host.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p relief-app -- --ops diamond_square,smooth:2 --output terrain.png`.

mod platform;
mod runner;

use clap::Parser;
use relief_config::{CliArgs, Config};
use tracing::{error, info};

use crate::platform::PlatformDirs;
use crate::runner::{RunError, TerrainSession};

fn main() {
    let args = CliArgs::parse();

    let dirs = match args.config.clone() {
        Some(dir) => PlatformDirs::from_config_dir(dir),
        None => match PlatformDirs::resolve() {
            Ok(dirs) => dirs,
            Err(e) => {
                eprintln!("Failed to resolve platform directories: {e}");
                std::process::exit(1);
            }
        },
    };
    if let Err(e) = dirs.create_dirs() {
        eprintln!("Failed to initialize platform directories: {e}");
        std::process::exit(1);
    }

    let (mut config, origin) = match Config::load_or_create(&dirs.config_dir) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Failed to load config from {}: {e}", dirs.config_dir.display());
            std::process::exit(1);
        }
    };
    if let Err(e) = config.apply_cli_overrides(&args) {
        eprintln!("Invalid command line: {e}");
        std::process::exit(1);
    }

    relief_log::init_logging(
        Some(&dirs.log_dir),
        cfg!(debug_assertions),
        Some(&config),
    );
    info!("{origin}");

    if let Err(e) = run(config) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(config: Config) -> Result<(), RunError> {
    let mut session = TerrainSession::new(config)?;
    let reports = session.run()?;
    info!("Pipeline finished after {} operations", reports.len());
    session.write_image()?;
    Ok(())
}
