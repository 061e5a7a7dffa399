//! `voxscape`: render Voxel Space terrain frames to PNG.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags:
//! `voxscape --color-map c1w.png --height-map d1.png --frames 36 -o out/frame.png`.

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use voxscape_app::platform::AppDirs;
use voxscape_config::{CliArgs, Config};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let dirs = match AppDirs::resolve(args.config.as_deref()) {
        Ok(dirs) => dirs,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut config = Config::load_or_create(&dirs.config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    voxscape_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));

    match voxscape_app::run(&config) {
        Ok(written) => {
            info!(frames = written.len(), "Done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
