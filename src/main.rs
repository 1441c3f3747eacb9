mod app;
mod cli;
mod config;
mod consts;
mod core;
mod error;
mod output;
mod source;
mod utils;

use clap::Parser;
use tracing::{debug, error, warn};

use cli::Cli;
use config::Config;
use output::register_chart_types;
use utils::init_logging;

fn main() {
    let cli = Cli::parse();

    let loaded = match cli.config.as_deref() {
        Some(path) => match Config::load_from(path) {
            Ok(loaded) => loaded,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
        None => Config::discover(),
    };
    let cli = cli.with_config(&loaded.config);

    init_logging(cli.debug, cli.quiet);
    if let Some(path) = &loaded.path {
        debug!("Using config {}", path.display());
    }
    for warning in &loaded.warnings {
        warn!("{warning}");
    }

    register_chart_types();

    if let Err(e) = app::run(&cli, &loaded.config) {
        error!("{e}");
        std::process::exit(1);
    }
}
