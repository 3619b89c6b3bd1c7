//! Tradeweb main entry point

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tradeweb_api::{start_server, AppState};
use tradeweb_config::{Config, ConfigError};

#[derive(Parser, Debug)]
#[command(name = "tradeweb")]
#[command(author = "Tradeweb Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Sales and purchase transaction entry forms over HTMX", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return ExitCode::SUCCESS;
    }

    let (config, missing) = match Config::load(&args.config) {
        Ok(config) => (config, false),
        Err(ConfigError::FileNotFound { .. }) => (Config::default(), true),
        Err(e) => {
            eprintln!("{}", e.to_details());
            return ExitCode::FAILURE;
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    if missing {
        log::warn!(
            "Config file {} not found, using built-in defaults",
            args.config.display()
        );
    } else {
        log::info!("Config loaded from {}", args.config.display());
    }

    let rt = match Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            log::error!("Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let state = AppState::with_log_sink(config);
    match rt.block_on(start_server(state)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Server error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
