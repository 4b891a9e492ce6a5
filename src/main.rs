use std::fs::File;
use std::path::PathBuf;

use booktrack::core::config::{self, BooktrackConfig, CliOverrides};
use booktrack::tui;
use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};

#[derive(Parser)]
#[command(name = "booktrack", about = "Terminal client for a personal book list", version)]
struct Args {
    /// Book service origin, e.g. http://localhost:5000
    #[arg(long)]
    api_url: Option<String>,

    /// Path of the JSON file holding the session token
    #[arg(long)]
    storage: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = config::load_config().unwrap_or_else(|e| {
        eprintln!("booktrack: {e}; using defaults");
        BooktrackConfig::default()
    });
    let config = config::resolve(
        &file_config,
        &CliOverrides {
            api_url: args.api_url,
            storage: args.storage,
        },
    );

    // Initialize file logger
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&config.log_file) {
        let _ = WriteLogger::init(config.log_level, log_config, log_file);
    }

    log::info!("Booktrack starting up against {}", config.api_base_url);

    tui::run(config)
}
