//! Gazette Watch CLI
//!
//! Runs one watch pass: discover, download, scan and report new gazette PDFs.

use std::path::{Path, PathBuf};

use clap::Parser;
use gazette_watch::{
    error::Result,
    models::Config,
    pipeline,
    services::Mailer,
    utils::{http::Fetcher, logging},
};

/// Gazette Watch - Victoria Government Gazette PDF watcher
#[derive(Parser, Debug)]
#[command(
    name = "gazette-watch",
    version,
    about = "Watches gazette listing pages and emails a digest of matched notices"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "gazette.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Load configuration, falling back to embedded defaults.
///
/// Logging is initialized here because the log file location comes from the
/// configuration itself.
fn load_config(cli: &Cli) -> Config {
    match Config::load(&cli.config) {
        Ok(config) => {
            logging::init(Path::new(&config.paths.log_file), cli.verbose);
            log::info!("Loaded configuration from {}", cli.config.display());
            config
        }
        Err(error) => {
            let config = Config::default();
            logging::init(Path::new(&config.paths.log_file), cli.verbose);
            log::warn!(
                "Config load failed from {}: {}. Using defaults.",
                cli.config.display(),
                error
            );
            config
        }
    }
}

async fn run(config: &Config) -> Result<()> {
    config.validate()?;

    let fetcher = Fetcher::new(&config.http)?;
    let mailer = Mailer::new(config.email.clone());
    let report = pipeline::run_watch(config, &fetcher, &mailer).await?;

    log::info!(
        "Run complete: {} links discovered, {} new, {} matched, {} failed.",
        report.discovered,
        report.new_count,
        report.findings,
        report.failures
    );

    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = load_config(&cli);

    if let Err(error) = run(&config).await {
        log::error!("An unhandled error occurred: {}", error);
        std::process::exit(1);
    }
}
