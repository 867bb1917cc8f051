//! lanscan - Main entry point
//!
//! Finds the local address, pings the subnet broadcast address, and prints
//! every host that answered together with its hardware address.

mod config;
mod exit_codes;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use lanscan_core::Dialect;
use lanscan_discovery::DiscoveryScanner;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use config::Config;
use output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "lanscan")]
#[command(about = "Discover hosts on the local IPv4 subnet")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "lanscan.toml")]
    config: PathBuf,

    /// Utility dialect (linux, bsd), overrides the configuration file
    #[arg(short, long)]
    dialect: Option<Dialect>,

    /// Echo requests sent to the broadcast address
    #[arg(long)]
    ping_count: Option<u32>,

    /// Per-command timeout in seconds (0 to disable)
    #[arg(long)]
    timeout: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Write the default configuration to --config and exit
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(&args.log_level) {
        eprintln!("Error: {:#}", e);
        std::process::exit(exit_codes::GENERAL_ERROR);
    }

    match run(args).await {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(exit_codes::for_error(&e));
        }
    }
}

fn init_logging(log_level: &str) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    // RUST_LOG, when set, wins over --log-level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::default().add_directive(LevelFilter::from_level(level).into())
    });

    // Logs go to stderr so stdout carries only the report
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

async fn run(args: Args) -> Result<()> {
    if args.init_config {
        config::save_default_config(&args.config)
            .with_context(|| format!("failed to write {}", args.config.display()))?;
        println!("Wrote default configuration to {}", args.config.display());
        return Ok(());
    }

    // Load configuration
    let mut config = config::load_config(&args.config)
        .with_context(|| format!("failed to load {}", args.config.display()))?;
    apply_overrides(&mut config, &args);

    let scanner_config = config.to_scanner_config()?;
    let patterns = config.pattern_set()?;

    info!(
        dialect = %scanner_config.dialect,
        ping_count = scanner_config.ping_count,
        custom_patterns = config.patterns.is_some(),
        "Configuration loaded"
    );

    let scanner = DiscoveryScanner::system(&scanner_config, patterns);
    let report = scanner.scan_once().await?;

    info!(hosts = report.neighbors.len() + 1, "Discovery finished");

    println!("{}", output::render(&report, args.format)?);
    Ok(())
}

/// Command-line values win over the configuration file
fn apply_overrides(config: &mut Config, args: &Args) {
    if let Some(dialect) = args.dialect {
        config.probe.dialect = dialect;
    }
    if let Some(count) = args.ping_count {
        config.probe.ping_count = count;
    }
    if let Some(secs) = args.timeout {
        config.probe.command_timeout_secs = secs;
    }
}
