use clap::Parser;
use hex_book::cli::{Cli, Commands};
use hex_book::config::Config;

const DEFAULT_CONFIG: &str = include_str!("../config.toml.example");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration; only a missing file falls back to the bundled one
    let config = match Config::load_if_exists(&cli.config)? {
        Some(config) => config,
        None => {
            eprintln!("Warning: {} not found", cli.config);
            eprintln!("Using default configuration");
            Config::parse(DEFAULT_CONFIG)?
        }
    };

    // Initialize telemetry
    let _telemetry = hex_book::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Watch(args) => {
            tracing::info!("Starting order book watch");
            args.execute(&config).await?;
        }
        Commands::Replay(args) => {
            args.execute(&config)?;
        }
        Commands::Convert(args) => {
            args.execute()?;
        }
        Commands::Chunk(args) => {
            args.execute()?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("  Horizon: {}", config.horizon.url);
            println!(
                "  Market: {} / {}",
                config.market.selling, config.market.buying
            );
            println!("  Tracker depth: {}", config.tracker.depth);
            println!(
                "  Stream: max_reconnects={}, idle_timeout={}s",
                config.stream.max_reconnects, config.stream.idle_timeout_secs
            );
            println!(
                "  Telemetry: level={}, format={:?}, metrics_port={}",
                config.telemetry.log_level,
                config.telemetry.log_format,
                config.telemetry.metrics_port
            );
        }
    }

    Ok(())
}
