//! CLI interface for hex-book
//!
//! Provides subcommands for:
//! - `watch`: Stream and track the configured pair's order book
//! - `replay`: Track snapshots recorded as newline-delimited JSON
//! - `convert`: Convert HEXA amounts to and from smallest units
//! - `chunk`: Split a description into data entries
//! - `config`: Show configuration

mod chunk;
mod convert;
mod replay;
mod watch;

pub use chunk::ChunkArgs;
pub use convert::{ConvertArgs, ConvertCommand};
pub use replay::ReplayArgs;
pub use watch::WatchArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "hex-book")]
#[command(about = "Order book snapshot tracker for the HEX token exchange on Stellar")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Stream and track the order book
    Watch(WatchArgs),
    /// Track snapshots from a newline-delimited JSON file
    Replay(ReplayArgs),
    /// Convert HEXA amounts
    Convert(ConvertArgs),
    /// Split a description into data entries
    Chunk(ChunkArgs),
    /// Show configuration
    Config,
}
