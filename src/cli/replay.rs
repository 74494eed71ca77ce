//! Replay command implementation

use crate::config::Config;
use crate::session::{BookSession, Update};
use clap::Args;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Newline-delimited JSON file of Horizon order book snapshots
    pub file: PathBuf,

    /// Override tracker depth from the config
    #[arg(long)]
    pub depth: Option<usize>,

    /// Also report heartbeats and rejected lines
    #[arg(long)]
    pub all: bool,
}

impl ReplayArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let depth = self.depth.unwrap_or(config.tracker.depth);
        let mut session = BookSession::new(depth)?;

        let file = File::open(&self.file)
            .map_err(|e| anyhow::anyhow!("Cannot open {:?}: {}", self.file, e))?;
        tracing::info!(file = ?self.file, depth, "Replaying order book snapshots");

        for update in session.replay(BufReader::new(file))? {
            match update {
                Update::Retained { sequence, line } => println!("#{:<4}{}", sequence, line),
                Update::Heartbeat if self.all => println!("      heartbeat"),
                Update::Rejected(e) if self.all => println!("      rejected: {}", e),
                _ => {}
            }
        }

        let stats = session.stats();
        println!(
            "retained={} heartbeats={} rejected={}",
            stats.retained, stats.heartbeats, stats.rejected
        );
        Ok(())
    }
}
