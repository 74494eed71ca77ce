//! Watch command implementation

use crate::config::Config;
use crate::orderbook::{BookFeed, HorizonClient};
use crate::session::{BookSession, Update};
use clap::Args;

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Override tracker depth from the config
    #[arg(long)]
    pub depth: Option<usize>,
}

impl WatchArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let depth = self.depth.unwrap_or(config.tracker.depth);
        let mut session = BookSession::new(depth)?;

        let client = HorizonClient::with_config(config.horizon_config());
        let mut snapshots = client.subscribe().await?;

        tracing::info!(
            depth,
            url = %client.config().order_book_url(),
            "Watching order book"
        );

        while let Some(raw) = snapshots.recv().await {
            if let Update::Retained { line, .. } = session.handle(&raw) {
                println!("{}", line);
            }
        }

        let stats = session.stats();
        tracing::info!(
            retained = stats.retained,
            heartbeats = stats.heartbeats,
            rejected = stats.rejected,
            "Order book stream ended"
        );
        Ok(())
    }
}
