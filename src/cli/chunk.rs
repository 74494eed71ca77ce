//! Chunk command implementation

use crate::description::chunk_description;
use clap::Args;

#[derive(Args, Debug)]
pub struct ChunkArgs {
    /// Description text
    pub text: String,

    /// Print entries as JSON
    #[arg(long)]
    pub json: bool,
}

impl ChunkArgs {
    pub fn execute(&self) -> anyhow::Result<()> {
        let entries = chunk_description(&self.text)?;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&entries)?);
            return Ok(());
        }
        for entry in &entries {
            match &entry.value {
                Some(value) => println!("{} = {:?}", entry.name, value),
                None => println!("{} cleared", entry.name),
            }
        }
        Ok(())
    }
}
