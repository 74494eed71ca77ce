//! Convert command implementation

use crate::amount;
use clap::{Args, Subcommand};

#[derive(Args, Debug)]
pub struct ConvertArgs {
    #[command(subcommand)]
    pub command: ConvertCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConvertCommand {
    /// HEXA amount to smallest units
    ToUnits { amount: String },
    /// Smallest units to HEXA amount
    ToHuman {
        #[arg(allow_hyphen_values = true)]
        units: i64,
    },
    /// HEXA amount plus the HEX fee
    WithFee { amount: String },
}

impl ConvertArgs {
    pub fn execute(&self) -> anyhow::Result<()> {
        println!("{}", self.output()?);
        Ok(())
    }

    fn output(&self) -> anyhow::Result<String> {
        Ok(match &self.command {
            ConvertCommand::ToUnits { amount } => amount::to_smallest_unit(amount)?.to_string(),
            ConvertCommand::ToHuman { units } => amount::to_human_string(*units),
            ConvertCommand::WithFee { amount } => amount::amount_with_fee(amount)?,
        })
    }
}
