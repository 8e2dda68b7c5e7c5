use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

use crate::input::{EntryOutcome, RentInput};
use crate::pricing::{DepositWeeks, Frequency};
use crate::theme::ThemeMode;

#[derive(Debug, Clone, Parser)]
#[command(name = "rental-terms", version, about = "Work out monthly rent, fees and deposit for a let")]
pub struct Args {
    /// Rent to start with, as typed into the rent field
    #[arg(long, value_name = "AMOUNT")]
    pub rent: Option<String>,

    /// How the rent is quoted
    #[arg(long, value_enum, default_value_t = Frequency::Weekly)]
    pub frequency: Frequency,

    /// Weeks of rent charged as a deposit
    #[arg(long, value_name = "WEEKS", default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub deposit_weeks: u8,

    /// Use this theme for the session without saving it
    #[arg(long, value_enum)]
    pub theme: Option<ThemeMode>,

    /// Preferences file (defaults to the platform config directory)
    #[arg(long, value_name = "PATH")]
    pub preferences: Option<PathBuf>,

    /// Where to write logs (defaults to the platform cache directory)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Print the figures for the given inputs and exit
    #[arg(long)]
    pub summary: bool,

    /// With --summary, print JSON instead of text
    #[arg(long, requires = "summary")]
    pub json: bool,
}

impl Args {
    /// Build the starting inputs, putting `--rent` through the same gate as
    /// typed input.
    pub fn initial_inputs(&self) -> Result<(RentInput, DepositWeeks)> {
        let mut rent = RentInput::new(self.frequency);
        if let Some(amount) = &self.rent {
            match rent.offer(amount) {
                EntryOutcome::Accepted => {}
                EntryOutcome::RejectedCharacters => {
                    bail!("--rent must be a plain decimal number, got {:?}", amount)
                }
                EntryOutcome::RejectedCeiling => {
                    bail!("--rent cannot exceed 99,999, got {}", amount)
                }
            }
        }
        let deposit_weeks = DepositWeeks::new(self.deposit_weeks)?;
        Ok((rent, deposit_weeks))
    }
}

pub fn default_log_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("rental-terms")
        .join("rental-terms.log")
}
