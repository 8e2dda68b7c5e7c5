//! A snapshot of the current inputs and their figures, for export and for
//! `--summary`.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::format::format_currency;
use crate::input::RentInput;
use crate::pricing::{DepositWeeks, DerivedAmounts, Frequency};

pub const QUOTE_FILE: &str = "rental_quote.csv";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub frequency: Frequency,
    pub rent: f64,
    pub deposit_weeks: DepositWeeks,
    #[serde(flatten)]
    pub amounts: DerivedAmounts,
}

impl Quote {
    pub fn new(rent: &RentInput, deposit_weeks: DepositWeeks) -> Self {
        Self {
            frequency: rent.frequency,
            rent: rent.value(),
            deposit_weeks,
            amounts: rent.derive(deposit_weeks),
        }
    }

    pub fn to_text(&self) -> String {
        let lines = [
            format!("{} rent: {}", self.frequency.label(), format_currency(self.rent)),
            format!("Deposit weeks: {}", self.deposit_weeks.get()),
            format!("Monthly rental: {}", format_currency(self.amounts.monthly_rent)),
            format!("Letly fee: {}", format_currency(self.amounts.fee)),
            format!("You receive: {}", format_currency(self.amounts.landlord_payout)),
            format!("Deposit total: {}", format_currency(self.amounts.deposit_total)),
        ];
        lines.join("\n")
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serializing quote")
    }

    pub fn export_csv(&self, path: &Path) -> Result<()> {
        let mut file =
            File::create(path).with_context(|| format!("creating {}", path.display()))?;

        writeln!(
            file,
            "Frequency,Rent,Deposit Weeks,Monthly Rental,Fee,You Receive,Weekly Equivalent,Deposit Total"
        )?;
        writeln!(
            file,
            "{},{:.2},{},{:.2},{:.2},{:.2},{:.2},{:.2}",
            self.frequency.label(),
            self.rent,
            self.deposit_weeks.get(),
            self.amounts.monthly_rent,
            self.amounts.fee,
            self.amounts.landlord_payout,
            self.amounts.weekly_equivalent,
            self.amounts.deposit_total,
        )?;

        Ok(())
    }
}
