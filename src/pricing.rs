//! Rent derivation: monthly rental, platform fee, landlord payout, deposit.
//!
//! Everything here is pure arithmetic over `f64`. Nothing is rounded until
//! the figures are formatted for display.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Platform commission charged on the monthly rent.
pub const FEE_RATE: f64 = 0.05;

pub const WEEKS_PER_YEAR: f64 = 52.0;
pub const MONTHS_PER_YEAR: f64 = 12.0;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    #[error("deposit must be between {min} and {max} weeks, got {0}", min = DepositWeeks::MIN, max = DepositWeeks::MAX)]
    DepositWeeksOutOfRange(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Weekly,
    Monthly,
}

impl Frequency {
    pub fn label(self) -> &'static str {
        match self {
            Frequency::Weekly => "Weekly",
            Frequency::Monthly => "Monthly",
        }
    }

    /// Period noun used in prompts ("per week").
    pub fn period(self) -> &'static str {
        match self {
            Frequency::Weekly => "week",
            Frequency::Monthly => "month",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Frequency::Weekly => Frequency::Monthly,
            Frequency::Monthly => Frequency::Weekly,
        }
    }
}

/// Number of weeks' rent charged as a deposit. Always within 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub struct DepositWeeks(u8);

impl DepositWeeks {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub const ALL: [DepositWeeks; 5] = [
        DepositWeeks(1),
        DepositWeeks(2),
        DepositWeeks(3),
        DepositWeeks(4),
        DepositWeeks(5),
    ];

    pub fn new(weeks: u8) -> Result<Self, PricingError> {
        if (Self::MIN..=Self::MAX).contains(&weeks) {
            Ok(Self(weeks))
        } else {
            Err(PricingError::DepositWeeksOutOfRange(weeks))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn next(self) -> Self {
        Self((self.0 + 1).min(Self::MAX))
    }

    pub fn prev(self) -> Self {
        Self(self.0.saturating_sub(1).max(Self::MIN))
    }
}

impl Default for DepositWeeks {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<u8> for DepositWeeks {
    type Error = PricingError;

    fn try_from(weeks: u8) -> Result<Self, Self::Error> {
        Self::new(weeks)
    }
}

impl From<DepositWeeks> for u8 {
    fn from(weeks: DepositWeeks) -> Self {
        weeks.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DerivedAmounts {
    pub monthly_rent: f64,
    pub fee: f64,
    pub landlord_payout: f64,
    pub deposit_total: f64,
    pub weekly_equivalent: f64,
}

/// Parse a raw rent entry. Anything that isn't a finite non-negative number
/// (including the empty string and a lone ".") counts as zero.
pub fn parse_amount(raw: &str) -> f64 {
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
        .unwrap_or(0.0)
}

pub fn derive(amount: f64, frequency: Frequency, deposit_weeks: DepositWeeks) -> DerivedAmounts {
    let monthly_rent = match frequency {
        Frequency::Weekly => amount * WEEKS_PER_YEAR / MONTHS_PER_YEAR,
        Frequency::Monthly => amount,
    };

    let fee = monthly_rent * FEE_RATE;
    let landlord_payout = monthly_rent - fee;

    // Deposit is always counted in weeks, even when rent is quoted monthly.
    let weekly_equivalent = match frequency {
        Frequency::Weekly => amount,
        Frequency::Monthly => amount * MONTHS_PER_YEAR / WEEKS_PER_YEAR,
    };
    let deposit_total = weekly_equivalent * f64::from(deposit_weeks.get());

    DerivedAmounts {
        monthly_rent,
        fee,
        landlord_payout,
        deposit_total,
        weekly_equivalent,
    }
}
