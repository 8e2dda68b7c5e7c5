//! Rent entry gate.
//!
//! The rent field holds whatever the user typed, as typed. Each edit is
//! offered as a complete candidate string and either replaces the current
//! entry wholesale or is dropped; the gate never rewrites a candidate.

use tracing::debug;

use crate::pricing::{derive, parse_amount, DepositWeeks, DerivedAmounts, Frequency};

/// Largest rent that can be entered, inclusive.
pub const MAX_RENT: f64 = 99_999.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOutcome {
    Accepted,
    RejectedCharacters,
    RejectedCeiling,
}

impl EntryOutcome {
    pub fn is_accepted(self) -> bool {
        self == EntryOutcome::Accepted
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RentInput {
    amount: String,
    pub frequency: Frequency,
}

/// Digits with at most one decimal point. The empty string and partial
/// decimals such as "12." or ".5" pass.
pub fn is_rent_lexeme(candidate: &str) -> bool {
    let mut seen_point = false;
    candidate.chars().all(|c| match c {
        '0'..='9' => true,
        '.' if !seen_point => {
            seen_point = true;
            true
        }
        _ => false,
    })
}

impl RentInput {
    pub fn new(frequency: Frequency) -> Self {
        Self {
            amount: String::new(),
            frequency,
        }
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn is_empty(&self) -> bool {
        self.amount.is_empty()
    }

    pub fn value(&self) -> f64 {
        parse_amount(&self.amount)
    }

    pub fn offer(&mut self, candidate: &str) -> EntryOutcome {
        if !is_rent_lexeme(candidate) {
            debug!(candidate, "rent entry rejected: not a decimal");
            return EntryOutcome::RejectedCharacters;
        }
        if let Ok(value) = candidate.parse::<f64>() {
            if value > MAX_RENT {
                debug!(candidate, "rent entry rejected: above ceiling");
                return EntryOutcome::RejectedCeiling;
            }
        }
        self.amount.clear();
        self.amount.push_str(candidate);
        EntryOutcome::Accepted
    }

    pub fn push_char(&mut self, c: char) -> EntryOutcome {
        let mut candidate = self.amount.clone();
        candidate.push(c);
        self.offer(&candidate)
    }

    /// Append pasted text as a single edit.
    pub fn push_str(&mut self, text: &str) -> EntryOutcome {
        let candidate = format!("{}{}", self.amount, text);
        self.offer(&candidate)
    }

    pub fn backspace(&mut self) -> EntryOutcome {
        let mut candidate = self.amount.clone();
        candidate.pop();
        self.offer(&candidate)
    }

    pub fn clear(&mut self) {
        self.amount.clear();
    }

    pub fn derive(&self, deposit_weeks: DepositWeeks) -> DerivedAmounts {
        derive(self.value(), self.frequency, deposit_weeks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input_with(amount: &str) -> RentInput {
        let mut input = RentInput::default();
        assert_eq!(input.offer(amount), EntryOutcome::Accepted);
        input
    }

    #[test]
    fn lexeme_accepts_partial_decimals() {
        for ok in ["", "0", "12", "12.", ".5", "12.50", "."] {
            assert!(is_rent_lexeme(ok), "{ok:?} should pass");
        }
    }

    #[test]
    fn lexeme_rejects_everything_else() {
        for bad in ["-1", "1.2.3", "1e5", " 1", "12a", "£5", "1,000", "١٢"] {
            assert!(!is_rent_lexeme(bad), "{bad:?} should fail");
        }
    }

    #[test]
    fn ceiling_is_inclusive() {
        let mut input = RentInput::default();
        assert_eq!(input.offer("99999"), EntryOutcome::Accepted);
        assert_eq!(input.amount(), "99999");
        assert_eq!(input.offer("100000"), EntryOutcome::RejectedCeiling);
        assert_eq!(input.amount(), "99999");
        assert_eq!(input.offer("99999.01"), EntryOutcome::RejectedCeiling);
        assert_eq!(input.amount(), "99999");
    }

    #[test]
    fn typing_past_ceiling_keeps_prior_entry() {
        let mut input = input_with("9999");
        assert_eq!(input.push_char('9'), EntryOutcome::Accepted);
        assert_eq!(input.push_char('9'), EntryOutcome::RejectedCeiling);
        assert_eq!(input.amount(), "99999");
    }

    #[test]
    fn bad_characters_leave_state_unchanged() {
        let mut input = input_with("12.");
        assert_eq!(input.push_char('.'), EntryOutcome::RejectedCharacters);
        assert_eq!(input.push_char('x'), EntryOutcome::RejectedCharacters);
        assert_eq!(input.amount(), "12.");
        assert_eq!(input.value(), 12.0);
    }

    #[test]
    fn paste_is_one_edit() {
        let mut input = input_with("1");
        assert_eq!(input.push_str("250.75"), EntryOutcome::Accepted);
        assert_eq!(input.amount(), "1250.75");
        assert_eq!(input.push_str("5.5"), EntryOutcome::RejectedCharacters);
        assert_eq!(input.amount(), "1250.75");
    }

    #[test]
    fn paste_above_ceiling_is_dropped() {
        let mut input = input_with("5");
        assert_eq!(input.push_str("00000"), EntryOutcome::RejectedCeiling);
        assert_eq!(input.amount(), "5");
    }

    #[test]
    fn backspace_and_clear() {
        let mut input = input_with("42");
        assert!(input.backspace().is_accepted());
        assert_eq!(input.amount(), "4");
        assert!(input.backspace().is_accepted());
        assert!(input.backspace().is_accepted());
        assert!(input.is_empty());
        let mut input = input_with("42");
        input.clear();
        assert!(input.is_empty());
    }

    #[test]
    fn derive_uses_current_entry() {
        let mut input = input_with("2000");
        input.frequency = Frequency::Monthly;
        let amounts = input.derive(DepositWeeks::default());
        assert_eq!(amounts.monthly_rent, 2000.0);
    }
}
