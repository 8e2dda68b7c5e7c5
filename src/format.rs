/// Currency symbol shown in front of every amount.
pub const POUND: &str = "£";

/// `1234.5` → `£1,234.50`.
pub fn format_currency(amount: f64) -> String {
    format_money(amount, POUND)
}

pub fn format_money(amount: f64, symbol: &str) -> String {
    let fixed = to_fixed_cents(amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}{}.{}", symbol, sign, grouped, fraction)
}

/// Two decimal places, with an exact half-cent rounded up rather than to even.
fn to_fixed_cents(value: f64) -> String {
    let half_cents = value * 200.0;
    let exact = value.mul_add(200.0, -half_cents) == 0.0;
    if exact && half_cents % 2.0 == 1.0 {
        format!("{:.2}", (half_cents + 1.0) / 200.0)
    } else {
        format!("{:.2}", value)
    }
}

/// True when a formatted figure reads as nothing yet entered.
pub fn is_zero_display(text: &str) -> bool {
    text.strip_prefix(POUND)
        .map(|rest| rest == "0.00" || rest == "0")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserts_thousands_separators() {
        assert_eq!(format_currency(1234.5), "£1,234.50");
        assert_eq!(format_currency(99_999.0), "£99,999.00");
        assert_eq!(format_currency(1_000_000.0), "£1,000,000.00");
        assert_eq!(format_currency(433_329.0), "£433,329.00");
    }

    #[test]
    fn small_amounts_have_no_separator() {
        assert_eq!(format_currency(0.0), "£0.00");
        assert_eq!(format_currency(7.1), "£7.10");
        assert_eq!(format_currency(999.999), "£1,000.00");
        assert_eq!(format_currency(100.0), "£100.00");
    }

    #[test]
    fn rounds_to_two_places() {
        assert_eq!(format_currency(1000.0 * 52.0 / 12.0), "£4,333.33");
        assert_eq!(format_currency(1000.0 * 52.0 / 12.0 * 0.05), "£216.67");
        assert_eq!(format_currency(3.0 * 2000.0 * 12.0 / 52.0), "£1,384.62");
    }

    #[test]
    fn exact_half_cent_rounds_up() {
        assert_eq!(format_currency(1000.125), "£1,000.13");
        assert_eq!(format_currency(0.125), "£0.13");
        assert_eq!(format_currency(0.625), "£0.63");
        assert_eq!(format_currency(2.875), "£2.88");
        assert_eq!(format_money(-0.125, POUND), "£-0.13");
    }

    #[test]
    fn inexact_half_cent_follows_stored_value() {
        // 1.005 is stored just below the half cent.
        assert_eq!(format_currency(1.005), "£1.00");
        assert_eq!(format_currency(0.125 + 1e-12), "£0.13");
    }

    #[test]
    fn custom_symbol() {
        assert_eq!(format_money(2500.0, "$"), "$2,500.00");
    }

    #[test]
    fn negative_sign_follows_symbol() {
        assert_eq!(format_money(-1234.5, POUND), "£-1,234.50");
        assert_eq!(format_money(-0.001, POUND), "£0.00");
    }

    #[test]
    fn zero_display_detection() {
        assert!(is_zero_display("£0.00"));
        assert!(is_zero_display("£0"));
        assert!(!is_zero_display("£0.01"));
        assert!(!is_zero_display("0.00"));
    }
}
