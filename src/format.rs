//! Number and money formatting shared by the CLI and the dashboard

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Format a number with thousand separators (e.g., 1234567 -> "1,234,567")
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let len = s.len();
    let mut result = String::with_capacity(len + len / 3);

    // Digits are ASCII, so byte indexing is safe
    for (i, ch) in s.bytes().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(ch as char);
    }

    result
}

/// Currency amount with two decimals, e.g. "₱1,250.50"
pub fn format_money(amount: Decimal, currency: &str) -> String {
    let rounded = amount
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .abs();
    let whole = rounded.trunc().to_u64().unwrap_or(u64::MAX);
    let cents = (rounded.fract() * Decimal::ONE_HUNDRED)
        .to_u64()
        .unwrap_or_default();
    let sign = if amount.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{}{}.{:02}", sign, currency, format_number(whole), cents)
}

/// Bar length proportional to `max`; any positive value gets at least one cell
pub fn bar_len(value: Decimal, max: Decimal, width: usize) -> usize {
    if max <= Decimal::ZERO || value <= Decimal::ZERO || width == 0 {
        return 0;
    }
    let cells = (value / max * Decimal::from(width))
        .round()
        .to_usize()
        .unwrap_or(width);
    cells.clamp(1, width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(Decimal::new(125050, 2), "₱"), "₱1,250.50");
        assert_eq!(format_money(Decimal::ZERO, "₱"), "₱0.00");
        assert_eq!(format_money(Decimal::from(3), "$"), "$3.00");
    }

    #[test]
    fn test_format_money_rounds_half_up() {
        assert_eq!(format_money(Decimal::new(10005, 3), "₱"), "₱10.01");
        assert_eq!(format_money(Decimal::new(10004, 3), "₱"), "₱10.00");
    }

    #[test]
    fn test_format_money_negative() {
        assert_eq!(format_money(Decimal::new(-550, 2), "₱"), "-₱5.50");
    }

    #[test]
    fn test_bar_len() {
        assert_eq!(bar_len(Decimal::ZERO, Decimal::from(10), 20), 0);
        assert_eq!(bar_len(Decimal::from(10), Decimal::ZERO, 20), 0);
        assert_eq!(bar_len(Decimal::from(10), Decimal::from(10), 20), 20);
        assert_eq!(bar_len(Decimal::from(5), Decimal::from(10), 20), 10);
        assert_eq!(bar_len(Decimal::new(1, 2), Decimal::from(1000), 20), 1);
    }
}
