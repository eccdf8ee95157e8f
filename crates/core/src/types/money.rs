//! Rupiah display formatting.
//!
//! All money in the system is Indonesian rupiah held as [`Decimal`] with no
//! fractional part (prices and totals are whole rupiah).

use rust_decimal::Decimal;

/// Format a rupiah amount for display, e.g. `Rp 1.500.000`.
///
/// Uses the Indonesian convention of `.` as the thousands separator. Any
/// fractional part is truncated (amounts in this system are whole rupiah).
#[must_use]
pub fn format_rupiah(amount: Decimal) -> String {
    let whole = amount.trunc().to_string();
    let (sign, digits) = whole
        .strip_prefix('-')
        .map_or(("", whole.as_str()), |rest| ("-", rest));

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - offset) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    format!("Rp {sign}{grouped}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_small() {
        assert_eq!(format_rupiah(Decimal::from(0)), "Rp 0");
        assert_eq!(format_rupiah(Decimal::from(999)), "Rp 999");
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_rupiah(Decimal::from(50_000)), "Rp 50.000");
        assert_eq!(format_rupiah(Decimal::from(1_500_000)), "Rp 1.500.000");
        assert_eq!(format_rupiah(Decimal::from(275_000)), "Rp 275.000");
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(format_rupiah(Decimal::from(-25_000)), "Rp -25.000");
    }

    #[test]
    fn test_format_truncates_fraction() {
        assert_eq!(format_rupiah(Decimal::new(12_3455, 1)), "Rp 12.345");
    }
}
