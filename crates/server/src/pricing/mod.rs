//! Pricing and order-number logic.
//!
//! Pure functions shared by the checkout endpoints and the order service:
//! shipping-cost banding by address substring, flat 11% PPN, the COD
//! availability rule, order-number generation, and payment-instruction
//! formatting.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Duration, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use kabelindo_core::{PaymentMethod, format_rupiah};

use crate::config::BankConfig;

/// Hours a bank-transfer order stays payable after placement.
const BANK_TRANSFER_DEADLINE_HOURS: i64 = 24;

/// Shipping bands by city substring (case-insensitive match against the
/// shipping address). Jakarta ships free; anything unmatched falls into the
/// default band. Malformed addresses are not validated here - they simply
/// pay the default rate.
const SHIPPING_BANDS: &[(&str, i64)] = &[
    ("jakarta", 0),
    ("bogor", 25_000),
    ("depok", 25_000),
    ("tangerang", 25_000),
    ("bekasi", 25_000),
    ("bandung", 50_000),
    ("semarang", 75_000),
    ("yogyakarta", 75_000),
    ("surabaya", 75_000),
];

/// Flat shipping cost for addresses outside every band, in rupiah.
const DEFAULT_SHIPPING_COST: i64 = 100_000;

/// PPN (Indonesian VAT) rate: flat 11%.
fn ppn_rate() -> Decimal {
    Decimal::new(11, 2)
}

/// Shipping cost for an address, in whole rupiah.
///
/// Cities are matched as case-insensitive substrings; first matching band
/// wins. Addresses containing "jakarta" ship free.
#[must_use]
pub fn shipping_cost(address: &str) -> Decimal {
    let address = address.to_lowercase();
    for (city, cost) in SHIPPING_BANDS {
        if address.contains(city) {
            return Decimal::from(*cost);
        }
    }
    Decimal::from(DEFAULT_SHIPPING_COST)
}

/// PPN on a subtotal: `round(subtotal * 0.11)`, half away from zero, to
/// whole rupiah.
#[must_use]
pub fn tax(subtotal: Decimal) -> Decimal {
    (subtotal * ppn_rate()).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Whether cash on delivery is available for an address.
///
/// COD is restricted to Jakarta, using the same substring rule as
/// [`shipping_cost`]'s free-shipping band.
#[must_use]
pub fn is_cod_available(address: &str) -> bool {
    address.to_lowercase().contains("jakarta")
}

/// Payment deadline for a bank-transfer order: placement time + 24 hours.
#[must_use]
pub fn bank_transfer_deadline(placed_at: DateTime<Utc>) -> DateTime<Utc> {
    placed_at + Duration::hours(BANK_TRANSFER_DEADLINE_HOURS)
}

/// Process-local order number generator.
///
/// Produces `ORD-` + the last 6 digits of the current millisecond timestamp
/// + a zero-padded counter. The counter resets on restart; the database's
/// unique constraint on `order_number` is the real uniqueness guarantee.
pub struct OrderNumberGenerator {
    counter: AtomicU64,
}

impl OrderNumberGenerator {
    /// Create a generator with the counter at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            counter: AtomicU64::new(0),
        }
    }

    /// Generate the next order number.
    ///
    /// The counter is zero-padded to three digits and keeps growing past
    /// 999 rather than wrapping, so suffixes never repeat within a process.
    #[must_use]
    pub fn next(&self) -> String {
        let seq = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        let ts = Utc::now().timestamp_millis().rem_euclid(1_000_000);
        format!("ORD-{ts:06}{seq:03}")
    }
}

impl Default for OrderNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Payment instructions shown on the order-confirmation page.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentInstructions {
    pub method: PaymentMethod,
    pub total_due: Decimal,
    pub total_due_display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    pub message: String,
}

/// Format payment instructions for an order.
///
/// Bank transfers get the destination account and the 24-hour deadline;
/// COD orders get a pay-the-courier note.
#[must_use]
pub fn payment_instructions(
    method: PaymentMethod,
    order_number: &str,
    total: Decimal,
    deadline: Option<DateTime<Utc>>,
    bank: &BankConfig,
) -> PaymentInstructions {
    let total_display = format_rupiah(total);

    match method {
        PaymentMethod::BankTransfer => PaymentInstructions {
            method,
            total_due: total,
            total_due_display: total_display.clone(),
            deadline,
            bank_name: Some(bank.bank_name.clone()),
            account_number: Some(bank.account_number.clone()),
            account_name: Some(bank.account_name.clone()),
            message: format!(
                "Transfer {total_display} to {} account {} ({}) within 24 hours and quote order {order_number}.",
                bank.bank_name, bank.account_number, bank.account_name
            ),
        },
        PaymentMethod::Cod => PaymentInstructions {
            method,
            total_due: total,
            total_due_display: total_display.clone(),
            deadline: None,
            bank_name: None,
            account_number: None,
            account_name: None,
            message: format!(
                "Pay {total_display} in cash to the courier when order {order_number} arrives."
            ),
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn bank() -> BankConfig {
        BankConfig {
            bank_name: "Bank Nusantara".to_string(),
            account_number: "1234567890".to_string(),
            account_name: "PT Kabelindo Jaya".to_string(),
        }
    }

    #[test]
    fn test_shipping_free_for_jakarta_any_case() {
        assert_eq!(shipping_cost("Jl. Sudirman, Jakarta Pusat"), Decimal::ZERO);
        assert_eq!(shipping_cost("jl. thamrin, JAKARTA"), Decimal::ZERO);
        assert_eq!(shipping_cost("JaKaRtA Selatan"), Decimal::ZERO);
    }

    #[test]
    fn test_shipping_bands() {
        assert_eq!(shipping_cost("Jl. A, Bandung"), Decimal::from(50_000));
        assert_eq!(shipping_cost("Jl. B, Bekasi"), Decimal::from(25_000));
        assert_eq!(shipping_cost("Jl. C, Surabaya"), Decimal::from(75_000));
    }

    #[test]
    fn test_shipping_default_band() {
        assert_eq!(shipping_cost("Jl. D, Makassar"), Decimal::from(100_000));
        // Malformed addresses fall into the default band
        assert_eq!(shipping_cost(""), Decimal::from(100_000));
        assert_eq!(shipping_cost("???"), Decimal::from(100_000));
    }

    #[test]
    fn test_tax_flat_eleven_percent() {
        assert_eq!(tax(Decimal::from(2_500_000)), Decimal::from(275_000));
        assert_eq!(tax(Decimal::ZERO), Decimal::ZERO);
        assert_eq!(tax(Decimal::from(100)), Decimal::from(11));
    }

    #[test]
    fn test_tax_rounds_half_away_from_zero() {
        // 50 * 0.11 = 5.5 -> 6 (Math.round semantics)
        assert_eq!(tax(Decimal::from(50)), Decimal::from(6));
        // 40 * 0.11 = 4.4 -> 4
        assert_eq!(tax(Decimal::from(40)), Decimal::from(4));
    }

    #[test]
    fn test_cod_agrees_with_free_shipping_rule() {
        for address in [
            "Jl. Sudirman, Jakarta Pusat",
            "Jl. A, Bandung",
            "Jl. D, Makassar",
            "",
        ] {
            assert_eq!(
                is_cod_available(address),
                shipping_cost(address) == Decimal::ZERO,
                "COD rule diverged from free-shipping rule for {address:?}"
            );
        }
    }

    #[test]
    fn test_order_number_shape_and_counter() {
        let generator = OrderNumberGenerator::new();
        let first = generator.next();
        let second = generator.next();

        assert!(first.starts_with("ORD-"));
        assert_eq!(first.len(), "ORD-".len() + 9);
        assert!(first.ends_with("001"));
        assert!(second.ends_with("002"));
    }

    #[test]
    fn test_order_number_counter_grows_past_three_digits() {
        let generator = OrderNumberGenerator::new();
        let mut last = String::new();
        for _ in 0..1001 {
            last = generator.next();
        }
        // No wrap back to "001": the 1001st number keeps the full counter.
        assert!(last.ends_with("1001"));
        assert_eq!(last.len(), "ORD-".len() + 10);
    }

    #[test]
    fn test_bank_transfer_deadline_is_24h() {
        let placed = Utc::now();
        assert_eq!(bank_transfer_deadline(placed) - placed, Duration::hours(24));
    }

    #[test]
    fn test_payment_instructions_bank_transfer() {
        let placed = Utc::now();
        let deadline = bank_transfer_deadline(placed);
        let info = payment_instructions(
            PaymentMethod::BankTransfer,
            "ORD-123456001",
            Decimal::from(2_775_000),
            Some(deadline),
            &bank(),
        );

        assert_eq!(info.deadline, Some(deadline));
        assert_eq!(info.bank_name.as_deref(), Some("Bank Nusantara"));
        assert_eq!(info.total_due_display, "Rp 2.775.000");
        assert!(info.message.contains("ORD-123456001"));
    }

    #[test]
    fn test_payment_instructions_cod() {
        let info = payment_instructions(
            PaymentMethod::Cod,
            "ORD-123456002",
            Decimal::from(150_000),
            None,
            &bank(),
        );

        assert!(info.deadline.is_none());
        assert!(info.bank_name.is_none());
        assert!(info.message.contains("courier"));
    }
}
