//! Indian-numbering currency labels: thousands (K), lakhs (L), crores (Cr).

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::error::EmiError;
use crate::types::Money;
use crate::EmiResult;

pub const THOUSAND: Decimal = dec!(1_000);
/// ₹1,00,000
pub const LAKH: Decimal = dec!(100_000);
/// ₹1,00,00,000
pub const CRORE: Decimal = dec!(10_000_000);

pub const RUPEE_SIGN: &str = "₹";

/// Scale `value` into crores, lakhs or thousands with two decimals,
/// e.g. `12_500_000` becomes `"1.25 Cr"`. Halves round away from zero.
///
/// Negative values are rejected.
pub fn format_indian_currency(value: Money) -> EmiResult<String> {
    if value < Decimal::ZERO {
        return Err(EmiError::invalid(
            "value",
            format!("Cannot format negative amount {value}"),
        ));
    }

    let (unit, suffix) = if value >= CRORE {
        (CRORE, "Cr")
    } else if value >= LAKH {
        (LAKH, "L")
    } else {
        (THOUSAND, "K")
    };

    let scaled = (value / unit).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    Ok(format!("{scaled:.2} {suffix}"))
}

/// `format_indian_currency` with a leading rupee sign.
pub fn format_rupees(value: Money) -> EmiResult<String> {
    Ok(format!("{RUPEE_SIGN}{}", format_indian_currency(value)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crores() {
        assert_eq!(format_indian_currency(dec!(12_500_000)).unwrap(), "1.25 Cr");
        assert_eq!(format_indian_currency(dec!(30_000_000)).unwrap(), "3.00 Cr");
    }

    #[test]
    fn test_lakhs() {
        assert_eq!(format_indian_currency(dec!(250_000)).unwrap(), "2.50 L");
        assert_eq!(format_indian_currency(dec!(6_000_000)).unwrap(), "60.00 L");
    }

    #[test]
    fn test_thousands() {
        assert_eq!(format_indian_currency(dec!(5_000)).unwrap(), "5.00 K");
        assert_eq!(format_indian_currency(dec!(20827.7576)).unwrap(), "20.83 K");
        assert_eq!(format_indian_currency(Decimal::ZERO).unwrap(), "0.00 K");
    }

    #[test]
    fn test_halves_round_up() {
        assert_eq!(format_indian_currency(dec!(12_345)).unwrap(), "12.35 K");
        assert_eq!(format_indian_currency(dec!(1_125)).unwrap(), "1.13 K");
        assert_eq!(format_indian_currency(dec!(112_500)).unwrap(), "1.13 L");
    }

    #[test]
    fn test_thresholds_are_inclusive() {
        assert_eq!(format_indian_currency(CRORE).unwrap(), "1.00 Cr");
        assert_eq!(format_indian_currency(LAKH).unwrap(), "1.00 L");
        assert_eq!(format_indian_currency(dec!(99_999)).unwrap(), "100.00 K");
    }

    #[test]
    fn test_negative_rejected() {
        assert!(matches!(
            format_indian_currency(dec!(-1)),
            Err(EmiError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_rupee_prefix() {
        assert_eq!(format_rupees(dec!(24_000_000)).unwrap(), "₹2.40 Cr");
    }
}
