//! Loan principal and down payment from a house price and loan-to-value ratio.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::EmiError;
use crate::types::{Money, Percent};
use crate::EmiResult;

const HUNDRED: Decimal = dec!(100);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseLoanInput {
    pub house_price: Money,
    /// Share of the price financed by the loan, 0 to 100.
    pub loan_to_value_percent: Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseLoanDerivation {
    pub house_price: Money,
    pub loan_to_value_percent: Percent,
    pub principal: Money,
    pub down_payment: Money,
}

fn validate(house_price: Money, loan_to_value_percent: Percent) -> EmiResult<()> {
    if house_price < Decimal::ZERO {
        return Err(EmiError::invalid("house_price", "House price cannot be negative"));
    }
    if loan_to_value_percent < Decimal::ZERO || loan_to_value_percent > HUNDRED {
        return Err(EmiError::invalid(
            "loan_to_value_percent",
            format!("Loan-to-value ratio {loan_to_value_percent}% must be between 0 and 100"),
        ));
    }
    Ok(())
}

/// `house_price * loan_to_value_percent / 100`.
///
/// The ratio is scaled to a fraction first, so the product never exceeds
/// the house price.
pub fn derive_principal(house_price: Money, loan_to_value_percent: Percent) -> EmiResult<Money> {
    validate(house_price, loan_to_value_percent)?;
    house_price
        .checked_mul(loan_to_value_percent / HUNDRED)
        .ok_or_else(|| EmiError::invalid("house_price", "Loan amount exceeds decimal range"))
}

/// The part of the price not financed: `house_price - principal`.
pub fn down_payment(house_price: Money, loan_to_value_percent: Percent) -> EmiResult<Money> {
    Ok(house_price - derive_principal(house_price, loan_to_value_percent)?)
}

pub fn derive_house_loan(input: &HouseLoanInput) -> EmiResult<HouseLoanDerivation> {
    let principal = derive_principal(input.house_price, input.loan_to_value_percent)?;
    Ok(HouseLoanDerivation {
        house_price: input.house_price,
        loan_to_value_percent: input.loan_to_value_percent,
        principal,
        down_payment: input.house_price - principal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_three_crore_at_eighty_percent() {
        let out = derive_house_loan(&HouseLoanInput {
            house_price: dec!(30_000_000),
            loan_to_value_percent: dec!(80),
        })
        .unwrap();
        assert_eq!(out.principal, dec!(24_000_000));
        assert_eq!(out.down_payment, dec!(6_000_000));
    }

    #[test]
    fn test_full_and_zero_financing() {
        assert_eq!(derive_principal(dec!(20_000_000), dec!(100)).unwrap(), dec!(20_000_000));
        assert_eq!(down_payment(dec!(20_000_000), Decimal::ZERO).unwrap(), dec!(20_000_000));
    }

    #[test]
    fn test_ratio_out_of_range() {
        assert!(derive_principal(dec!(20_000_000), dec!(100.5)).is_err());
        assert!(derive_principal(dec!(20_000_000), dec!(-5)).is_err());
    }

    #[test]
    fn test_huge_price_does_not_overflow() {
        let price = dec!(1_000_000_000_000_000_000_000_000_000);
        assert_eq!(
            derive_principal(price, dec!(80)).unwrap(),
            dec!(800_000_000_000_000_000_000_000_000)
        );
        let out = derive_house_loan(&HouseLoanInput {
            house_price: Decimal::MAX,
            loan_to_value_percent: dec!(80),
        })
        .unwrap();
        assert!(out.principal < Decimal::MAX);
        assert!(out.down_payment > Decimal::ZERO);
    }

    #[test]
    fn test_negative_price() {
        assert!(down_payment(dec!(-1), dec!(80)).is_err());
    }
}
