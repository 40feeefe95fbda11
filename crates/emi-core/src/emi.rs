//! Equated Monthly Installment for a fully amortising fixed-rate loan.
//!
//! `EMI = P * r * (1 + r)^n / ((1 + r)^n - 1)`, evaluated as
//! `P * r / (1 - (1 + r)^-n)`, with `r` the monthly rate as
//! a decimal and `n` the tenure in months. No rounding is applied; callers
//! format for display. All math in `rust_decimal::Decimal`.

use log::{debug, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::EmiError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::EmiResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const MONTHS_PER_YEAR: u32 = 12;

/// Annual percentage to monthly decimal: 12 months * 100 percent.
const PERCENT_MONTHS: Decimal = dec!(1200);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A single loan to price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanQuoteInput {
    /// Amount borrowed, in rupees.
    pub principal: Money,
    /// Annual interest rate as a percentage (8.5 = 8.5%).
    pub annual_rate_percent: Percent,
    /// Repayment period in whole years.
    pub tenure_years: u32,
}

/// EMI together with the loan totals it implies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiQuote {
    pub emi: Money,
    pub monthly_rate: Rate,
    pub tenure_months: u32,
    /// EMI * months.
    pub total_payment: Money,
    /// Total payment less principal.
    pub total_interest: Money,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Convert an annual percentage rate to a monthly decimal rate.
pub fn monthly_rate(annual_rate_percent: Percent) -> Rate {
    annual_rate_percent / PERCENT_MONTHS
}

/// Convert a tenure in years to months.
pub fn tenure_months(tenure_years: u32) -> EmiResult<u32> {
    if tenure_years == 0 {
        return Err(EmiError::invalid("tenure_years", "Tenure must be at least 1 year"));
    }
    tenure_years
        .checked_mul(MONTHS_PER_YEAR)
        .ok_or_else(|| EmiError::invalid("tenure_years", "Tenure in months overflows u32"))
}

/// Compute (1 + r)^n by repeated squaring, or None past the decimal range.
fn compound(rate: Rate, n: u32) -> Option<Decimal> {
    let mut base = Decimal::ONE + rate;
    let mut exp = n;
    let mut result = Decimal::ONE;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result.checked_mul(base)?;
        }
        exp >>= 1;
        if exp > 0 {
            base = base.checked_mul(base)?;
        }
    }
    Some(result)
}

/// Monthly payment per unit of principal: `r / (1 - (1 + r)^-n)`.
///
/// Once `(1 + r)^n` leaves the decimal range its reciprocal is below the
/// smallest representable step, so the factor is `r` itself.
fn annuity_factor(r: Rate, n: u32) -> EmiResult<Decimal> {
    let discount = match compound(r, n) {
        Some(growth) => Decimal::ONE / growth,
        None => {
            debug!("(1 + {r})^{n} exceeds decimal range, annuity factor is the rate");
            Decimal::ZERO
        }
    };
    let denominator = Decimal::ONE - discount;
    if denominator.is_zero() {
        return Err(EmiError::DivisionByZero {
            context: "EMI annuity factor".into(),
        });
    }
    Ok(r / denominator)
}

fn overflow(field: &str, what: &str) -> EmiError {
    EmiError::invalid(field, format!("{what} exceeds decimal range"))
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Monthly installment for `principal` borrowed at `annual_rate_percent`
/// over `tenure_years`.
///
/// A rate that is zero, or so small that the monthly rate rounds to zero,
/// yields the straight-line payment `principal / months`.
pub fn calculate_emi(
    principal: Money,
    annual_rate_percent: Percent,
    tenure_years: u32,
) -> EmiResult<Money> {
    if principal <= Decimal::ZERO {
        return Err(EmiError::invalid("principal", "Principal must be positive"));
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(EmiError::invalid(
            "annual_rate_percent",
            "Interest rate cannot be negative",
        ));
    }
    let n = tenure_months(tenure_years)?;
    let r = monthly_rate(annual_rate_percent);

    if r.is_zero() {
        warn!("zero monthly rate for {annual_rate_percent}%, using straight-line payment");
        return Ok(principal / Decimal::from(n));
    }

    let emi = principal
        .checked_mul(annuity_factor(r, n)?)
        .ok_or_else(|| overflow("principal", "EMI"))?;
    debug!("emi principal={principal} rate={annual_rate_percent}% months={n} -> {emi}");
    Ok(emi)
}

/// Price a loan and report the totals it implies.
pub fn quote_emi(input: &LoanQuoteInput) -> EmiResult<ComputationOutput<EmiQuote>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let emi = calculate_emi(input.principal, input.annual_rate_percent, input.tenure_years)?;
    let months = tenure_months(input.tenure_years)?;
    let rate = monthly_rate(input.annual_rate_percent);

    if rate.is_zero() {
        warnings.push("Zero interest rate: EMI is principal divided by months".into());
    }

    let total_payment = emi
        .checked_mul(Decimal::from(months))
        .ok_or_else(|| overflow("principal", "Total payment"))?;
    let quote = EmiQuote {
        emi,
        monthly_rate: rate,
        tenure_months: months,
        total_payment,
        total_interest: total_payment - input.principal,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Closed-form amortising loan payment (EMI)",
        input,
        warnings,
        elapsed,
        quote,
    ))
}
