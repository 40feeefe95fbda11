//! One interactive recomputation: inputs in, everything a front end shows out.
//!
//! Front ends call `compute_quote` with the current control values on every
//! change. Nothing is retained between calls.

use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::bounds::{InputBounds, InputRange};
use crate::chart::{build_emi_chart, EmiChart};
use crate::currency::format_rupees;
use crate::error::EmiError;
use crate::housing::{derive_house_loan, HouseLoanDerivation, HouseLoanInput};
use crate::series::{generate_emi_series, EmiSeries};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::EmiResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Raw control values. Missing values take the bound defaults; a missing
/// principal is derived from house price and loan-to-value ratio.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteRequest {
    pub house_price: Option<Money>,
    pub loan_to_value_percent: Option<Percent>,
    pub principal: Option<Money>,
    pub annual_rate_percent: Option<Percent>,
}

/// Control values after defaults and clamping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteInputs {
    pub house_price: Money,
    pub loan_to_value_percent: Percent,
    pub principal: Money,
    pub annual_rate_percent: Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteReport {
    pub inputs: QuoteInputs,
    pub house_loan: HouseLoanDerivation,
    pub series: EmiSeries,
    pub chart: EmiChart,
    /// Property lines: down payment and derived loan amount.
    pub sidebar: Vec<String>,
    /// Headline lines: price and ratio, then loan amount and rate.
    pub summary: Vec<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Pick the value for a setting shown by more than one control.
///
/// The first candidate that differs from `previous` is the one the user just
/// changed; if none differs, `previous` stands.
pub fn merge_last_changed(previous: Decimal, candidates: &[Decimal]) -> Decimal {
    candidates
        .iter()
        .copied()
        .find(|c| *c != previous)
        .unwrap_or(previous)
}

/// Settle one control value: the request, else a value derived from other
/// inputs, else the configured default.
///
/// Requested and default values are clamped and snapped to the step grid. A
/// derived value is only bounded, since no control produced it.
fn resolve(
    field: &str,
    requested: Option<Decimal>,
    derived: Option<Decimal>,
    range: &InputRange,
    warnings: &mut Vec<String>,
) -> EmiResult<Decimal> {
    let (value, settled) = match (requested, derived) {
        (Some(v), _) => (v, range.clamp(v)),
        (None, Some(v)) => (v, range.bound(v)),
        (None, None) => {
            let v = range.default.ok_or_else(|| {
                EmiError::invalid(field, "No value supplied and no default configured")
            })?;
            (v, range.clamp(v))
        }
    };

    if settled != value {
        let why = if range.contains(value) {
            "snapped to step"
        } else {
            "out of range"
        };
        warn!("{field} {value} {why}, using {settled}");
        warnings.push(format!("{field} {value} {why}; using {settled}"));
    }
    Ok(settled)
}

/// Percentage for display, keeping at least one decimal: 9 reads "9.0".
fn rate_label(rate: Percent) -> String {
    let rate = rate.normalize();
    if rate.scale() == 0 {
        format!("{rate:.1}")
    } else {
        rate.to_string()
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn compute_quote(
    request: &QuoteRequest,
    bounds: &InputBounds,
) -> EmiResult<ComputationOutput<QuoteReport>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    bounds.validate()?;

    let house_price = resolve(
        "house_price",
        request.house_price,
        None,
        &bounds.house_price,
        &mut warnings,
    )?;
    let loan_to_value_percent = resolve(
        "loan_to_value_percent",
        request.loan_to_value_percent,
        None,
        &bounds.loan_to_value_percent,
        &mut warnings,
    )?;

    let house_loan = derive_house_loan(&HouseLoanInput {
        house_price,
        loan_to_value_percent,
    })?;

    let principal = resolve(
        "principal",
        request.principal,
        Some(house_loan.principal),
        &bounds.principal,
        &mut warnings,
    )?;
    let annual_rate_percent = resolve(
        "annual_rate_percent",
        request.annual_rate_percent,
        None,
        &bounds.annual_rate_percent,
        &mut warnings,
    )?;

    let series = generate_emi_series(principal, annual_rate_percent)?;
    let chart = build_emi_chart(&series)?;

    let sidebar = vec![
        format!("Down Payment : {}", format_rupees(house_loan.down_payment)?),
        format!(
            "Calculated Loan Amount: {}",
            format_rupees(house_loan.principal)?
        ),
    ];
    let summary = vec![
        format!(
            "House Price: {}, Loan-to-House Price Ratio: {}%",
            format_rupees(house_price)?,
            loan_to_value_percent.normalize()
        ),
        format!(
            "Loan Amount: {}, Annual Interest Rate: {}%",
            format_rupees(principal)?,
            rate_label(annual_rate_percent)
        ),
    ];

    let inputs = QuoteInputs {
        house_price,
        loan_to_value_percent,
        principal,
        annual_rate_percent,
    };
    debug!("quote inputs {inputs:?}");

    let report = QuoteReport {
        inputs,
        house_loan,
        series,
        chart,
        sidebar,
        summary,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "House-price EMI quote: LTV-derived principal, tenure sweep 2-30 years",
        request,
        warnings,
        elapsed,
        report,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_merge_prefers_changed_control() {
        assert_eq!(merge_last_changed(dec!(8.5), &[dec!(8.5), dec!(9.1)]), dec!(9.1));
        assert_eq!(merge_last_changed(dec!(8.5), &[dec!(7.0), dec!(8.5)]), dec!(7.0));
    }

    #[test]
    fn test_merge_keeps_previous_when_unchanged() {
        assert_eq!(merge_last_changed(dec!(8.5), &[dec!(8.5), dec!(8.5)]), dec!(8.5));
        assert_eq!(merge_last_changed(dec!(8.5), &[]), dec!(8.5));
    }

    #[test]
    fn test_defaults_produce_reference_quote() {
        let out = compute_quote(&QuoteRequest::default(), &InputBounds::default()).unwrap();
        let r = out.result;
        assert_eq!(
            r.inputs,
            QuoteInputs {
                house_price: dec!(30_000_000),
                loan_to_value_percent: dec!(80),
                principal: dec!(24_000_000),
                annual_rate_percent: dec!(8.5),
            }
        );
        assert_eq!(r.house_loan.down_payment, dec!(6_000_000));
        assert_eq!(r.series.len(), 29);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_summary_lines() {
        let out = compute_quote(&QuoteRequest::default(), &InputBounds::default()).unwrap();
        let r = out.result;
        assert_eq!(
            r.sidebar,
            vec![
                "Down Payment : ₹60.00 L".to_string(),
                "Calculated Loan Amount: ₹2.40 Cr".to_string(),
            ]
        );
        assert_eq!(
            r.summary,
            vec![
                "House Price: ₹3.00 Cr, Loan-to-House Price Ratio: 80%".to_string(),
                "Loan Amount: ₹2.40 Cr, Annual Interest Rate: 8.5%".to_string(),
            ]
        );
    }

    #[test]
    fn test_explicit_principal_overrides_derived() {
        let req = QuoteRequest {
            principal: Some(dec!(10_000_000)),
            ..Default::default()
        };
        let out = compute_quote(&req, &InputBounds::default()).unwrap();
        assert_eq!(out.result.inputs.principal, dec!(10_000_000));
        assert_eq!(out.result.house_loan.principal, dec!(24_000_000));
    }

    #[test]
    fn test_out_of_range_inputs_are_clamped_with_warnings() {
        let req = QuoteRequest {
            house_price: Some(dec!(1_000)),
            loan_to_value_percent: Some(dec!(10)),
            principal: None,
            annual_rate_percent: Some(dec!(0)),
        };
        let out = compute_quote(&req, &InputBounds::default()).unwrap();
        let inputs = &out.result.inputs;
        assert_eq!(inputs.house_price, dec!(20_000_000));
        // 10% of 2 Cr is 20 L, below the 50 L floor
        assert_eq!(inputs.principal, dec!(5_000_000));
        assert_eq!(inputs.annual_rate_percent, dec!(5.0));
        assert_eq!(out.warnings.len(), 3);
    }

    #[test]
    fn test_derived_principal_is_not_snapped() {
        let req = QuoteRequest {
            house_price: Some(dec!(22_000_000)),
            loan_to_value_percent: Some(dec!(85)),
            ..Default::default()
        };
        let out = compute_quote(&req, &InputBounds::default()).unwrap();
        assert_eq!(out.result.house_loan.principal, dec!(18_700_000));
        assert_eq!(out.result.inputs.principal, dec!(18_700_000));
        assert!(out.warnings.is_empty());
        assert_eq!(out.result.summary[1], "Loan Amount: ₹1.87 Cr, Annual Interest Rate: 8.5%");
    }

    #[test]
    fn test_whole_rate_keeps_one_decimal() {
        let req = QuoteRequest {
            annual_rate_percent: Some(dec!(9)),
            ..Default::default()
        };
        let out = compute_quote(&req, &InputBounds::default()).unwrap();
        assert_eq!(
            out.result.summary[1],
            "Loan Amount: ₹2.40 Cr, Annual Interest Rate: 9.0%"
        );
        assert_eq!(rate_label(dec!(8.50)), "8.5");
        assert_eq!(rate_label(dec!(12.00)), "12.0");
    }

    #[test]
    fn test_missing_default_without_fallback_errors() {
        let mut bounds = InputBounds::default();
        bounds.annual_rate_percent.default = None;
        assert!(compute_quote(&QuoteRequest::default(), &bounds).is_err());
    }
}
