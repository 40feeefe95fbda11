//! EMI across a sweep of tenures, the data behind an "EMI vs tenure" chart.

use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::time::Instant;

use crate::emi::calculate_emi;
use crate::error::EmiError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::EmiResult;

/// Shortest tenure on the standard sweep.
pub const MIN_TENURE_YEARS: u32 = 2;
/// Longest tenure on the standard sweep.
pub const MAX_TENURE_YEARS: u32 = 30;

/// One point on the sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmiPoint {
    pub tenure_years: u32,
    pub emi: Money,
}

/// EMI per tenure, ascending by tenure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmiSeries {
    pub points: Vec<EmiPoint>,
}

impl EmiSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Tenures in order (the x axis).
    pub fn tenures(&self) -> Vec<u32> {
        self.points.iter().map(|p| p.tenure_years).collect()
    }

    /// EMIs in tenure order (the y axis).
    pub fn emis(&self) -> Vec<Money> {
        self.points.iter().map(|p| p.emi).collect()
    }

    /// Largest EMI, which is the one for the shortest tenure.
    pub fn max_emi(&self) -> Option<Money> {
        self.points.iter().map(|p| p.emi).max()
    }
}

/// Input for `analyze_emi_series`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesInput {
    pub principal: Money,
    pub annual_rate_percent: Percent,
    /// Defaults to `MIN_TENURE_YEARS`.
    #[serde(default)]
    pub min_tenure_years: Option<u32>,
    /// Defaults to `MAX_TENURE_YEARS`.
    #[serde(default)]
    pub max_tenure_years: Option<u32>,
}

/// EMI for every tenure from 2 to 30 years inclusive (29 points).
pub fn generate_emi_series(principal: Money, annual_rate_percent: Percent) -> EmiResult<EmiSeries> {
    generate_emi_series_over(
        principal,
        annual_rate_percent,
        MIN_TENURE_YEARS..=MAX_TENURE_YEARS,
    )
}

/// EMI for every tenure in `tenures`.
pub fn generate_emi_series_over(
    principal: Money,
    annual_rate_percent: Percent,
    tenures: RangeInclusive<u32>,
) -> EmiResult<EmiSeries> {
    if tenures.is_empty() {
        return Err(EmiError::invalid(
            "tenures",
            format!(
                "Tenure range {}..={} is empty",
                tenures.start(),
                tenures.end()
            ),
        ));
    }
    if *tenures.start() == 0 {
        return Err(EmiError::invalid("tenures", "Tenure range must start at 1 year or later"));
    }

    let points = tenures
        .map(|tenure_years| {
            calculate_emi(principal, annual_rate_percent, tenure_years)
                .map(|emi| EmiPoint { tenure_years, emi })
        })
        .collect::<EmiResult<Vec<_>>>()?;

    debug!("generated {} EMI points", points.len());
    Ok(EmiSeries { points })
}

/// Sweep tenures and wrap the series in the standard envelope.
pub fn analyze_emi_series(input: &SeriesInput) -> EmiResult<ComputationOutput<EmiSeries>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let lo = input.min_tenure_years.unwrap_or(MIN_TENURE_YEARS);
    let hi = input.max_tenure_years.unwrap_or(MAX_TENURE_YEARS);
    let series = generate_emi_series_over(input.principal, input.annual_rate_percent, lo..=hi)?;

    if input.annual_rate_percent == Decimal::ZERO {
        warnings.push("Zero interest rate: each EMI is principal divided by months".into());
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "EMI tenure sweep (closed-form amortising payment per tenure)",
        input,
        warnings,
        elapsed,
        series,
    ))
}
