//! Chart model for "EMI vs Loan Tenure": the series plus labelled y ticks.
//!
//! Drawing is left to the consumer. Ticks sit at every lakh from one lakh up
//! to the largest EMI rounded up to the next lakh, each labelled with
//! `format_indian_currency`. An axis that would need more than `MAX_TICKS`
//! lakh ticks is spaced at ten lakh, then a crore, and so on until it fits.

use log::debug;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::currency::{format_indian_currency, LAKH};
use crate::error::EmiError;
use crate::series::{generate_emi_series, EmiPoint, EmiSeries};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::EmiResult;

pub const CHART_TITLE: &str = "EMI vs Loan Tenure";
pub const X_AXIS_TITLE: &str = "Loan Tenure (Years)";
pub const Y_AXIS_TITLE: &str = "Monthly EMI (₹)";

/// Spacing between y ticks.
pub const TICK_STEP: Money = LAKH;

const TEN: Decimal = dec!(10);

/// Most ticks on one axis before the spacing widens tenfold.
pub const MAX_TICKS: u32 = 1_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub value: Money,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiChart {
    pub title: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub points: Vec<EmiPoint>,
    pub y_ticks: Vec<AxisTick>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartInput {
    pub principal: Money,
    pub annual_rate_percent: Percent,
}

/// Ticks at `k * step` for `k = 1..=ceil(max_emi / step)`, where `step` is
/// `TICK_STEP` widened by powers of ten until at most `MAX_TICKS` remain.
pub fn y_axis_ticks(max_emi: Money) -> EmiResult<Vec<AxisTick>> {
    if max_emi < Decimal::ZERO {
        return Err(EmiError::invalid("max_emi", "Axis maximum cannot be negative"));
    }

    let limit = Decimal::from(MAX_TICKS);
    let mut step = TICK_STEP;
    while (max_emi / step).ceil() > limit {
        step = step
            .checked_mul(TEN)
            .ok_or_else(|| EmiError::invalid("max_emi", "Tick spacing exceeds decimal range"))?;
    }
    if step != TICK_STEP {
        debug!("axis maximum {max_emi} spaced at {step}");
    }

    let count = (max_emi / step).ceil().to_u32().ok_or_else(|| {
        EmiError::invalid("max_emi", format!("Axis maximum {max_emi} needs too many ticks"))
    })?;

    // The tick above a near-maximal EMI may not be representable; stop short.
    (1..=count)
        .map_while(|k| step.checked_mul(Decimal::from(k)))
        .map(|value| -> EmiResult<AxisTick> {
            Ok(AxisTick {
                value,
                label: format_indian_currency(value)?,
            })
        })
        .collect()
}

pub fn build_emi_chart(series: &EmiSeries) -> EmiResult<EmiChart> {
    let max_emi = series.max_emi().unwrap_or(Decimal::ZERO);
    Ok(EmiChart {
        title: CHART_TITLE.into(),
        x_axis_title: X_AXIS_TITLE.into(),
        y_axis_title: Y_AXIS_TITLE.into(),
        points: series.points.clone(),
        y_ticks: y_axis_ticks(max_emi)?,
    })
}

/// Generate the standard series for a loan and chart it.
pub fn chart_emi(input: &ChartInput) -> EmiResult<ComputationOutput<EmiChart>> {
    let start = Instant::now();
    let series = generate_emi_series(input.principal, input.annual_rate_percent)?;
    let chart = build_emi_chart(&series)?;
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "EMI tenure sweep with lakh-spaced axis ticks",
        input,
        Vec::new(),
        elapsed,
        chart,
    ))
}
