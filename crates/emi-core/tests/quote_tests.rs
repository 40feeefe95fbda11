#![cfg(feature = "session")]

use emi_core::bounds::{InputBounds, InputRange};
use emi_core::chart::{y_axis_ticks, X_AXIS_TITLE, Y_AXIS_TITLE};
use emi_core::series::generate_emi_series;
use emi_core::session::{compute_quote, merge_last_changed, QuoteRequest};
use pretty_assertions::assert_eq;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;

// ===========================================================================
// Full recomputation per interaction
// ===========================================================================

#[test]
fn test_quote_chart_matches_series() {
    let out = compute_quote(&QuoteRequest::default(), &InputBounds::default()).unwrap();
    let report = out.result;
    let series = generate_emi_series(dec!(24_000_000), dec!(8.5)).unwrap();
    assert_eq!(report.series, series);
    assert_eq!(report.chart.points, series.points);
    assert_eq!(report.chart.x_axis_title, X_AXIS_TITLE);
    assert_eq!(report.chart.y_axis_title, Y_AXIS_TITLE);
}

#[test]
fn test_ticks_cover_max_emi() {
    let out = compute_quote(
        &QuoteRequest {
            house_price: Some(dec!(100_000_000)),
            loan_to_value_percent: Some(dec!(100)),
            principal: None,
            annual_rate_percent: Some(dec!(15)),
        },
        &InputBounds::default(),
    )
    .unwrap();
    let report = out.result;
    let max = report.series.max_emi().unwrap();
    let top = report.chart.y_ticks.last().unwrap().value;
    assert!(top >= max);
    assert!(top - max < dec!(100_000));
    assert_eq!(
        report.chart.y_ticks.len(),
        (max / dec!(100_000)).ceil().to_usize().unwrap()
    );
}

#[test]
fn test_tick_labels_use_indian_units() {
    let labels: Vec<String> = y_axis_ticks(dec!(450_000))
        .unwrap()
        .into_iter()
        .map(|t| t.label)
        .collect();
    assert_eq!(labels, vec!["1.00 L", "2.00 L", "3.00 L", "4.00 L", "5.00 L"]);
}

#[test]
fn test_recomputation_is_independent() {
    let bounds = InputBounds::default();
    let first = compute_quote(
        &QuoteRequest {
            annual_rate_percent: Some(dec!(12)),
            ..Default::default()
        },
        &bounds,
    )
    .unwrap();
    let again = compute_quote(&QuoteRequest::default(), &bounds).unwrap();
    let fresh = compute_quote(&QuoteRequest::default(), &bounds).unwrap();
    assert_eq!(first.result.inputs.annual_rate_percent, dec!(12));
    assert_eq!(again.result.series, fresh.result.series);
}

#[test]
fn test_custom_bounds_apply() {
    let mut bounds = InputBounds::default();
    bounds.annual_rate_percent = InputRange::new(dec!(1), dec!(20), dec!(0.25), Some(dec!(7)));
    let out = compute_quote(
        &QuoteRequest {
            annual_rate_percent: Some(dec!(18.1)),
            ..Default::default()
        },
        &bounds,
    )
    .unwrap();
    assert_eq!(out.result.inputs.annual_rate_percent, dec!(18));
    assert_eq!(out.warnings.len(), 1);
}

#[test]
fn test_slider_and_number_input_merge() {
    let previous = dec!(8.5);
    let number_input = dec!(8.5);
    let slider = dec!(10.2);
    let rate = merge_last_changed(previous, &[slider, number_input]);
    let out = compute_quote(
        &QuoteRequest {
            annual_rate_percent: Some(rate),
            ..Default::default()
        },
        &InputBounds::default(),
    )
    .unwrap();
    assert_eq!(out.result.inputs.annual_rate_percent, dec!(10.2));
}
