use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use std::str::FromStr;

use emi_core::bounds::InputBounds;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_decimal(field: &str, raw: &str) -> NapiResult<Decimal> {
    Decimal::from_str(raw.trim())
        .map_err(|e| to_napi_error(format!("{field}: '{raw}' is not a decimal ({e})")))
}

// ---------------------------------------------------------------------------
// EMI
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_emi(input_json: String) -> NapiResult<String> {
    let input: emi_core::emi::LoanQuoteInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = emi_core::emi::quote_emi(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn generate_emi_series(input_json: String) -> NapiResult<String> {
    let input: emi_core::series::SeriesInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = emi_core::series::analyze_emi_series(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// House loan and formatting
// ---------------------------------------------------------------------------

#[napi]
pub fn derive_house_loan(input_json: String) -> NapiResult<String> {
    let input: emi_core::housing::HouseLoanInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = emi_core::housing::derive_house_loan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Decimal string in, label such as "1.25 Cr" out.
#[napi]
pub fn format_indian_currency(value: String) -> NapiResult<String> {
    let amount = parse_decimal("value", &value)?;
    emi_core::currency::format_indian_currency(amount).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Chart and full quote
// ---------------------------------------------------------------------------

#[napi]
pub fn build_chart(input_json: String) -> NapiResult<String> {
    let input: emi_core::chart::ChartInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = emi_core::chart::chart_emi(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// `bounds_json` may be omitted to use the standard input ranges.
#[napi]
pub fn compute_quote(request_json: String, bounds_json: Option<String>) -> NapiResult<String> {
    let request: emi_core::session::QuoteRequest =
        serde_json::from_str(&request_json).map_err(to_napi_error)?;
    let bounds: InputBounds = match bounds_json {
        Some(raw) => serde_json::from_str(&raw).map_err(to_napi_error)?,
        None => InputBounds::default(),
    };
    let output = emi_core::session::compute_quote(&request, &bounds).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Resolve two controls bound to one setting; see `merge_last_changed`.
#[napi]
pub fn merge_last_changed(previous: String, candidates: Vec<String>) -> NapiResult<String> {
    let previous = parse_decimal("previous", &previous)?;
    let candidates = candidates
        .iter()
        .map(|c| parse_decimal("candidates", c))
        .collect::<NapiResult<Vec<_>>>()?;
    Ok(emi_core::session::merge_last_changed(previous, &candidates).to_string())
}
