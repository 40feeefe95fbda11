use clap::Args;
use serde_json::Value;

use emi_core::bounds::InputBounds;
use emi_core::session::{self, QuoteRequest};
use rust_decimal::Decimal;

use crate::input;

/// Arguments for a full house-price quote
#[derive(Args)]
pub struct QuoteArgs {
    /// House price in rupees
    #[arg(long)]
    pub house_price: Option<Decimal>,

    /// Loan-to-value ratio in percent
    #[arg(long, alias = "ltv")]
    pub ratio: Option<Decimal>,

    /// Loan amount in rupees (defaults to house price x ratio)
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_quote(args: QuoteArgs, bounds: &InputBounds) -> Result<Value, Box<dyn std::error::Error>> {
    let request: QuoteRequest = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => QuoteRequest {
            house_price: args.house_price,
            loan_to_value_percent: args.ratio,
            principal: args.principal,
            annual_rate_percent: args.rate,
        },
    };
    let result = session::compute_quote(&request, bounds)?;
    Ok(serde_json::to_value(result)?)
}
