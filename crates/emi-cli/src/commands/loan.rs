use clap::Args;
use serde_json::Value;

use emi_core::chart::{self, ChartInput};
use emi_core::emi::{self, LoanQuoteInput};
use emi_core::series::{self, SeriesInput};
use rust_decimal::Decimal;

use crate::input;

/// Arguments for a single EMI calculation
#[derive(Args)]
pub struct EmiArgs {
    /// Loan amount in rupees
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 8.5)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan tenure in years
    #[arg(long)]
    pub tenure: Option<u32>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the EMI-by-tenure sweep
#[derive(Args)]
pub struct SeriesArgs {
    /// Loan amount in rupees
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Shortest tenure in years
    #[arg(long)]
    pub min_tenure: Option<u32>,

    /// Longest tenure in years
    #[arg(long)]
    pub max_tenure: Option<u32>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the EMI vs tenure chart model
#[derive(Args)]
pub struct ChartArgs {
    /// Loan amount in rupees
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_emi(args: EmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan: LoanQuoteInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => LoanQuoteInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_percent: args.rate.ok_or("--rate is required (or provide --input)")?,
            tenure_years: args.tenure.ok_or("--tenure is required (or provide --input)")?,
        },
    };
    let result = emi::quote_emi(&loan)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_series(args: SeriesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let series_input: SeriesInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => SeriesInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_percent: args.rate.ok_or("--rate is required (or provide --input)")?,
            min_tenure_years: args.min_tenure,
            max_tenure_years: args.max_tenure,
        },
    };
    let result = series::analyze_emi_series(&series_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_chart(args: ChartArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let chart_input: ChartInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => ChartInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_percent: args.rate.ok_or("--rate is required (or provide --input)")?,
        },
    };
    let result = chart::chart_emi(&chart_input)?;
    Ok(serde_json::to_value(result)?)
}
