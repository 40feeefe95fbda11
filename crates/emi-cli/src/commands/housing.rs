use clap::Args;
use serde_json::Value;

use emi_core::housing::{self, HouseLoanInput};
use rust_decimal::Decimal;

use crate::input;

/// Arguments for deriving a loan from a house price
#[derive(Args)]
pub struct HouseLoanArgs {
    /// House price in rupees
    #[arg(long)]
    pub house_price: Option<Decimal>,

    /// Loan-to-value ratio in percent (0 to 100)
    #[arg(long, alias = "ltv")]
    pub ratio: Option<Decimal>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_house_loan(args: HouseLoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let house: HouseLoanInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => HouseLoanInput {
            house_price: args
                .house_price
                .ok_or("--house-price is required (or provide --input)")?,
            loan_to_value_percent: args.ratio.ok_or("--ratio is required (or provide --input)")?,
        },
    };
    let result = housing::derive_house_loan(&house)?;
    Ok(serde_json::to_value(result)?)
}
