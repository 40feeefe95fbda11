use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use emi_core::currency::{format_indian_currency, format_rupees};
use emi_core::EmiResult;

/// Arguments for Indian-unit currency formatting
#[derive(Args)]
pub struct FormatArgs {
    /// Amounts in rupees
    #[arg(required = true, allow_hyphen_values = true)]
    pub values: Vec<Decimal>,

    /// Prefix the rupee sign
    #[arg(long)]
    pub rupee: bool,
}

#[derive(Debug, Serialize)]
struct Formatted {
    value: Decimal,
    formatted: String,
}

pub fn run_format(args: FormatArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let render: fn(Decimal) -> EmiResult<String> = if args.rupee {
        format_rupees
    } else {
        format_indian_currency
    };

    let mut results = Vec::with_capacity(args.values.len());
    for value in args.values {
        results.push(Formatted {
            value,
            formatted: render(value)?,
        });
    }

    match results.as_slice() {
        [single] => Ok(serde_json::to_value(single)?),
        _ => Ok(serde_json::to_value(results)?),
    }
}
