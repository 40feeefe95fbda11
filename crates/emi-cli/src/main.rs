mod commands;
mod config;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde::Deserialize;
use std::process;

use commands::currency::FormatArgs;
use commands::housing::HouseLoanArgs;
use commands::loan::{ChartArgs, EmiArgs, SeriesArgs};
use commands::quote::QuoteArgs;

/// Home-loan EMI explorer
#[derive(Parser)]
#[command(
    name = "emi",
    version,
    about = "Home-loan EMI calculations",
    long_about = "Compute the Equated Monthly Installment for a home loan with decimal \
                  precision, sweep it across tenures of 2 to 30 years, derive the loan \
                  from a house price and loan-to-value ratio, and label amounts in \
                  lakhs and crores. Set RUST_LOG=debug for diagnostics on stderr."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (defaults to the config file's, then json)
    #[arg(long, global = true)]
    output: Option<OutputFormat>,

    /// Path to a TOML config file (default: ./emi.toml if present)
    #[arg(long, global = true)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Monthly installment for one principal, rate and tenure
    Emi(EmiArgs),
    /// EMI for every tenure from 2 to 30 years
    Series(SeriesArgs),
    /// Loan amount and down payment from house price and LTV ratio
    HouseLoan(HouseLoanArgs),
    /// Format amounts as thousands, lakhs or crores
    Format(FormatArgs),
    /// EMI vs tenure chart model with lakh-spaced axis ticks
    Chart(ChartArgs),
    /// Full quote: derived loan, clamped inputs, series, chart and summary
    Quote(QuoteArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let cfg = match config::load(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Emi(args) => commands::loan::run_emi(args),
        Commands::Series(args) => commands::loan::run_series(args),
        Commands::HouseLoan(args) => commands::housing::run_house_loan(args),
        Commands::Format(args) => commands::currency::run_format(args),
        Commands::Chart(args) => commands::loan::run_chart(args),
        Commands::Quote(args) => commands::quote::run_quote(args, &cfg.bounds),
        Commands::Version => {
            println!("emi {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    let format = cli.output.or(cfg.output).unwrap_or(OutputFormat::Json);

    match result {
        Ok(value) => {
            output::format_output(&format, &value);
            process::exit(0);
        }
        Err(e) => {
            log::debug!("command failed: {e:?}");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
