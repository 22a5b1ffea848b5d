mod commands;
mod config;
mod input;
mod output;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing::Level;

use commands::payslip::PayslipArgs;
use commands::salary::{BreakdownArgs, ValidateArgs};

/// Salary breakdowns and payslips for the HR system
#[derive(Parser)]
#[command(
    name = "hrpay",
    version,
    about = "Salary breakdowns and payslips",
    long_about = "Derives a full salary structure (basic, HRA, allowances, bonus, PF) \
                  from a monthly wage and configurable percentages, validates it for \
                  saving, and renders prorated payslips."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log verbosity on stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive every salary component from a monthly wage
    Breakdown(BreakdownArgs),
    /// Check a salary form before saving and print the save payload
    Validate(ValidateArgs),
    /// Generate a payslip for one pay period
    Payslip(PayslipArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Breakdown(args) => commands::salary::run_breakdown(args),
        Commands::Validate(args) => commands::salary::run_validate(args),
        Commands::Payslip(args) => commands::payslip::run_payslip(args),
        Commands::Version => {
            println!("hrpay {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
