mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use commands::mortgage::MortgageArgs;
use commands::paydown::PaydownArgs;
use commands::refinance::RefinanceArgs;
use commands::schedule::ScheduleArgs;
use mortgage_calc_core::MortgageError;

/// Fixed-rate mortgage, refinance and paydown calculations
#[derive(Parser)]
#[command(
    name = "mortcalc",
    version,
    about = "Fixed-rate mortgage, refinance and paydown calculations",
    long_about = "A CLI for fixed-rate mortgage calculations with decimal precision. \
                  Supports monthly payment with escrow, amortization schedules, \
                  refinance break-even comparison and accelerated paydown projection."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log calculation details to stderr (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Monthly payment, total interest and yearly breakdown for one mortgage
    Mortgage(MortgageArgs),
    /// Compare the current loan with a refinance
    Refinance(RefinanceArgs),
    /// Project savings from extra monthly payments and annual lump sums
    Paydown(PaydownArgs),
    /// Print the amortization schedule rows
    Schedule(ScheduleArgs),
    /// Print version information
    Version,
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Mortgage(_) => "mortgage",
            Commands::Refinance(_) => "refinance",
            Commands::Paydown(_) => "paydown",
            Commands::Schedule(_) => "schedule",
            Commands::Version => "version",
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    debug!(command = cli.command.name(), output = ?cli.output, "dispatching");
    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Mortgage(args) => commands::mortgage::run_mortgage(args),
        Commands::Refinance(args) => commands::refinance::run_refinance(args),
        Commands::Paydown(args) => commands::paydown::run_paydown(args),
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::Version => {
            println!("mortcalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            report_error(e.as_ref());
            process::exit(1);
        }
    }
}

/// Validation failures list every violated field on its own line.
fn report_error(e: &(dyn std::error::Error + 'static)) {
    match e.downcast_ref::<MortgageError>() {
        Some(MortgageError::Validation(errors)) => {
            eprintln!("{}: invalid input", "error".red().bold());
            for err in errors {
                eprintln!("  - {}: {}", err.field.yellow(), err.reason);
            }
        }
        _ => eprintln!("{}: {}", "error".red().bold(), e),
    }
}
