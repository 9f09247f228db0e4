use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use mortgage_calc_core::amortization::{chart, schedule};
use mortgage_calc_core::mortgage::paydown::PaydownInput;
use mortgage_calc_core::types::{resolve_start_date, ExtraPaymentPolicy, LoanParameters};
use mortgage_calc_core::validation::validate_paydown;
use mortgage_calc_core::MortgageError;

use crate::input;

/// Arguments for printing an amortization schedule
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to JSON input file (same shape as paydown input)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long)]
    pub term: Option<u32>,

    /// Extra principal paid every month
    #[arg(long)]
    pub extra_monthly: Option<Decimal>,

    /// Lump sum paid on each loan anniversary
    #[arg(long)]
    pub lump_sum: Option<Decimal>,

    /// First payment is one month after this date (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Emit chart points for every N-th payment instead of full rows
    #[arg(long, conflicts_with = "yearly")]
    pub every: Option<usize>,

    /// Emit one row per loan year
    #[arg(long)]
    pub yearly: bool,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sched_input: PaydownInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        let principal = args
            .principal
            .ok_or("--principal is required (or provide --input)")?;
        let rate = args.rate.ok_or("--rate is required (or provide --input)")?;
        let term = args.term.ok_or("--term is required (or provide --input)")?;

        PaydownInput {
            loan: LoanParameters::new(principal, rate, term),
            extra_payments: ExtraPaymentPolicy {
                extra_monthly_amount: args.extra_monthly.unwrap_or(Decimal::ZERO),
                annual_lump_sum: args.lump_sum.unwrap_or(Decimal::ZERO),
                lump_sum_enabled: args.lump_sum.is_some(),
            },
            start_date: args.start_date,
        }
    };

    let errors = validate_paydown(&sched_input.loan, &sched_input.extra_payments);
    if !errors.is_empty() {
        return Err(MortgageError::Validation(errors).into());
    }

    let rows = schedule::generate_schedule(
        &sched_input.loan,
        Some(&sched_input.extra_payments),
        resolve_start_date(sched_input.start_date),
    )?;

    let value = if args.yearly {
        serde_json::to_value(chart::yearly_summaries(&rows))?
    } else if let Some(every) = args.every {
        serde_json::to_value(chart::chart_points(&rows, every))?
    } else {
        serde_json::to_value(rows)?
    };
    Ok(value)
}
