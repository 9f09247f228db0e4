use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use mortgage_calc_core::mortgage::paydown::{self, PaydownInput};
use mortgage_calc_core::types::{ExtraPaymentPolicy, LoanParameters};

use super::strip_schedules;
use crate::input;

/// Arguments for accelerated paydown projection
#[derive(Args)]
pub struct PaydownArgs {
    /// Path to JSON input file (overrides individual flags)
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

    /// Lump sum paid on each loan anniversary (first at payment 13)
    #[arg(long)]
    pub lump_sum: Option<Decimal>,

    /// First payment is one month after this date (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Include both month-by-month schedules in the output
    #[arg(long)]
    pub show_schedule: bool,
}

pub fn run_paydown(args: PaydownArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let paydown_input: PaydownInput = if let Some(ref path) = args.input {
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

    let result = paydown::project_paydown(&paydown_input)?;
    let mut value = serde_json::to_value(result)?;
    if !args.show_schedule {
        strip_schedules(&mut value, &["baseline", "accelerated"]);
    }
    Ok(value)
}
