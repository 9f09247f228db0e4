use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use mortgage_calc_core::refinance::comparison::{self, RefinanceInput};
use mortgage_calc_core::types::{ExtraPaymentPolicy, LoanParameters, RefinanceCosts};

use super::strip_schedules;
use crate::input;

/// Arguments for refinance comparison
#[derive(Args)]
pub struct RefinanceArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Remaining balance on the current loan
    #[arg(long)]
    pub current_principal: Option<Decimal>,

    /// Current annual rate in percent
    #[arg(long)]
    pub current_rate: Option<Decimal>,

    /// Years remaining on the current loan
    #[arg(long)]
    pub current_term: Option<u32>,

    /// New loan amount, before cash-out
    #[arg(long)]
    pub new_principal: Option<Decimal>,

    /// New annual rate in percent
    #[arg(long)]
    pub new_rate: Option<Decimal>,

    /// New loan term in years
    #[arg(long)]
    pub new_term: Option<u32>,

    /// One-time closing costs
    #[arg(long)]
    pub closing_costs: Option<Decimal>,

    /// Cash taken out at closing (added to the new principal)
    #[arg(long)]
    pub cash_out: Option<Decimal>,

    /// Extra principal paid every month on the new loan
    #[arg(long)]
    pub extra_monthly: Option<Decimal>,

    /// Lump sum paid on each loan anniversary of the new loan
    #[arg(long)]
    pub lump_sum: Option<Decimal>,

    /// First payment is one month after this date (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Include the month-by-month schedules in the output
    #[arg(long)]
    pub show_schedule: bool,
}

pub fn run_refinance(args: RefinanceArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let refi_input: RefinanceInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        let current_principal = args
            .current_principal
            .ok_or("--current-principal is required (or provide --input)")?;
        let current_rate = args
            .current_rate
            .ok_or("--current-rate is required (or provide --input)")?;
        let current_term = args
            .current_term
            .ok_or("--current-term is required (or provide --input)")?;
        let new_rate = args
            .new_rate
            .ok_or("--new-rate is required (or provide --input)")?;
        let new_term = args
            .new_term
            .ok_or("--new-term is required (or provide --input)")?;

        RefinanceInput {
            current_loan: LoanParameters::new(current_principal, current_rate, current_term),
            new_loan: LoanParameters::new(
                args.new_principal.unwrap_or(current_principal),
                new_rate,
                new_term,
            ),
            costs: RefinanceCosts {
                closing_costs: args.closing_costs.unwrap_or(Decimal::ZERO),
                cash_out: args.cash_out.unwrap_or(Decimal::ZERO),
            },
            extra_payments: ExtraPaymentPolicy {
                extra_monthly_amount: args.extra_monthly.unwrap_or(Decimal::ZERO),
                annual_lump_sum: args.lump_sum.unwrap_or(Decimal::ZERO),
                lump_sum_enabled: args.lump_sum.is_some(),
            },
            start_date: args.start_date,
        }
    };

    let result = comparison::analyze_refinance(&refi_input)?;
    let mut value = serde_json::to_value(result)?;
    if !args.show_schedule {
        strip_schedules(
            &mut value,
            &["current_summary", "new_summary", "new_summary_with_extras"],
        );
    }
    Ok(value)
}
