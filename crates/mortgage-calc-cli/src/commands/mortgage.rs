use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use mortgage_calc_core::mortgage::summary::{self, MortgageInput};
use mortgage_calc_core::types::{EscrowItems, LoanParameters};

use super::strip_schedules;
use crate::input;

/// Arguments for the primary mortgage calculator
#[derive(Args)]
pub struct MortgageArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 6.5)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long)]
    pub term: Option<u32>,

    /// Annual property tax
    #[arg(long)]
    pub property_tax: Option<Decimal>,

    /// Annual home insurance premium
    #[arg(long)]
    pub home_insurance: Option<Decimal>,

    /// Annual mortgage insurance (PMI)
    #[arg(long)]
    pub mortgage_insurance: Option<Decimal>,

    /// Annual HOA fees
    #[arg(long)]
    pub hoa: Option<Decimal>,

    /// First payment is one month after this date (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Include the month-by-month schedule in the output
    #[arg(long)]
    pub show_schedule: bool,
}

pub fn run_mortgage(args: MortgageArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mortgage_input: MortgageInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        let principal = args
            .principal
            .ok_or("--principal is required (or provide --input)")?;
        let rate = args.rate.ok_or("--rate is required (or provide --input)")?;
        let term = args.term.ok_or("--term is required (or provide --input)")?;

        MortgageInput {
            loan: LoanParameters::new(principal, rate, term),
            escrow: EscrowItems {
                property_tax: args.property_tax.unwrap_or(Decimal::ZERO),
                home_insurance: args.home_insurance.unwrap_or(Decimal::ZERO),
                mortgage_insurance: args.mortgage_insurance.unwrap_or(Decimal::ZERO),
                hoa_fees: args.hoa.unwrap_or(Decimal::ZERO),
            },
            start_date: args.start_date,
        }
    };

    let result = summary::calculate_mortgage(&mortgage_input)?;
    let mut value = serde_json::to_value(result)?;
    if !args.show_schedule {
        strip_schedules(&mut value, &["summary"]);
    }
    Ok(value)
}
