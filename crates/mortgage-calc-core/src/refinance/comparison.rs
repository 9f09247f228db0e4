//! Refinance comparator: current loan against a replacement loan, with
//! closing costs, cash-out and optional extra payments on the new loan.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::error::MortgageError;
use crate::format::{format_currency, format_payoff_change};
use crate::mortgage::summary::{summarize, summarize_with_extras, MortgageSummary};
use crate::types::{
    resolve_start_date, with_metadata, ComputationOutput, ExtraPaymentPolicy, LoanParameters,
    Money, RefinanceCosts,
};
use crate::validation::validate_refinance;
use crate::MortgageResult;

/// Break-even months reported when monthly savings never recover the costs.
pub const BREAK_EVEN_NEVER: u32 = 999;

// ---------------------------------------------------------------------------
// Input / output types
// ---------------------------------------------------------------------------

/// Refinance calculator input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinanceInput {
    /// Remaining balance, rate and remaining term of the existing loan.
    pub current_loan: LoanParameters,
    /// Stated amount of the new loan, before cash-out.
    pub new_loan: LoanParameters,
    /// One-time closing costs and cash taken out at closing.
    #[serde(default)]
    pub costs: RefinanceCosts,
    /// Extra payments planned on the new loan only.
    #[serde(default)]
    pub extra_payments: ExtraPaymentPolicy,
    /// Both schedules start here. Defaults to the first of the current month.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

/// Current loan against the replacement, with and without extras.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinanceOutput {
    /// The existing loan run to term.
    pub current_summary: MortgageSummary,
    /// The new loan (including cash-out) at its contractual payment.
    pub new_summary: MortgageSummary,
    /// The new loan with the extra-payment policy applied.
    pub new_summary_with_extras: MortgageSummary,
    /// Principal actually borrowed: stated amount plus cash-out.
    pub new_principal: Money,
    /// Current monthly payment minus the new payment with extras.
    pub monthly_savings: Money,
    /// Current total interest minus new total interest with extras.
    pub total_interest_savings: Money,
    /// Interest savings net of closing costs.
    pub total_savings: Money,
    /// Months for the monthly savings to recover the closing costs, or
    /// [`BREAK_EVEN_NEVER`] when there are no savings.
    pub break_even_months: u32,
    /// Current payoff months minus new payoff months; negative when the
    /// new loan runs longer.
    pub payoff_time_saved: i64,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// `ceil(closing_costs / monthly_savings)`, or the sentinel when savings are
/// not positive. A quotient too large for `u32` saturates at `u32::MAX`.
pub fn break_even_months(closing_costs: Money, monthly_savings: Money) -> u32 {
    if monthly_savings <= Decimal::ZERO {
        return BREAK_EVEN_NEVER;
    }
    closing_costs
        .checked_div(monthly_savings)
        .and_then(|months| months.ceil().to_u32())
        .unwrap_or(u32::MAX)
}

/// Pure composition of the aggregator over both loans.
pub fn compare_refinance(
    current_loan: &LoanParameters,
    new_loan: &LoanParameters,
    costs: &RefinanceCosts,
    extra: &ExtraPaymentPolicy,
    start_date: NaiveDate,
) -> MortgageResult<RefinanceOutput> {
    let principal = new_loan
        .principal
        .checked_add(costs.cash_out)
        .ok_or_else(|| MortgageError::Overflow {
            context: "new principal plus cash-out".to_string(),
        })?;
    let effective_new = LoanParameters {
        principal,
        ..new_loan.clone()
    };

    let current_summary = summarize(current_loan, None, start_date)?;
    let new_summary = summarize(&effective_new, None, start_date)?;
    let new_summary_with_extras = summarize_with_extras(&effective_new, None, extra, start_date)?;

    let monthly_savings = current_summary.monthly_payment - new_summary_with_extras.monthly_payment;
    let total_interest_savings =
        current_summary.total_interest - new_summary_with_extras.total_interest;
    let total_savings = total_interest_savings - costs.closing_costs;
    let break_even = break_even_months(costs.closing_costs, monthly_savings);
    let payoff_time_saved = current_summary.payoff_months() as i64
        - new_summary_with_extras.payoff_months() as i64;

    debug!(
        monthly_savings = %monthly_savings,
        total_savings = %total_savings,
        break_even_months = break_even,
        payoff_time_saved,
        "refinance compared"
    );

    Ok(RefinanceOutput {
        current_summary,
        new_summary,
        new_summary_with_extras,
        new_principal: effective_new.principal,
        monthly_savings,
        total_interest_savings,
        total_savings,
        break_even_months: break_even,
        payoff_time_saved,
    })
}

/// Validate, compare and wrap the refinance calculation.
pub fn analyze_refinance(
    input: &RefinanceInput,
) -> MortgageResult<ComputationOutput<RefinanceOutput>> {
    let start = Instant::now();

    let errors = validate_refinance(
        &input.current_loan,
        &input.new_loan,
        &input.costs,
        &input.extra_payments,
    );
    if !errors.is_empty() {
        return Err(MortgageError::Validation(errors));
    }

    let start_date = resolve_start_date(input.start_date);
    let output = compare_refinance(
        &input.current_loan,
        &input.new_loan,
        &input.costs,
        &input.extra_payments,
        start_date,
    )?;

    let mut warnings: Vec<String> = Vec::new();
    if output.break_even_months == BREAK_EVEN_NEVER {
        warnings.push("Monthly savings never recover the closing costs".into());
    }
    if output.total_savings < Decimal::ZERO {
        warnings.push(format!(
            "Refinancing costs {} more than it saves in interest",
            format_currency(-output.total_savings)
        ));
    }
    if output.payoff_time_saved < 0 {
        warnings.push(format!(
            "New loan pays off {}",
            format_payoff_change(output.payoff_time_saved)
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Refinance Comparison (break-even on monthly savings, interest net of closing costs)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
