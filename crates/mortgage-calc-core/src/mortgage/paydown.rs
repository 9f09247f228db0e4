//! Accelerated paydown projection: one loan, amortized with and without an
//! extra-payment policy.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use super::summary::{summarize, summarize_with_extras, MortgageSummary};
use crate::error::MortgageError;
use crate::format::format_duration;
use crate::types::{
    resolve_start_date, with_metadata, ComputationOutput, ExtraPaymentPolicy, LoanParameters,
    Money,
};
use crate::validation::validate_paydown;
use crate::MortgageResult;

/// Accelerated paydown input: one loan and the extra payments applied to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaydownInput {
    /// Principal, rate and term of the loan being paid down.
    pub loan: LoanParameters,
    /// Extra monthly principal and the optional anniversary lump sum.
    #[serde(default)]
    pub extra_payments: ExtraPaymentPolicy,
    /// Schedule dates are this date plus N months. Defaults to the first of
    /// the current month.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

/// Contractual schedule against the accelerated one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaydownOutput {
    /// The loan paid exactly as contracted.
    pub baseline: MortgageSummary,
    /// The same loan with the extra payments applied.
    pub accelerated: MortgageSummary,
    /// Baseline total interest minus accelerated total interest.
    pub interest_saved: Money,
    /// Baseline payoff months minus accelerated payoff months.
    pub months_saved: i64,
    /// Date of the final contractual payment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline_payoff_date: Option<NaiveDate>,
    /// Date of the final payment with extras applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accelerated_payoff_date: Option<NaiveDate>,
}

/// Compare a loan's contractual schedule with an accelerated one.
pub fn compare_paydown(
    loan: &LoanParameters,
    extra: &ExtraPaymentPolicy,
    start_date: NaiveDate,
) -> MortgageResult<PaydownOutput> {
    let baseline = summarize(loan, None, start_date)?;
    let accelerated = summarize_with_extras(loan, None, extra, start_date)?;

    let interest_saved = baseline.total_interest - accelerated.total_interest;
    let months_saved = baseline.payoff_months() as i64 - accelerated.payoff_months() as i64;

    Ok(PaydownOutput {
        baseline_payoff_date: baseline.payoff_date,
        accelerated_payoff_date: accelerated.payoff_date,
        baseline,
        accelerated,
        interest_saved,
        months_saved,
    })
}

/// Validate, project and wrap the accelerated paydown calculation.
pub fn project_paydown(input: &PaydownInput) -> MortgageResult<ComputationOutput<PaydownOutput>> {
    let start = Instant::now();

    let errors = validate_paydown(&input.loan, &input.extra_payments);
    if !errors.is_empty() {
        return Err(MortgageError::Validation(errors));
    }

    let mut warnings: Vec<String> = Vec::new();
    if !input.extra_payments.is_active() {
        warnings.push("No extra payments configured; projection equals the contractual schedule".into());
    }

    let start_date = resolve_start_date(input.start_date);
    let output = compare_paydown(&input.loan, &input.extra_payments, start_date)?;

    if output.months_saved > 0 {
        debug!(
            months_saved = output.months_saved,
            interest_saved = %output.interest_saved,
            "paydown projected"
        );
    } else if input.extra_payments.is_active() {
        warnings.push(format!(
            "Extra payments do not shorten the {} term",
            format_duration(input.loan.term_months())
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Accelerated Paydown Projection (extra monthly principal, annual lump sum)",
        input,
        warnings,
        elapsed,
        output,
    ))
}
