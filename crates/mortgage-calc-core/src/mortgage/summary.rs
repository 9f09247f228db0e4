//! Mortgage aggregator: wraps an amortization schedule with the totals a
//! borrower sees (monthly payment including escrow, total interest, total
//! paid over the term).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::amortization::chart::{yearly_summaries, YearlySummary};
use crate::amortization::payment::loan_payment;
use crate::amortization::schedule::{self, generate_schedule, PaymentScheduleEntry};
use crate::error::MortgageError;
use crate::types::{
    resolve_start_date, round_cents, with_metadata, ComputationOutput, EscrowItems,
    ExtraPaymentPolicy, LoanParameters, Money,
};
use crate::validation::validate_mortgage;
use crate::MortgageResult;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Primary mortgage calculator input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageInput {
    /// Principal, rate and term.
    pub loan: LoanParameters,
    /// Annual escrow items, all zero when omitted.
    #[serde(default)]
    pub escrow: EscrowItems,
    /// Schedule dates are this date plus N months. Defaults to the first of
    /// the current month.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Totals for one loan. Monetary values are rounded to cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageSummary {
    /// Principal and interest plus any extra monthly amount plus escrow.
    pub monthly_payment: Money,
    /// Level payment from the amortization formula.
    pub monthly_principal_and_interest: Money,
    /// Escrow items divided by twelve.
    pub monthly_escrow: Money,
    /// Sum of the schedule's emitted interest.
    pub total_interest: Money,
    /// Everything paid over the life of the loan, escrow included.
    pub total_payments: Money,
    /// Date of the final scheduled payment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payoff_date: Option<NaiveDate>,
    pub schedule: Vec<PaymentScheduleEntry>,
}

impl MortgageSummary {
    pub fn payoff_months(&self) -> usize {
        self.schedule.len()
    }
}

/// Result of the primary calculator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageOutput {
    pub summary: MortgageSummary,
    pub yearly_breakdown: Vec<YearlySummary>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Contractual schedule with totals. `total_payments` is the nominal
/// `monthly_payment * term months`, since escrow is not amortized.
pub fn summarize(
    loan: &LoanParameters,
    escrow: Option<&EscrowItems>,
    start_date: NaiveDate,
) -> MortgageResult<MortgageSummary> {
    let principal_and_interest = loan_payment(loan)?;
    let monthly_escrow = escrow.map(EscrowItems::monthly_total).unwrap_or_default();
    let monthly_payment = principal_and_interest + monthly_escrow;

    let schedule = generate_schedule(loan, None, start_date)?;
    let total_interest = schedule::total_interest(&schedule);
    let total_payments = monthly_payment
        .checked_mul(Decimal::from(loan.term_months()))
        .ok_or_else(|| MortgageError::Overflow {
            context: "total of contractual payments".to_string(),
        })?;

    Ok(MortgageSummary {
        monthly_payment: round_cents(monthly_payment),
        monthly_principal_and_interest: round_cents(principal_and_interest),
        monthly_escrow: round_cents(monthly_escrow),
        total_interest,
        total_payments: round_cents(total_payments),
        payoff_date: schedule::payoff_date(&schedule),
        schedule,
    })
}

/// Schedule with extra principal payments. The reported monthly payment is
/// the unextended principal and interest plus the extra monthly amount (and
/// escrow, when given); interest and payment totals come from the schedule.
pub fn summarize_with_extras(
    loan: &LoanParameters,
    escrow: Option<&EscrowItems>,
    extra: &ExtraPaymentPolicy,
    start_date: NaiveDate,
) -> MortgageResult<MortgageSummary> {
    let principal_and_interest = loan_payment(loan)?;
    let monthly_escrow = escrow.map(EscrowItems::monthly_total).unwrap_or_default();
    let monthly_payment = principal_and_interest
        .checked_add(extra.extra_monthly_amount)
        .and_then(|p| p.checked_add(monthly_escrow))
        .ok_or_else(|| MortgageError::Overflow {
            context: "monthly payment with extra principal".to_string(),
        })?;

    let schedule = generate_schedule(loan, Some(extra), start_date)?;
    let escrow_paid = monthly_escrow * Decimal::from(schedule.len() as u64);

    Ok(MortgageSummary {
        monthly_payment: round_cents(monthly_payment),
        monthly_principal_and_interest: round_cents(principal_and_interest),
        monthly_escrow: round_cents(monthly_escrow),
        total_interest: schedule::total_interest(&schedule),
        total_payments: round_cents(schedule::total_paid(&schedule) + escrow_paid),
        payoff_date: schedule::payoff_date(&schedule),
        schedule,
    })
}

/// Validate, summarize and wrap the primary mortgage calculation.
pub fn calculate_mortgage(
    input: &MortgageInput,
) -> MortgageResult<ComputationOutput<MortgageOutput>> {
    let start = Instant::now();

    let errors = validate_mortgage(&input.loan, &input.escrow);
    if !errors.is_empty() {
        return Err(MortgageError::Validation(errors));
    }

    let mut warnings: Vec<String> = Vec::new();
    if input.loan.annual_rate_percent.is_zero() {
        warnings.push("Zero interest rate: principal is repaid in equal instalments".into());
    }

    let start_date = resolve_start_date(input.start_date);
    let summary = summarize(&input.loan, Some(&input.escrow), start_date)?;
    let yearly_breakdown = yearly_summaries(&summary.schedule);

    debug!(
        monthly_payment = %summary.monthly_payment,
        total_interest = %summary.total_interest,
        "mortgage summarized"
    );

    let output = MortgageOutput {
        summary,
        yearly_breakdown,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-Rate Mortgage Amortization (level payment, cents at emission)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
