use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::payment::{loan_payment, monthly_rate};
use crate::error::MortgageError;
use crate::types::{round_cents, ExtraPaymentPolicy, LoanParameters, Money};
use crate::MortgageResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Residual balances below one cent are treated as paid off.
const BALANCE_EPSILON: Decimal = dec!(0.01);

/// Ceiling multiplier on the contractual term when extra payments are active.
const EXTRA_PAYMENT_CEILING_FACTOR: u32 = 2;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One month of the amortization schedule. Monetary fields are currency
/// units rounded to the cent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentScheduleEntry {
    /// Payment number (1-indexed).
    pub index: u32,
    /// Due date: start date plus `index` months.
    pub date: NaiveDate,
    pub principal_paid: Money,
    pub interest_paid: Money,
    /// Principal plus interest actually paid this period.
    pub total_paid: Money,
    /// Balance after this payment.
    pub remaining_balance: Money,
    /// Running sum of the emitted `interest_paid` values.
    pub cumulative_interest: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Amortize a loan month by month.
///
/// Interest accrues on the unrounded running balance; every monetary field
/// is rounded to cents only when the entry is emitted. The loop stops at
/// payoff or at the safety ceiling: the contractual term without extra
/// payments, twice the term with an active extra-payment policy.
pub fn generate_schedule(
    loan: &LoanParameters,
    extra: Option<&ExtraPaymentPolicy>,
    start_date: NaiveDate,
) -> MortgageResult<Vec<PaymentScheduleEntry>> {
    let policy = extra.filter(|p| p.is_active());
    let base_payment = loan_payment(loan)?;
    let rate = monthly_rate(loan.annual_rate_percent);
    let ceiling = safety_ceiling(loan, policy.is_some());

    let mut schedule = Vec::with_capacity(loan.term_months() as usize);
    let mut balance = loan.principal;
    let mut cumulative_interest = Decimal::ZERO;
    let mut index = 0u32;

    while balance > Decimal::ZERO && index < ceiling {
        index += 1;

        let interest = balance * rate;
        let mut principal = base_payment - interest;

        if let Some(p) = policy {
            principal = principal.saturating_add(p.extra_monthly_amount);
            if p.lump_sum_due(index) {
                let headroom = (balance - principal).max(Decimal::ZERO);
                principal += p.annual_lump_sum.min(headroom);
            }
        }

        // Final period pays exactly the remainder.
        principal = principal.min(balance);

        balance -= principal;
        if balance < BALANCE_EPSILON {
            // Sub-cent residue is paid with this period's principal.
            principal += balance;
            balance = Decimal::ZERO;
        }

        let interest_paid = round_cents(interest);
        cumulative_interest += interest_paid;

        schedule.push(PaymentScheduleEntry {
            index,
            date: payment_date(start_date, index)?,
            principal_paid: round_cents(principal),
            interest_paid,
            total_paid: round_cents(principal + interest),
            remaining_balance: round_cents(balance),
            cumulative_interest,
        });
    }

    if balance > Decimal::ZERO {
        warn!(
            periods = index,
            remaining = %balance,
            "schedule hit its safety ceiling before payoff"
        );
    }
    debug!(
        periods = schedule.len(),
        principal = %loan.principal,
        rate = %loan.annual_rate_percent,
        term_years = loan.term_years,
        extra = policy.is_some(),
        "amortization schedule generated"
    );

    Ok(schedule)
}

/// Sum of `interest_paid` over the schedule.
pub fn total_interest(schedule: &[PaymentScheduleEntry]) -> Money {
    schedule.iter().map(|e| e.interest_paid).sum()
}

/// Sum of `total_paid` over the schedule.
pub fn total_paid(schedule: &[PaymentScheduleEntry]) -> Money {
    schedule.iter().map(|e| e.total_paid).sum()
}

/// Date of the final payment, if the schedule is non-empty.
pub fn payoff_date(schedule: &[PaymentScheduleEntry]) -> Option<NaiveDate> {
    schedule.last().map(|e| e.date)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn safety_ceiling(loan: &LoanParameters, extra_active: bool) -> u32 {
    if extra_active {
        loan.term_months() * EXTRA_PAYMENT_CEILING_FACTOR
    } else {
        loan.term_months()
    }
}

/// Start date plus `index` calendar months, clamped to the end of short months.
fn payment_date(start_date: NaiveDate, index: u32) -> MortgageResult<NaiveDate> {
    start_date
        .checked_add_months(Months::new(index))
        .ok_or_else(|| {
            MortgageError::DateError(format!(
                "payment {index} falls outside the supported calendar range (start {start_date})"
            ))
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
