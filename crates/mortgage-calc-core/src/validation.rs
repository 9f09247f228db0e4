//! Precondition checks on user-supplied parameters.
//!
//! Every check runs and every violation is returned, so a form can show all
//! problems at once. The numeric core assumes these checks have passed.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::amortization::payment::monthly_payment;
use crate::error::ValidationError;
use crate::format::format_currency;
use crate::types::{EscrowItems, ExtraPaymentPolicy, LoanParameters, Money, RefinanceCosts};

/// Upper bound on the primary calculator's loan amount.
pub const MAX_MORTGAGE_PRINCIPAL: Money = dec!(10_000_000);

/// Inclusive upper bound on the annual rate, in percent.
pub const MAX_RATE_PERCENT: Decimal = dec!(50);

/// Inclusive upper bound on the loan term.
pub const MAX_TERM_YEARS: u32 = 50;

const TOO_LARGE: &str = "Loan amount is too large to amortize at this rate and term";

/// Primary mortgage calculator: capped principal, rate, term, escrow items.
pub fn validate_mortgage(loan: &LoanParameters, escrow: &EscrowItems) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if check_loan(&mut errors, "", loan, Some(MAX_MORTGAGE_PRINCIPAL)) {
        check_amortizable(&mut errors, "", loan);
    }
    check_escrow(&mut errors, escrow);
    errors
}

/// Refinance calculator: both loans, costs and the extra-payment policy.
/// Principal is not capped here; it only has to amortize within the decimal
/// range, with cash-out folded into the new loan.
pub fn validate_refinance(
    current_loan: &LoanParameters,
    new_loan: &LoanParameters,
    costs: &RefinanceCosts,
    extra: &ExtraPaymentPolicy,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if check_loan(&mut errors, "current_loan.", current_loan, None) {
        check_amortizable(&mut errors, "current_loan.", current_loan);
    }
    let new_loan_valid = check_loan(&mut errors, "new_loan.", new_loan, None);
    check_non_negative(&mut errors, "closing_costs", "Closing costs", costs.closing_costs);
    check_non_negative(&mut errors, "cash_out", "Cash-out amount", costs.cash_out);
    if new_loan_valid {
        match new_loan.principal.checked_add(costs.cash_out) {
            Some(principal) => check_amortizable(
                &mut errors,
                "new_loan.",
                &LoanParameters {
                    principal,
                    ..new_loan.clone()
                },
            ),
            None => errors.push(ValidationError::new("cash_out", TOO_LARGE)),
        }
    }
    check_extra(&mut errors, extra);
    errors
}

/// Accelerated paydown calculator: loan as the primary calculator plus extras.
pub fn validate_paydown(loan: &LoanParameters, extra: &ExtraPaymentPolicy) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if check_loan(&mut errors, "", loan, Some(MAX_MORTGAGE_PRINCIPAL)) {
        check_amortizable(&mut errors, "", loan);
    }
    check_extra(&mut errors, extra);
    errors
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// Returns true when the loan passed every rule.
fn check_loan(
    errors: &mut Vec<ValidationError>,
    prefix: &str,
    loan: &LoanParameters,
    max_principal: Option<Money>,
) -> bool {
    let before = errors.len();
    if loan.principal <= Decimal::ZERO {
        errors.push(ValidationError::new(
            format!("{prefix}principal"),
            "Loan amount must be greater than zero",
        ));
    } else if let Some(cap) = max_principal {
        if loan.principal > cap {
            errors.push(ValidationError::new(
                format!("{prefix}principal"),
                format!("Loan amount cannot exceed {}", format_currency(cap)),
            ));
        }
    }

    if loan.annual_rate_percent < Decimal::ZERO || loan.annual_rate_percent > MAX_RATE_PERCENT {
        errors.push(ValidationError::new(
            format!("{prefix}annual_rate_percent"),
            format!("Interest rate must be between 0% and {MAX_RATE_PERCENT}%"),
        ));
    }

    if loan.term_years == 0 || loan.term_years > MAX_TERM_YEARS {
        errors.push(ValidationError::new(
            format!("{prefix}term_years"),
            format!("Loan term must be between 1 and {MAX_TERM_YEARS} years"),
        ));
    }

    errors.len() == before
}

/// The payment, and every schedule total bounded by it over the longest
/// possible schedule, must fit in a `Decimal`.
fn check_amortizable(errors: &mut Vec<ValidationError>, prefix: &str, loan: &LoanParameters) {
    let longest = Decimal::from(loan.term_months()) * Decimal::TWO;
    let fits = monthly_payment(loan.principal, loan.annual_rate_percent, loan.term_years)
        .ok()
        .and_then(|payment| payment.checked_mul(longest))
        .is_some();
    if !fits {
        errors.push(ValidationError::new(format!("{prefix}principal"), TOO_LARGE));
    }
}

fn check_escrow(errors: &mut Vec<ValidationError>, escrow: &EscrowItems) {
    check_non_negative(errors, "property_tax", "Property tax", escrow.property_tax);
    check_non_negative(errors, "home_insurance", "Home insurance", escrow.home_insurance);
    check_non_negative(
        errors,
        "mortgage_insurance",
        "Mortgage insurance",
        escrow.mortgage_insurance,
    );
    check_non_negative(errors, "hoa_fees", "HOA fees", escrow.hoa_fees);
}

fn check_extra(errors: &mut Vec<ValidationError>, extra: &ExtraPaymentPolicy) {
    check_non_negative(
        errors,
        "extra_monthly_amount",
        "Extra monthly payment",
        extra.extra_monthly_amount,
    );
    check_non_negative(
        errors,
        "annual_lump_sum",
        "Annual lump sum",
        extra.annual_lump_sum,
    );
}

fn check_non_negative(errors: &mut Vec<ValidationError>, field: &str, label: &str, value: Money) {
    if value < Decimal::ZERO {
        errors.push(ValidationError::new(field, format!("{label} cannot be negative")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn fields(errors: &[ValidationError]) -> Vec<&str> {
        errors.iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn test_valid_mortgage_passes() {
        let loan = LoanParameters::new(dec!(400000), dec!(6.5), 30);
        assert!(validate_mortgage(&loan, &EscrowItems::default()).is_empty());
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        let loan = LoanParameters::new(MAX_MORTGAGE_PRINCIPAL, dec!(50), 50);
        assert!(validate_mortgage(&loan, &EscrowItems::default()).is_empty());
        let zero_rate = LoanParameters::new(dec!(1), Decimal::ZERO, 1);
        assert!(validate_mortgage(&zero_rate, &EscrowItems::default()).is_empty());
    }

    #[test]
    fn test_collects_every_violation() {
        let loan = LoanParameters::new(dec!(-5), dec!(50.01), 0);
        let escrow = EscrowItems {
            property_tax: dec!(-1),
            hoa_fees: dec!(-1),
            ..Default::default()
        };
        let errors = validate_mortgage(&loan, &escrow);
        assert_eq!(
            fields(&errors),
            vec![
                "principal",
                "annual_rate_percent",
                "term_years",
                "property_tax",
                "hoa_fees"
            ]
        );
    }

    #[test]
    fn test_mortgage_principal_cap() {
        let loan = LoanParameters::new(dec!(10_000_000.01), dec!(6), 30);
        let errors = validate_mortgage(&loan, &EscrowItems::default());
        assert_eq!(fields(&errors), vec!["principal"]);
    }

    #[test]
    fn test_term_over_limit() {
        let loan = LoanParameters::new(dec!(100000), dec!(6), 51);
        let errors = validate_mortgage(&loan, &EscrowItems::default());
        assert_eq!(fields(&errors), vec!["term_years"]);
    }

    #[test]
    fn test_refinance_has_no_principal_cap() {
        let current = LoanParameters::new(dec!(25_000_000), dec!(7), 25);
        let new = LoanParameters::new(dec!(25_000_000), dec!(6), 30);
        let errors = validate_refinance(
            &current,
            &new,
            &RefinanceCosts::default(),
            &ExtraPaymentPolicy::default(),
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_refinance_prefixes_and_costs() {
        let current = LoanParameters::new(Decimal::ZERO, dec!(7), 25);
        let new = LoanParameters::new(dec!(300000), dec!(-1), 30);
        let costs = RefinanceCosts {
            closing_costs: dec!(-100),
            cash_out: dec!(-1),
        };
        let extra = ExtraPaymentPolicy {
            extra_monthly_amount: dec!(-50),
            annual_lump_sum: dec!(-1),
            lump_sum_enabled: true,
        };
        let errors = validate_refinance(&current, &new, &costs, &extra);
        assert_eq!(
            fields(&errors),
            vec![
                "current_loan.principal",
                "new_loan.annual_rate_percent",
                "closing_costs",
                "cash_out",
                "extra_monthly_amount",
                "annual_lump_sum"
            ]
        );
    }

    #[test]
    fn test_paydown_rejects_negative_extra() {
        let loan = LoanParameters::new(dec!(300000), dec!(6), 30);
        let extra = ExtraPaymentPolicy {
            extra_monthly_amount: dec!(-1),
            ..Default::default()
        };
        let errors = validate_paydown(&loan, &extra);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].reason, "Extra monthly payment cannot be negative");
    }

    fn pow10(exp: u32) -> Decimal {
        Decimal::from_i128_with_scale(10i128.pow(exp), 0)
    }

    #[test]
    fn test_refinance_rejects_principal_beyond_decimal_range() {
        let current = LoanParameters::new(pow10(20), dec!(50), 50);
        let new = LoanParameters::new(pow10(20), dec!(50), 50);
        let errors = validate_refinance(
            &current,
            &new,
            &RefinanceCosts::default(),
            &ExtraPaymentPolicy::default(),
        );
        assert_eq!(
            fields(&errors),
            vec!["current_loan.principal", "new_loan.principal"]
        );
        assert_eq!(errors[0].reason, TOO_LARGE);
    }

    #[test]
    fn test_refinance_large_but_representable_principal_passes() {
        let loan = LoanParameters::new(pow10(15), dec!(50), 50);
        let errors = validate_refinance(
            &loan,
            &loan,
            &RefinanceCosts::default(),
            &ExtraPaymentPolicy::default(),
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_refinance_cash_out_counts_toward_range() {
        let loan = LoanParameters::new(pow10(15), dec!(50), 50);
        let costs = RefinanceCosts {
            closing_costs: Decimal::ZERO,
            cash_out: pow10(20),
        };
        let errors =
            validate_refinance(&loan, &loan, &costs, &ExtraPaymentPolicy::default());
        assert_eq!(fields(&errors), vec!["new_loan.principal"]);
    }
}
