use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::MortgageError;
use crate::types::{LoanParameters, Money, Percent, Rate};
use crate::MortgageResult;

/// Convert an annual percentage into the monthly periodic rate.
pub fn monthly_rate(annual_rate_percent: Percent) -> Rate {
    annual_rate_percent / dec!(100) / dec!(12)
}

/// Number of monthly payments in a term of whole years.
pub fn total_periods(term_years: u32) -> u32 {
    term_years * 12
}

/// Level monthly principal-and-interest payment.
///
/// Zero-rate loans amortize straight-line. Otherwise applies
/// `P * r * (1+r)^n / ((1+r)^n - 1)` with `r` the monthly rate.
/// The result is not rounded, and a zero term is the caller's problem:
/// inputs are expected to have passed validation. A principal too large for
/// the decimal range is an [`MortgageError::Overflow`], never a panic.
pub fn monthly_payment(
    principal: Money,
    annual_rate_percent: Percent,
    term_years: u32,
) -> MortgageResult<Money> {
    let n = total_periods(term_years);

    if annual_rate_percent.is_zero() {
        return principal
            .checked_div(Decimal::from(n))
            .ok_or_else(|| payment_overflow(principal));
    }

    let r = monthly_rate(annual_rate_percent);
    (Decimal::ONE + r)
        .checked_powi(i64::from(n))
        .and_then(|factor| {
            principal
                .checked_mul(r)?
                .checked_mul(factor)?
                .checked_div(factor - Decimal::ONE)
        })
        .ok_or_else(|| payment_overflow(principal))
}

/// [`monthly_payment`] for a [`LoanParameters`] record.
pub fn loan_payment(loan: &LoanParameters) -> MortgageResult<Money> {
    monthly_payment(loan.principal, loan.annual_rate_percent, loan.term_years)
}

fn payment_overflow(principal: Money) -> MortgageError {
    MortgageError::Overflow {
        context: format!("monthly payment on a principal of {principal}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_thirty_year_known_answer() {
        let pmt = monthly_payment(dec!(400000), dec!(6.5), 30).unwrap();
        // Standard table value: $2,528.27
        assert!((pmt - dec!(2528.27)).abs() < dec!(0.01), "got {pmt}");
    }

    #[test]
    fn test_fifteen_year_known_answer() {
        let pmt = monthly_payment(dec!(200000), dec!(5), 15).unwrap();
        assert!((pmt - dec!(1581.59)).abs() < dec!(0.01), "got {pmt}");
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let pmt = monthly_payment(dec!(100000), Decimal::ZERO, 10).unwrap();
        assert_eq!(pmt, dec!(100000) / dec!(120));
    }

    #[test]
    fn test_payment_not_rounded() {
        let pmt = monthly_payment(dec!(400000), dec!(6.5), 30).unwrap();
        assert!(pmt.scale() > 2);
    }

    #[test]
    fn test_monthly_rate_conversion() {
        assert_eq!(monthly_rate(dec!(6)), dec!(0.005));
        assert_eq!(total_periods(30), 360);
    }

    #[test]
    fn test_higher_rate_higher_payment() {
        let low = monthly_payment(dec!(300000), dec!(4), 30).unwrap();
        let high = monthly_payment(dec!(300000), dec!(7), 30).unwrap();
        assert!(high > low);
    }

    #[test]
    fn test_payment_overflow_is_an_error() {
        let huge = Decimal::from_i128_with_scale(10i128.pow(27), 0);
        let err = monthly_payment(huge, dec!(50), 50).unwrap_err();
        assert!(matches!(err, MortgageError::Overflow { .. }));
    }
}
