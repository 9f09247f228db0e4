use chrono::NaiveDate;
use mortgage_calc_core::amortization::{chart, payment, schedule};
use mortgage_calc_core::mortgage::paydown::{self, PaydownInput};
use mortgage_calc_core::mortgage::summary::{self, MortgageInput};
use mortgage_calc_core::types::{round_cents, EscrowItems, ExtraPaymentPolicy, LoanParameters};
use mortgage_calc_core::MortgageError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn jan_2025() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

// ===========================================================================
// Payment formula — known answers
// ===========================================================================

#[test]
fn test_scenario_400k_at_6_5_percent() {
    // 400,000 at 6.5% over 30 years => 2,528.27 P&I
    let input = MortgageInput {
        loan: LoanParameters::new(dec!(400000), dec!(6.5), 30),
        escrow: EscrowItems::default(),
        start_date: Some(jan_2025()),
    };
    let out = summary::calculate_mortgage(&input).unwrap();
    let pi = out.result.summary.monthly_principal_and_interest;
    assert!(
        (pi - dec!(2528.27)).abs() <= dec!(0.01),
        "Expected ~2528.27, got {}",
        pi
    );
}

#[test]
fn test_scenario_zero_rate_ten_years() {
    let input = MortgageInput {
        loan: LoanParameters::new(dec!(100000), Decimal::ZERO, 10),
        escrow: EscrowItems::default(),
        start_date: Some(jan_2025()),
    };
    let out = summary::calculate_mortgage(&input).unwrap();
    let s = &out.result.summary;
    assert_eq!(s.monthly_payment, dec!(833.33));
    assert_eq!(s.schedule.len(), 120);
    assert_eq!(s.total_interest, Decimal::ZERO);
    assert_eq!(out.warnings.len(), 1);
}

#[test]
fn test_payment_matches_first_row_total() {
    let loan = LoanParameters::new(dec!(275000), dec!(4.875), 20);
    let pmt = payment::loan_payment(&loan).unwrap();
    let rows = schedule::generate_schedule(&loan, None, jan_2025()).unwrap();
    assert_eq!(rows[0].total_paid, round_cents(pmt));
}

// ===========================================================================
// Schedule generator
// ===========================================================================

/// Rounding convention: each monetary field is rounded to cents when the
/// row is emitted; running balances stay unrounded; cumulative interest
/// carries the rounded per-row interest forward.
#[test]
fn test_rounding_convention_round_per_period() {
    let loan = LoanParameters::new(dec!(333333.33), dec!(7.125), 30);
    let rows = schedule::generate_schedule(&loan, None, jan_2025()).unwrap();
    for row in &rows {
        assert!(row.principal_paid.scale() <= 2);
        assert!(row.interest_paid.scale() <= 2);
        assert!(row.remaining_balance.scale() <= 2);
    }
    let summed: Decimal = rows.iter().map(|r| r.interest_paid).sum();
    assert_eq!(summed, rows.last().unwrap().cumulative_interest);
}

#[test]
fn test_principal_sums_to_loan_amount() {
    let loan = LoanParameters::new(dec!(180000), dec!(5.75), 15);
    let rows = schedule::generate_schedule(&loan, None, jan_2025()).unwrap();
    let principal: Decimal = rows.iter().map(|r| r.principal_paid).sum();
    // One cent of rounding drift per row at most
    assert!(
        (principal - dec!(180000)).abs() <= dec!(0.01) * Decimal::from(rows.len() as u64),
        "principal repaid {}",
        principal
    );
}

#[test]
fn test_tiny_extra_payment_still_terminates() {
    let loan = LoanParameters::new(dec!(500000), dec!(12), 30);
    let policy = ExtraPaymentPolicy {
        extra_monthly_amount: dec!(0.01),
        ..Default::default()
    };
    let rows = schedule::generate_schedule(&loan, Some(&policy), jan_2025()).unwrap();
    assert!(rows.len() <= 720);
    assert_eq!(rows.last().unwrap().remaining_balance, Decimal::ZERO);
}

#[test]
fn test_large_extra_pays_off_first_month() {
    let loan = LoanParameters::new(dec!(10000), dec!(5), 5);
    let policy = ExtraPaymentPolicy {
        extra_monthly_amount: dec!(20000),
        ..Default::default()
    };
    let rows = schedule::generate_schedule(&loan, Some(&policy), jan_2025()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].principal_paid, dec!(10000));
    // Interest on 10,000 at 5%/12, not the nominal payment
    assert_eq!(rows[0].total_paid, dec!(10041.67));
}

#[test]
fn test_chart_sampling_every_twelfth() {
    let loan = LoanParameters::new(dec!(400000), dec!(6.5), 30);
    let rows = schedule::generate_schedule(&loan, None, jan_2025()).unwrap();
    let points = chart::chart_points(&rows, 12);
    assert_eq!(points.len(), 30);
    assert!(points.iter().all(|p| p.period % 12 == 0));
    assert!(points.windows(2).all(|w| w[1].balance < w[0].balance));
}

// ===========================================================================
// Aggregator & paydown
// ===========================================================================

#[test]
fn test_escrow_added_to_payment() {
    let input = MortgageInput {
        loan: LoanParameters::new(dec!(320000), dec!(6.25), 30),
        escrow: EscrowItems {
            property_tax: dec!(3840),
            home_insurance: dec!(1320),
            mortgage_insurance: dec!(960),
            hoa_fees: dec!(0),
        },
        start_date: Some(jan_2025()),
    };
    let out = summary::calculate_mortgage(&input).unwrap();
    let s = &out.result.summary;
    assert_eq!(s.monthly_escrow, dec!(510));
    assert_eq!(s.monthly_payment - s.monthly_principal_and_interest, dec!(510));
}

#[test]
fn test_validation_errors_block_calculation() {
    let input = MortgageInput {
        loan: LoanParameters::new(dec!(20_000_000), dec!(-2), 0),
        escrow: EscrowItems::default(),
        start_date: Some(jan_2025()),
    };
    match summary::calculate_mortgage(&input) {
        Err(MortgageError::Validation(errors)) => assert_eq!(errors.len(), 3),
        other => panic!("expected validation failure, got {:?}", other.map(|o| o.methodology)),
    }
}

#[test]
fn test_paydown_projection_known_direction() {
    let input = PaydownInput {
        loan: LoanParameters::new(dec!(400000), dec!(6.5), 30),
        extra_payments: ExtraPaymentPolicy {
            extra_monthly_amount: dec!(500),
            annual_lump_sum: dec!(10000),
            lump_sum_enabled: true,
        },
        start_date: Some(jan_2025()),
    };
    let out = paydown::project_paydown(&input).unwrap().result;
    assert!(out.months_saved >= 120, "saved only {} months", out.months_saved);
    assert!(out.interest_saved > dec!(150000));
    assert_eq!(
        out.interest_saved,
        out.baseline.total_interest - out.accelerated.total_interest
    );
}
