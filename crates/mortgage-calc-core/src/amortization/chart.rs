use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::schedule::PaymentScheduleEntry;
use crate::types::Money;

/// Per-period projection consumed by chart widgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataPoint {
    pub period: u32,
    pub principal: Money,
    pub interest: Money,
    pub balance: Money,
}

impl From<&PaymentScheduleEntry> for ChartDataPoint {
    fn from(entry: &PaymentScheduleEntry) -> Self {
        Self {
            period: entry.index,
            principal: entry.principal_paid,
            interest: entry.interest_paid,
            balance: entry.remaining_balance,
        }
    }
}

/// Principal and interest rolled up per 12-payment loan year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlySummary {
    /// Loan year (1-indexed).
    pub year: u32,
    pub principal_paid: Money,
    pub interest_paid: Money,
    pub total_paid: Money,
    pub ending_balance: Money,
}

/// Every `every`-th entry plus the final one. `every == 0` keeps all entries.
pub fn chart_points(schedule: &[PaymentScheduleEntry], every: usize) -> Vec<ChartDataPoint> {
    let step = every.max(1);
    let last = schedule.len().saturating_sub(1);

    schedule
        .iter()
        .enumerate()
        .filter(|(i, _)| (i + 1) % step == 0 || *i == last)
        .map(|(_, e)| ChartDataPoint::from(e))
        .collect()
}

pub fn yearly_summaries(schedule: &[PaymentScheduleEntry]) -> Vec<YearlySummary> {
    schedule
        .chunks(12)
        .zip(1u32..)
        .map(|(year_entries, year)| {
            let mut summary = YearlySummary {
                year,
                principal_paid: Decimal::ZERO,
                interest_paid: Decimal::ZERO,
                total_paid: Decimal::ZERO,
                ending_balance: Decimal::ZERO,
            };
            for e in year_entries {
                summary.principal_paid += e.principal_paid;
                summary.interest_paid += e.interest_paid;
                summary.total_paid += e.total_paid;
                summary.ending_balance = e.remaining_balance;
            }
            summary
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::schedule::generate_schedule;
    use crate::types::LoanParameters;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn schedule(years: u32) -> Vec<PaymentScheduleEntry> {
        let loan = LoanParameters::new(dec!(250000), dec!(5.25), years);
        let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        generate_schedule(&loan, None, start).unwrap()
    }

    #[test]
    fn test_annual_sampling_keeps_final_entry() {
        let s = schedule(15);
        let points = chart_points(&s, 12);
        assert_eq!(points.len(), 15);
        assert_eq!(points[0].period, 12);
        assert_eq!(points.last().unwrap().period, 180);
        assert_eq!(points.last().unwrap().balance, Decimal::ZERO);
    }

    #[test]
    fn test_sampling_off_cycle_appends_final() {
        let s = schedule(1);
        let points = chart_points(&s, 5);
        let periods: Vec<u32> = points.iter().map(|p| p.period).collect();
        assert_eq!(periods, vec![5, 10, 12]);
    }

    #[test]
    fn test_zero_step_keeps_everything() {
        let s = schedule(2);
        assert_eq!(chart_points(&s, 0).len(), 24);
    }

    #[test]
    fn test_empty_schedule() {
        assert!(chart_points(&[], 12).is_empty());
        assert!(yearly_summaries(&[]).is_empty());
    }

    #[test]
    fn test_yearly_rollup_matches_schedule() {
        let s = schedule(10);
        let years = yearly_summaries(&s);
        assert_eq!(years.len(), 10);
        let interest: Money = years.iter().map(|y| y.interest_paid).sum();
        assert_eq!(interest, s.last().unwrap().cumulative_interest);
        assert_eq!(years[0].ending_balance, s[11].remaining_balance);
        assert_eq!(years[9].ending_balance, Decimal::ZERO);
        // Interest share shrinks as the loan ages
        assert!(years[9].interest_paid < years[0].interest_paid);
    }
}
