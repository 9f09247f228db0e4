use chrono::{Datelike, Local, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Annual rates as entered by the user, in percent (6.5 = 6.5%).
pub type Percent = Decimal;

/// Monthly periodic rates as decimals (0.005 = 0.5% per month).
pub type Rate = Decimal;

/// Round a monetary amount to whole cents, halves away from zero.
pub fn round_cents(amount: Money) -> Money {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// The given start date, or the first day of the current month.
///
/// This is the only place the engine reads the clock; schedule generation
/// itself always takes an explicit start date.
pub fn resolve_start_date(start_date: Option<NaiveDate>) -> NaiveDate {
    start_date.unwrap_or_else(|| {
        let today = Local::now().date_naive();
        today.with_day(1).unwrap_or(today)
    })
}

/// Fixed-rate loan terms. Never mutated by a calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    pub principal: Money,
    pub annual_rate_percent: Percent,
    pub term_years: u32,
}

impl LoanParameters {
    pub fn new(principal: Money, annual_rate_percent: Percent, term_years: u32) -> Self {
        Self {
            principal,
            annual_rate_percent,
            term_years,
        }
    }

    /// Contractual number of monthly payments.
    pub fn term_months(&self) -> u32 {
        self.term_years * 12
    }
}

/// Annual non-amortized costs folded into the monthly payment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscrowItems {
    pub property_tax: Money,
    pub home_insurance: Money,
    pub mortgage_insurance: Money,
    pub hoa_fees: Money,
}

impl EscrowItems {
    pub fn annual_total(&self) -> Money {
        self.property_tax + self.home_insurance + self.mortgage_insurance + self.hoa_fees
    }

    /// Unrounded monthly share of the annual escrow total.
    pub fn monthly_total(&self) -> Money {
        self.annual_total() / dec!(12)
    }
}

/// Voluntary principal prepayments layered on top of the contractual payment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtraPaymentPolicy {
    pub extra_monthly_amount: Money,
    pub annual_lump_sum: Money,
    pub lump_sum_enabled: bool,
}

impl ExtraPaymentPolicy {
    /// True when the policy changes at least one period of the schedule.
    pub fn is_active(&self) -> bool {
        self.extra_monthly_amount > Decimal::ZERO
            || (self.lump_sum_enabled && self.annual_lump_sum > Decimal::ZERO)
    }

    /// The lump sum lands on the anniversary periods 13, 25, 37, ...
    pub fn lump_sum_due(&self, index: u32) -> bool {
        self.lump_sum_enabled && index > 1 && index % 12 == 1
    }
}

/// One-time costs of a refinance. Cash-out is added to the new principal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefinanceCosts {
    pub closing_costs: Money,
    pub cash_out: Money,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit, cents at emission".to_string(),
        },
    }
}
