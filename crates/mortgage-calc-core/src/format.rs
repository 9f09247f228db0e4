//! Display strings for USD amounts, percentages and month counts.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::{round_cents, Money, Percent};

/// "$1,234.56"; negatives render as "-$1,234.56".
pub fn format_currency(amount: Money) -> String {
    let rounded = round_cents(amount);
    let digits = format!("{:.2}", rounded.abs());
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("{sign}${}.{cents}", group_thousands(whole))
}

/// "6.50%" for an annual rate given in percent.
pub fn format_percent(rate: Percent) -> String {
    let rounded = rate.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}%")
}

/// "2 years, 3 months", with singular forms and zero parts dropped.
pub fn format_duration(months: u32) -> String {
    let years = months / 12;
    let rem = months % 12;
    match (years, rem) {
        (0, m) => plural(m, "month"),
        (y, 0) => plural(y, "year"),
        (y, m) => format!("{}, {}", plural(y, "year"), plural(m, "month")),
    }
}

/// Signed month difference phrased as earlier/later payoff.
pub fn format_payoff_change(months_saved: i64) -> String {
    let magnitude = u32::try_from(months_saved.unsigned_abs()).unwrap_or(u32::MAX);
    match months_saved.signum() {
        1 => format!("{} sooner", format_duration(magnitude)),
        -1 => format!("{} later", format_duration(magnitude)),
        _ => "No change".to_string(),
    }
}

/// Break-even months, or "Never" at the sentinel.
pub fn format_break_even(months: u32, never_sentinel: u32) -> String {
    if months == never_sentinel {
        "Never".to_string()
    } else {
        format_duration(months)
    }
}

fn plural(n: u32, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
