use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;

use mortgage_calc_core::amortization::schedule;
use mortgage_calc_core::format;
use mortgage_calc_core::mortgage::paydown::PaydownInput;
use mortgage_calc_core::mortgage::summary::MortgageInput;
use mortgage_calc_core::refinance::comparison::{RefinanceInput, BREAK_EVEN_NEVER};
use mortgage_calc_core::types::resolve_start_date;
use mortgage_calc_core::validation;
use mortgage_calc_core::MortgageError;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Deserialize a JSON input record, reporting failures as serialization errors.
fn parse_input<T: DeserializeOwned>(input_json: &str) -> NapiResult<T> {
    serde_json::from_str(input_json)
        .map_err(MortgageError::from)
        .map_err(to_napi_error)
}

fn to_json<T: Serialize>(output: &T) -> NapiResult<String> {
    serde_json::to_string(output)
        .map_err(MortgageError::from)
        .map_err(to_napi_error)
}

fn parse_decimal(field: &str, s: &str) -> NapiResult<Decimal> {
    s.trim().parse::<Decimal>().map_err(|e| {
        to_napi_error(MortgageError::InvalidInput {
            field: field.to_string(),
            reason: e.to_string(),
        })
    })
}

// ---------------------------------------------------------------------------
// Calculators
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_mortgage(input_json: String) -> NapiResult<String> {
    let input: MortgageInput = parse_input(&input_json)?;
    let output = mortgage_calc_core::mortgage::summary::calculate_mortgage(&input)
        .map_err(to_napi_error)?;
    to_json(&output)
}

#[napi]
pub fn analyze_refinance(input_json: String) -> NapiResult<String> {
    let input: RefinanceInput = parse_input(&input_json)?;
    let output = mortgage_calc_core::refinance::comparison::analyze_refinance(&input)
        .map_err(to_napi_error)?;
    to_json(&output)
}

#[napi]
pub fn project_paydown(input_json: String) -> NapiResult<String> {
    let input: PaydownInput = parse_input(&input_json)?;
    let output = mortgage_calc_core::mortgage::paydown::project_paydown(&input)
        .map_err(to_napi_error)?;
    to_json(&output)
}

/// Full month-by-month schedule for a paydown-shaped input.
#[napi]
pub fn generate_schedule(input_json: String) -> NapiResult<String> {
    let input: PaydownInput = parse_input(&input_json)?;
    let errors = validation::validate_paydown(&input.loan, &input.extra_payments);
    if !errors.is_empty() {
        return Err(to_napi_error(MortgageError::Validation(errors)));
    }
    let rows = schedule::generate_schedule(
        &input.loan,
        Some(&input.extra_payments),
        resolve_start_date(input.start_date),
    )
    .map_err(to_napi_error)?;
    to_json(&rows)
}

// ---------------------------------------------------------------------------
// Validation (returns the list of violations, empty when valid)
// ---------------------------------------------------------------------------

#[napi]
pub fn validate_mortgage(input_json: String) -> NapiResult<String> {
    let input: MortgageInput = parse_input(&input_json)?;
    let errors = validation::validate_mortgage(&input.loan, &input.escrow);
    to_json(&errors)
}

#[napi]
pub fn validate_refinance(input_json: String) -> NapiResult<String> {
    let input: RefinanceInput = parse_input(&input_json)?;
    let errors = validation::validate_refinance(
        &input.current_loan,
        &input.new_loan,
        &input.costs,
        &input.extra_payments,
    );
    to_json(&errors)
}

// ---------------------------------------------------------------------------
// Display formatting
// ---------------------------------------------------------------------------

#[napi]
pub fn format_currency(amount: String) -> NapiResult<String> {
    Ok(format::format_currency(parse_decimal("amount", &amount)?))
}

#[napi]
pub fn format_percent(rate: String) -> NapiResult<String> {
    Ok(format::format_percent(parse_decimal("rate", &rate)?))
}

#[napi]
pub fn format_duration(months: u32) -> String {
    format::format_duration(months)
}

#[napi]
pub fn format_payoff_change(months_saved: i64) -> String {
    format::format_payoff_change(months_saved)
}

#[napi]
pub fn format_break_even(months: u32) -> String {
    format::format_break_even(months, BREAK_EVEN_NEVER)
}
