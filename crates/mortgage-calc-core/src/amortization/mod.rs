//! Fixed-rate amortization: level payment formula, month-by-month schedule
//! generation with optional extra principal, and chart/yearly projections.

pub mod chart;
pub mod payment;
pub mod schedule;
