pub mod amortization;
pub mod error;
pub mod format;
pub mod types;
pub mod validation;

#[cfg(feature = "mortgage")]
pub mod mortgage;

#[cfg(feature = "refinance")]
pub mod refinance;

pub use error::{MortgageError, ValidationError};
pub use types::*;

/// Standard result type for all mortgage calculations
pub type MortgageResult<T> = Result<T, MortgageError>;
