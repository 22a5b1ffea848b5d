pub mod error;
pub mod types;

#[cfg(feature = "salary")]
pub mod salary;

#[cfg(feature = "salary")]
pub mod structure;

#[cfg(feature = "payslip")]
pub mod payslip;

pub use error::PayrollError;
pub use types::*;

/// Standard result type for all payroll operations
pub type PayrollResult<T> = Result<T, PayrollError>;
