//! Salary structure records as stored by the HR backend.
//!
//! Only percentages and the two flat inputs (wage, professional tax) are
//! persisted; every amount is re-derived on read.

pub mod record;
pub mod update;

pub use record::{SalaryStructureRecord, WageType};
pub use update::SalaryStructureUpdate;
