use rust_decimal::Decimal;
use tracing::warn;

use crate::error::PayrollError;
use crate::salary::breakdown::{derive, Allocation, FixedAllowanceMode};
use crate::salary::form::SalaryForm;
use crate::salary::percentages::check_percent_range;
use crate::salary::wage::MAX_MONTHLY_WAGE;
use crate::structure::update::SalaryStructureUpdate;
use crate::PayrollResult;

/// Message shown when the wage field blocks a save.
pub const INVALID_WAGE_MESSAGE: &str = "Please enter a valid monthly wage";

/// Check a form before it is persisted and build the save payload.
///
/// The wage must be present, numeric and within `[0, MAX_MONTHLY_WAGE]`.
/// Percentages must lie in `[0, 100]` and professional tax in
/// `[0, MAX_MONTHLY_WAGE]`. Overcommitted
/// structures are accepted; the caller decides how to surface them.
pub fn validate_for_save(form: &SalaryForm) -> PayrollResult<SalaryStructureUpdate> {
    let monthly_wage = form
        .monthly_wage
        .as_ref()
        .and_then(|entry| entry.amount())
        .ok_or_else(|| PayrollError::InvalidInput {
            field: "monthly_wage".into(),
            reason: INVALID_WAGE_MESSAGE.into(),
        })?;

    form.percentages.validate_range()?;

    if let FixedAllowanceMode::Pinned { percentage } = form.fixed_allowance_mode {
        check_percent_range("fixed_allowance_percentage", percentage)?;
    }

    if form.professional_tax < Decimal::ZERO {
        return Err(PayrollError::InvalidInput {
            field: "professional_tax".into(),
            reason: "Professional tax cannot be negative".into(),
        });
    }
    if form.professional_tax > MAX_MONTHLY_WAGE {
        return Err(PayrollError::InvalidInput {
            field: "professional_tax".into(),
            reason: format!("Professional tax cannot exceed {MAX_MONTHLY_WAGE}"),
        });
    }

    let breakdown = derive(
        monthly_wage,
        &form.percentages,
        form.fixed_allowance_mode,
        form.professional_tax,
    );
    if let Allocation::Overcommitted { deficit } = breakdown.allocation() {
        warn!(%monthly_wage, %deficit, "saving overcommitted salary structure");
    }

    Ok(SalaryStructureUpdate::from_breakdown(form.wage_type, &breakdown))
}
