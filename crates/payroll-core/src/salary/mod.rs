//! The salary decomposition engine.
//!
//! One monthly wage and a handful of percentages produce every line of a
//! salary structure. Both the employee-edit and self-service profile screens
//! go through [`breakdown::derive`]; nothing else encodes the rules.

pub mod breakdown;
pub mod form;
pub mod percentages;
pub mod presentation;
pub mod validation;
pub mod wage;

use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::warn;

use crate::salary::breakdown::{Allocation, FixedAllowanceMode, WageBreakdown};
use crate::salary::form::SalaryForm;
use crate::salary::presentation::{component_rows, displayed_earnings, round_money, ComponentRow};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::PayrollResult;

pub use breakdown::{derive, derive_from_fixed_allowance_percentage, derive_from_wage};
pub use validation::validate_for_save;

/// Output of the live salary breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryBreakdownOutput {
    /// Unrounded amounts, safe to feed into further arithmetic
    pub breakdown: WageBreakdown,
    pub allocation: Allocation,
    /// Rounded rows for display
    pub rows: Vec<ComponentRow>,
    /// Sum of the rounded earning rows
    pub displayed_total_earnings: Money,
    pub displayed_yearly_wage: Money,
}

/// Compute the breakdown shown beside the salary form.
///
/// Never fails on arithmetic grounds: an unusable wage is computed as zero
/// and out-of-range percentages are clamped, each with a warning. An
/// overcommitted structure is returned as-is and tagged in `allocation`.
pub fn calculate_salary_breakdown(
    form: &SalaryForm,
) -> PayrollResult<ComputationOutput<SalaryBreakdownOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if form.monthly_wage.as_ref().and_then(|w| w.amount()).is_none() {
        warnings.push("Monthly wage missing or invalid; computed with 0".into());
    }

    let (_, clamped) = form.percentages.clamped();
    for c in &clamped {
        warnings.push(format!(
            "{} of {} is outside 0-100; {} applied",
            c.field, c.supplied, c.applied
        ));
    }
    if let FixedAllowanceMode::Pinned { percentage } = form.fixed_allowance_mode {
        let applied = percentages::clamp_percent(percentage);
        if applied != percentage {
            warnings.push(format!(
                "fixed_allowance_percentage of {percentage} is outside 0-100; {applied} applied"
            ));
        }
    }

    let breakdown = form.preview();
    let allocation = breakdown.allocation();
    match allocation {
        Allocation::Overcommitted { deficit } => {
            warn!(%deficit, "salary components exceed the monthly wage");
            warnings.push(format!(
                "Components exceed the monthly wage by {}; fixed allowance is {}",
                round_money(deficit),
                round_money(breakdown.fixed_allowance)
            ));
        }
        Allocation::Unallocated { surplus } => {
            warnings.push(format!(
                "{} of the monthly wage is not assigned to any component",
                round_money(surplus)
            ));
        }
        Allocation::Balanced => {}
    }

    let rows = component_rows(&breakdown);
    let output = SalaryBreakdownOutput {
        displayed_total_earnings: displayed_earnings(&rows),
        displayed_yearly_wage: round_money(breakdown.yearly_wage),
        breakdown,
        allocation,
        rows,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Salary breakdown from monthly wage",
        form,
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::salary::percentages::SalaryPercentages;
    use crate::salary::wage::WageEntry;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_balanced_breakdown_has_no_warnings() {
        let form = SalaryForm::with_wage(dec!(50000), SalaryPercentages::default());
        let out = calculate_salary_breakdown(&form).unwrap();
        assert!(out.warnings.is_empty(), "{:?}", out.warnings);
        assert_eq!(out.result.allocation, Allocation::Balanced);
        assert_eq!(out.result.displayed_total_earnings, dec!(50000));
        assert_eq!(out.result.displayed_yearly_wage, dec!(600000));
    }

    #[test]
    fn test_invalid_wage_previews_as_zero() {
        let form = SalaryForm {
            monthly_wage: Some(WageEntry::Text("abc".into())),
            ..Default::default()
        };
        let out = calculate_salary_breakdown(&form).unwrap();
        assert_eq!(out.result.breakdown.monthly_wage, Decimal::ZERO);
        assert!(out.warnings.iter().any(|w| w.contains("computed with 0")));
    }

    #[test]
    fn test_overcommit_is_warned_not_rejected() {
        let pct = SalaryPercentages {
            basic_salary_percentage: dec!(90),
            hra_percentage: dec!(50),
            ..Default::default()
        };
        let form = SalaryForm::with_wage(dec!(10000), pct);
        let out = calculate_salary_breakdown(&form).unwrap();
        assert!(matches!(
            out.result.allocation,
            Allocation::Overcommitted { .. }
        ));
        assert!(out.warnings.iter().any(|w| w.contains("exceed")));
    }

    #[test]
    fn test_clamped_percentage_is_warned() {
        let pct = SalaryPercentages {
            pf_employer_percentage: dec!(120),
            ..Default::default()
        };
        let form = SalaryForm::with_wage(dec!(10000), pct);
        let out = calculate_salary_breakdown(&form).unwrap();
        assert!(out
            .warnings
            .iter()
            .any(|w| w.starts_with("pf_employer_percentage")));
        assert_eq!(out.result.breakdown.pf_employer, dec!(5000));
    }

    #[test]
    fn test_envelope_metadata() {
        let form = SalaryForm::with_wage(dec!(1000), SalaryPercentages::default());
        let out = calculate_salary_breakdown(&form).unwrap();
        assert_eq!(out.methodology, "Salary breakdown from monthly wage");
        assert_eq!(out.metadata.precision, "rust_decimal_128bit");
    }
}
