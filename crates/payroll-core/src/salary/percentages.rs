use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::PayrollError;
use crate::types::Percent;
use crate::PayrollResult;

/// The configurable knobs of a salary structure, all on a 0-100 scale.
///
/// Each field is defaulted independently when absent from the input, so a
/// partial record such as `{"hra_percentage": "40"}` keeps the other
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalaryPercentages {
    /// Share of the monthly wage paid as basic salary
    pub basic_salary_percentage: Percent,
    /// House rent allowance, share of basic salary
    pub hra_percentage: Percent,
    /// Standard allowance, share of the monthly wage
    pub standard_allowance_percentage: Percent,
    /// Performance bonus, share of basic salary
    pub performance_bonus_percentage: Percent,
    /// Leave travel allowance, share of basic salary
    pub leave_travel_allowance_percentage: Percent,
    /// Employee provident fund contribution, share of basic salary
    pub pf_employee_percentage: Percent,
    /// Employer provident fund contribution, share of basic salary
    pub pf_employer_percentage: Percent,
}

impl Default for SalaryPercentages {
    fn default() -> Self {
        Self {
            basic_salary_percentage: dec!(50),
            hra_percentage: dec!(50),
            standard_allowance_percentage: dec!(10),
            performance_bonus_percentage: dec!(8.33),
            leave_travel_allowance_percentage: dec!(8.33),
            pf_employee_percentage: dec!(12),
            pf_employer_percentage: dec!(12),
        }
    }
}

/// A percentage that was pulled back into `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClampedPercentage {
    pub field: String,
    pub supplied: Percent,
    pub applied: Percent,
}

impl SalaryPercentages {
    /// (field name, value) pairs in evaluation order.
    pub fn fields(&self) -> [(&'static str, Percent); 7] {
        [
            ("basic_salary_percentage", self.basic_salary_percentage),
            ("hra_percentage", self.hra_percentage),
            (
                "standard_allowance_percentage",
                self.standard_allowance_percentage,
            ),
            (
                "performance_bonus_percentage",
                self.performance_bonus_percentage,
            ),
            (
                "leave_travel_allowance_percentage",
                self.leave_travel_allowance_percentage,
            ),
            ("pf_employee_percentage", self.pf_employee_percentage),
            ("pf_employer_percentage", self.pf_employer_percentage),
        ]
    }

    /// Copy with every field clamped into `[0, 100]`, plus the list of
    /// fields that had to move.
    pub fn clamped(&self) -> (SalaryPercentages, Vec<ClampedPercentage>) {
        let mut adjustments = Vec::new();
        let mut clamp = |field: &str, value: Percent| {
            let applied = clamp_percent(value);
            if applied != value {
                adjustments.push(ClampedPercentage {
                    field: field.to_string(),
                    supplied: value,
                    applied,
                });
            }
            applied
        };

        let clamped = SalaryPercentages {
            basic_salary_percentage: clamp("basic_salary_percentage", self.basic_salary_percentage),
            hra_percentage: clamp("hra_percentage", self.hra_percentage),
            standard_allowance_percentage: clamp(
                "standard_allowance_percentage",
                self.standard_allowance_percentage,
            ),
            performance_bonus_percentage: clamp(
                "performance_bonus_percentage",
                self.performance_bonus_percentage,
            ),
            leave_travel_allowance_percentage: clamp(
                "leave_travel_allowance_percentage",
                self.leave_travel_allowance_percentage,
            ),
            pf_employee_percentage: clamp("pf_employee_percentage", self.pf_employee_percentage),
            pf_employer_percentage: clamp("pf_employer_percentage", self.pf_employer_percentage),
        };
        (clamped, adjustments)
    }

    /// Reject any field outside `[0, 100]`. Used before persisting.
    pub fn validate_range(&self) -> PayrollResult<()> {
        for (field, value) in self.fields() {
            check_percent_range(field, value)?;
        }
        Ok(())
    }
}

pub fn clamp_percent(value: Percent) -> Percent {
    value.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

pub(crate) fn check_percent_range(field: &str, value: Percent) -> PayrollResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(PayrollError::InvalidInput {
            field: field.into(),
            reason: format!("Percentage must be between 0 and 100, got {value}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let pct: SalaryPercentages =
            serde_json::from_str(r#"{"hra_percentage": "40"}"#).unwrap();
        assert_eq!(pct.hra_percentage, dec!(40));
        assert_eq!(pct.basic_salary_percentage, dec!(50));
        assert_eq!(pct.pf_employer_percentage, dec!(12));
    }

    #[test]
    fn test_numeric_json_accepted() {
        let pct: SalaryPercentages =
            serde_json::from_str(r#"{"basic_salary_percentage": 60}"#).unwrap();
        assert_eq!(pct.basic_salary_percentage, dec!(60));
    }

    #[test]
    fn test_clamp_reports_adjusted_fields() {
        let pct = SalaryPercentages {
            basic_salary_percentage: dec!(150),
            hra_percentage: dec!(-5),
            ..Default::default()
        };
        let (clamped, adjustments) = pct.clamped();
        assert_eq!(clamped.basic_salary_percentage, dec!(100));
        assert_eq!(clamped.hra_percentage, Decimal::ZERO);
        assert_eq!(adjustments.len(), 2);
        assert_eq!(adjustments[0].field, "basic_salary_percentage");
        assert_eq!(adjustments[0].supplied, dec!(150));
    }

    #[test]
    fn test_clamp_leaves_valid_values_alone() {
        let (clamped, adjustments) = SalaryPercentages::default().clamped();
        assert_eq!(clamped, SalaryPercentages::default());
        assert!(adjustments.is_empty());
    }

    #[test]
    fn test_validate_range_rejects_out_of_range() {
        let pct = SalaryPercentages {
            pf_employee_percentage: dec!(100.01),
            ..Default::default()
        };
        let err = pct.validate_range().unwrap_err();
        assert_eq!(err.field(), Some("pf_employee_percentage"));
    }

    #[test]
    fn test_validate_range_accepts_bounds() {
        let pct = SalaryPercentages {
            basic_salary_percentage: dec!(100),
            hra_percentage: Decimal::ZERO,
            ..Default::default()
        };
        assert!(pct.validate_range().is_ok());
    }
}
