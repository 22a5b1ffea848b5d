use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::salary::breakdown::{derive, FixedAllowanceMode, WageBreakdown};
use crate::salary::percentages::SalaryPercentages;
use crate::types::{Money, Percent};

/// Flat monthly professional tax applied when a record omits it.
pub const DEFAULT_PROFESSIONAL_TAX: Money = dec!(200);

pub(crate) fn default_professional_tax() -> Money {
    DEFAULT_PROFESSIONAL_TAX
}

/// How an employee is paid. Carried through unchanged; the breakdown rules
/// are the same for both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WageType {
    #[default]
    #[serde(alias = "Fixed Wage", alias = "fixed_wage", alias = "Fixed")]
    Fixed,
    #[serde(alias = "Hourly Wage", alias = "hourly_wage", alias = "Hourly")]
    Hourly,
}

/// One employee's stored salary structure, as read from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryStructureRecord {
    #[serde(default)]
    pub wage_type: WageType,
    #[serde(default)]
    pub monthly_wage: Money,
    #[serde(flatten)]
    pub percentages: SalaryPercentages,
    /// Only authoritative when the operator pinned it; otherwise it is the
    /// remainder share as of the last save.
    #[serde(default)]
    pub fixed_allowance_percentage: Percent,
    #[serde(default = "default_professional_tax")]
    pub professional_tax: Money,
}

impl Default for SalaryStructureRecord {
    fn default() -> Self {
        Self {
            wage_type: WageType::default(),
            monthly_wage: Decimal::ZERO,
            percentages: SalaryPercentages::default(),
            fixed_allowance_percentage: Decimal::ZERO,
            professional_tax: DEFAULT_PROFESSIONAL_TAX,
        }
    }
}

impl SalaryStructureRecord {
    /// Re-derive all amounts with the fixed allowance as the remainder.
    pub fn derive(&self) -> WageBreakdown {
        self.derive_with(FixedAllowanceMode::Remainder)
    }

    /// Re-derive with the stored fixed allowance percentage pinned.
    pub fn derive_pinned(&self) -> WageBreakdown {
        self.derive_with(FixedAllowanceMode::Pinned {
            percentage: self.fixed_allowance_percentage,
        })
    }

    pub fn derive_with(&self, mode: FixedAllowanceMode) -> WageBreakdown {
        derive(
            self.monthly_wage,
            &self.percentages,
            mode,
            self.professional_tax,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_backend_shape() {
        let json = r#"{
            "wage_type": "Fixed Wage",
            "monthly_wage": 50000,
            "basic_salary_percentage": "60",
            "hra_percentage": "10",
            "standard_allowance_percentage": "0.5",
            "performance_bonus_percentage": "8.33",
            "leave_travel_allowance_percentage": "8.33",
            "fixed_allowance_percentage": "23.504",
            "pf_employee_percentage": "12",
            "pf_employer_percentage": "12",
            "professional_tax": "200"
        }"#;
        let record: SalaryStructureRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.wage_type, WageType::Fixed);
        assert_eq!(record.monthly_wage, dec!(50000));
        assert_eq!(record.percentages.standard_allowance_percentage, dec!(0.5));
        assert_eq!(record.fixed_allowance_percentage, dec!(23.504));

        let b = record.derive();
        assert_eq!(b.fixed_allowance, dec!(11752));
        assert_eq!(b.professional_tax, dec!(200));
    }

    #[test]
    fn test_sparse_record_takes_defaults() {
        let record: SalaryStructureRecord =
            serde_json::from_str(r#"{"monthly_wage": "30000", "wage_type": "hourly"}"#).unwrap();
        assert_eq!(record.wage_type, WageType::Hourly);
        assert_eq!(record.percentages, SalaryPercentages::default());
        assert_eq!(record.professional_tax, DEFAULT_PROFESSIONAL_TAX);
    }

    #[test]
    fn test_derive_pinned_uses_stored_percentage() {
        let record = SalaryStructureRecord {
            monthly_wage: dec!(20000),
            fixed_allowance_percentage: dec!(5),
            ..Default::default()
        };
        let b = record.derive_pinned();
        assert_eq!(b.fixed_allowance, dec!(1000));
        assert_eq!(
            b.mode,
            FixedAllowanceMode::Pinned {
                percentage: dec!(5)
            }
        );
    }
}
