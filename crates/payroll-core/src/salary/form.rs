use serde::{Deserialize, Serialize};

use crate::salary::breakdown::{derive, FixedAllowanceMode, WageBreakdown};
use crate::salary::percentages::SalaryPercentages;
use crate::salary::wage::{effective_monthly_wage, WageEntry};
use crate::structure::record::{default_professional_tax, SalaryStructureRecord, WageType};
use crate::types::Money;

/// The salary section of the employee-edit and self-service profile forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryForm {
    #[serde(default)]
    pub wage_type: WageType,
    /// Raw wage field; may be missing or not a number while being typed
    #[serde(default)]
    pub monthly_wage: Option<WageEntry>,
    #[serde(flatten)]
    pub percentages: SalaryPercentages,
    #[serde(default)]
    pub fixed_allowance_mode: FixedAllowanceMode,
    #[serde(default = "default_professional_tax")]
    pub professional_tax: Money,
}

impl Default for SalaryForm {
    fn default() -> Self {
        Self {
            wage_type: WageType::default(),
            monthly_wage: None,
            percentages: SalaryPercentages::default(),
            fixed_allowance_mode: FixedAllowanceMode::default(),
            professional_tax: default_professional_tax(),
        }
    }
}

impl SalaryForm {
    pub fn with_wage(monthly_wage: impl Into<WageEntry>, percentages: SalaryPercentages) -> Self {
        Self {
            monthly_wage: Some(monthly_wage.into()),
            percentages,
            ..Default::default()
        }
    }

    /// Pre-fill the form from a stored record, in remainder mode.
    pub fn from_record(record: &SalaryStructureRecord) -> Self {
        Self {
            wage_type: record.wage_type,
            monthly_wage: Some(WageEntry::Amount(record.monthly_wage)),
            percentages: record.percentages.clone(),
            fixed_allowance_mode: FixedAllowanceMode::Remainder,
            professional_tax: record.professional_tax,
        }
    }

    /// Live preview: an unusable wage counts as zero.
    pub fn preview(&self) -> WageBreakdown {
        derive(
            effective_monthly_wage(self.monthly_wage.as_ref()),
            &self.percentages,
            self.fixed_allowance_mode,
            self.professional_tax,
        )
    }
}
