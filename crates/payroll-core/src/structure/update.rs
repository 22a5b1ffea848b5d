use serde::{Deserialize, Serialize};

use crate::salary::breakdown::WageBreakdown;
use crate::salary::percentages::SalaryPercentages;
use crate::structure::record::{SalaryStructureRecord, WageType};
use crate::types::{Money, Percent};

/// The save payload. Carries inputs only; derived amounts never leave the
/// calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryStructureUpdate {
    pub wage_type: WageType,
    pub monthly_wage: Money,
    #[serde(flatten)]
    pub percentages: SalaryPercentages,
    pub fixed_allowance_percentage: Percent,
    pub professional_tax: Money,
}

impl SalaryStructureUpdate {
    pub fn from_breakdown(wage_type: WageType, breakdown: &WageBreakdown) -> Self {
        Self {
            wage_type,
            monthly_wage: breakdown.monthly_wage,
            percentages: breakdown.percentages.clone(),
            fixed_allowance_percentage: breakdown.fixed_allowance_percentage,
            professional_tax: breakdown.professional_tax,
        }
    }

    /// What the backend hands back on the next read.
    pub fn into_record(self) -> SalaryStructureRecord {
        SalaryStructureRecord {
            wage_type: self.wage_type,
            monthly_wage: self.monthly_wage,
            percentages: self.percentages,
            fixed_allowance_percentage: self.fixed_allowance_percentage,
            professional_tax: self.professional_tax,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::salary::breakdown::derive_from_wage;
    use rust_decimal_macros::dec;

    #[test]
    fn test_payload_has_no_derived_amounts() {
        let b = derive_from_wage(dec!(50000), &SalaryPercentages::default());
        let update = SalaryStructureUpdate::from_breakdown(WageType::Fixed, &b);
        let json = serde_json::to_value(&update).unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.contains_key("basic_salary_percentage"));
        assert!(obj.contains_key("monthly_wage"));
        assert!(!obj.contains_key("basic_salary"));
        assert!(!obj.contains_key("hra"));
        assert!(!obj.contains_key("yearly_wage"));
        assert_eq!(obj["wage_type"], "fixed");
    }

    #[test]
    fn test_into_record_preserves_inputs() {
        let b = derive_from_wage(dec!(42000), &SalaryPercentages::default());
        let record = SalaryStructureUpdate::from_breakdown(WageType::Hourly, &b).into_record();
        assert_eq!(record.monthly_wage, dec!(42000));
        assert_eq!(record.wage_type, WageType::Hourly);
        assert_eq!(record.percentages, SalaryPercentages::default());
    }
}
