use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use payroll_core::salary::percentages::SalaryPercentages;
use payroll_core::structure::record::DEFAULT_PROFESSIONAL_TAX;
use payroll_core::structure::WageType;
use payroll_core::Money;

use crate::input;

/// Company-wide salary defaults, loaded from `--config <file>`.
///
/// ```yaml
/// wage_type: fixed
/// professional_tax: "200"
/// percentages:
///   basic_salary_percentage: "50"
///   hra_percentage: "50"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyDefaults {
    pub wage_type: WageType,
    pub percentages: SalaryPercentages,
    pub professional_tax: Money,
}

impl Default for CompanyDefaults {
    fn default() -> Self {
        Self {
            wage_type: WageType::default(),
            percentages: SalaryPercentages::default(),
            professional_tax: DEFAULT_PROFESSIONAL_TAX,
        }
    }
}

impl CompanyDefaults {
    /// The defaults as flat form fields: `wage_type`, `professional_tax`
    /// and one key per percentage.
    pub fn to_fields(&self) -> Result<Map<String, Value>, serde_json::Error> {
        let mut fields = match serde_json::to_value(&self.percentages)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        fields.insert("wage_type".into(), serde_json::to_value(self.wage_type)?);
        fields.insert(
            "professional_tax".into(),
            serde_json::to_value(self.professional_tax)?,
        );
        Ok(fields)
    }
}

/// Layer an explicit salary object over the company defaults: keys present
/// in `explicit` win, absent ones come from `defaults`. Anything other than
/// a JSON object is returned unchanged.
pub fn overlay(defaults: &CompanyDefaults, explicit: Value) -> Result<Value, serde_json::Error> {
    let Value::Object(explicit) = explicit else {
        return Ok(explicit);
    };
    let mut merged = defaults.to_fields()?;
    merged.extend(explicit);
    Ok(Value::Object(merged))
}

pub fn load(path: Option<&str>) -> Result<CompanyDefaults, Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            let defaults: CompanyDefaults = input::file::read_input(p)?;
            tracing::debug!(path = p, "loaded company defaults");
            Ok(defaults)
        }
        None => Ok(CompanyDefaults::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payroll_core::salary::form::SalaryForm;
    use rust_decimal::Decimal;
    use serde_json::json;
    use std::str::FromStr;

    fn company() -> CompanyDefaults {
        CompanyDefaults {
            wage_type: WageType::Hourly,
            percentages: SalaryPercentages {
                basic_salary_percentage: Decimal::from(40),
                ..Default::default()
            },
            professional_tax: Decimal::from(150),
        }
    }

    #[test]
    fn test_defaults_fill_fields_missing_from_input() {
        let merged = overlay(&company(), json!({"monthly_wage": "30000"})).unwrap();
        let form: SalaryForm = serde_json::from_value(merged).unwrap();
        assert_eq!(form.wage_type, WageType::Hourly);
        assert_eq!(form.percentages.basic_salary_percentage, Decimal::from(40));
        assert_eq!(form.professional_tax, Decimal::from(150));
        assert_eq!(
            form.percentages.hra_percentage,
            SalaryPercentages::default().hra_percentage
        );
    }

    #[test]
    fn test_input_fields_override_defaults() {
        let merged = overlay(
            &company(),
            json!({
                "monthly_wage": 30000,
                "basic_salary_percentage": "55",
                "professional_tax": "0",
                "wage_type": "fixed"
            }),
        )
        .unwrap();
        let form: SalaryForm = serde_json::from_value(merged).unwrap();
        assert_eq!(form.wage_type, WageType::Fixed);
        assert_eq!(
            form.percentages.basic_salary_percentage,
            Decimal::from_str("55").unwrap()
        );
        assert_eq!(form.professional_tax, Decimal::ZERO);
    }

    #[test]
    fn test_non_object_input_untouched() {
        let merged = overlay(&company(), json!([1, 2])).unwrap();
        assert_eq!(merged, json!([1, 2]));
    }
}
