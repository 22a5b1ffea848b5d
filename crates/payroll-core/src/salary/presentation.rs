use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::salary::breakdown::WageBreakdown;
use crate::types::{Money, Percent};

/// Decimal places shown for money and percentages.
pub const DISPLAY_DP: u32 = 2;

/// Round for display. Never feed the result back into a derivation.
pub fn round_money(value: Money) -> Money {
    value.round_dp_with_strategy(DISPLAY_DP, RoundingStrategy::MidpointAwayFromZero)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalaryComponent {
    BasicSalary,
    HouseRentAllowance,
    StandardAllowance,
    PerformanceBonus,
    LeaveTravelAllowance,
    FixedAllowance,
    PfEmployee,
    PfEmployer,
}

impl SalaryComponent {
    pub fn label(self) -> &'static str {
        match self {
            SalaryComponent::BasicSalary => "Basic Salary",
            SalaryComponent::HouseRentAllowance => "House Rent Allowance",
            SalaryComponent::StandardAllowance => "Standard Allowance",
            SalaryComponent::PerformanceBonus => "Performance Bonus",
            SalaryComponent::LeaveTravelAllowance => "Leave Travel Allowance",
            SalaryComponent::FixedAllowance => "Fixed Allowance",
            SalaryComponent::PfEmployee => "PF (Employee)",
            SalaryComponent::PfEmployer => "PF (Employer)",
        }
    }

    /// Earnings add up to the wage; PF lines are reported alongside.
    pub fn is_earning(self) -> bool {
        !matches!(self, SalaryComponent::PfEmployee | SalaryComponent::PfEmployer)
    }
}

/// One display row: the component, its percentage and both amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRow {
    pub component: SalaryComponent,
    pub label: String,
    /// Percentage as configured, relative to the component's own base
    pub percentage: Percent,
    pub monthly: Money,
    pub yearly: Money,
}

/// Rounded rows for every earning and PF line, in payslip order.
///
/// The yearly figure is projected from the unrounded monthly amount, so it
/// can differ from twelve times the rounded monthly one by a few paise.
pub fn component_rows(breakdown: &WageBreakdown) -> Vec<ComponentRow> {
    let pct = &breakdown.percentages;
    let lines = [
        (
            SalaryComponent::BasicSalary,
            pct.basic_salary_percentage,
            breakdown.basic_salary,
        ),
        (
            SalaryComponent::HouseRentAllowance,
            pct.hra_percentage,
            breakdown.hra,
        ),
        (
            SalaryComponent::StandardAllowance,
            pct.standard_allowance_percentage,
            breakdown.standard_allowance,
        ),
        (
            SalaryComponent::PerformanceBonus,
            pct.performance_bonus_percentage,
            breakdown.performance_bonus,
        ),
        (
            SalaryComponent::LeaveTravelAllowance,
            pct.leave_travel_allowance_percentage,
            breakdown.leave_travel_allowance,
        ),
        (
            SalaryComponent::FixedAllowance,
            breakdown.fixed_allowance_percentage,
            breakdown.fixed_allowance,
        ),
        (
            SalaryComponent::PfEmployee,
            pct.pf_employee_percentage,
            breakdown.pf_employee,
        ),
        (
            SalaryComponent::PfEmployer,
            pct.pf_employer_percentage,
            breakdown.pf_employer,
        ),
    ];

    lines
        .into_iter()
        .map(|(component, percentage, monthly)| ComponentRow {
            component,
            label: component.label().to_string(),
            percentage: round_money(percentage),
            monthly: round_money(monthly),
            yearly: round_money(yearly(monthly)),
        })
        .collect()
}

fn yearly(monthly: Money) -> Money {
    monthly * dec!(12)
}

/// Sum of the rounded earning rows, as a payslip reader would add them up.
pub fn displayed_earnings(rows: &[ComponentRow]) -> Money {
    rows.iter()
        .filter(|r| r.component.is_earning())
        .map(|r| r.monthly)
        .sum::<Decimal>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::salary::breakdown::derive_from_wage;
    use crate::salary::percentages::SalaryPercentages;

    #[test]
    fn test_round_money_midpoint_away_from_zero() {
        assert_eq!(round_money(dec!(2.345)), dec!(2.35));
        assert_eq!(round_money(dec!(-2.345)), dec!(-2.35));
        assert_eq!(round_money(dec!(10)), dec!(10));
    }

    #[test]
    fn test_rows_in_payslip_order() {
        let b = derive_from_wage(dec!(40000), &SalaryPercentages::default());
        let rows = component_rows(&b);
        let order: Vec<SalaryComponent> = rows.iter().map(|r| r.component).collect();
        assert_eq!(order.len(), 8);
        assert_eq!(order[0], SalaryComponent::BasicSalary);
        assert_eq!(order[5], SalaryComponent::FixedAllowance);
        assert_eq!(order[7], SalaryComponent::PfEmployer);
        assert_eq!(rows[1].label, "House Rent Allowance");
    }

    #[test]
    fn test_yearly_projected_from_unrounded_monthly() {
        // 12345 * 50% * 8.33% = 514.16925 per month
        let b = derive_from_wage(dec!(12345), &SalaryPercentages::default());
        let rows = component_rows(&b);
        let bonus = &rows[3];
        assert_eq!(bonus.monthly, dec!(514.17));
        // 514.16925 * 12 = 6170.031
        assert_eq!(bonus.yearly, dec!(6170.03));
        assert_ne!(bonus.yearly, bonus.monthly * dec!(12));
    }

    #[test]
    fn test_rounding_does_not_touch_breakdown() {
        let b = derive_from_wage(dec!(12345), &SalaryPercentages::default());
        let _ = component_rows(&b);
        assert_eq!(b.performance_bonus, dec!(514.16925));
    }

    #[test]
    fn test_displayed_earnings_skip_pf() {
        let b = derive_from_wage(dec!(50000), &SalaryPercentages::default());
        let rows = component_rows(&b);
        assert_eq!(displayed_earnings(&rows), dec!(50000));
    }
}
