use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::salary::percentages::{clamp_percent, SalaryPercentages};
use crate::salary::wage::{is_valid_wage, MAX_MONTHLY_WAGE};
use crate::types::{percent_of, Money, Percent};

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// How the fixed allowance is obtained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FixedAllowanceMode {
    /// Whatever the named components leave of the wage.
    #[default]
    Remainder,
    /// An operator-supplied share of the wage, independent of the others.
    Pinned { percentage: Percent },
}

/// Every line of a salary structure, derived from the wage and percentages.
///
/// Values are unrounded; see [`crate::salary::presentation`] for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageBreakdown {
    pub monthly_wage: Money,
    pub yearly_wage: Money,
    pub basic_salary: Money,
    pub hra: Money,
    pub standard_allowance: Money,
    pub performance_bonus: Money,
    pub leave_travel_allowance: Money,
    pub fixed_allowance: Money,
    pub fixed_allowance_percentage: Percent,
    pub pf_employee: Money,
    pub pf_employer: Money,
    pub professional_tax: Money,
    /// Percentages actually applied (after clamping)
    pub percentages: SalaryPercentages,
    pub mode: FixedAllowanceMode,
}

/// Whether the earning components use up exactly the wage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Allocation {
    Balanced,
    /// Earnings exceed the wage by `deficit`.
    Overcommitted { deficit: Money },
    /// Pinned mode left `surplus` of the wage unassigned.
    Unallocated { surplus: Money },
}

impl WageBreakdown {
    /// Basic, HRA, standard allowance, performance bonus and LTA.
    pub fn named_components(&self) -> Money {
        self.basic_salary
            + self.hra
            + self.standard_allowance
            + self.performance_bonus
            + self.leave_travel_allowance
    }

    /// All earning lines including the fixed allowance. PF is not an earning.
    pub fn total_earnings(&self) -> Money {
        self.named_components() + self.fixed_allowance
    }

    pub fn allocation(&self) -> Allocation {
        let gap = self.monthly_wage - self.total_earnings();
        if gap < Decimal::ZERO {
            Allocation::Overcommitted { deficit: -gap }
        } else if gap > Decimal::ZERO {
            Allocation::Unallocated { surplus: gap }
        } else {
            Allocation::Balanced
        }
    }
}

/// Derive a full breakdown. This is the only place the salary rules live.
///
/// Evaluation order is fixed, each step using only earlier results:
/// yearly wage, basic, HRA, standard allowance, performance bonus, LTA,
/// fixed allowance and its percentage, then the two PF shares.
///
/// A negative wage, or one above [`MAX_MONTHLY_WAGE`], is treated as zero
/// so no product can overflow. Every percentage is clamped into `[0, 100]`
/// and professional tax into `[0, MAX_MONTHLY_WAGE]`. Overcommitted
/// percentages are not corrected: in remainder mode the fixed allowance
/// simply goes negative.
pub fn derive(
    monthly_wage: Money,
    percentages: &SalaryPercentages,
    mode: FixedAllowanceMode,
    professional_tax: Money,
) -> WageBreakdown {
    let monthly_wage = if is_valid_wage(monthly_wage) {
        monthly_wage
    } else {
        Decimal::ZERO
    };
    let (pct, _) = percentages.clamped();

    let yearly_wage = monthly_wage * MONTHS_PER_YEAR;
    let basic_salary = percent_of(monthly_wage, pct.basic_salary_percentage);
    let hra = percent_of(basic_salary, pct.hra_percentage);
    let standard_allowance = percent_of(monthly_wage, pct.standard_allowance_percentage);
    let performance_bonus = percent_of(basic_salary, pct.performance_bonus_percentage);
    let leave_travel_allowance = percent_of(basic_salary, pct.leave_travel_allowance_percentage);

    let (fixed_allowance, fixed_allowance_percentage, mode) = match mode {
        FixedAllowanceMode::Remainder => {
            let named = basic_salary
                + hra
                + standard_allowance
                + performance_bonus
                + leave_travel_allowance;
            let fixed = monthly_wage - named;
            let fixed_pct = if monthly_wage > Decimal::ZERO {
                fixed / monthly_wage * Decimal::ONE_HUNDRED
            } else {
                Decimal::ZERO
            };
            (fixed, fixed_pct, FixedAllowanceMode::Remainder)
        }
        FixedAllowanceMode::Pinned { percentage } => {
            let percentage = clamp_percent(percentage);
            (
                percent_of(monthly_wage, percentage),
                percentage,
                FixedAllowanceMode::Pinned { percentage },
            )
        }
    };

    let pf_employee = percent_of(basic_salary, pct.pf_employee_percentage);
    let pf_employer = percent_of(basic_salary, pct.pf_employer_percentage);

    debug!(
        %monthly_wage,
        %basic_salary,
        %fixed_allowance,
        ?mode,
        "derived wage breakdown"
    );

    WageBreakdown {
        monthly_wage,
        yearly_wage,
        basic_salary,
        hra,
        standard_allowance,
        performance_bonus,
        leave_travel_allowance,
        fixed_allowance,
        fixed_allowance_percentage,
        pf_employee,
        pf_employer,
        professional_tax: professional_tax.clamp(Decimal::ZERO, MAX_MONTHLY_WAGE),
        percentages: pct,
        mode,
    }
}

/// Remainder mode: the fixed allowance absorbs whatever is left of the wage.
pub fn derive_from_wage(monthly_wage: Money, percentages: &SalaryPercentages) -> WageBreakdown {
    derive(
        monthly_wage,
        percentages,
        FixedAllowanceMode::Remainder,
        Decimal::ZERO,
    )
}

/// Pinned mode, used when the fixed allowance percentage is edited directly.
pub fn derive_from_fixed_allowance_percentage(
    monthly_wage: Money,
    fixed_allowance_percentage: Percent,
    percentages: &SalaryPercentages,
) -> WageBreakdown {
    derive(
        monthly_wage,
        percentages,
        FixedAllowanceMode::Pinned {
            percentage: fixed_allowance_percentage,
        },
        Decimal::ZERO,
    )
}
