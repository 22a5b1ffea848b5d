//! Payslips for a single pay period.
//!
//! A payslip is the salary structure scaled to the days actually payable
//! in the period, less the employee deductions.

pub mod period;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, warn};

use crate::error::PayrollError;
use crate::salary::breakdown::{Allocation, FixedAllowanceMode};
use crate::salary::form::SalaryForm;
use crate::salary::presentation::{round_money, SalaryComponent};
use crate::salary::validation::validate_for_save;
use crate::structure::record::SalaryStructureRecord;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::PayrollResult;

pub use period::PayPeriod;

/// Attendance totals for the period, as aggregated by the attendance screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceSummary {
    /// Days with a completed clock-in/clock-out
    pub worked_days: Decimal,
    /// Approved paid leave days
    #[serde(default)]
    pub paid_leave_days: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayslipInput {
    pub employee_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_name: Option<String>,
    pub period: PayPeriod,
    pub structure: SalaryStructureRecord,
    #[serde(default)]
    pub fixed_allowance_mode: FixedAllowanceMode,
    /// Omitted means the whole period is payable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendance: Option<AttendanceSummary>,
}

/// One printed payslip line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipLine {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<Percent>,
    pub amount: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payslip {
    pub employee_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_name: Option<String>,
    pub period: PayPeriod,
    pub period_label: String,
    pub period_days: i64,
    /// Days in the calendar month the period falls in
    pub month_days: i64,
    pub payable_days: Decimal,
    /// payable_days / month_days
    pub proration_factor: Decimal,
    pub earnings: Vec<PayslipLine>,
    pub deductions: Vec<PayslipLine>,
    pub employer_contributions: Vec<PayslipLine>,
    pub gross_earnings: Money,
    pub total_deductions: Money,
    pub net_pay: Money,
    /// Gross earnings plus employer contributions
    pub employer_cost: Money,
}

/// Build the payslip for one employee and period.
///
/// The structure holds monthly amounts, so earnings and both PF shares
/// scale with payable days over the days in the month. Professional tax is
/// not attendance dependent: it scales only with the share of the month the
/// period covers. Lines are rounded for display, totals are taken from the
/// unrounded amounts.
pub fn generate_payslip(input: &PayslipInput) -> PayrollResult<ComputationOutput<Payslip>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    input.period.validate()?;
    if input.employee_id.trim().is_empty() {
        return Err(PayrollError::InvalidInput {
            field: "employee_id".into(),
            reason: "Employee id is required".into(),
        });
    }

    // Same rules as saving the structure from the edit form
    let form = SalaryForm {
        fixed_allowance_mode: input.fixed_allowance_mode,
        ..SalaryForm::from_record(&input.structure)
    };
    validate_for_save(&form)?;

    let period_days = input.period.days();
    let month_days = input.period.month_days()?;
    let month_days_decimal = Decimal::from(month_days);
    let payable_days = payable_days(
        input.attendance.as_ref(),
        input.period.days_decimal(),
        &mut warnings,
    )?;
    let factor = payable_days / month_days_decimal;
    let coverage = input.period.days_decimal() / month_days_decimal;

    let breakdown = input.structure.derive_with(input.fixed_allowance_mode);
    if let Allocation::Overcommitted { deficit } = breakdown.allocation() {
        warnings.push(format!(
            "Salary structure overcommitted by {} per month; fixed allowance is negative",
            round_money(deficit)
        ));
    }

    let pct = &breakdown.percentages;
    let earning_lines = [
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
    ];

    let gross: Money = earning_lines.iter().map(|(_, _, amount)| *amount * factor).sum();
    let earnings: Vec<PayslipLine> = earning_lines
        .iter()
        .map(|(component, rate, amount)| PayslipLine {
            label: component.label().to_string(),
            rate: Some(round_money(*rate)),
            amount: round_money(*amount * factor),
        })
        .collect();

    let pf_employee = breakdown.pf_employee * factor;
    let professional_tax = breakdown.professional_tax * coverage;
    let total_deductions = pf_employee + professional_tax;
    let deductions = vec![
        PayslipLine {
            label: SalaryComponent::PfEmployee.label().to_string(),
            rate: Some(round_money(pct.pf_employee_percentage)),
            amount: round_money(pf_employee),
        },
        PayslipLine {
            label: "Professional Tax".to_string(),
            rate: None,
            amount: round_money(professional_tax),
        },
    ];

    let pf_employer = breakdown.pf_employer * factor;
    let employer_contributions = vec![PayslipLine {
        label: SalaryComponent::PfEmployer.label().to_string(),
        rate: Some(round_money(pct.pf_employer_percentage)),
        amount: round_money(pf_employer),
    }];

    let net_pay = gross - total_deductions;
    if net_pay < Decimal::ZERO {
        warn!(employee_id = %input.employee_id, %net_pay, "negative net pay");
        warnings.push(format!(
            "Deductions exceed earnings; net pay is {}",
            round_money(net_pay)
        ));
    }

    debug!(
        employee_id = %input.employee_id,
        period = %input.period.label(),
        %payable_days,
        %net_pay,
        "generated payslip"
    );

    let output = Payslip {
        employee_id: input.employee_id.clone(),
        employee_name: input.employee_name.clone(),
        period: input.period,
        period_label: input.period.label(),
        period_days,
        month_days,
        payable_days,
        proration_factor: factor.round_dp(6),
        earnings,
        deductions,
        employer_contributions,
        gross_earnings: round_money(gross),
        total_deductions: round_money(total_deductions),
        net_pay: round_money(net_pay),
        employer_cost: round_money(gross + pf_employer),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Payslip prorated by payable days over days in the month",
        input,
        warnings,
        elapsed,
        output,
    ))
}

/// Worked plus paid leave days, capped at the calendar days in the period.
fn payable_days(
    attendance: Option<&AttendanceSummary>,
    calendar_days: Decimal,
    warnings: &mut Vec<String>,
) -> PayrollResult<Decimal> {
    let Some(att) = attendance else {
        return Ok(calendar_days);
    };
    if att.worked_days < Decimal::ZERO {
        return Err(PayrollError::InvalidInput {
            field: "attendance.worked_days".into(),
            reason: "Worked days cannot be negative".into(),
        });
    }
    if att.paid_leave_days < Decimal::ZERO {
        return Err(PayrollError::InvalidInput {
            field: "attendance.paid_leave_days".into(),
            reason: "Paid leave days cannot be negative".into(),
        });
    }
    let claimed = att
        .worked_days
        .checked_add(att.paid_leave_days)
        .unwrap_or(Decimal::MAX);
    if claimed > calendar_days {
        warnings.push(format!(
            "Payable days ({claimed}) exceed the {calendar_days} days in the period; capped"
        ));
        return Ok(calendar_days);
    }
    Ok(claimed)
}
