use chrono::{Datelike, NaiveDate};
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use payroll_core::payslip::{generate_payslip, AttendanceSummary, PayPeriod, PayslipInput};
use payroll_core::salary::breakdown::FixedAllowanceMode;
use payroll_core::structure::SalaryStructureRecord;

use crate::config;
use crate::input;

/// Arguments for payslip generation
#[derive(Args)]
pub struct PayslipArgs {
    /// Path to JSON/YAML payslip input (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Company defaults file (JSON/YAML), filling structure fields the input omits
    #[arg(long)]
    pub config: Option<String>,

    /// Employee identifier
    #[arg(long)]
    pub employee_id: Option<String>,

    /// Employee display name
    #[arg(long)]
    pub employee_name: Option<String>,

    /// Pay month, YYYY-MM
    #[arg(long)]
    pub month: Option<String>,

    /// Monthly wage
    #[arg(long)]
    pub monthly_wage: Option<Decimal>,

    /// Days worked in the period (omit for a full period)
    #[arg(long)]
    pub worked_days: Option<Decimal>,

    /// Approved paid leave days in the period
    #[arg(long)]
    pub paid_leave_days: Option<Decimal>,

    /// Pin the fixed allowance to this % of wage instead of the remainder
    #[arg(long)]
    pub fixed_allowance_pct: Option<Decimal>,
}

pub fn run_payslip(args: PayslipArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let defaults = config::load(args.config.as_deref())?;
    let explicit: Option<Value> = match args.input {
        Some(ref path) => Some(input::file::read_input(path)?),
        None => input::stdin::read_stdin()?,
    };

    let payslip_input: PayslipInput = if let Some(mut data) = explicit {
        if let Some(structure) = data.get_mut("structure") {
            *structure = config::overlay(&defaults, structure.take())?;
        }
        serde_json::from_value(data)?
    } else {
        let employee_id = args
            .employee_id
            .ok_or("--employee-id is required (or provide --input)")?;
        let month = args.month.ok_or("--month is required (or provide --input)")?;
        let monthly_wage = args
            .monthly_wage
            .ok_or("--monthly-wage is required (or provide --input)")?;
        let attendance = match (args.worked_days, args.paid_leave_days) {
            (None, None) => None,
            (worked, leave) => Some(AttendanceSummary {
                worked_days: worked.unwrap_or(Decimal::ZERO),
                paid_leave_days: leave.unwrap_or(Decimal::ZERO),
            }),
        };

        PayslipInput {
            employee_id,
            employee_name: args.employee_name,
            period: parse_month(&month)?,
            structure: SalaryStructureRecord {
                wage_type: defaults.wage_type,
                monthly_wage,
                percentages: defaults.percentages,
                fixed_allowance_percentage: args.fixed_allowance_pct.unwrap_or(Decimal::ZERO),
                professional_tax: defaults.professional_tax,
            },
            fixed_allowance_mode: match args.fixed_allowance_pct {
                Some(percentage) => FixedAllowanceMode::Pinned { percentage },
                None => FixedAllowanceMode::Remainder,
            },
            attendance,
        }
    };

    let result = generate_payslip(&payslip_input)?;
    Ok(serde_json::to_value(result)?)
}

fn parse_month(month: &str) -> Result<PayPeriod, Box<dyn std::error::Error>> {
    let first = NaiveDate::parse_from_str(&format!("{}-01", month.trim()), "%Y-%m-%d")
        .map_err(|_| format!("Invalid --month '{month}', expected YYYY-MM"))?;
    Ok(PayPeriod::month(first.year(), first.month())?)
}
