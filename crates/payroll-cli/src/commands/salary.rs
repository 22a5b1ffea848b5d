use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use payroll_core::salary::breakdown::FixedAllowanceMode;
use payroll_core::salary::form::SalaryForm;
use payroll_core::salary::percentages::SalaryPercentages;
use payroll_core::salary::wage::WageEntry;
use payroll_core::salary::{calculate_salary_breakdown, validate_for_save};
use payroll_core::structure::WageType;

use crate::config::{self, CompanyDefaults};
use crate::input;

/// Salary structure flags shared by `breakdown` and `validate`
#[derive(Args)]
pub struct SalaryFlags {
    /// Path to JSON/YAML salary form (overrides individual flags; `--config`
    /// still fills any field it omits)
    #[arg(long)]
    pub input: Option<String>,

    /// Company defaults file (JSON/YAML), applied before individual flags
    #[arg(long)]
    pub config: Option<String>,

    /// Monthly wage, as typed into the form
    #[arg(long, allow_hyphen_values = true)]
    pub monthly_wage: Option<String>,

    /// Wage type
    #[arg(long, value_enum)]
    pub wage_type: Option<WageTypeArg>,

    /// Basic salary, % of monthly wage
    #[arg(long, allow_hyphen_values = true)]
    pub basic_pct: Option<Decimal>,

    /// House rent allowance, % of basic
    #[arg(long, allow_hyphen_values = true)]
    pub hra_pct: Option<Decimal>,

    /// Standard allowance, % of monthly wage
    #[arg(long, allow_hyphen_values = true)]
    pub standard_allowance_pct: Option<Decimal>,

    /// Performance bonus, % of basic
    #[arg(long, allow_hyphen_values = true)]
    pub performance_bonus_pct: Option<Decimal>,

    /// Leave travel allowance, % of basic
    #[arg(long, allow_hyphen_values = true)]
    pub lta_pct: Option<Decimal>,

    /// Employee PF, % of basic
    #[arg(long, allow_hyphen_values = true)]
    pub pf_employee_pct: Option<Decimal>,

    /// Employer PF, % of basic
    #[arg(long, allow_hyphen_values = true)]
    pub pf_employer_pct: Option<Decimal>,

    /// Pin the fixed allowance to this % of wage instead of the remainder
    #[arg(long, allow_hyphen_values = true)]
    pub fixed_allowance_pct: Option<Decimal>,

    /// Flat monthly professional tax
    #[arg(long, allow_hyphen_values = true)]
    pub professional_tax: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum WageTypeArg {
    Fixed,
    Hourly,
}

impl From<WageTypeArg> for WageType {
    fn from(arg: WageTypeArg) -> Self {
        match arg {
            WageTypeArg::Fixed => WageType::Fixed,
            WageTypeArg::Hourly => WageType::Hourly,
        }
    }
}

impl SalaryFlags {
    /// Build the form from `--input`, piped stdin, or flags, each layered
    /// over the `--config` company defaults.
    pub fn into_form(self) -> Result<SalaryForm, Box<dyn std::error::Error>> {
        let defaults = config::load(self.config.as_deref())?;
        let explicit: Option<Value> = match self.input {
            Some(ref path) => Some(input::file::read_input(path)?),
            None => input::stdin::read_stdin()?,
        };
        if let Some(data) = explicit {
            return Ok(serde_json::from_value(config::overlay(&defaults, data)?)?);
        }
        Ok(self.apply(defaults))
    }

    fn apply(self, defaults: CompanyDefaults) -> SalaryForm {
        let base = defaults.percentages;
        let percentages = SalaryPercentages {
            basic_salary_percentage: self.basic_pct.unwrap_or(base.basic_salary_percentage),
            hra_percentage: self.hra_pct.unwrap_or(base.hra_percentage),
            standard_allowance_percentage: self
                .standard_allowance_pct
                .unwrap_or(base.standard_allowance_percentage),
            performance_bonus_percentage: self
                .performance_bonus_pct
                .unwrap_or(base.performance_bonus_percentage),
            leave_travel_allowance_percentage: self
                .lta_pct
                .unwrap_or(base.leave_travel_allowance_percentage),
            pf_employee_percentage: self
                .pf_employee_pct
                .unwrap_or(base.pf_employee_percentage),
            pf_employer_percentage: self
                .pf_employer_pct
                .unwrap_or(base.pf_employer_percentage),
        };
        let fixed_allowance_mode = match self.fixed_allowance_pct {
            Some(percentage) => FixedAllowanceMode::Pinned { percentage },
            None => FixedAllowanceMode::Remainder,
        };

        SalaryForm {
            wage_type: self.wage_type.map(Into::into).unwrap_or(defaults.wage_type),
            monthly_wage: self.monthly_wage.map(WageEntry::Text),
            percentages,
            fixed_allowance_mode,
            professional_tax: self.professional_tax.unwrap_or(defaults.professional_tax),
        }
    }
}

/// Arguments for the live salary breakdown
#[derive(Args)]
pub struct BreakdownArgs {
    #[command(flatten)]
    pub salary: SalaryFlags,
}

pub fn run_breakdown(args: BreakdownArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let form = args.salary.into_form()?;
    let result = calculate_salary_breakdown(&form)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for save-time validation
#[derive(Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub salary: SalaryFlags,
}

pub fn run_validate(args: ValidateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let form = args.salary.into_form()?;
    let update = validate_for_save(&form)?;
    Ok(json!({
        "result": {
            "valid": true,
            "update": update,
        }
    }))
}
