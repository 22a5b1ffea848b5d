use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Salary structure
// ---------------------------------------------------------------------------

/// Live breakdown for the employee-edit and profile salary forms.
#[napi]
pub fn salary_breakdown(input_json: String) -> NapiResult<String> {
    let input: payroll_core::salary::form::SalaryForm =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        payroll_core::salary::calculate_salary_breakdown(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Returns the save payload, or rejects with the validation message.
#[napi]
pub fn validate_salary_structure(input_json: String) -> NapiResult<String> {
    let input: payroll_core::salary::form::SalaryForm =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let update = payroll_core::salary::validate_for_save(&input).map_err(to_napi_error)?;
    serde_json::to_string(&update).map_err(to_napi_error)
}

/// Re-derive amounts from a stored record.
#[napi]
pub fn derive_salary_structure(record_json: String, pinned: Option<bool>) -> NapiResult<String> {
    let record: payroll_core::structure::SalaryStructureRecord =
        serde_json::from_str(&record_json).map_err(to_napi_error)?;
    let breakdown = if pinned.unwrap_or(false) {
        record.derive_pinned()
    } else {
        record.derive()
    };
    serde_json::to_string(&breakdown).map_err(to_napi_error)
}

/// Parsed wage as a decimal string, or null when the field is unusable.
#[napi]
pub fn parse_monthly_wage(text: String) -> Option<String> {
    payroll_core::salary::wage::parse_monthly_wage(&text).map(|w| w.to_string())
}

// ---------------------------------------------------------------------------
// Payslip
// ---------------------------------------------------------------------------

#[napi]
pub fn generate_payslip(input_json: String) -> NapiResult<String> {
    let input: payroll_core::payslip::PayslipInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = payroll_core::payslip::generate_payslip(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
