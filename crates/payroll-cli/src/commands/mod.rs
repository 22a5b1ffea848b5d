pub mod payslip;
pub mod salary;
