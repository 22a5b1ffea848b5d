use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PayrollError;
use crate::PayrollResult;

/// An inclusive pay period inside a single calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl PayPeriod {
    pub fn new(start: NaiveDate, end: NaiveDate) -> PayrollResult<Self> {
        let period = Self { start, end };
        period.validate()?;
        Ok(period)
    }

    /// The calendar month containing `year`/`month`.
    pub fn month(year: i32, month: u32) -> PayrollResult<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            PayrollError::InvalidInput {
                field: "month".into(),
                reason: format!("{year}-{month:02} is not a valid month"),
            }
        })?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        };
        let end = next
            .and_then(|d| d.pred_opt())
            .ok_or_else(|| PayrollError::InvalidInput {
                field: "month".into(),
                reason: format!("{year}-{month:02} has no representable end date"),
            })?;
        Ok(Self { start, end })
    }

    pub fn validate(&self) -> PayrollResult<()> {
        let reason = if self.end < self.start {
            "end is before start"
        } else if (self.start.year(), self.start.month()) != (self.end.year(), self.end.month()) {
            "a pay period must lie within one calendar month"
        } else {
            return Ok(());
        };
        Err(PayrollError::InvalidPeriod {
            start: self.start,
            end: self.end,
            reason: reason.into(),
        })
    }

    /// Calendar days in the period, both ends included.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn days_decimal(&self) -> Decimal {
        Decimal::from(self.days())
    }

    /// Days in the calendar month the period falls in.
    pub fn month_days(&self) -> PayrollResult<i64> {
        Self::month(self.start.year(), self.start.month()).map(|m| m.days())
    }

    /// e.g. "September 2026" for a whole month, else "2026-09-01 to 2026-09-15".
    pub fn label(&self) -> String {
        let whole_month =
            self.start.day() == 1 && self.month_days().is_ok_and(|n| n == self.days());
        if whole_month {
            self.start.format("%B %Y").to_string()
        } else {
            format!("{} to {}", self.start, self.end)
        }
    }
}
