use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::types::Money;

/// Largest monthly wage accepted (10^15). Every derived amount, including
/// the yearly projection at 100% shares, stays far inside `Decimal`'s range.
pub const MAX_MONTHLY_WAGE: Money = dec!(1000000000000000);

/// `true` for a wage in `[0, MAX_MONTHLY_WAGE]`.
pub fn is_valid_wage(value: Money) -> bool {
    value >= Decimal::ZERO && value <= MAX_MONTHLY_WAGE
}

/// A monthly wage as it arrives from a form field: either already numeric
/// or free text that still has to be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WageEntry {
    Amount(Money),
    Text(String),
}

impl WageEntry {
    /// The wage if it is a usable number within `[0, MAX_MONTHLY_WAGE]`.
    pub fn amount(&self) -> Option<Money> {
        match self {
            WageEntry::Amount(value) if is_valid_wage(*value) => Some(*value),
            WageEntry::Amount(_) => None,
            WageEntry::Text(text) => parse_monthly_wage(text),
        }
    }
}

impl From<Money> for WageEntry {
    fn from(value: Money) -> Self {
        WageEntry::Amount(value)
    }
}

impl From<&str> for WageEntry {
    fn from(text: &str) -> Self {
        WageEntry::Text(text.to_string())
    }
}

/// Parse a wage typed into a form field.
///
/// Accepts plain decimals (`"50000"`, `" 1250.50 "`) and scientific
/// notation (`"5e4"`). Empty, non-numeric, negative and oversized input
/// yields `None`.
pub fn parse_monthly_wage(text: &str) -> Option<Money> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let value = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()?;
    is_valid_wage(value).then_some(value)
}

/// The wage the live preview computes with: anything unusable counts as zero.
pub fn effective_monthly_wage(entry: Option<&WageEntry>) -> Money {
    entry.and_then(WageEntry::amount).unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_and_padded() {
        assert_eq!(parse_monthly_wage("50000"), Some(dec!(50000)));
        assert_eq!(parse_monthly_wage("  1250.50 "), Some(dec!(1250.50)));
    }

    #[test]
    fn test_parse_scientific() {
        assert_eq!(parse_monthly_wage("5e4"), Some(dec!(50000)));
    }

    #[test]
    fn test_parse_rejects_garbage_and_negative() {
        assert_eq!(parse_monthly_wage(""), None);
        assert_eq!(parse_monthly_wage("   "), None);
        assert_eq!(parse_monthly_wage("abc"), None);
        assert_eq!(parse_monthly_wage("12,000"), None);
        assert_eq!(parse_monthly_wage("-100"), None);
    }

    #[test]
    fn test_parse_rejects_oversized() {
        assert_eq!(parse_monthly_wage("1e28"), None);
        assert_eq!(parse_monthly_wage("1000000000000000.01"), None);
        assert_eq!(parse_monthly_wage("1e15"), Some(MAX_MONTHLY_WAGE));
    }

    #[test]
    fn test_oversized_amount_is_unusable() {
        assert_eq!(WageEntry::Amount(Decimal::MAX).amount(), None);
        assert_eq!(
            effective_monthly_wage(Some(&WageEntry::Amount(Decimal::MAX))),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_untagged_entry_from_json() {
        let number: WageEntry = serde_json::from_str("42000").unwrap();
        assert_eq!(number.amount(), Some(dec!(42000)));

        let garbage: WageEntry = serde_json::from_str(r#""not a wage""#).unwrap();
        assert_eq!(garbage, WageEntry::Text("not a wage".into()));
        assert_eq!(garbage.amount(), None);
    }

    #[test]
    fn test_effective_wage_falls_back_to_zero() {
        assert_eq!(effective_monthly_wage(None), Decimal::ZERO);
        assert_eq!(
            effective_monthly_wage(Some(&WageEntry::Amount(dec!(-5)))),
            Decimal::ZERO
        );
        assert_eq!(
            effective_monthly_wage(Some(&WageEntry::from("30000"))),
            dec!(30000)
        );
    }
}
