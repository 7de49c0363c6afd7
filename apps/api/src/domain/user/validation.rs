use super::entity::UserRecord;
use std::fmt;

/// A business-rule violation found on a single row.
///
/// Violations are data, not errors: they are collected per row and end up in
/// the `error_reason` column of the error workbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// Required field absent, blank, or null.
    Missing(&'static str),
    /// `pincode` present but not made of decimal digits only.
    NonNumericPincode,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(field) => write!(f, "{} is missing", field),
            Self::NonNumericPincode => write!(f, "Pincode must be numeric"),
        }
    }
}

/// Checks one record against the import schema.
///
/// Missing-field violations come first, in required-field order, followed by
/// the pincode format check. An empty vector means the record is valid.
pub fn validate(record: &UserRecord) -> Vec<Violation> {
    let mut violations: Vec<Violation> = record
        .fields()
        .filter(|(_, value)| is_blank(*value))
        .map(|(field, _)| Violation::Missing(field))
        .collect();

    if let Some(pincode) = record.pincode.as_deref().filter(|p| !p.trim().is_empty())
        && !is_numeric(pincode)
    {
        violations.push(Violation::NonNumericPincode);
    }

    violations
}

/// Joins violations with `"; "` in the order given.
pub fn join_reasons(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

fn is_numeric(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_digit())
}
