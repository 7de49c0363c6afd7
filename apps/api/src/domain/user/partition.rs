use super::entity::{InvalidRow, SourceRow};
use super::validation::{Violation, join_reasons, validate};

/// Outcome of validating a single row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid(SourceRow),
    Invalid(SourceRow, Vec<Violation>),
}

/// Rows of one upload split by validity, each side in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub valid: Vec<SourceRow>,
    pub invalid: Vec<InvalidRow>,
}

impl Partition {
    pub fn is_empty(&self) -> bool {
        self.valid.is_empty() && self.invalid.is_empty()
    }
}

pub fn classify(row: SourceRow) -> ValidationResult {
    let violations = validate(&row.record);
    if violations.is_empty() {
        ValidationResult::Valid(row)
    } else {
        ValidationResult::Invalid(row, violations)
    }
}

/// Splits rows into valid and invalid sets.
///
/// Never fails: every row lands on exactly one side. Invalid rows carry their
/// violations joined with `"; "` as `error_reason`.
pub fn partition<I>(rows: I) -> Partition
where
    I: IntoIterator<Item = SourceRow>,
{
    let mut out = Partition::default();
    for row in rows {
        match classify(row) {
            ValidationResult::Valid(row) => out.valid.push(row),
            ValidationResult::Invalid(row, violations) => out.invalid.push(InvalidRow {
                row,
                error_reason: join_reasons(&violations),
            }),
        }
    }
    out
}
