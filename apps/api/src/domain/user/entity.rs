use serde::{Deserialize, Serialize};

/// Column names every imported row must carry, in declaration order.
///
/// The order drives both the validator's reason order and the column order of
/// the `users` table and the error workbook.
pub const REQUIRED_FIELDS: [&str; 8] = [
    "user", "role", "street", "city", "country1", "pincode", "state", "country2",
];

/// Core domain entity representing one user row of an import.
///
/// Each field is `None` when the source value was absent, blank, or a
/// null token. Values are normalized once at the decoding boundary and never
/// mutated afterwards.
///
/// # Invariants
/// - A `Some` value is never empty and carries no surrounding whitespace
/// - Field order matches [`REQUIRED_FIELDS`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub user: Option<String>,
    pub role: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub country1: Option<String>,
    pub pincode: Option<String>,
    pub state: Option<String>,
    pub country2: Option<String>,
}

impl UserRecord {
    /// Values in [`REQUIRED_FIELDS`] order.
    pub fn values(&self) -> [Option<&str>; 8] {
        [
            self.user.as_deref(),
            self.role.as_deref(),
            self.street.as_deref(),
            self.city.as_deref(),
            self.country1.as_deref(),
            self.pincode.as_deref(),
            self.state.as_deref(),
            self.country2.as_deref(),
        ]
    }

    /// Pairs each required field name with its value.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, Option<&str>)> + '_ {
        REQUIRED_FIELDS.into_iter().zip(self.values())
    }

    /// Mutable slot for a required field, or `None` if `name` is not one.
    pub fn slot_mut(&mut self, name: &str) -> Option<&mut Option<String>> {
        match name {
            "user" => Some(&mut self.user),
            "role" => Some(&mut self.role),
            "street" => Some(&mut self.street),
            "city" => Some(&mut self.city),
            "country1" => Some(&mut self.country1),
            "pincode" => Some(&mut self.pincode),
            "state" => Some(&mut self.state),
            "country2" => Some(&mut self.country2),
            _ => None,
        }
    }
}

/// One decoded data row of an upload.
///
/// `extras` holds the values of columns outside the required set, aligned with
/// the extra column names of the upload they came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRow {
    pub record: UserRecord,
    pub extras: Vec<Option<String>>,
}

impl From<UserRecord> for SourceRow {
    fn from(record: UserRecord) -> Self {
        Self {
            record,
            extras: Vec::new(),
        }
    }
}

/// A row that failed validation, with its reasons joined by `"; "`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidRow {
    pub row: SourceRow,
    pub error_reason: String,
}
