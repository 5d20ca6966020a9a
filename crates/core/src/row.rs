use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Column the backend uses as a row's stable identity, when present.
pub const ROW_NUMBER_COLUMN: &str = "row_number";

/// One sheet row: an ordered column → scalar mapping.
///
/// Column order is the order the backend sent (serde_json's
/// `preserve_order` feature keeps map insertion order), and it drives
/// display order downstream.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(serde_json::Map<String, Value>);

impl Row {
    pub fn new() -> Self {
        Self(serde_json::Map::new())
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    /// Sets a column value, appending the column if it is new.
    pub fn set(&mut self, column: &str, value: Value) {
        self.0.insert(column.to_string(), value);
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The row's `row_number`, when it carries one we can use as a key.
    ///
    /// Integer JSON numbers count; so do integer-valued strings, which
    /// Sheets-style backends sometimes emit. Anything else means the
    /// row has no usable stable identity.
    pub fn row_number(&self) -> Option<i64> {
        match self.0.get(ROW_NUMBER_COLUMN)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Case-insensitive substring match of `needle` against every
    /// column value. `needle` must already be lowercased. Nulls never
    /// match.
    pub fn matches(&self, needle: &str) -> bool {
        self.0.values().any(|v| value_matches(v, needle))
    }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn value_matches(value: &Value, needle: &str) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => s.to_lowercase().contains(needle),
        other => other.to_string().to_lowercase().contains(needle),
    }
}

/// String form of a cell value for display. Nulls render empty.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// How a displayed row is correlated with its backend counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKey {
    /// The row's `row_number` column — stable across sessions.
    Number(i64),
    /// Position within the fetched sequence — valid for this fetch only.
    Position(usize),
}

impl RowKey {
    /// The value sent to the backend as `rowIndex` / `row_number`.
    pub fn to_value(self) -> Value {
        match self {
            RowKey::Number(n) => Value::from(n),
            RowKey::Position(p) => Value::from(p),
        }
    }
}

impl std::fmt::Display for RowKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowKey::Number(n) => write!(f, "#{}", n),
            RowKey::Position(p) => write!(f, "@{}", p),
        }
    }
}

/// The single identity function: `row_number` when the row carries one,
/// else the row's position in the fetched sequence.
///
/// Known limitation, kept from the original behavior: position-based
/// keys drift once an earlier row is deleted in the same session, so a
/// later position-keyed update can land on the wrong row. Backends that
/// need reliable correlation must emit `row_number`.
pub fn row_identity(row: &Row, position: usize) -> RowKey {
    match row.row_number() {
        Some(n) => RowKey::Number(n),
        None => RowKey::Position(position),
    }
}
