//! Schema-aware field access with centralized coercion.
//!
//! Every rule reads cells through [`RecordView`] so string → number, array and
//! JSON coercion share one failure path ([`CoerceError`]). Absent and blank
//! cells are `Ok(None)`; cells that fail to coerce are `Err`.

use serde_json::Value;

use crate::dataset::Record;
use crate::entity::EntityKind;
use crate::error::CoerceError;

/// Raw classification of a single cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    /// Column missing from the row, or JSON null.
    Absent,
    /// String value that is empty after trimming.
    Blank,
    /// Non-empty string, trimmed.
    Text(&'a str),
    /// Already-decoded value (number, bool, array, object).
    Decoded(&'a Value),
}

impl Cell<'_> {
    pub fn is_present(&self) -> bool {
        !matches!(self, Cell::Absent | Cell::Blank)
    }
}

/// Read-only view of a record, tagged with its entity kind.
#[derive(Debug, Clone, Copy)]
pub struct RecordView<'a> {
    kind: EntityKind,
    record: &'a Record,
}

impl<'a> RecordView<'a> {
    pub fn new(kind: EntityKind, record: &'a Record) -> Self {
        Self { kind, record }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn record(&self) -> &'a Record {
        self.record
    }

    pub fn cell(&self, column: &str) -> Cell<'a> {
        match self.record.get(column) {
            None | Some(Value::Null) => Cell::Absent,
            Some(Value::String(s)) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    Cell::Blank
                } else {
                    Cell::Text(trimmed)
                }
            }
            Some(other) => Cell::Decoded(other),
        }
    }

    /// The row's identifier (ClientID, WorkerID or TaskID).
    pub fn id(&self) -> Option<String> {
        self.text(self.kind.id_column())
    }

    /// Cell rendered as text; decoded scalars are stringified.
    pub fn text(&self, column: &str) -> Option<String> {
        match self.cell(column) {
            Cell::Absent | Cell::Blank => None,
            Cell::Text(s) => Some(s.to_string()),
            Cell::Decoded(value) => Some(value_to_string(value)),
        }
    }

    /// Cell as a finite number.
    pub fn number(&self, column: &str) -> Result<Option<f64>, CoerceError> {
        match self.cell(column) {
            Cell::Absent | Cell::Blank => Ok(None),
            Cell::Text(s) => parse_f64(s)
                .map(Some)
                .ok_or_else(|| CoerceError::NotANumber { raw: s.to_string() }),
            Cell::Decoded(value) => numeric_value(value)
                .map(Some)
                .ok_or_else(|| CoerceError::NotANumber {
                    raw: value_to_string(value),
                }),
        }
    }

    /// Cell as an array of numbers.
    ///
    /// Strings must hold a JSON array whose elements are all numbers. Decoded
    /// arrays are trusted: their numeric elements are kept as-is.
    pub fn number_array(&self, column: &str) -> Result<Option<Vec<f64>>, CoerceError> {
        match self.cell(column) {
            Cell::Absent | Cell::Blank => Ok(None),
            Cell::Text(s) => parse_number_array(s).map(Some),
            Cell::Decoded(Value::Array(items)) => {
                Ok(Some(items.iter().filter_map(numeric_value).collect()))
            }
            Cell::Decoded(Value::Number(n)) => Ok(n.as_f64().map(|n| vec![n])),
            Cell::Decoded(value) => Err(CoerceError::NotANumberArray {
                raw: value_to_string(value),
            }),
        }
    }

    /// Number of elements in an array cell.
    ///
    /// Text must decode as in [`number_array`](Self::number_array). Decoded
    /// arrays are trusted and counted in full, whatever their elements are.
    pub fn array_len(&self, column: &str) -> Result<Option<usize>, CoerceError> {
        match self.cell(column) {
            Cell::Decoded(Value::Array(items)) => Ok(Some(items.len())),
            _ => self
                .number_array(column)
                .map(|items| items.as_ref().map(Vec::len)),
        }
    }

    /// Cell as a list of trimmed, non-empty items.
    ///
    /// Strings are split on commas; decoded arrays are stringified per element.
    pub fn list(&self, column: &str) -> Vec<String> {
        match self.cell(column) {
            Cell::Absent | Cell::Blank => Vec::new(),
            Cell::Text(s) => split_list(s),
            Cell::Decoded(Value::Array(items)) => items
                .iter()
                .map(value_to_string)
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect(),
            Cell::Decoded(value) => vec![value_to_string(value)],
        }
    }

    /// Cell as a well-formed JSON document.
    pub fn json_document(&self, column: &str) -> Result<Option<Value>, CoerceError> {
        match self.cell(column) {
            Cell::Absent | Cell::Blank => Ok(None),
            Cell::Text(s) => serde_json::from_str::<Value>(s).map(Some).map_err(|e| {
                CoerceError::InvalidJson {
                    raw: s.to_string(),
                    message: e.to_string(),
                }
            }),
            Cell::Decoded(value) => Ok(Some(value.clone())),
        }
    }
}

/// Parses a string as a finite f64, returning None for invalid or empty strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Splits a comma-separated list, trimming items and dropping empty ones.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_number_array(raw: &str) -> Result<Vec<f64>, CoerceError> {
    let invalid = || CoerceError::NotANumberArray {
        raw: raw.to_string(),
    };
    let Ok(Value::Array(items)) = serde_json::from_str::<Value>(raw) else {
        return Err(invalid());
    };
    items
        .iter()
        .map(|item| item.as_f64().ok_or_else(invalid))
        .collect()
}

fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_f64(s),
        _ => None,
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn view(record: &Record) -> RecordView<'_> {
        RecordView::new(EntityKind::Workers, record)
    }

    #[test]
    fn blank_and_absent_cells_are_none() {
        let record = Record::from_iter([("MaxLoadPerPhase", "  ")]);
        let v = view(&record);
        assert_eq!(v.cell("MaxLoadPerPhase"), Cell::Blank);
        assert_eq!(v.cell("Skills"), Cell::Absent);
        assert_eq!(v.number("MaxLoadPerPhase"), Ok(None));
        assert_eq!(v.number_array("AvailableSlots"), Ok(None));
        assert!(v.list("Skills").is_empty());
    }

    #[test]
    fn number_coercion() {
        let record = Record::from_iter([
            ("A", json!(" 2.5 ")),
            ("B", json!(3)),
            ("C", json!("abc")),
            ("D", json!("NaN")),
            ("E", json!(true)),
        ]);
        let v = view(&record);
        assert_eq!(v.number("A"), Ok(Some(2.5)));
        assert_eq!(v.number("B"), Ok(Some(3.0)));
        assert!(matches!(v.number("C"), Err(CoerceError::NotANumber { raw }) if raw == "abc"));
        assert!(v.number("D").is_err());
        assert!(v.number("E").is_err());
    }

    #[test]
    fn number_array_requires_json_array_of_numbers() {
        let record = Record::from_iter([
            ("Good", json!("[1, 2, 3]")),
            ("Mixed", json!("[1, \"x\"]")),
            ("Csv", json!("1,2")),
            ("Decoded", json!([1, 2])),
        ]);
        let v = view(&record);
        assert_eq!(v.number_array("Good"), Ok(Some(vec![1.0, 2.0, 3.0])));
        assert!(v.number_array("Mixed").is_err());
        assert!(v.number_array("Csv").is_err());
        assert_eq!(v.number_array("Decoded"), Ok(Some(vec![1.0, 2.0])));
    }

    #[test]
    fn array_len_counts_decoded_arrays_in_full() {
        let record = Record::from_iter([
            ("Text", json!("[1, 2, 3]")),
            ("Days", json!(["mon", "tue", "wed"])),
            ("Sparse", json!([1, null, 3])),
            ("Single", json!(4)),
            ("Bad", json!("1,2")),
        ]);
        let v = view(&record);
        assert_eq!(v.array_len("Text"), Ok(Some(3)));
        assert_eq!(v.array_len("Days"), Ok(Some(3)));
        assert_eq!(v.array_len("Sparse"), Ok(Some(3)));
        assert_eq!(v.array_len("Single"), Ok(Some(1)));
        assert_eq!(v.array_len("Missing"), Ok(None));
        assert!(v.array_len("Bad").is_err());
    }

    #[test]
    fn list_splits_and_trims() {
        let record = Record::from_iter([
            ("Skills", json!(" rust, go ,,sql ")),
            ("Decoded", json!(["a", " b ", 3])),
        ]);
        let v = view(&record);
        assert_eq!(v.list("Skills"), vec!["rust", "go", "sql"]);
        assert_eq!(v.list("Decoded"), vec!["a", "b", "3"]);
    }

    #[test]
    fn json_document_reports_parse_errors() {
        let record = Record::from_iter([
            ("Ok", json!("{\"vip\": true}")),
            ("Bad", json!("{vip")),
            ("Decoded", json!({"vip": true})),
        ]);
        let v = view(&record);
        assert_eq!(v.json_document("Ok"), Ok(Some(json!({"vip": true}))));
        assert!(matches!(
            v.json_document("Bad"),
            Err(CoerceError::InvalidJson { raw, .. }) if raw == "{vip"
        ));
        assert_eq!(v.json_document("Decoded"), Ok(Some(json!({"vip": true}))));
    }

    #[test]
    fn id_uses_kind_specific_column() {
        let record = Record::from_iter([("WorkerID", json!(" W7 "))]);
        assert_eq!(view(&record).id().as_deref(), Some("W7"));
    }
}
