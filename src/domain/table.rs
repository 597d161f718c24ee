//! In-memory tabular model shared by every sink
//!
//! A [`Table`] is a named, column-ordered set of rows. Typed records convert
//! into tables through the [`Record`] trait; free-form JSON rows from the
//! vocabulary service go through [`Table::from_json_rows`].

use chrono::NaiveDateTime;
use serde_json::{Map, Value};
use std::fmt;

/// Timestamp rendering used by both the CSV and SQLite sinks
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// A single cell value
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Integer(i64),
    Real(f64),
    Boolean(bool),
    Text(String),
    Timestamp(NaiveDateTime),
}

impl CellValue {
    /// SQL column affinity for this value, `None` for nulls
    pub fn sql_type(&self) -> Option<&'static str> {
        match self {
            CellValue::Null => None,
            CellValue::Integer(_) | CellValue::Boolean(_) => Some("INTEGER"),
            CellValue::Real(_) => Some("REAL"),
            CellValue::Text(_) | CellValue::Timestamp(_) => Some("TEXT"),
        }
    }

    /// Converts a JSON value; arrays and objects are kept as compact JSON text
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => CellValue::Null,
            Value::Bool(b) => CellValue::Boolean(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => CellValue::Integer(i),
                None => n.as_f64().map(CellValue::Real).unwrap_or(CellValue::Null),
            },
            Value::String(s) => CellValue::Text(s.clone()),
            Value::Array(_) | Value::Object(_) => CellValue::Text(value.to_string()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Real(r) => write!(f, "{r}"),
            CellValue::Boolean(b) => write!(f, "{b}"),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Timestamp(ts) => write!(f, "{}", ts.format(TIMESTAMP_FORMAT)),
        }
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(value: NaiveDateTime) -> Self {
        CellValue::Timestamp(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Null)
    }
}

/// A typed row that knows its column layout
pub trait Record {
    /// Column names, in output order
    fn columns() -> &'static [&'static str];

    /// Cell values, one per column
    fn into_cells(self) -> Vec<CellValue>;
}

/// A named table ready to be written to a sink
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: String,
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Creates an empty table with the given columns
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Builds a table from typed records
    pub fn from_records<R: Record>(name: impl Into<String>, records: Vec<R>) -> Self {
        let columns = R::columns().iter().map(|c| c.to_string()).collect();
        let rows = records.into_iter().map(Record::into_cells).collect();
        Self {
            name: name.into(),
            columns,
            rows,
        }
    }

    /// Builds a table from JSON objects
    ///
    /// Columns are the union of keys across all rows in first-seen order.
    /// Rows lacking a column get a null cell.
    pub fn from_json_rows(name: impl Into<String>, rows: &[Map<String, Value>]) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for row in rows {
            for key in row.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }

        let cells = rows
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|col| row.get(col).map(CellValue::from_json).unwrap_or(CellValue::Null))
                    .collect()
            })
            .collect();

        Self {
            name: name.into(),
            columns,
            rows: cells,
        }
    }

    /// Appends a row; the caller guarantees it matches the column count
    pub fn push_row(&mut self, row: Vec<CellValue>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends a column as the last one, one cell per existing row
    ///
    /// Missing cells are filled with nulls; extra cells are ignored.
    pub fn append_column(&mut self, name: impl Into<String>, cells: Vec<CellValue>) {
        self.columns.push(name.into());
        let mut cells = cells.into_iter();
        for row in &mut self.rows {
            row.push(cells.next().unwrap_or(CellValue::Null));
        }
    }

    /// Index of a column by name
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// SQL type of each column, inferred from its first non-null cell
    pub fn column_types(&self) -> Vec<&'static str> {
        (0..self.columns.len())
            .map(|idx| {
                self.rows
                    .iter()
                    .find_map(|row| row.get(idx).and_then(CellValue::sql_type))
                    .unwrap_or("TEXT")
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    struct Pair {
        id: i64,
        label: Option<String>,
    }

    impl Record for Pair {
        fn columns() -> &'static [&'static str] {
            &["id", "label"]
        }

        fn into_cells(self) -> Vec<CellValue> {
            vec![self.id.into(), self.label.into()]
        }
    }

    fn obj(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_from_records() {
        let table = Table::from_records(
            "pairs",
            vec![
                Pair { id: 1, label: Some("a".to_string()) },
                Pair { id: 2, label: None },
            ],
        );

        assert_eq!(table.name(), "pairs");
        assert_eq!(table.columns(), &["id".to_string(), "label".to_string()]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[1][1], CellValue::Null);
    }

    #[test]
    fn test_from_json_rows_unions_columns() {
        let rows = vec![
            obj(json!({"word": "水", "meaning": "water"})),
            obj(json!({"word": "火", "furigana": "ひ"})),
        ];
        let table = Table::from_json_rows("vocab", &rows);

        assert_eq!(
            table.columns(),
            &["word".to_string(), "meaning".to_string(), "furigana".to_string()]
        );
        let word = table.column_index("word").unwrap();
        let furigana = table.column_index("furigana").unwrap();
        assert_eq!(table.rows()[0][word], CellValue::Text("水".to_string()));
        assert_eq!(table.rows()[0][furigana], CellValue::Null);
    }

    #[test]
    fn test_cell_from_json() {
        assert_eq!(CellValue::from_json(&json!(null)), CellValue::Null);
        assert_eq!(CellValue::from_json(&json!(true)), CellValue::Boolean(true));
        assert_eq!(CellValue::from_json(&json!(7)), CellValue::Integer(7));
        assert_eq!(CellValue::from_json(&json!(1.5)), CellValue::Real(1.5));
        assert_eq!(
            CellValue::from_json(&json!(["a", "b"])),
            CellValue::Text("[\"a\",\"b\"]".to_string())
        );
    }

    #[test]
    fn test_timestamp_display() {
        let ts = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_milli_opt(8, 5, 1, 42)
            .unwrap();
        assert_eq!(CellValue::Timestamp(ts).to_string(), "2024-03-09 08:05:01.042");
        assert_eq!(CellValue::Null.to_string(), "");
    }

    #[test]
    fn test_append_column() {
        let mut table = Table::new("t", vec!["a".into()]);
        table.push_row(vec![CellValue::Integer(1)]);
        table.push_row(vec![CellValue::Integer(2)]);

        table.append_column("b", vec![CellValue::from("x")]);

        assert_eq!(table.columns(), &["a".to_string(), "b".to_string()]);
        assert_eq!(table.rows()[0][1], CellValue::Text("x".to_string()));
        assert_eq!(table.rows()[1][1], CellValue::Null);
    }

    #[test]
    fn test_column_types() {
        let mut table = Table::new("t", vec!["a".into(), "b".into(), "c".into()]);
        table.push_row(vec![CellValue::Null, CellValue::Real(0.5), CellValue::Null]);
        table.push_row(vec![CellValue::Integer(1), CellValue::Null, CellValue::Null]);

        assert_eq!(table.column_types(), vec!["INTEGER", "REAL", "TEXT"]);
    }
}
