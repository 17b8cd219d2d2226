use std::path::Path;

use crate::{DatasetError, Result};

/// Untyped tabular value: a header row plus string cells.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Parse CSV bytes. The first row is the header.
    pub fn from_csv_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| DatasetError::MalformedInput(e.to_string()))?
            .iter()
            .map(|h| h.to_string())
            .collect();

        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(DatasetError::MalformedInput(
                "No columns to parse from file".to_string(),
            ));
        }

        let mut rows = Vec::new();
        for (i, rec) in reader.records().enumerate() {
            let rec = rec.map_err(|e| {
                DatasetError::MalformedInput(format!("Row {}: {e}", i + 1))
            })?;
            rows.push(rec.iter().map(|c| c.to_string()).collect());
        }

        Ok(Self { headers, rows })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_csv_bytes(&bytes)
    }

    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut w = csv::Writer::from_path(path)?;
        w.write_record(&self.headers)?;
        for row in &self.rows {
            w.write_record(row)?;
        }
        w.flush()?;
        Ok(())
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Append `name` filled with `fill` unless it already exists.
    /// Returns true when the column was added.
    pub fn ensure_column(&mut self, name: &str, fill: &str) -> bool {
        if self.has_column(name) {
            return false;
        }
        self.headers.push(name.to_string());
        for row in &mut self.rows {
            row.push(fill.to_string());
        }
        true
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_headers_and_cells() {
        let t = RawTable::from_csv_bytes(b"School_Year , Semester,Course\n2024, 1st ,BSIT\n").unwrap();
        assert_eq!(t.headers, vec!["School_Year", "Semester", "Course"]);
        assert_eq!(t.rows, vec![vec!["2024", "1st", "BSIT"]]);
    }

    #[test]
    fn test_parse_empty_input_is_malformed() {
        let err = RawTable::from_csv_bytes(b"").unwrap_err();
        assert!(matches!(err, DatasetError::MalformedInput(_)));
    }

    #[test]
    fn test_parse_ragged_rows_is_malformed() {
        let err = RawTable::from_csv_bytes(b"a,b\n1,2,3\n").unwrap_err();
        assert!(matches!(err, DatasetError::MalformedInput(_)));
    }

    #[test]
    fn test_parse_invalid_utf8_is_malformed() {
        let err = RawTable::from_csv_bytes(b"School_Year,Semester,Course\n2024,\xff,BSIT\n").unwrap_err();
        match err {
            DatasetError::MalformedInput(msg) => assert!(msg.starts_with("Row 1"), "{msg}"),
            other => panic!("expected MalformedInput, got {other:?}"),
        }
    }

    #[test]
    fn test_ensure_column_fills_every_row() {
        let mut t = RawTable::from_csv_bytes(b"a\n1\n2\n").unwrap();
        assert!(t.ensure_column("b", "0"));
        assert!(!t.ensure_column("a", "0"));
        assert_eq!(t.rows, vec![vec!["1", "0"], vec!["2", "0"]]);
    }

    #[test]
    fn test_write_then_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.csv");
        let t = RawTable {
            headers: vec!["Course".into(), "note".into()],
            rows: vec![vec!["BSIT".into(), "has, comma".into()]],
        };
        t.write_csv(&path).unwrap();
        assert_eq!(RawTable::from_path(&path).unwrap(), t);
    }
}
