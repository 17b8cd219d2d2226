use tracing::warn;

use crate::schema::*;
use crate::{DatasetError, RawTable, Result};

/// A table that passed validation, with any missing count columns filled in.
#[derive(Clone, Debug)]
pub struct ValidatedTable {
    pub table: RawTable,
    /// Soft issues; the table is still accepted.
    pub warnings: Vec<String>,
}

pub fn validate(mut table: RawTable) -> Result<ValidatedTable> {
    if table.headers.is_empty() {
        return Err(DatasetError::MalformedInput("Invalid data format".to_string()));
    }
    let width = table.headers.len();
    if let Some(i) = table.rows.iter().position(|r| r.len() != width) {
        return Err(DatasetError::MalformedInput(format!(
            "Row {}: expected {width} fields, found {}",
            i + 1,
            table.rows[i].len()
        )));
    }

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| !table.has_column(c))
        .map(|c| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DatasetError::MissingColumns(missing));
    }

    if table.is_empty() {
        return Err(DatasetError::EmptyDataset);
    }

    let mut warnings = vec![];
    let missing_counts: Vec<&str> = ENROLLMENT_COLUMNS
        .iter()
        .copied()
        .filter(|c| !table.has_column(c))
        .collect();
    if !missing_counts.is_empty() {
        warn!(columns = ?missing_counts, "missing enrollment columns, filling with 0");
        for col in &missing_counts {
            table.ensure_column(col, "0");
        }
        warnings.push(format!("Missing enrollment columns: {missing_counts:?}"));
    }

    Ok(ValidatedTable { table, warnings })
}

impl ValidatedTable {
    /// Convert rows into typed records, in file order.
    pub fn records(&self) -> Result<Vec<EnrollmentRecord>> {
        let t = &self.table;
        let idx = |name: &str| {
            t.column(name)
                .ok_or_else(|| DatasetError::MissingColumns(vec![name.to_string()]))
        };

        let course = idx(COL_COURSE)?;
        let year = idx(COL_SCHOOL_YEAR)?;
        let sem = idx(COL_SEMESTER)?;
        let c1 = idx(COL_FIRST_YEAR)?;
        let c2 = idx(COL_SECOND_YEAR)?;
        let c3 = idx(COL_THIRD_YEAR)?;
        let c4 = idx(COL_FOURTH_YEAR)?;
        let total = idx(COL_TOTAL)?;

        t.rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let count = |col: usize| parse_count(&row[col], i + 1, &t.headers[col]);
                Ok(EnrollmentRecord {
                    course: row[course].clone(),
                    school_year: row[year].clone(),
                    semester: Semester::parse(&row[sem]),
                    first_year_enrollees: count(c1)?,
                    second_year_enrollees: count(c2)?,
                    third_year_enrollees: count(c3)?,
                    fourth_year_enrollees: count(c4)?,
                    total_enrollees: count(total)?,
                })
            })
            .collect()
    }
}

// Empty cells read as 0; "80.0" style integral floats are accepted.
fn parse_count(raw: &str, row: usize, column: &str) -> Result<i64> {
    let v = raw.trim();
    if v.is_empty() {
        return Ok(0);
    }
    if let Ok(n) = v.parse::<i64>() {
        return Ok(n);
    }
    match v.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(f as i64),
        _ => Err(DatasetError::MalformedInput(format!(
            "Row {row}: column '{column}' is not a whole number: {v:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(csv: &str) -> RawTable {
        RawTable::from_csv_bytes(csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_missing_columns_lists_every_absence() {
        let err = validate(table("Course,x\nBSIT,1\n")).unwrap_err();
        match err {
            DatasetError::MissingColumns(cols) => {
                assert_eq!(cols, vec!["School_Year".to_string(), "Semester".to_string()])
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = validate(table("foo\n1\n")).unwrap_err();
        match err {
            DatasetError::MissingColumns(cols) => assert_eq!(cols.len(), 3),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_header_only_is_empty_dataset() {
        let err = validate(table("School_Year,Semester,Course\n")).unwrap_err();
        assert!(matches!(err, DatasetError::EmptyDataset));
    }

    #[test]
    fn test_missing_columns_checked_before_emptiness() {
        let err = validate(table("School_Year,Course\n")).unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumns(_)));
    }

    #[test]
    fn test_enrollment_columns_synthesized_as_zero() {
        let v = validate(table("School_Year,Semester,Course\n2024,1st,BSIT\n2024,2nd,BSCS\n")).unwrap();
        for col in ENROLLMENT_COLUMNS {
            let i = v.table.column(col).expect("column added");
            assert!(v.table.rows.iter().all(|r| r[i] == "0"));
        }
        assert_eq!(v.warnings.len(), 1);

        let recs = v.records().unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[1].semester, Semester::Second);
        assert_eq!(recs[1].total_enrollees, 0);
    }

    #[test]
    fn test_full_table_has_no_warnings() {
        let v = validate(table(
            "School_Year,Semester,Course,1st_year_enrollees,2nd_year_enrollees,3rd_year_enrollees,4th_year_enrollees,total_enrollees\n\
             2023-2024,1st,BSIT,30,20,15,10,80\n",
        ))
        .unwrap();
        assert!(v.warnings.is_empty());
        let r = &v.records().unwrap()[0];
        assert_eq!(r.first_year_enrollees, 30);
        assert_eq!(r.total_enrollees, 80);
    }

    #[test]
    fn test_total_is_not_reconciled() {
        let v = validate(table(
            "School_Year,Semester,Course,1st_year_enrollees,total_enrollees\n2024,1st,BSIT,10,999\n",
        ))
        .unwrap();
        let r = &v.records().unwrap()[0];
        assert_eq!(r.first_year_enrollees, 10);
        assert_eq!(r.total_enrollees, 999);
    }

    #[test]
    fn test_count_parsing() {
        assert_eq!(parse_count("", 1, "c").unwrap(), 0);
        assert_eq!(parse_count("80.0", 1, "c").unwrap(), 80);
        assert_eq!(parse_count("-3", 1, "c").unwrap(), -3);
        assert!(matches!(
            parse_count("eighty", 1, "c"),
            Err(DatasetError::MalformedInput(_))
        ));
        assert!(parse_count("2.5", 1, "c").is_err());
    }
}
