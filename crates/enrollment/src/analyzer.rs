use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{Dataset, DatasetError, DepartmentCatalog, Result};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub filename: String,
    pub record_count: usize,
    pub file_size_bytes: u64,
    /// Human form, e.g. "0.01 MB".
    pub file_size: String,
    pub student_counts: BTreeMap<String, i64>,
    pub program_counts: BTreeMap<String, u64>,
    pub year_spans: BTreeMap<String, u64>,
    pub upload_date: String,
}

/// Per-department aggregates. Never fails; an internal error yields zeroed
/// aggregates with the raw record count.
pub fn analyze(dataset: &Dataset, catalog: &DepartmentCatalog) -> DatasetSummary {
    match try_analyze(dataset, catalog) {
        Ok(s) => s,
        Err(e) => {
            warn!(error = %e, "error analyzing dataset");
            zeroed_summary(dataset, catalog)
        }
    }
}

pub fn try_analyze(dataset: &Dataset, catalog: &DepartmentCatalog) -> Result<DatasetSummary> {
    let mut student_counts = BTreeMap::new();
    let mut program_counts = BTreeMap::new();
    let mut year_spans = BTreeMap::new();

    for dept in catalog.departments() {
        let mut students: i64 = 0;
        let mut programs: u64 = 0;
        let mut years: BTreeSet<&str> = BTreeSet::new();

        for course in &dept.courses {
            let mut matched = false;
            for r in dataset.records.iter().filter(|r| &r.course == course) {
                matched = true;
                students = students.checked_add(r.total_enrollees).ok_or_else(|| {
                    DatasetError::Overflow(format!("student count for {}", dept.code))
                })?;
                years.insert(r.school_year.as_str());
            }
            if matched {
                programs += 1;
            }
        }

        student_counts.insert(dept.code.clone(), students);
        program_counts.insert(dept.code.clone(), programs);
        year_spans.insert(dept.code.clone(), years.len() as u64);
    }

    Ok(DatasetSummary {
        filename: dataset.filename.clone(),
        record_count: dataset.len(),
        file_size_bytes: dataset.size_bytes,
        file_size: format_megabytes(dataset.size_bytes),
        student_counts,
        program_counts,
        year_spans,
        upload_date: upload_date(dataset),
    })
}

fn zeroed_summary(dataset: &Dataset, catalog: &DepartmentCatalog) -> DatasetSummary {
    DatasetSummary {
        filename: dataset.filename.clone(),
        record_count: dataset.len(),
        file_size_bytes: 0,
        file_size: "0 MB".to_string(),
        student_counts: zeros(catalog),
        program_counts: zeros(catalog),
        year_spans: zeros(catalog),
        upload_date: upload_date(dataset),
    }
}

fn zeros<T: Default>(catalog: &DepartmentCatalog) -> BTreeMap<String, T> {
    catalog.codes().map(|c| (c.to_string(), T::default())).collect()
}

fn upload_date(dataset: &Dataset) -> String {
    dataset.loaded_at.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Megabytes rounded to two places, shortest float form ("0.0", "1.5", "2.25").
pub fn format_megabytes(bytes: u64) -> String {
    let mb = (bytes as f64 / (1024.0 * 1024.0) * 100.0).round() / 100.0;
    format!("{mb:?} MB")
}
