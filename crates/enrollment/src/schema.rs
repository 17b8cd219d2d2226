use std::cmp::Ordering;
use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

pub const COL_SCHOOL_YEAR: &str = "School_Year";
pub const COL_SEMESTER: &str = "Semester";
pub const COL_COURSE: &str = "Course";

pub const COL_FIRST_YEAR: &str = "1st_year_enrollees";
pub const COL_SECOND_YEAR: &str = "2nd_year_enrollees";
pub const COL_THIRD_YEAR: &str = "3rd_year_enrollees";
pub const COL_FOURTH_YEAR: &str = "4th_year_enrollees";
pub const COL_TOTAL: &str = "total_enrollees";

/// Columns an upload must carry to be accepted.
pub const REQUIRED_COLUMNS: [&str; 3] = [COL_SCHOOL_YEAR, COL_SEMESTER, COL_COURSE];

/// Count columns; absent ones are synthesized as zeros.
pub const ENROLLMENT_COLUMNS: [&str; 5] = [
    COL_FIRST_YEAR,
    COL_SECOND_YEAR,
    COL_THIRD_YEAR,
    COL_FOURTH_YEAR,
    COL_TOTAL,
];

/// Semester as stored in the dataset file ("1st" / "2nd").
/// Any other cell value is kept verbatim so it round-trips through the file.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Semester {
    First,
    Second,
    Other(String),
}

impl Semester {
    /// Parse a stored cell value.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "1st" => Semester::First,
            "2nd" => Semester::Second,
            other => Semester::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Semester::First => "1st",
            Semester::Second => "2nd",
            Semester::Other(s) => s.as_str(),
        }
    }
}

// Ordering is textual on the stored form, not positional.
impl Ord for Semester {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for Semester {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Semester {
    fn from(s: String) -> Self {
        Semester::parse(&s)
    }
}

impl From<Semester> for String {
    fn from(s: Semester) -> Self {
        s.as_str().to_string()
    }
}

/// One row of the enrollment dataset.
///
/// `total_enrollees` is taken as-is; it is never reconciled against the
/// year-level counts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentRecord {
    pub course: String,
    pub school_year: String,
    pub semester: Semester,
    pub first_year_enrollees: i64,
    pub second_year_enrollees: i64,
    pub third_year_enrollees: i64,
    pub fourth_year_enrollees: i64,
    pub total_enrollees: i64,
}

/// The five counts of a matched record, shaped for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalEnrollment {
    pub total_enrollment: i64,
    pub first_year: i64,
    pub second_year: i64,
    pub third_year: i64,
    pub fourth_year: i64,
}

impl From<&EnrollmentRecord> for HistoricalEnrollment {
    fn from(r: &EnrollmentRecord) -> Self {
        Self {
            total_enrollment: r.total_enrollees,
            first_year: r.first_year_enrollees,
            second_year: r.second_year_enrollees,
            third_year: r.third_year_enrollees,
            fourth_year: r.fourth_year_enrollees,
        }
    }
}

/// The active dataset plus where it came from. Never mutated once built.
#[derive(Clone, Debug)]
pub struct Dataset {
    pub records: Vec<EnrollmentRecord>,
    pub path: PathBuf,
    pub size_bytes: u64,
    pub filename: String,
    pub loaded_at: DateTime<Local>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
