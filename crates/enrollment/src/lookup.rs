use serde::{Deserialize, Serialize};

use crate::{Dataset, DatasetError, EnrollmentRecord, HistoricalEnrollment, Result, Semester};

pub const DEFAULT_TREND_RECORDS: usize = 10;

/// Year-level series for one course, oldest period first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendWindow {
    pub labels: Vec<String>,
    pub first_year: Vec<i64>,
    pub second_year: Vec<i64>,
    pub third_year: Vec<i64>,
    pub fourth_year: Vec<i64>,
}

impl TrendWindow {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    fn push(&mut self, r: &EnrollmentRecord) {
        let sem = if r.semester == Semester::First { "S1" } else { "S2" };
        self.labels.push(format!("{} {sem}", r.school_year));
        self.first_year.push(r.first_year_enrollees);
        self.second_year.push(r.second_year_enrollees);
        self.third_year.push(r.third_year_enrollees);
        self.fourth_year.push(r.fourth_year_enrollees);
    }
}

/// Form input "1"/"2" maps to the stored "1st"/"2nd"; anything else is
/// compared as a stored value.
pub fn normalize_semester(input: &str) -> Semester {
    match input.trim() {
        "1" => Semester::First,
        "2" => Semester::Second,
        other => Semester::parse(other),
    }
}

/// Display text for a form semester value.
pub fn semester_text(input: &str) -> &'static str {
    if input.trim() == "1" {
        "1st"
    } else {
        "2nd"
    }
}

/// First record matching all three keys exactly.
pub fn get_record(
    dataset: &Dataset,
    course: &str,
    school_year: &str,
    semester: &str,
) -> Option<HistoricalEnrollment> {
    let semester = normalize_semester(semester);
    dataset
        .records
        .iter()
        .find(|r| r.course == course && r.school_year == school_year && r.semester == semester)
        .map(HistoricalEnrollment::from)
}

/// [`get_record`], with a miss reported as [`DatasetError::NoMatch`].
pub fn find_record(
    dataset: &Dataset,
    course: &str,
    school_year: &str,
    semester: &str,
) -> Result<HistoricalEnrollment> {
    get_record(dataset, course, school_year, semester).ok_or(DatasetError::NoMatch)
}

/// The last `max_records` periods for `course`, sorted by
/// `(school_year, semester)` as plain text.
pub fn get_trend(dataset: &Dataset, course: &str, max_records: usize) -> TrendWindow {
    let mut rows: Vec<&EnrollmentRecord> =
        dataset.records.iter().filter(|r| r.course == course).collect();
    rows.sort_by(|a, b| {
        (a.school_year.as_str(), &a.semester).cmp(&(b.school_year.as_str(), &b.semester))
    });

    let skip = rows.len().saturating_sub(max_records);
    let mut window = TrendWindow::default();
    for r in &rows[skip..] {
        window.push(r);
    }
    window
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use std::path::PathBuf;

    fn rec(course: &str, year: &str, sem: &str, first: i64, total: i64) -> EnrollmentRecord {
        EnrollmentRecord {
            course: course.into(),
            school_year: year.into(),
            semester: Semester::parse(sem),
            first_year_enrollees: first,
            second_year_enrollees: 0,
            third_year_enrollees: 0,
            fourth_year_enrollees: 0,
            total_enrollees: total,
        }
    }

    fn dataset(records: Vec<EnrollmentRecord>) -> Dataset {
        Dataset {
            records,
            path: PathBuf::from("current_dataset.csv"),
            size_bytes: 0,
            filename: "current_dataset.csv".into(),
            loaded_at: Local::now(),
        }
    }

    #[test]
    fn test_get_record_normalizes_semester() {
        let ds = dataset(vec![rec("BSIT", "2024", "1st", 30, 80), rec("BSIT", "2024", "2nd", 25, 70)]);
        assert_eq!(get_record(&ds, "BSIT", "2024", "1").unwrap().total_enrollment, 80);
        assert_eq!(get_record(&ds, "BSIT", "2024", "2").unwrap().total_enrollment, 70);
        assert_eq!(get_record(&ds, "BSIT", "2024", "2nd").unwrap().total_enrollment, 70);
        assert!(get_record(&ds, "BSIT", "2025", "1").is_none());
        assert!(get_record(&ds, "BSCS", "2024", "1").is_none());
    }

    #[test]
    fn test_find_record_reports_no_match() {
        let ds = dataset(vec![rec("BSIT", "2024", "1st", 30, 80)]);
        assert_eq!(find_record(&ds, "BSIT", "2024", "1").unwrap().first_year, 30);
        assert!(matches!(find_record(&ds, "BSIT", "2024", "2"), Err(DatasetError::NoMatch)));
    }

    #[test]
    fn test_get_record_first_match_wins() {
        let ds = dataset(vec![rec("BSIT", "2024", "1st", 1, 10), rec("BSIT", "2024", "1st", 2, 20)]);
        let r = get_record(&ds, "BSIT", "2024", "1").unwrap();
        assert_eq!(r.first_year, 1);
        assert_eq!(r.total_enrollment, 10);
    }

    #[test]
    fn test_trend_sorted_textually_and_truncated() {
        let ds = dataset(vec![
            rec("BSIT", "2023-2024", "2nd", 4, 0),
            rec("BSIT", "2021-2022", "1st", 1, 0),
            rec("BSCS", "2020-2021", "1st", 99, 0),
            rec("BSIT", "2023-2024", "1st", 3, 0),
            rec("BSIT", "2022-2023", "1st", 2, 0),
        ]);

        let all = get_trend(&ds, "BSIT", 10);
        assert_eq!(
            all.labels,
            vec!["2021-2022 S1", "2022-2023 S1", "2023-2024 S1", "2023-2024 S2"]
        );
        assert_eq!(all.first_year, vec![1, 2, 3, 4]);

        let tail = get_trend(&ds, "BSIT", 2);
        assert_eq!(tail.labels, vec!["2023-2024 S1", "2023-2024 S2"]);
        assert_eq!(tail.first_year, vec![3, 4]);
        assert_eq!(tail.second_year.len(), 2);
    }

    #[test]
    fn test_trend_uses_lexical_year_order() {
        let ds = dataset(vec![rec("BSIT", "999", "1st", 1, 0), rec("BSIT", "1000", "1st", 2, 0)]);
        let t = get_trend(&ds, "BSIT", 10);
        assert_eq!(t.labels, vec!["1000 S1", "999 S1"]);
    }

    #[test]
    fn test_trend_unknown_course_is_empty() {
        let ds = dataset(vec![rec("BSIT", "2024", "1st", 1, 0)]);
        assert_eq!(get_trend(&ds, "BSN", 10), TrendWindow::default());
        assert!(get_trend(&ds, "BSIT", 0).is_empty());
    }

    #[test]
    fn test_semester_text() {
        assert_eq!(semester_text("1"), "1st");
        assert_eq!(semester_text("2"), "2nd");
        assert_eq!(semester_text("summer"), "2nd");
    }
}
