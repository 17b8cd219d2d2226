use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct Department {
    pub code: String,
    pub courses: Vec<String>,
}

/// Department code -> owned course codes. Order is preserved for reporting.
#[derive(Clone, Debug, Serialize)]
pub struct DepartmentCatalog {
    departments: Vec<Department>,
}

impl DepartmentCatalog {
    pub fn new(departments: Vec<Department>) -> Self {
        Self { departments }
    }

    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    pub fn get(&self, code: &str) -> Option<&Department> {
        self.departments.iter().find(|d| d.code == code)
    }

    pub fn department_of(&self, course: &str) -> Option<&Department> {
        self.departments
            .iter()
            .find(|d| d.courses.iter().any(|c| c == course))
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.departments.iter().map(|d| d.code.as_str())
    }
}

impl Default for DepartmentCatalog {
    fn default() -> Self {
        Self::new(vec![
            Department {
                code: "BED".to_string(),
                courses: vec![
                    "BSBA-FINANCIAL_MANAGEMENT".to_string(),
                    "BSBA-MARKETING_MANAGEMENT".to_string(),
                ],
            },
            Department {
                code: "CED".to_string(),
                courses: vec!["BSIT".to_string(), "BSCS".to_string()],
            },
        ])
    }
}
