use axum::{http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};

pub type ApiError = (StatusCode, Json<Value>);

pub fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    (status, Json(json!({ "error": msg.into() })))
}

/// Upload failures keep the `{success, error}` shape.
pub fn upload_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    (status, Json(json!({ "success": false, "error": msg.into() })))
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct PredictRequest {
    pub course: String,
    pub year: String,
    pub semester: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ForecastForm {
    pub course: String,
    pub year: String,
    pub semester: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DepartmentForm {
    pub department: String,
}

/// Trimmed (course, year, semester), or None when any is blank.
pub fn required_fields(course: &str, year: &str, semester: &str) -> Option<(String, String, String)> {
    let (c, y, s) = (course.trim(), year.trim(), semester.trim());
    if c.is_empty() || y.is_empty() || s.is_empty() {
        return None;
    }
    Some((c.to_string(), y.to_string(), s.to_string()))
}
