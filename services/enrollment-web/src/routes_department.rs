use axum::extract::{Form, State};
use axum::{http::StatusCode, Json};
use serde_json::{json, Value};

use crate::state::SharedState;
use crate::types::{api_error, ApiError, DepartmentForm};

pub async fn select_department(
    State(state): State<SharedState>,
    Form(form): Form<DepartmentForm>,
) -> Result<Json<Value>, ApiError> {
    department_filter(&state, form.department.trim())
}

pub async fn bed_filter(State(state): State<SharedState>) -> Result<Json<Value>, ApiError> {
    department_filter(&state, "BED")
}

pub async fn ced_filter(State(state): State<SharedState>) -> Result<Json<Value>, ApiError> {
    department_filter(&state, "CED")
}

fn department_filter(state: &SharedState, code: &str) -> Result<Json<Value>, ApiError> {
    let dept = state
        .catalog
        .get(code)
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "Invalid department selected"))?;

    Ok(Json(json!({
        "department": dept.code,
        "courses": dept.courses,
        "dataset_loaded": state.store.is_loaded(),
    })))
}
