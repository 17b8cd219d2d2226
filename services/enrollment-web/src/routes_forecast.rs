use axum::extract::{Form, State};
use axum::{http::StatusCode, Json};
use serde_json::{json, Value};
use tracing::{debug, warn};

use enrollment::{analyze, find_record, get_trend, semester_text, DatasetError, DEFAULT_TREND_RECORDS};

use crate::state::SharedState;
use crate::types::{api_error, required_fields, ApiError, ForecastForm};

pub async fn bed_forecast(
    State(state): State<SharedState>,
    Form(form): Form<ForecastForm>,
) -> Result<Json<Value>, ApiError> {
    process_forecast(&state, "BED", &form)
}

pub async fn ced_forecast(
    State(state): State<SharedState>,
    Form(form): Form<ForecastForm>,
) -> Result<Json<Value>, ApiError> {
    process_forecast(&state, "CED", &form)
}

/// Historical record plus trend for one course/term, against a single
/// dataset snapshot.
fn process_forecast(
    state: &SharedState,
    department: &str,
    form: &ForecastForm,
) -> Result<Json<Value>, ApiError> {
    let dataset = state.store.snapshot().map_err(|e| match e {
        DatasetError::NoDatasetLoaded => api_error(
            StatusCode::CONFLICT,
            "Please upload a dataset to view historical data",
        ),
        other => internal_error(other),
    })?;

    let (course, year, semester) = required_fields(&form.course, &form.year, &form.semester)
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "Please complete all required fields"))?;
    let sem_text = semester_text(&semester);

    let record = find_record(&dataset, &course, &year, &semester).map_err(|e| match e {
        DatasetError::NoMatch => {
            debug!(department, %course, %year, %semester, "no historical match");
            api_error(
                StatusCode::NOT_FOUND,
                format!("No historical data found for {course} in {year} ({sem_text} Semester)"),
            )
        }
        other => internal_error(other),
    })?;

    let trend = get_trend(&dataset, &course, DEFAULT_TREND_RECORDS);

    Ok(Json(json!({
        "department": department,
        "course": course,
        "year": year,
        "semester": sem_text,
        "total_enrollment": record.total_enrollment,
        "year_levels": {
            "first_year": record.first_year,
            "second_year": record.second_year,
            "third_year": record.third_year,
            "fourth_year": record.fourth_year,
        },
        "historical_trend": trend,
        "dataset_info": analyze(&dataset, &state.catalog),
    })))
}

fn internal_error(e: DatasetError) -> ApiError {
    warn!(error = %e, "forecast lookup failed");
    api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
