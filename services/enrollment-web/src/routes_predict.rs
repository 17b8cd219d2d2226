use axum::extract::rejection::JsonRejection;
use axum::{http::StatusCode, Json};
use serde_json::{json, Value};

use enrollment::{estimate, EstimateBand};

use crate::types::{api_error, required_fields, ApiError, PredictRequest};

fn parse_request(
    body: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<(String, String, String), ApiError> {
    let Json(req) = body.map_err(|_| api_error(StatusCode::BAD_REQUEST, "No data provided"))?;
    required_fields(&req.course, &req.year, &req.semester)
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "Missing required parameters"))
}

/// `/predict` and `/ced/predict-enrollment`: point estimate only.
pub async fn predict(
    body: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let (course, year, semester) = parse_request(body)?;
    let prediction = estimate(&course, &year, &semester);

    Ok(Json(json!({
        "prediction": prediction,
        "course": course,
        "year": year,
        "semester": semester,
    })))
}

/// `/bed/predict-enrollment`: estimate with a ±20% band.
pub async fn predict_with_band(
    body: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let (course, year, semester) = parse_request(body)?;
    let band = EstimateBand::from_prediction(estimate(&course, &year, &semester));

    Ok(Json(json!({
        "predicted_enrollment": band.predicted_enrollment,
        "lower_bound": band.lower_bound,
        "upper_bound": band.upper_bound,
        "course": course,
        "year": year,
        "semester": semester,
    })))
}
