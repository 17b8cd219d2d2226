use axum::extract::DefaultBodyLimit;
use axum::{routing::{get, post}, Router};
use tower_http::cors::CorsLayer;

use crate::state::SharedState;
use crate::{routes_dataset, routes_department, routes_forecast, routes_predict};

pub fn router(state: SharedState) -> Router {
    let bed = Router::new()
        .route("/bed_filter", get(routes_department::bed_filter))
        .route("/predict-enrollment", post(routes_predict::predict_with_band))
        .route("/forecast", post(routes_forecast::bed_forecast))
        .route("/forecast_history", post(routes_forecast::bed_forecast));

    let ced = Router::new()
        .route("/ced_filter", get(routes_department::ced_filter))
        .route("/predict-enrollment", post(routes_predict::predict))
        .route("/forecast", post(routes_forecast::ced_forecast))
        .route("/forecast_history", post(routes_forecast::ced_forecast));

    let max_upload_bytes = state.cfg.max_upload_bytes;

    Router::new()
        .route("/", get(routes_dataset::index))
        .route("/check_dataset_status", get(routes_dataset::check_dataset_status))
        .route("/upload_dataset", post(routes_dataset::upload_dataset))
        .route("/select_department", post(routes_department::select_department))
        .route("/predict", post(routes_predict::predict))
        .nest("/bed", bed)
        .nest("/ced", ced)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
