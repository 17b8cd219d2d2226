use axum::extract::{Multipart, State};
use axum::{http::StatusCode, Json};
use serde_json::{json, Value};
use tracing::{info, warn};

use enrollment::{analyze, DatasetError, RawTable};

use crate::state::SharedState;
use crate::store_exec::with_store_blocking;
use crate::types::{upload_error, ApiError};

pub async fn index(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({
        "dataset_loaded": state.store.is_loaded(),
        "departments": state.catalog.departments(),
    }))
}

pub async fn check_dataset_status(State(state): State<SharedState>) -> Json<Value> {
    let dataset_info = state.dataset_info();
    Json(json!({
        "loaded": dataset_info.is_some(),
        "dataset_info": dataset_info,
    }))
}

pub async fn upload_dataset(
    State(state): State<SharedState>,
    mut mp: Multipart,
) -> Result<Json<Value>, ApiError> {
    let mut upload: Option<(String, bytes::Bytes)> = None;

    while let Some(field) = mp
        .next_field()
        .await
        .map_err(|e| upload_error(StatusCode::BAD_REQUEST, e.to_string()))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| upload_error(StatusCode::BAD_REQUEST, e.to_string()))?;
            upload = Some((filename, bytes));
        }
    }

    let (filename, bytes) =
        upload.ok_or_else(|| upload_error(StatusCode::BAD_REQUEST, "No file provided"))?;
    if filename.is_empty() {
        return Err(upload_error(StatusCode::BAD_REQUEST, "No file selected"));
    }
    if !filename.to_lowercase().ends_with(".csv") {
        return Err(upload_error(StatusCode::BAD_REQUEST, "File must be a CSV"));
    }

    let name = secure_filename(&filename);
    let log_name = name.clone();
    let dataset = with_store_blocking(state.store.clone(), move |store| {
        let table = RawTable::from_csv_bytes(&bytes).map_err(|e| {
            let detail = match e {
                DatasetError::MalformedInput(msg) => msg,
                other => other.to_string(),
            };
            upload_error(StatusCode::BAD_REQUEST, format!("Error reading CSV: {detail}"))
        })?;
        store.replace(table).map_err(|e| {
            warn!(filename = %log_name, error = %e, "dataset upload rejected");
            upload_error(replace_status(&e), e.to_string())
        })
    })
    .await
    .map_err(|e| upload_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))??;

    info!(filename = %name, records = dataset.len(), "dataset uploaded successfully");

    // The upload response names the file the user sent; later status calls
    // name the backing file.
    let mut summary = analyze(&dataset, &state.catalog);
    summary.filename = name;

    Ok(Json(json!({
        "success": true,
        "message": "Dataset uploaded successfully",
        "dataset_info": summary,
    })))
}

fn replace_status(e: &DatasetError) -> StatusCode {
    match e {
        DatasetError::Io(_) | DatasetError::Csv(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

/// ASCII-only file name safe to echo back: path parts dropped, other
/// characters replaced by '_', leading dots and underscores stripped.
pub fn secure_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();
    let trimmed = cleaned.trim_start_matches(['.', '_']);
    if trimmed.is_empty() {
        "dataset.csv".to_string()
    } else {
        trimmed.to_string()
    }
}
