use std::path::Path;
use std::time::Duration;

use axum::{
    extract::{Multipart, Path as AxumPath, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use standard_error::{StandardError, Status};

use crate::{
    conf::settings,
    pkg::{
        internal::{
            adaptors::store::{
                mutators::RecordMutator,
                selectors::RecordSelector,
                spec::{Record, RecordPage},
            },
            candidate::Candidate,
            dashboard::view::{build_dashboard, DashboardView},
            webhooks,
        },
        server::state::AppState,
    },
    prelude::Result,
};

use super::candidates::UpdateRecordInput;
use super::ui::DashboardQuery;

const MAX_RESUME_BYTES: usize = 10 * 1024 * 1024;

pub async fn list(State(state): State<AppState>) -> Result<Json<RecordPage>> {
    let page = RecordSelector::new(&state.http, &state.pipeline).list().await?;
    Ok(Json(page))
}

pub async fn retrieve(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<Record>> {
    let record = RecordSelector::new(&state.http, &state.pipeline).get(&id).await?;
    Ok(Json(record))
}

pub async fn update(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    Json(input): Json<UpdateRecordInput>,
) -> Result<Json<Record>> {
    let record = RecordMutator::new(&state.http, &state.pipeline)
        .patch(&id, input.fields)
        .await?;
    Ok(Json(record))
}

pub async fn remove(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<Value>> {
    RecordMutator::new(&state.http, &state.pipeline).delete(&id).await?;
    Ok(Json(json!({ "message": "Candidate deleted successfully" })))
}

/// The dashboard view-model as JSON; the same structure the `/admin` page
/// renders, for chart-hungry clients.
pub async fn dashboard(
    State(state): State<AppState>,
    Query(params): Query<DashboardQuery>,
) -> Result<Json<DashboardView>> {
    let page = RecordSelector::new(&state.http, &state.pipeline).list().await?;
    let candidates: Vec<Candidate> = page
        .records
        .into_iter()
        .map(Candidate::from_record)
        .collect();
    let view = build_dashboard(
        &candidates,
        &params.criteria(),
        &state.bands,
        Utc::now().date_naive(),
    );
    Ok(Json(view))
}

pub async fn upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>> {
    let mut record_id = String::new();
    let mut name = None;
    let mut email = None;
    let mut file: Option<(String, String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| StandardError::new(&format!("ERR-UPLOAD-001: {}", e)))?
    {
        let field_name = field.name().unwrap_or("");
        match field_name {
            "recordId" => {
                record_id = field
                    .text()
                    .await
                    .map_err(|e| StandardError::new(&format!("ERR-UPLOAD-002: {}", e)))?;
            }
            "name" => {
                name = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| StandardError::new(&format!("ERR-UPLOAD-002: {}", e)))?,
                );
            }
            "email" => {
                email = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| StandardError::new(&format!("ERR-UPLOAD-002: {}", e)))?,
                );
            }
            "file" => {
                let file_name = field.file_name().unwrap_or("resume").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| StandardError::new(&format!("ERR-UPLOAD-003: {}", e)))?;
                let extension = Path::new(&file_name)
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .unwrap_or("")
                    .to_lowercase();
                if !["pdf", "doc", "docx"].contains(&extension.as_str()) {
                    return Err(StandardError::new(
                        "ERR-UPLOAD-005: Invalid file type. Only PDF, DOC, DOCX files are allowed",
                    )
                    .code(StatusCode::BAD_REQUEST));
                }
                if data.len() > MAX_RESUME_BYTES {
                    return Err(StandardError::new(
                        "ERR-UPLOAD-006: File too large. Maximum size is 10MB",
                    )
                    .code(StatusCode::BAD_REQUEST));
                }
                let mime_type = match extension.as_str() {
                    "pdf" => "application/pdf",
                    "doc" => "application/msword",
                    "docx" => {
                        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
                    }
                    _ => "application/octet-stream",
                };
                file = Some((file_name, mime_type.to_string(), data.into()));
            }
            _ => {
                let _ = field
                    .bytes()
                    .await
                    .map_err(|e| StandardError::new(&format!("ERR-UPLOAD-004: {}", e)))?;
            }
        }
    }

    let (file_name, mime_type, data) = file.ok_or_else(|| {
        StandardError::new("ERR-UPLOAD-007: resume file is required").code(StatusCode::BAD_REQUEST)
    })?;
    if record_id.trim().is_empty() {
        return Err(StandardError::new("ERR-UPLOAD-008: recordId is required")
            .code(StatusCode::BAD_REQUEST));
    }

    // neither success nor failure is surfaced before the pacing floor elapses
    let floor = tokio::time::sleep(Duration::from_secs(settings.upload_min_wait_secs));
    let forward = webhooks::forward_resume(
        &state.http,
        file_name,
        &mime_type,
        data,
        &record_id,
        name,
        email,
    );
    let (outcome, _) = tokio::join!(forward, floor);
    Ok(Json(outcome?))
}

#[derive(Deserialize)]
pub struct RegenerateInput {
    pub user_id: String,
    pub prompt: String,
}

pub async fn regenerate_questions(
    State(state): State<AppState>,
    Json(input): Json<RegenerateInput>,
) -> Result<Json<Value>> {
    if input.user_id.trim().is_empty() {
        return Err(
            StandardError::new("ERR-REGEN-001: user_id is required").code(StatusCode::BAD_REQUEST)
        );
    }
    if input.prompt.trim().is_empty() {
        return Err(
            StandardError::new("ERR-REGEN-002: prompt is required").code(StatusCode::BAD_REQUEST)
        );
    }
    let result =
        webhooks::regenerate_questions(&state.http, &input.user_id, input.prompt.trim()).await?;
    Ok(Json(result))
}
