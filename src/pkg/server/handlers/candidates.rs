use axum::{
    extract::{Path as AxumPath, State},
    http::{
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
        StatusCode,
    },
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use standard_error::{StandardError, Status};

use crate::{
    pkg::{
        internal::{
            adaptors::store::{
                mutators::RecordMutator,
                selectors::RecordSelector,
                spec::{Record, RecordPage},
            },
            profile::{self, Profile},
        },
        server::state::AppState,
    },
    prelude::Result,
};

#[derive(Deserialize)]
pub struct UpdateRecordInput {
    pub fields: Map<String, Value>,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<RecordPage>> {
    let page = RecordSelector::new(&state.http, &state.profiles).list().await?;
    Ok(Json(page))
}

pub async fn retrieve(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<Record>> {
    let record = RecordSelector::new(&state.http, &state.profiles).get(&id).await?;
    Ok(Json(record))
}

pub async fn update(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    Json(input): Json<UpdateRecordInput>,
) -> Result<Json<Record>> {
    require_field(&input.fields, "Name")?;
    require_field(&input.fields, "email")?;
    let record = RecordMutator::new(&state.http, &state.profiles)
        .patch(&id, input.fields)
        .await?;
    Ok(Json(record))
}

fn require_field(fields: &Map<String, Value>, key: &str) -> Result<()> {
    let present = fields
        .get(key)
        .and_then(Value::as_str)
        .map(|value| !value.trim().is_empty())
        .unwrap_or(false);
    if present {
        Ok(())
    } else {
        Err(
            StandardError::new(&format!("ERR-VALIDATION-001: {} is required", key))
                .code(StatusCode::BAD_REQUEST),
        )
    }
}

pub async fn remove(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<Value>> {
    RecordMutator::new(&state.http, &state.profiles).delete(&id).await?;
    Ok(Json(json!({ "message": "Candidate deleted successfully" })))
}

#[derive(Deserialize)]
pub struct BulkDeleteInput {
    pub ids: Vec<String>,
}

#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct DeleteSummary {
    pub requested: usize,
    pub deleted: usize,
    pub failed: Vec<DeleteFailure>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct DeleteFailure {
    pub id: String,
    pub error: String,
}

impl DeleteSummary {
    pub fn new(requested: usize) -> Self {
        DeleteSummary {
            requested,
            ..DeleteSummary::default()
        }
    }

    pub fn record_success(&mut self) {
        self.deleted += 1;
    }

    pub fn record_failure(&mut self, id: &str, error: String) {
        self.failed.push(DeleteFailure {
            id: id.to_string(),
            error,
        });
    }
}

/// Deletes are issued one at a time, in order; a failure never halts the
/// remaining ids, it lands in the summary instead.
pub async fn bulk_delete(
    State(state): State<AppState>,
    Json(input): Json<BulkDeleteInput>,
) -> Result<Json<DeleteSummary>> {
    let mutator = RecordMutator::new(&state.http, &state.profiles);
    let summary = delete_sequentially(&input.ids, |id| mutator.delete(id)).await;
    Ok(Json(summary))
}

async fn delete_sequentially<'a, F, Fut>(ids: &'a [String], mut delete: F) -> DeleteSummary
where
    F: FnMut(&'a str) -> Fut,
    Fut: std::future::Future<Output = Result<()>>,
{
    let mut summary = DeleteSummary::new(ids.len());
    for id in ids {
        match delete(id).await {
            Ok(()) => summary.record_success(),
            Err(err) => {
                tracing::error!("bulk delete failed for {}: {}", id, &err);
                summary.record_failure(id, err.to_string());
            }
        }
    }
    summary
}

pub async fn export_csv(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let page = RecordSelector::new(&state.http, &state.profiles).list().await?;
    let profiles: Vec<Profile> = page.records.into_iter().map(Profile::from_record).collect();
    let csv = profile::to_csv(&profiles);
    let disposition = format!(
        "attachment; filename=\"candidates_{}.csv\"",
        Utc::now().date_naive()
    );
    Ok((
        [
            (CONTENT_TYPE, "text/csv".to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        csv,
    ))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use tracing_test::traced_test;

    use super::*;

    #[tokio::test]
    #[traced_test]
    async fn bulk_delete_attempts_every_id_despite_failures() {
        let ids: Vec<String> = vec!["rec1".into(), "rec2".into(), "rec3".into()];
        let attempted = Mutex::new(Vec::new());
        let summary = delete_sequentially(&ids, |id| {
            attempted.lock().unwrap().push(id.to_string());
            async move {
                if id == "rec2" {
                    Err(StandardError::new("ERR-STORE-002: upstream refused"))
                } else {
                    Ok(())
                }
            }
        })
        .await;

        // the failure on rec2 must not short-circuit rec3
        assert_eq!(*attempted.lock().unwrap(), vec!["rec1", "rec2", "rec3"]);
        assert_eq!(summary.requested, 3);
        assert_eq!(summary.deleted, 2);
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].id, "rec2");
    }

    #[test]
    fn summary_collects_every_outcome() {
        let mut summary = DeleteSummary::new(3);
        summary.record_success();
        summary.record_failure("rec2", "ERR-STORE-002".into());
        summary.record_success();
        assert_eq!(summary.requested, 3);
        assert_eq!(summary.deleted, 2);
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].id, "rec2");
    }

    #[test]
    fn required_fields_must_be_non_empty_text() {
        let mut fields = Map::new();
        fields.insert("Name".into(), Value::String("Ada".into()));
        assert!(require_field(&fields, "Name").is_ok());
        assert!(require_field(&fields, "email").is_err());
        fields.insert("email".into(), Value::String("   ".into()));
        assert!(require_field(&fields, "email").is_err());
    }
}
