pub mod mutators;
pub mod selectors;
pub mod spec;

use reqwest::StatusCode;
use standard_error::{Interpolate, StandardError, Status};

use crate::prelude::Result;

/// Every non-2xx upstream response is a failure; the body is carried along
/// for diagnostics but never interpreted.
pub(crate) async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let detail = response.text().await.unwrap_or_default();
    tracing::error!("record store returned {}: {}", status, &detail);
    Err(StandardError::new("ERR-STORE-002")
        .code(StatusCode::BAD_GATEWAY)
        .interpolate_err(format!("{}: {}", status, detail)))
}

pub(crate) fn transport_err(err: reqwest::Error) -> StandardError {
    StandardError::new("ERR-STORE-001").interpolate_err(err.to_string())
}

pub(crate) fn decode_err(err: reqwest::Error) -> StandardError {
    StandardError::new("ERR-STORE-003").interpolate_err(err.to_string())
}
