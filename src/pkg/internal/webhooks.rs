use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde_json::{json, Value};
use standard_error::{Interpolate, StandardError, Status};

use crate::{conf::settings, prelude::Result};

/// Forwards an uploaded resume to the processing webhook.
pub async fn forward_resume(
    http: &reqwest::Client,
    file_name: String,
    content_type: &str,
    data: Vec<u8>,
    record_id: &str,
    name: Option<String>,
    email: Option<String>,
) -> Result<Value> {
    let part = Part::bytes(data)
        .file_name(file_name)
        .mime_str(content_type)
        .map_err(|e| StandardError::new("ERR-HOOK-001").interpolate_err(e.to_string()))?;
    let mut form = Form::new()
        .part("file", part)
        .text("recordId", record_id.to_string());
    if let Some(name) = name {
        form = form.text("name", name);
    }
    if let Some(email) = email {
        form = form.text("email", email);
    }
    let response = http
        .post(&settings.resume_webhook_url)
        .multipart(form)
        .send()
        .await
        .map_err(|e| StandardError::new("ERR-HOOK-002").interpolate_err(e.to_string()))?;
    let body = ensure_success(response).await?;
    Ok(parse_or_stub(&body))
}

/// Asks the question-regeneration webhook to rewrite a candidate's
/// interview questions.
pub async fn regenerate_questions(
    http: &reqwest::Client,
    user_id: &str,
    prompt: &str,
) -> Result<Value> {
    let response = http
        .post(&settings.regenerate_webhook_url)
        .json(&json!({ "user_id": user_id, "prompt": prompt }))
        .send()
        .await
        .map_err(|e| StandardError::new("ERR-HOOK-002").interpolate_err(e.to_string()))?;
    let body = ensure_success(response).await?;
    Ok(parse_or_stub(&body))
}

async fn ensure_success(response: reqwest::Response) -> Result<String> {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if !status.is_success() {
        tracing::error!("webhook returned {}: {}", status, &body);
        return Err(StandardError::new("ERR-HOOK-003")
            .code(StatusCode::BAD_GATEWAY)
            .interpolate_err(format!("{}: {}", status, body)));
    }
    Ok(body)
}

/// Webhooks occasionally answer with an empty or non-JSON body on success;
/// those degrade to an assumed-success stub instead of an error.
fn parse_or_stub(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| json!({ "success": true }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_bodies_pass_through() {
        let parsed = parse_or_stub(r#"{"processed": 3}"#);
        assert_eq!(parsed["processed"], 3);
    }

    #[test]
    fn unparsable_bodies_become_the_success_stub() {
        assert_eq!(parse_or_stub(""), json!({"success": true}));
        assert_eq!(parse_or_stub("OK"), json!({"success": true}));
    }
}
