use axum::{
    extract::{Path as AxumPath, State},
    http::{
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
        StatusCode,
    },
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use standard_error::{StandardError, Status};

use crate::{
    pkg::{
        internal::{
            adaptors::store::{
                mutators::RecordMutator, selectors::RecordSelector, spec::Record,
            },
            pdf,
            scrape::{self, ScrapedProfile, SearchQuery},
        },
        server::state::AppState,
    },
    prelude::Result,
};

#[derive(Deserialize)]
pub struct ScrapeInput {
    pub url: Option<String>,
}

pub async fn scrape(
    State(state): State<AppState>,
    Json(input): Json<ScrapeInput>,
) -> Result<Json<ScrapedProfile>> {
    let url = input
        .url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .ok_or_else(|| {
            StandardError::new("ERR-SCRAPE-000: URL is required").code(StatusCode::BAD_REQUEST)
        })?;
    let profile = scrape::fetch_profile(url).await?;

    // persisting the profile is best-effort; the scrape result still goes
    // back to the caller if the store write fails
    if let Err(err) = persist_profile(&state, &profile).await {
        tracing::error!("failed to store scraped profile: {}", &err);
    }
    Ok(Json(profile))
}

#[derive(Deserialize)]
pub struct SearchInput {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub experience: String,
}

pub async fn search(
    State(state): State<AppState>,
    Json(input): Json<SearchInput>,
) -> Result<Json<Vec<ScrapedProfile>>> {
    if input.role.trim().is_empty() && input.skills.trim().is_empty() {
        return Err(StandardError::new("ERR-SCRAPE-000: Role or Skills are required")
            .code(StatusCode::BAD_REQUEST));
    }
    let query = SearchQuery {
        role: input.role,
        skills: input.skills,
        location: input.location,
        experience: input.experience,
    };
    let profiles = scrape::search_profiles(&query).await?;
    for profile in &profiles {
        if let Err(err) = persist_profile(&state, profile).await {
            tracing::warn!("failed to store profile {}: {}", &profile.full_name, &err);
        }
    }
    Ok(Json(profiles))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ScrapedProfile>>> {
    let page = RecordSelector::new(&state.http, &state.scraped).list().await?;
    let profiles = page.records.into_iter().map(record_to_profile).collect();
    Ok(Json(profiles))
}

pub async fn remove(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<Value>> {
    RecordMutator::new(&state.http, &state.scraped).delete(&id).await?;
    Ok(Json(json!({ "message": "Candidate deleted successfully" })))
}

pub async fn generate_pdf(
    State(_state): State<AppState>,
    Json(profile): Json<ScrapedProfile>,
) -> Result<impl IntoResponse> {
    let bytes = pdf::render_profile(&profile)?;
    let name = if profile.full_name.is_empty() {
        "candidate"
    } else {
        profile.full_name.as_str()
    };
    let disposition = format!("attachment; filename=\"{}_resume.pdf\"", name);
    Ok((
        [
            (CONTENT_TYPE, "application/pdf".to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    ))
}

async fn persist_profile(state: &AppState, profile: &ScrapedProfile) -> Result<Record> {
    RecordMutator::new(&state.http, &state.scraped)
        .create(profile_fields(profile))
        .await
}

/// Upstream field shape: snake_case keys, length-capped values, list fields
/// flattened (skills comma-joined, education/experience JSON-encoded).
fn profile_fields(profile: &ScrapedProfile) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("full_name".into(), clip(&profile.full_name, 100).into());
    fields.insert("email".into(), clip(&profile.email, 100).into());
    fields.insert("phone".into(), clip(&profile.phone, 50).into());
    fields.insert("linkedin_url".into(), clip(&profile.linkedin_url, 500).into());
    fields.insert(
        "skills".into(),
        clip(&profile.skills.join(", "), 1000).into(),
    );
    if !profile.education.is_empty() {
        let encoded = serde_json::to_string(&profile.education).unwrap_or_default();
        fields.insert("education".into(), clip(&encoded, 1000).into());
    }
    if !profile.experience.is_empty() {
        let encoded = serde_json::to_string(&profile.experience).unwrap_or_default();
        fields.insert("experience".into(), clip(&encoded, 2000).into());
    }
    if !profile.projects.is_empty() {
        fields.insert("projects".into(), clip(&profile.projects, 1000).into());
    }
    fields
}

/// Inverse of `profile_fields`, tolerant of records written by other tools:
/// an unparsable list field degrades to a single raw entry.
fn record_to_profile(record: Record) -> ScrapedProfile {
    let text = |key: &str| -> String {
        record
            .fields
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string()
    };
    let skills_raw = text("skills");
    ScrapedProfile {
        id: record.id.clone(),
        full_name: text("full_name"),
        email: text("email"),
        phone: text("phone"),
        linkedin_url: text("linkedin_url"),
        skills: skills_raw
            .split(',')
            .map(str::trim)
            .filter(|skill| !skill.is_empty())
            .map(String::from)
            .collect(),
        education: decode_list(&text("education")),
        experience: decode_list(&text("experience")),
        projects: text("projects"),
    }
}

fn decode_list(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    serde_json::from_str(raw).unwrap_or_else(|_| vec![raw.to_string()])
}

fn clip(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn stored_fields_are_snake_case_and_capped() {
        let profile = ScrapedProfile {
            full_name: "A".repeat(150),
            skills: vec!["Rust".into(), "SQL".into()],
            education: vec!["BSc".into()],
            ..ScrapedProfile::default()
        };
        let fields = profile_fields(&profile);
        assert_eq!(fields["full_name"].as_str().unwrap().len(), 100);
        assert_eq!(fields["skills"], json!("Rust, SQL"));
        assert_eq!(fields["education"], json!("[\"BSc\"]"));
        assert!(!fields.contains_key("experience"));
    }

    #[test]
    fn stored_records_round_back_into_the_display_shape() {
        let mut fields = Map::new();
        fields.insert("full_name".into(), json!("Ada Lovelace"));
        fields.insert("skills".into(), json!("Maths, Programming"));
        fields.insert("education".into(), json!("[\"Home tutoring\"]"));
        fields.insert("experience".into(), json!("freeform text, not json"));
        let profile = record_to_profile(Record {
            id: "rec42".into(),
            fields,
        });
        assert_eq!(profile.id, "rec42");
        assert_eq!(profile.skills, vec!["Maths", "Programming"]);
        assert_eq!(profile.education, vec!["Home tutoring"]);
        // unparsable list fields fall back to one raw entry
        assert_eq!(profile.experience, vec!["freeform text, not json"]);
    }
}
