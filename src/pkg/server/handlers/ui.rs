use askama::Template;
use axum::{
    extract::{Query, State},
    response::Html,
};
use chrono::Utc;
use serde::Deserialize;
use standard_error::{Interpolate, StandardError};

use crate::{
    conf::settings,
    pkg::{
        internal::{
            adaptors::store::selectors::RecordSelector,
            candidate::Candidate,
            dashboard::{
                filter::FilterCriteria,
                view::{build_cards, build_dashboard},
            },
            profile::Profile,
        },
        server::{
            state::AppState,
            uispec::{AdminPage, CandidatesPage},
        },
    },
    prelude::Result,
};

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub position: Option<String>,
    pub window: Option<String>,
}

impl DashboardQuery {
    pub fn criteria(self) -> FilterCriteria {
        FilterCriteria::from_params(self.search, self.status, self.position, self.window)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CardsQuery {
    pub q: Option<String>,
}

fn render_err(err: askama::Error) -> StandardError {
    StandardError::new("ERR-TMPL-001").interpolate_err(err.to_string())
}

pub async fn admin(
    State(state): State<AppState>,
    Query(params): Query<DashboardQuery>,
) -> Result<Html<String>> {
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

    let template = AdminPage {
        service: &settings.service_name,
        view: &view,
    };
    Ok(Html(template.render().map_err(render_err)?))
}

pub async fn cards(
    State(state): State<AppState>,
    Query(params): Query<CardsQuery>,
) -> Result<Html<String>> {
    let page = RecordSelector::new(&state.http, &state.profiles).list().await?;
    let profiles: Vec<Profile> = page.records.into_iter().map(Profile::from_record).collect();
    let query = params.q.unwrap_or_default();
    let search = query.trim();
    let view = build_cards(
        &profiles,
        if search.is_empty() { None } else { Some(search) },
    );

    let template = CandidatesPage {
        service: &settings.service_name,
        query: search,
        view: &view,
    };
    Ok(Html(template.render().map_err(render_err)?))
}
