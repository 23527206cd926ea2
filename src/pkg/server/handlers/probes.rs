use axum::extract::State;

use crate::pkg::internal::adaptors::store::selectors::RecordSelector;
use crate::{pkg::server::state::AppState, prelude::Result};

pub async fn livez() -> Result<()> {
    tracing::debug!("service is live");
    Ok(())
}

pub async fn healthz(State(state): State<AppState>) -> Result<()> {
    RecordSelector::new(&state.http, &state.pipeline).ping().await?;
    tracing::debug!("service is healthy");
    Ok(())
}
