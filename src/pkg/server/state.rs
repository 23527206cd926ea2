use std::sync::Arc;

use standard_error::{Interpolate, StandardError};

use crate::pkg::internal::adaptors::store::spec::TableRef;
use crate::pkg::internal::dashboard::classify::ScoreBands;
use crate::prelude::Result;

#[derive(Debug, Clone)]
pub struct AppState {
    pub http: reqwest::Client,
    pub pipeline: Arc<TableRef>,
    pub profiles: Arc<TableRef>,
    pub scraped: Arc<TableRef>,
    pub bands: ScoreBands,
}

impl AppState {
    pub async fn new() -> Result<AppState> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| StandardError::new("ERR-HTTP-000").interpolate_err(e.to_string()))?;
        Ok(AppState {
            http,
            pipeline: Arc::new(TableRef::pipeline()),
            profiles: Arc::new(TableRef::profiles()),
            scraped: Arc::new(TableRef::scraped()),
            bands: ScoreBands::from_settings(),
        })
    }
}
