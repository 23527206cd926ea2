use crate::prelude::Result;

use super::spec::{Record, RecordPage, TableRef};
use super::{decode_err, ensure_success, transport_err};

pub struct RecordSelector<'a> {
    http: &'a reqwest::Client,
    table: &'a TableRef,
}

impl<'a> RecordSelector<'a> {
    pub fn new(http: &'a reqwest::Client, table: &'a TableRef) -> Self {
        RecordSelector { http, table }
    }

    pub async fn list(&self) -> Result<RecordPage> {
        let mut request = self
            .http
            .get(self.table.collection_url())
            .bearer_auth(&self.table.api_key);
        if let Some(view) = &self.table.view_id {
            request = request.query(&[("view", view)]);
        }
        let response = request.send().await.map_err(transport_err)?;
        let response = ensure_success(response).await?;
        let page: RecordPage = response.json().await.map_err(decode_err)?;
        tracing::debug!("fetched {} records", page.records.len());
        Ok(page)
    }

    pub async fn get(&self, id: &str) -> Result<Record> {
        let response = self
            .http
            .get(self.table.record_url(id))
            .bearer_auth(&self.table.api_key)
            .send()
            .await
            .map_err(transport_err)?;
        let response = ensure_success(response).await?;
        Ok(response.json().await.map_err(decode_err)?)
    }

    /// Cheapest possible readiness check: ask for a single-record page.
    pub async fn ping(&self) -> Result<()> {
        let response = self
            .http
            .get(self.table.collection_url())
            .bearer_auth(&self.table.api_key)
            .query(&[("maxRecords", "1")])
            .send()
            .await
            .map_err(transport_err)?;
        ensure_success(response).await?;
        Ok(())
    }
}
