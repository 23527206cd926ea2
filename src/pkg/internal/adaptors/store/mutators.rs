use serde_json::{json, Map, Value};

use crate::prelude::Result;

use super::spec::{Record, TableRef};
use super::{decode_err, ensure_success, transport_err};

pub struct RecordMutator<'a> {
    http: &'a reqwest::Client,
    table: &'a TableRef,
}

impl<'a> RecordMutator<'a> {
    pub fn new(http: &'a reqwest::Client, table: &'a TableRef) -> Self {
        RecordMutator { http, table }
    }

    pub async fn create(&self, fields: Map<String, Value>) -> Result<Record> {
        let response = self
            .http
            .post(self.table.collection_url())
            .bearer_auth(&self.table.api_key)
            .json(&json!({ "fields": fields }))
            .send()
            .await
            .map_err(transport_err)?;
        let response = ensure_success(response).await?;
        Ok(response.json().await.map_err(decode_err)?)
    }

    pub async fn patch(&self, id: &str, fields: Map<String, Value>) -> Result<Record> {
        let response = self
            .http
            .patch(self.table.record_url(id))
            .bearer_auth(&self.table.api_key)
            .json(&json!({ "fields": fields }))
            .send()
            .await
            .map_err(transport_err)?;
        let response = ensure_success(response).await?;
        Ok(response.json().await.map_err(decode_err)?)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let response = self
            .http
            .delete(self.table.record_url(id))
            .bearer_auth(&self.table.api_key)
            .send()
            .await
            .map_err(transport_err)?;
        ensure_success(response).await?;
        Ok(())
    }
}
