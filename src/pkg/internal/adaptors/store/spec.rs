use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::conf::settings;

/// One upstream record: an opaque id plus a flat field bag. The id is the
/// only part ever used to target a mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

/// List responses arrive as `{"records": [...]}`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RecordPage {
    #[serde(default)]
    pub records: Vec<Record>,
}

/// Credentials and addressing for one upstream table.
#[derive(Debug, Clone)]
pub struct TableRef {
    pub api_key: String,
    pub base_id: String,
    pub table_id: String,
    pub view_id: Option<String>,
}

impl TableRef {
    pub fn pipeline() -> Self {
        let view = settings.pipeline_view_id.clone();
        TableRef {
            api_key: settings.pipeline_api_key.clone(),
            base_id: settings.pipeline_base_id.clone(),
            table_id: settings.pipeline_table_id.clone(),
            view_id: if view.is_empty() { None } else { Some(view) },
        }
    }

    pub fn profiles() -> Self {
        TableRef {
            api_key: settings.profile_api_key.clone(),
            base_id: settings.profile_base_id.clone(),
            table_id: settings.profile_table_id.clone(),
            view_id: None,
        }
    }

    pub fn scraped() -> Self {
        TableRef {
            api_key: settings.scraped_api_key.clone(),
            base_id: settings.scraped_base_id.clone(),
            table_id: settings.scraped_table_id.clone(),
            view_id: None,
        }
    }

    pub fn collection_url(&self) -> String {
        format!(
            "{}/{}/{}",
            settings.store_base_url, self.base_id, self.table_id
        )
    }

    pub fn record_url(&self, id: &str) -> String {
        format!("{}/{}", self.collection_url(), id)
    }
}
