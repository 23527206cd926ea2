use config::{Config, ConfigError, Environment};
use lazy_static::lazy_static;
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Settings {
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_listen_port")]
    pub listen_port: String,
    // upstream record store (Airtable-style REST)
    #[serde(default = "default_store_base_url")]
    pub store_base_url: String,
    #[serde(default)]
    pub pipeline_api_key: String,
    #[serde(default)]
    pub pipeline_base_id: String,
    #[serde(default)]
    pub pipeline_table_id: String,
    #[serde(default)]
    pub pipeline_view_id: String,
    #[serde(default)]
    pub profile_api_key: String,
    #[serde(default)]
    pub profile_base_id: String,
    #[serde(default)]
    pub profile_table_id: String,
    #[serde(default)]
    pub scraped_api_key: String,
    #[serde(default)]
    pub scraped_base_id: String,
    #[serde(default)]
    pub scraped_table_id: String,
    // processing webhooks
    #[serde(default)]
    pub resume_webhook_url: String,
    #[serde(default)]
    pub regenerate_webhook_url: String,
    #[serde(default = "default_upload_min_wait_secs")]
    pub upload_min_wait_secs: u64,
    // score band thresholds, highest to lowest (0-50 scale by default)
    #[serde(default = "default_score_excellent")]
    pub score_excellent: f64,
    #[serde(default = "default_score_good")]
    pub score_good: f64,
    #[serde(default = "default_score_fair")]
    pub score_fair: f64,
}

fn default_service_name() -> String {
    "talentdesk".into()
}

fn default_listen_port() -> String {
    "3000".into()
}

fn default_store_base_url() -> String {
    "https://api.airtable.com/v0".into()
}

fn default_upload_min_wait_secs() -> u64 {
    30
}

fn default_score_excellent() -> f64 {
    45.0
}

fn default_score_good() -> f64 {
    35.0
}

fn default_score_fair() -> f64 {
    25.0
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let conf = Config::builder()
            .add_source(Environment::default())
            .build()?;
        let s: Settings = conf.try_deserialize()?;
        Ok(s)
    }
}

lazy_static! {
    pub static ref settings: Settings = Settings::new().expect("improperly configured");
}
