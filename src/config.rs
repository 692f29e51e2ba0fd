use serde::Deserialize;

use crate::error::{ClientError, ClientResult};

/// Id of the `<script type="application/json">` element holding the config.
const CONFIG_ELEMENT_ID: &str = "app-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Prefix for every endpoint URL. Empty means same origin.
    pub api_base: String,
    /// How long a status message stays visible. 0 keeps it shown.
    pub message_timeout_ms: u32,
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            message_timeout_ms: 5000,
            log_level: "info".into(),
        }
    }
}

impl ClientConfig {
    pub fn from_json(json: &str) -> ClientResult<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut config: Self = serde_json::from_str(json)
            .map_err(|e| ClientError::Config(format!("invalid {CONFIG_ELEMENT_ID}: {e}")))?;
        config.api_base = config.api_base.trim_end_matches('/').to_string();
        Ok(config)
    }

    /// Reads the embedded config block. A page without one gets the defaults.
    pub fn from_dom() -> ClientResult<Self> {
        let Some(doc) = web_sys::window().and_then(|w| w.document()) else {
            return Ok(Self::default());
        };
        match doc.get_element_by_id(CONFIG_ELEMENT_ID) {
            Some(el) => Self::from_json(&el.text_content().unwrap_or_default()),
            None => Ok(Self::default()),
        }
    }

    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}
