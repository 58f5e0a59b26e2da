// src/config.rs
use std::env;

use reqwest::Url;
use tracing::Level;

use crate::error::{WidgetError, WidgetResult};
use crate::view::ElementIds;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/api/chat";

#[derive(Clone, Debug)]
pub struct WidgetConfig {
    pub endpoint: Url,
    pub ids: ElementIds,
    pub log_level: Level,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            ids: ElementIds::default(),
            log_level: Level::INFO,
        }
    }
}

impl WidgetConfig {
    /// Reads `CHAT_*` variables from the process environment.
    pub fn from_env() -> WidgetResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> WidgetResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("CHAT_ENDPOINT") {
            config.endpoint = Url::parse(raw.trim())
                .map_err(|e| WidgetError::Config(format!("CHAT_ENDPOINT `{raw}`: {e}")))?;
        }
        if let Some(id) = lookup("CHAT_MESSAGES_ID") {
            config.ids.messages = id;
        }
        if let Some(id) = lookup("CHAT_INPUT_ID") {
            config.ids.input = id;
        }
        if let Some(id) = lookup("CHAT_SEND_BUTTON_ID") {
            config.ids.send_button = id;
        }
        if let Some(raw) = lookup("CHAT_LOG_LEVEL") {
            config.log_level = raw.trim().parse().map_err(|_| {
                WidgetError::Config(format!("CHAT_LOG_LEVEL `{raw}` is not a level"))
            })?;
        }

        Ok(config)
    }
}
