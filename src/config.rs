use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Options fixed at context construction.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct ContextOptions {
    /// Classify channel posts into sub-types the way messages are.
    #[serde(default)]
    pub channel_mode: bool,
    /// The bot's own username, reported by `Context::me`.
    #[serde(default)]
    pub username: Option<String>,
}

impl ContextOptions {
    pub fn with_channel_mode(mut self, enabled: bool) -> Self {
        self.channel_mode = enabled;
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub bot: ContextOptions,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
