//! Configuration
//!
//! TOML-based configuration for the demo: model endpoint, theme, sampling
//! knobs and the follow-up turn. CLI flags override file values; built-in
//! defaults fill everything else.

use crate::flow::DemoConfig;
use crate::llm::{FollowUpStyle, THEMES};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = "cows.toml";

/// Top-level configuration (maps to TOML).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Model endpoint settings.
    #[serde(default)]
    pub model: ModelConfig,

    /// Demo run settings.
    #[serde(default)]
    pub demo: DemoSettings,
}

/// Model endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Base URL of an OpenAI-compatible chat-completions server.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model identifier passed through to the server.
    #[serde(default = "default_model")]
    pub name: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            name: default_model(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_model() -> String {
    "qwen3-8b".to_string()
}

/// Demo run settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoSettings {
    /// Poem theme; must be one of the supported themes.
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Sampling temperature for the first turn.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Token budget for the first turn.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
    /// Follow-up style: "skip", "plain" or "poem".
    #[serde(default = "default_follow_up")]
    pub follow_up: String,
    /// Token budget for the follow-up turn.
    #[serde(default = "default_follow_up_max_tokens")]
    pub follow_up_max_tokens: usize,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            follow_up: default_follow_up(),
            follow_up_max_tokens: default_follow_up_max_tokens(),
        }
    }
}

fn default_theme() -> String {
    "nature".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> usize {
    512
}

fn default_follow_up() -> String {
    "plain".to_string()
}

fn default_follow_up_max_tokens() -> usize {
    256
}

impl Config {
    /// Load config from an explicit path, or from `cows.toml` in the working
    /// directory when present, or fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let default = Path::new(CONFIG_FILE);
                if default.exists() {
                    Self::load_from(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse config: {}", path.display()))?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Validate the demo settings and convert them into a `DemoConfig`.
    pub fn demo_config(&self) -> Result<DemoConfig> {
        if !THEMES.contains(&self.demo.theme.as_str()) {
            bail!(
                "unknown theme '{}', expected one of: {}",
                self.demo.theme,
                THEMES.join(", ")
            );
        }

        let follow_up = FollowUpStyle::parse(&self.demo.follow_up).ok_or_else(|| {
            anyhow::anyhow!(
                "unknown follow-up style '{}', expected skip, plain or poem",
                self.demo.follow_up
            )
        })?;

        Ok(DemoConfig {
            theme: self.demo.theme.clone(),
            temperature: self.demo.temperature,
            max_tokens: self.demo.max_tokens,
            follow_up,
            follow_up_max_tokens: self.demo.follow_up_max_tokens,
        })
    }
}
