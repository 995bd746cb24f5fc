// SPDX-License-Identifier: MIT

//! Chat agent definitions used as templates for new flows

use crate::core::error::FlowError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Model used when an agent does not name one
pub const DEFAULT_AGENT_MODEL: &str = "gpt-3.5-turbo";

/// A chat agent a flow can be seeded from
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ChatAgent {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default, rename = "avatarBackground")]
    pub avatar_background: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    /// System role prompt
    #[serde(default)]
    pub content: String,
}

impl ChatAgent {
    /// Load an agent from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, FlowError> {
        let content = fs::read_to_string(path)?;
        Self::parse_yaml(&content)
    }

    pub fn parse_yaml(content: &str) -> Result<Self, FlowError> {
        serde_yaml::from_str(content).map_err(|e| FlowError::format(e.to_string()))
    }

    pub fn model_or_default(&self) -> &str {
        self.model
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_AGENT_MODEL)
    }
}
