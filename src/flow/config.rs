// SPDX-License-Identifier: MIT

//! Environment-driven configuration for the sync client

use crate::core::error::FlowError;
use std::env;
use std::path::PathBuf;
use url::Url;

pub const DEFAULT_LIST_PATH: &str = "api/workflow/list";
pub const DEFAULT_SAVE_PATH: &str = "api/workflow/create";

#[derive(Debug, Clone, PartialEq)]
pub struct SyncConfig {
    /// Base URL of the persistence service
    pub base_url: Url,
    pub list_path: String,
    pub save_path: String,
    pub api_token: Option<String>,
    /// Directory exported flow files are written to
    pub export_dir: PathBuf,
}

impl SyncConfig {
    pub fn new(base_url: &str) -> Result<Self, FlowError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            list_path: DEFAULT_LIST_PATH.to_string(),
            save_path: DEFAULT_SAVE_PATH.to_string(),
            api_token: None,
            export_dir: PathBuf::from("."),
        })
    }

    /// Read `FLOW_SERVER_URL`, `FLOW_LIST_PATH`, `FLOW_SAVE_PATH`, `FLOW_API_TOKEN`
    /// and `FLOW_EXPORT_DIR`
    pub fn from_env() -> Result<Self, FlowError> {
        let base_url = env::var("FLOW_SERVER_URL")
            .map_err(|_| FlowError::config("FLOW_SERVER_URL must be set"))?;
        Self::from_lookup(&base_url, |key| env::var(key).ok())
    }

    fn from_lookup(
        base_url: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, FlowError> {
        let mut config = Self::new(base_url)?;
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(path) = non_empty("FLOW_LIST_PATH") {
            config.list_path = path;
        }
        if let Some(path) = non_empty("FLOW_SAVE_PATH") {
            config.save_path = path;
        }
        if let Some(dir) = non_empty("FLOW_EXPORT_DIR") {
            config.export_dir = PathBuf::from(dir);
        }
        config.api_token = non_empty("FLOW_API_TOKEN");

        log::info!(
            "Sync config: base_url={}, has_token={}",
            config.base_url,
            config.api_token.is_some()
        );
        Ok(config)
    }

    pub fn list_url(&self) -> Result<Url, FlowError> {
        Ok(self.base_url.join(self.list_path.trim_start_matches('/'))?)
    }

    pub fn save_url(&self) -> Result<Url, FlowError> {
        Ok(self.base_url.join(self.save_path.trim_start_matches('/'))?)
    }
}

/// Parse a base URL, forcing a trailing slash so relative joins keep its path
fn parse_base_url(raw: &str) -> Result<Url, FlowError> {
    let mut url = Url::parse(raw.trim())?;
    if url.cannot_be_a_base() {
        return Err(FlowError::config(format!("{} cannot be a base url", raw)));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SyncConfig::from_lookup("http://localhost:3000", lookup(&[])).unwrap();
        assert_eq!(config.list_path, DEFAULT_LIST_PATH);
        assert_eq!(config.save_path, DEFAULT_SAVE_PATH);
        assert!(config.api_token.is_none());
        assert_eq!(
            config.list_url().unwrap().as_str(),
            "http://localhost:3000/api/workflow/list"
        );
    }

    #[test]
    fn test_overrides() {
        let config = SyncConfig::from_lookup(
            "https://example.com/base",
            lookup(&[
                ("FLOW_LIST_PATH", "/flows"),
                ("FLOW_SAVE_PATH", "flows/save"),
                ("FLOW_API_TOKEN", "secret"),
                ("FLOW_EXPORT_DIR", "out"),
            ]),
        )
        .unwrap();

        assert_eq!(
            config.list_url().unwrap().as_str(),
            "https://example.com/base/flows"
        );
        assert_eq!(
            config.save_url().unwrap().as_str(),
            "https://example.com/base/flows/save"
        );
        assert_eq!(config.api_token.as_deref(), Some("secret"));
        assert_eq!(config.export_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_empty_token_is_none() {
        let config =
            SyncConfig::from_lookup("http://h", lookup(&[("FLOW_API_TOKEN", "  ")])).unwrap();
        assert!(config.api_token.is_none());
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            SyncConfig::new("not a url"),
            Err(FlowError::Config(_))
        ));
        assert!(matches!(
            SyncConfig::new("mailto:a@b.c"),
            Err(FlowError::Config(_))
        ));
    }
}
