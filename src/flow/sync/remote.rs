// SPDX-License-Identifier: MIT

//! Remote persistence service

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::error::FlowError;
use crate::flow::config::SyncConfig;

/// One stored flow as the service returns it. Either field may be missing on
/// malformed records.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RemoteFlowRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub workflow: Option<String>,
}

impl RemoteFlowRecord {
    pub fn new(id: impl Into<String>, workflow: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            workflow: Some(workflow.into()),
        }
    }

    /// Lenient conversion from one listing element. A numeric id is accepted as
    /// its decimal form; any other unreadable field is left empty.
    pub fn from_value(value: Value) -> Self {
        let field = |key: &str| match value.get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) if key == "id" => Some(n.to_string()),
            _ => None,
        };
        let record = Self {
            id: field("id"),
            workflow: field("workflow"),
        };
        if record.id.is_none() || record.workflow.is_none() {
            log::debug!("Unreadable remote record: {}", value);
        }
        record
    }
}

/// Trait for services that store serialized flows
#[async_trait]
pub trait FlowRemote: Send + Sync {
    /// List every stored flow
    async fn list(&self) -> Result<Vec<RemoteFlowRecord>, FlowError>;

    /// Store a flow, replacing any copy with the same id
    async fn save(&self, record: &RemoteFlowRecord) -> Result<(), FlowError>;
}

/// Lists may come back bare or wrapped in a `data` envelope
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListResponse {
    Bare(Vec<Value>),
    Wrapped { data: Vec<Value> },
}

impl ListResponse {
    fn into_records(self) -> Vec<RemoteFlowRecord> {
        match self {
            ListResponse::Bare(items) | ListResponse::Wrapped { data: items } => items
                .into_iter()
                .map(RemoteFlowRecord::from_value)
                .collect(),
        }
    }
}

/// Read a listing body. Each element is converted on its own, so a mistyped
/// record turns into an empty one instead of failing the whole list.
pub fn parse_listing(body: Value) -> Result<Vec<RemoteFlowRecord>, FlowError> {
    let response: ListResponse = serde_json::from_value(body)
        .map_err(|_| FlowError::remote("listing is neither an array nor a data envelope"))?;
    Ok(response.into_records())
}

/// HTTP client for the persistence service
#[derive(Clone)]
pub struct HttpFlowRemote {
    client: Client,
    config: SyncConfig,
}

impl HttpFlowRemote {
    pub fn new(config: SyncConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.api_token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }
}

#[async_trait]
impl FlowRemote for HttpFlowRemote {
    async fn list(&self) -> Result<Vec<RemoteFlowRecord>, FlowError> {
        let url = self.config.list_url()?;
        log::debug!("GET {}", url);

        let resp = self
            .authorize(self.client.get(url).header("Accept", "application/json"))
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(FlowError::remote(format!(
                "list failed with {}: {}",
                status, text
            )));
        }

        let body: Value = resp.json().await?;
        parse_listing(body)
    }

    async fn save(&self, record: &RemoteFlowRecord) -> Result<(), FlowError> {
        let url = self.config.save_url()?;
        log::debug!("POST {} id={:?}", url, record.id);

        let resp = self
            .authorize(self.client.post(url).json(record))
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(FlowError::remote(format!(
                "save failed with {}: {}",
                status, text
            )));
        }
        Ok(())
    }
}
