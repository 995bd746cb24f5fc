// SPDX-License-Identifier: MIT

//! Workflow document and collection types
//!
//! A [`WorkflowDocument`] is keyed by its `id` inside a [`Collection`]. Node content
//! is opaque to this crate and kept as raw JSON values; unknown keys at the top level
//! and inside `meta` are carried through untouched so nothing is lost on a round trip.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// All flows known to the session, keyed by flow id
pub type Collection = BTreeMap<String, Arc<FlowEntry>>;

/// Display attributes of a flow
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct FlowMeta {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(
        rename = "avatarBackground",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub avatar_background: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl FlowMeta {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// A graph-structured task definition
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct WorkflowDocument {
    /// Unique, immutable identity
    pub id: String,
    #[serde(default)]
    pub meta: FlowMeta,
    /// Node id -> node content
    #[serde(default)]
    pub nodes: BTreeMap<String, Value>,
    /// Derived run output; never persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl WorkflowDocument {
    pub fn new(id: impl Into<String>, meta: FlowMeta, nodes: BTreeMap<String, Value>) -> Self {
        Self {
            id: id.into(),
            meta,
            nodes,
            output: None,
            extra: BTreeMap::new(),
        }
    }

    /// Minimal stand-in used while a remote flow is first registered
    pub fn placeholder(id: impl Into<String>, meta: FlowMeta) -> Self {
        Self::new(id, meta, BTreeMap::new())
    }

    /// The "nothing open" sentinel returned by selectors
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty_sentinel(&self) -> bool {
        self.id.is_empty()
    }
}

/// Per-flow flags visible to the UI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlowUiState {
    pub import_modal_open: bool,
}

/// Partial update for [`FlowUiState`]; `None` fields are left as they are
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlowUiStatePatch {
    pub import_modal_open: Option<bool>,
}

impl FlowUiStatePatch {
    pub fn import_modal(open: bool) -> Self {
        Self {
            import_modal_open: Some(open),
        }
    }

    pub fn apply_to(&self, state: &FlowUiState) -> FlowUiState {
        FlowUiState {
            import_modal_open: self.import_modal_open.unwrap_or(state.import_modal_open),
        }
    }
}

/// A flow together with its UI flags
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowEntry {
    pub flow: WorkflowDocument,
    pub ui_state: FlowUiState,
}

impl FlowEntry {
    pub fn new(flow: WorkflowDocument) -> Self {
        Self {
            flow,
            ui_state: FlowUiState::default(),
        }
    }
}
