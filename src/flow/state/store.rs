// SPDX-License-Identifier: MIT

//! Owned flow store
//!
//! [`FlowStore::dispatch`] is the only way the collection changes. Each call runs the
//! reducer and commits the result before returning, so readers holding a
//! [`FlowStore::snapshot`] never see a half-applied transition.

use once_cell::sync::Lazy;
use std::sync::Arc;
use uuid::Uuid;

use super::reducer::{reduce, Action};
use crate::core::error::FlowError;
use crate::core::navigate::{flow_path, Navigator, FLOW_LIST_PATH};
use crate::flow::agent::ChatAgent;
use crate::flow::codec;
use crate::flow::template;
use crate::flow::types::{Collection, FlowEntry, FlowUiStatePatch, WorkflowDocument};

static EMPTY_FLOW: Lazy<WorkflowDocument> = Lazy::new(WorkflowDocument::empty);

pub struct FlowStore {
    flows: Arc<Collection>,
    navigator: Arc<dyn Navigator>,
}

impl FlowStore {
    pub fn new(navigator: Arc<dyn Navigator>) -> Self {
        Self {
            flows: Arc::new(Collection::new()),
            navigator,
        }
    }

    /// Apply an action and commit the result
    pub fn dispatch(&mut self, action: Action) {
        log::debug!("dispatchFlow/{} {}", action.name(), action.target());
        self.flows = Arc::new(reduce(&self.flows, action));
    }

    /// The committed collection; later dispatches do not affect it
    pub fn snapshot(&self) -> Arc<Collection> {
        Arc::clone(&self.flows)
    }

    pub fn flows(&self) -> &Collection {
        &self.flows
    }

    pub fn get(&self, id: &str) -> Option<&FlowEntry> {
        self.flows.get(id).map(|entry| entry.as_ref())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.flows.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    /// The flow currently open, or the empty sentinel when there is none
    pub fn current_flow(&self, active_id: Option<&str>) -> &WorkflowDocument {
        active_id
            .and_then(|id| self.flows.get(id))
            .map(|entry| &entry.flow)
            .unwrap_or(&*EMPTY_FLOW)
    }

    /// Create a blank flow, open it and return its id
    pub fn create_flow(&mut self) -> String {
        let flow_id = Uuid::new_v4().to_string();
        let node_id = Uuid::new_v4().to_string();

        self.dispatch(Action::AddFlow {
            flow: template::default_flow(&flow_id, &node_id),
        });
        log::info!("Created flow {}", flow_id);

        self.navigator.go_to(&flow_path(&flow_id));
        flow_id
    }

    /// Create a flow seeded from a chat agent, open it and return its id
    pub fn create_flow_from_agent(&mut self, agent: &ChatAgent) -> String {
        let flow_id = Uuid::new_v4().to_string();

        self.dispatch(Action::AddFlow {
            flow: template::flow_from_agent(&flow_id, agent),
        });
        log::info!("Created flow {} from agent '{}'", flow_id, agent.title);

        self.navigator.go_to(&flow_path(&flow_id));
        flow_id
    }

    pub fn remove_flow(&mut self, id: &str) {
        self.dispatch(Action::DeleteFlow { id: id.to_string() });
        self.navigator.go_to(FLOW_LIST_PATH);
    }

    pub fn open_import_modal(&mut self, id: &str) {
        self.dispatch(Action::UpdateFlowState {
            id: id.to_string(),
            state: FlowUiStatePatch::import_modal(true),
        });
    }

    pub fn close_import_modal(&mut self, id: &str) {
        self.dispatch(Action::UpdateFlowState {
            id: id.to_string(),
            state: FlowUiStatePatch::import_modal(false),
        });
    }

    /// Replace flow `id` with the document decoded from `text`.
    ///
    /// Malformed text leaves the store untouched. An unknown id is a no-op.
    pub fn import_flow(&mut self, id: &str, text: &str) -> Result<(), FlowError> {
        let flow = codec::decode(text)?;
        if !self.contains(id) {
            log::debug!("Ignoring import into unknown flow {}", id);
            return Ok(());
        }
        self.dispatch(Action::UpdateFlow {
            id: id.to_string(),
            flow,
        });
        Ok(())
    }
}
