// SPDX-License-Identifier: MIT

//! Pure state transitions over the flow collection

use std::sync::Arc;

use crate::flow::types::{Collection, FlowEntry, FlowUiStatePatch, WorkflowDocument};

/// Mutation requests understood by [`reduce`]
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Insert a flow under its id, replacing any existing entry
    AddFlow { flow: WorkflowDocument },
    /// Remove a flow
    DeleteFlow { id: String },
    /// Replace the document of an existing flow, keeping its UI flags
    UpdateFlow { id: String, flow: WorkflowDocument },
    /// Shallow-merge UI flags of an existing flow
    UpdateFlowState { id: String, state: FlowUiStatePatch },
}

impl Action {
    /// Short name used in dispatch logs
    pub fn name(&self) -> &'static str {
        match self {
            Action::AddFlow { .. } => "addFlow",
            Action::DeleteFlow { .. } => "deleteFlow",
            Action::UpdateFlow { .. } => "updateFlow",
            Action::UpdateFlowState { .. } => "updateFlowState",
        }
    }

    /// The flow id the action addresses
    pub fn target(&self) -> &str {
        match self {
            Action::AddFlow { flow } => &flow.id,
            Action::DeleteFlow { id }
            | Action::UpdateFlow { id, .. }
            | Action::UpdateFlowState { id, .. } => id,
        }
    }
}

/// Compute the next collection. The input is never modified; untouched entries are
/// shared with it.
pub fn reduce(flows: &Collection, action: Action) -> Collection {
    let mut next = flows.clone();
    match action {
        Action::AddFlow { flow } => {
            next.insert(flow.id.clone(), Arc::new(FlowEntry::new(flow)));
        }
        Action::DeleteFlow { id } => {
            next.remove(&id);
        }
        Action::UpdateFlow { id, mut flow } => {
            if let Some(entry) = next.get_mut(&id) {
                // Identity is pinned to the key
                flow.id = id;
                *entry = Arc::new(FlowEntry {
                    flow,
                    ui_state: entry.ui_state,
                });
            }
        }
        Action::UpdateFlowState { id, state } => {
            if let Some(entry) = next.get_mut(&id) {
                *entry = Arc::new(FlowEntry {
                    flow: entry.flow.clone(),
                    ui_state: state.apply_to(&entry.ui_state),
                });
            }
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::types::{FlowMeta, FlowUiState};
    use serde_json::json;
    use std::collections::BTreeMap;

    fn flow(id: &str, title: &str) -> WorkflowDocument {
        WorkflowDocument::new(id, FlowMeta::titled(title), BTreeMap::new())
    }

    fn with(flows: &[WorkflowDocument]) -> Collection {
        flows.iter().fold(Collection::new(), |acc, f| {
            reduce(&acc, Action::AddFlow { flow: f.clone() })
        })
    }

    #[test]
    fn test_add_to_empty() {
        let next = reduce(&Collection::new(), Action::AddFlow { flow: flow("x", "X") });
        assert_eq!(next.len(), 1);
        assert_eq!(next["x"].flow, flow("x", "X"));
        assert_eq!(next["x"].ui_state, FlowUiState::default());
    }

    #[test]
    fn test_add_twice_is_idempotent() {
        let once = reduce(&Collection::new(), Action::AddFlow { flow: flow("x", "X") });
        let twice = reduce(&once, Action::AddFlow { flow: flow("x", "X") });
        assert_eq!(once, twice);
    }

    #[test]
    fn test_add_overwrites_existing() {
        let flows = with(&[flow("x", "old")]);
        let next = reduce(&flows, Action::AddFlow { flow: flow("x", "new") });
        assert_eq!(next.len(), 1);
        assert_eq!(next["x"].flow.meta.title, "new");
    }

    #[test]
    fn test_delete() {
        let flows = with(&[flow("x", "X"), flow("y", "Y")]);
        let next = reduce(&flows, Action::DeleteFlow { id: "x".into() });
        assert!(!next.contains_key("x"));
        assert!(next.contains_key("y"));
    }

    #[test]
    fn test_absent_id_is_noop() {
        let flows = with(&[flow("x", "X")]);

        let actions = vec![
            Action::DeleteFlow { id: "nope".into() },
            Action::UpdateFlow {
                id: "nope".into(),
                flow: flow("nope", "N"),
            },
            Action::UpdateFlowState {
                id: "nope".into(),
                state: FlowUiStatePatch::import_modal(true),
            },
        ];
        for action in actions {
            assert_eq!(reduce(&flows, action), flows);
        }
    }

    #[test]
    fn test_update_keeps_ui_state() {
        let flows = with(&[flow("x", "X")]);
        let flows = reduce(
            &flows,
            Action::UpdateFlowState {
                id: "x".into(),
                state: FlowUiStatePatch::import_modal(true),
            },
        );

        let mut updated = flow("x", "X2");
        updated.nodes.insert("n".into(), json!({"id": "n"}));
        let next = reduce(
            &flows,
            Action::UpdateFlow {
                id: "x".into(),
                flow: updated.clone(),
            },
        );

        assert_eq!(next["x"].flow, updated);
        assert!(next["x"].ui_state.import_modal_open);
    }

    #[test]
    fn test_update_pins_id_to_key() {
        let flows = with(&[flow("x", "X")]);
        let next = reduce(
            &flows,
            Action::UpdateFlow {
                id: "x".into(),
                flow: flow("other", "X2"),
            },
        );
        assert_eq!(next.len(), 1);
        assert_eq!(next["x"].flow.id, "x");
        assert_eq!(next["x"].flow.meta.title, "X2");
    }

    #[test]
    fn test_update_state_leaves_document() {
        let flows = with(&[flow("x", "X")]);
        let next = reduce(
            &flows,
            Action::UpdateFlowState {
                id: "x".into(),
                state: FlowUiStatePatch::import_modal(true),
            },
        );
        assert_eq!(next["x"].flow, flows["x"].flow);
        assert!(next["x"].ui_state.import_modal_open);

        let next = reduce(
            &next,
            Action::UpdateFlowState {
                id: "x".into(),
                state: FlowUiStatePatch::default(),
            },
        );
        assert!(next["x"].ui_state.import_modal_open);
    }

    #[test]
    fn test_previous_snapshot_untouched() {
        let before = with(&[flow("x", "X"), flow("y", "Y")]);
        let copy = before.clone();
        let after = reduce(
            &before,
            Action::UpdateFlow {
                id: "x".into(),
                flow: flow("x", "changed"),
            },
        );

        assert_eq!(before, copy);
        assert_ne!(before, after);
        // Untouched entries are shared, not copied
        assert!(Arc::ptr_eq(&before["y"], &after["y"]));
    }

    #[test]
    fn test_action_names() {
        assert_eq!(Action::DeleteFlow { id: "a".into() }.name(), "deleteFlow");
        assert_eq!(Action::AddFlow { flow: flow("a", "A") }.target(), "a");
    }
}
