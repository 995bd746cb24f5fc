// SPDX-License-Identifier: MIT

//! Flow codec - YAML encoding and decoding of workflow documents
//!
//! Encoding drops every map key named `output`, at any depth, before the text is
//! produced. Keys come out sorted, indented by two spaces.

use crate::core::error::FlowError;
use crate::flow::types::WorkflowDocument;
use serde_json::Value;

/// Field name removed at every nesting level on encode
pub const SUPPRESSED_FIELD: &str = "output";

/// File extension of exported flows
pub const FLOW_FILE_EXTENSION: &str = "yml";

/// Encode a flow into its YAML interchange form
pub fn encode(flow: &WorkflowDocument) -> Result<String, FlowError> {
    let mut value = serde_json::to_value(flow)?;
    strip_field(&mut value, SUPPRESSED_FIELD);
    Ok(serde_yaml::to_string(&value)?)
}

/// Decode a flow from YAML text
pub fn decode(text: &str) -> Result<WorkflowDocument, FlowError> {
    let flow: WorkflowDocument =
        serde_yaml::from_str(text).map_err(|e| FlowError::format(e.to_string()))?;
    if flow.id.trim().is_empty() {
        return Err(FlowError::format("workflow has an empty id"));
    }
    Ok(flow)
}

/// Remove `field` from every object in the tree
pub fn strip_field(value: &mut Value, field: &str) {
    match value {
        Value::Object(map) => {
            map.remove(field);
            for child in map.values_mut() {
                strip_field(child, field);
            }
        }
        Value::Array(items) => {
            for item in items {
                strip_field(item, field);
            }
        }
        _ => {}
    }
}
