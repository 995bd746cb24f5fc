// SPDX-License-Identifier: MIT

//! Seed documents for newly created flows

use crate::flow::agent::ChatAgent;
use crate::flow::types::{FlowMeta, WorkflowDocument};
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use std::collections::BTreeMap;

pub const DEFAULT_FLOW_TITLE: &str = "AI创新工坊";
pub const DEFAULT_NODE_TITLE: &str = "默认节点";
pub const TEXT_TASK_NODE_TYPE: &str = "aiTask";

static DEFAULT_TASK_CONTENT: Lazy<Value> = Lazy::new(|| {
    json!({
        "llm": {
            "model": crate::flow::agent::DEFAULT_AGENT_MODEL,
            "temperature": 0.6
        },
        "systemRole": "",
        "input": ""
    })
});

/// Build a text task node
pub fn text_task_node(id: &str, content: Value, meta: Value) -> Value {
    json!({
        "id": id,
        "type": TEXT_TASK_NODE_TYPE,
        "meta": meta,
        "data": content,
    })
}

/// A blank flow with one default AI task node
pub fn default_flow(flow_id: &str, node_id: &str) -> WorkflowDocument {
    let node = text_task_node(
        node_id,
        DEFAULT_TASK_CONTENT.clone(),
        json!({ "title": DEFAULT_NODE_TITLE }),
    );
    WorkflowDocument::new(
        flow_id,
        FlowMeta::titled(DEFAULT_FLOW_TITLE),
        BTreeMap::from([(node_id.to_string(), node)]),
    )
}

/// A flow seeded from a chat agent; the single node is keyed by the agent id
pub fn flow_from_agent(flow_id: &str, agent: &ChatAgent) -> WorkflowDocument {
    let meta = FlowMeta {
        title: format!("{}的任务流", agent.title),
        description: Some(format!(
            "基于 「{}」 创建的任务 \n {}",
            agent.title, agent.description
        )),
        avatar: agent.avatar.clone(),
        avatar_background: agent.avatar_background.clone(),
        extra: BTreeMap::new(),
    };

    let node = text_task_node(
        &agent.id,
        json!({
            "llm": { "model": agent.model_or_default() },
            "systemRole": agent.content,
        }),
        json!({
            "title": agent.title,
            "avatar": agent.avatar,
            "avatarBackground": agent.avatar_background,
            "description": agent.description,
        }),
    );

    WorkflowDocument::new(flow_id, meta, BTreeMap::from([(agent.id.clone(), node)]))
}
