// SPDX-License-Identifier: MIT

//! Export of the open flow to a `<id>-workflow.yml` file

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::FlowError;
use crate::core::notify::Notifier;
use crate::flow::codec::{self, FLOW_FILE_EXTENSION};
use crate::flow::state::FlowStore;
use crate::flow::types::WorkflowDocument;

pub const MSG_EXPORTING: &str = "正在导出...";
pub const MSG_EXPORT_FAILED: &str = "导出失败";

/// File name of an exported flow
pub fn export_file_name(id: &str) -> String {
    format!("{}-workflow.{}", id, FLOW_FILE_EXTENSION)
}

/// Write the open flow into `dir`.
///
/// Returns the written path, or `None` when no flow is open.
pub fn export_workflow(
    store: &FlowStore,
    active_id: Option<&str>,
    dir: &Path,
    notifier: &dyn Notifier,
) -> Result<Option<PathBuf>, FlowError> {
    let flow = store.current_flow(active_id);
    if flow.is_empty_sentinel() {
        log::warn!("No open flow to export (active id {:?})", active_id);
        return Ok(None);
    }

    let _loading = notifier.show_loading(MSG_EXPORTING);
    match write_artifact(flow, dir) {
        Ok(path) => {
            log::info!("Exported flow {} to {}", flow.id, path.display());
            Ok(Some(path))
        }
        Err(e) => {
            log::error!("Failed to export flow {}: {}", flow.id, e);
            notifier.show_error(MSG_EXPORT_FAILED);
            Err(e)
        }
    }
}

fn write_artifact(flow: &WorkflowDocument, dir: &Path) -> Result<PathBuf, FlowError> {
    let text = codec::encode(flow)?;
    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(&flow.id));
    fs::write(&path, text)?;
    Ok(path)
}
