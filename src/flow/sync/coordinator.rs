// SPDX-License-Identifier: MIT

//! Pull-merge and push against the persistence service
//!
//! Remote results enter the store through the same `dispatch` path as local edits.
//! Each merged record is committed on its own, so a bad record or a failure later
//! in the batch never rolls back what was already applied.

use std::sync::Arc;

use crate::core::error::FlowError;
use crate::core::notify::Notifier;
use crate::flow::codec;
use crate::flow::state::{Action, FlowStore};
use crate::flow::sync::remote::{FlowRemote, RemoteFlowRecord};
use crate::flow::types::WorkflowDocument;

pub const MSG_SYNCING: &str = "正在同步...";
pub const MSG_SYNC_FAILED: &str = "同步失败";
pub const MSG_SAVING: &str = "正在保存...";
pub const MSG_SAVE_FAILED: &str = "保存失败";
pub const MSG_SAVED: &str = "保存成功";

/// What happened to a single remote record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The id was new and has been added
    Added,
    /// An existing flow was replaced
    Updated,
    /// The record was missing data or could not be decoded
    Skipped,
}

/// Summary of one pull-merge batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PullReport {
    pub added: usize,
    pub updated: usize,
    pub skipped: usize,
}

impl PullReport {
    fn record(&mut self, outcome: MergeOutcome) {
        match outcome {
            MergeOutcome::Added => self.added += 1,
            MergeOutcome::Updated => self.updated += 1,
            MergeOutcome::Skipped => self.skipped += 1,
        }
    }

    pub fn merged(&self) -> usize {
        self.added + self.updated
    }
}

pub struct SyncCoordinator {
    remote: Arc<dyn FlowRemote>,
    notifier: Arc<dyn Notifier>,
}

impl SyncCoordinator {
    pub fn new(remote: Arc<dyn FlowRemote>, notifier: Arc<dyn Notifier>) -> Self {
        Self { remote, notifier }
    }

    /// Fetch every remote flow and fold it into the store, in listing order
    pub async fn pull_merge(&self, store: &mut FlowStore) -> Result<PullReport, FlowError> {
        let _loading = self.notifier.show_loading(MSG_SYNCING);

        let records = match self.remote.list().await {
            Ok(records) => records,
            Err(e) => {
                log::error!("Failed to list remote flows: {}", e);
                self.notifier.show_error(MSG_SYNC_FAILED);
                return Err(e);
            }
        };

        let report = self.merge_records(store, records);
        log::info!(
            "Pulled {} flows: {} added, {} updated, {} skipped",
            report.merged(),
            report.added,
            report.updated,
            report.skipped
        );
        Ok(report)
    }

    /// Merge already-fetched records into the store
    pub fn merge_records(
        &self,
        store: &mut FlowStore,
        records: impl IntoIterator<Item = RemoteFlowRecord>,
    ) -> PullReport {
        let mut report = PullReport::default();
        for record in records {
            report.record(self.merge_record(store, record));
        }
        report
    }

    fn merge_record(&self, store: &mut FlowStore, record: RemoteFlowRecord) -> MergeOutcome {
        let (id, text) = match (record.id, record.workflow) {
            (Some(id), Some(text)) if !id.trim().is_empty() => (id, text),
            (id, _) => {
                log::warn!("Skipping incomplete remote record {:?}", id);
                return MergeOutcome::Skipped;
            }
        };

        let mut flow = match codec::decode(&text) {
            Ok(flow) => flow,
            Err(e) => {
                log::warn!("Skipping remote flow {}: {}", id, e);
                self.notifier
                    .show_error(&format!("无法解析任务流 {}", id));
                return MergeOutcome::Skipped;
            }
        };

        if flow.id != id {
            log::warn!(
                "Remote flow {} carries id {}; keeping the record id",
                id,
                flow.id
            );
            flow.id = id.clone();
        }

        let outcome = if store.contains(&id) {
            MergeOutcome::Updated
        } else {
            store.dispatch(Action::AddFlow {
                flow: WorkflowDocument::placeholder(id.clone(), flow.meta.clone()),
            });
            MergeOutcome::Added
        };
        store.dispatch(Action::UpdateFlow { id, flow });
        outcome
    }

    /// Save the active flow, overwriting the remote copy.
    ///
    /// Returns the saved id, or `None` when no flow is open. The store is only read.
    pub async fn push(
        &self,
        store: &FlowStore,
        active_id: Option<&str>,
    ) -> Result<Option<String>, FlowError> {
        let flow = store.current_flow(active_id);
        if flow.is_empty_sentinel() {
            log::warn!("No open flow to save (active id {:?})", active_id);
            return Ok(None);
        }

        let loading = self.notifier.show_loading(MSG_SAVING);

        let result = match codec::encode(flow) {
            Ok(workflow) => {
                let record = RemoteFlowRecord::new(flow.id.clone(), workflow);
                self.remote.save(&record).await
            }
            Err(e) => Err(e),
        };
        loading.dismiss();

        match result {
            Ok(()) => {
                log::info!("Saved flow {}", flow.id);
                self.notifier.show_success(MSG_SAVED);
                Ok(Some(flow.id.clone()))
            }
            Err(e) => {
                log::error!("Failed to save flow {}: {}", flow.id, e);
                self.notifier.show_error(MSG_SAVE_FAILED);
                Err(e)
            }
        }
    }
}
