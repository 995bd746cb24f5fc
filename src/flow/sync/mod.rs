// SPDX-License-Identifier: MIT

//! Synchronization with the remote persistence service

mod coordinator;
pub mod remote;

pub use coordinator::{MergeOutcome, PullReport, SyncCoordinator};
pub use coordinator::{MSG_SAVED, MSG_SAVE_FAILED, MSG_SAVING, MSG_SYNCING, MSG_SYNC_FAILED};
pub use remote::{parse_listing, FlowRemote, HttpFlowRemote, RemoteFlowRecord};
