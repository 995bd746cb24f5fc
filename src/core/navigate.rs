// SPDX-License-Identifier: MIT

//! Navigation capability
//!
//! Store helpers move the user to or from a flow's view after creating or deleting
//! it. Calls are fire-and-forget.

use std::sync::Mutex;

/// Path of the flow list view
pub const FLOW_LIST_PATH: &str = "/flow";

/// Path of a single flow's view
pub fn flow_path(id: &str) -> String {
    format!("{}/{}", FLOW_LIST_PATH, id)
}

/// Extract the flow id from a `/flow/<id>` path
pub fn flow_id_from_path(path: &str) -> Option<&str> {
    path.strip_prefix(FLOW_LIST_PATH)?
        .strip_prefix('/')
        .filter(|id| !id.is_empty() && !id.contains('/'))
}

pub trait Navigator: Send + Sync {
    fn go_to(&self, path: &str);
}

/// Navigator that logs each move and remembers where the user is
#[derive(Debug, Default)]
pub struct LogNavigator {
    current: Mutex<Option<String>>,
}

impl LogNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last path navigated to
    pub fn current_path(&self) -> Option<String> {
        self.current.lock().ok().and_then(|p| p.clone())
    }

    /// The id of the flow currently open, if the user is on a flow view
    pub fn active_flow_id(&self) -> Option<String> {
        self.current_path()
            .as_deref()
            .and_then(flow_id_from_path)
            .map(str::to_string)
    }
}

impl Navigator for LogNavigator {
    fn go_to(&self, path: &str) {
        log::debug!("Navigating to {}", path);
        if let Ok(mut current) = self.current.lock() {
            *current = Some(path.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_path_round_trip() {
        let path = flow_path("abc");
        assert_eq!(path, "/flow/abc");
        assert_eq!(flow_id_from_path(&path), Some("abc"));
    }

    #[test]
    fn test_flow_id_from_other_paths() {
        assert_eq!(flow_id_from_path("/flow"), None);
        assert_eq!(flow_id_from_path("/flow/"), None);
        assert_eq!(flow_id_from_path("/chat/abc"), None);
        assert_eq!(flow_id_from_path("/flow/a/b"), None);
    }

    #[test]
    fn test_log_navigator_tracks_active_flow() {
        let nav = LogNavigator::new();
        assert!(nav.active_flow_id().is_none());

        nav.go_to("/flow/x");
        assert_eq!(nav.active_flow_id(), Some("x".to_string()));

        nav.go_to(FLOW_LIST_PATH);
        assert_eq!(nav.current_path(), Some("/flow".to_string()));
        assert!(nav.active_flow_id().is_none());
    }
}
