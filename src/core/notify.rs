// SPDX-License-Identifier: MIT

//! User-facing notifications
//!
//! Long-running sync operations bracket themselves with [`Notifier::show_loading`].
//! The returned [`LoadingHandle`] dismisses the notice when dropped, so both the
//! success and the failure path release it.

/// Trait for surfaces that can show transient progress and error messages.
pub trait Notifier: Send + Sync {
    /// Show a loading notice until the returned handle is dismissed or dropped
    fn show_loading(&self, message: &str) -> LoadingHandle;

    /// Show an error message
    fn show_error(&self, message: &str);

    /// Show a success message
    fn show_success(&self, message: &str);
}

/// Scoped handle for an open loading notice
#[must_use = "dropping the handle dismisses the loading notice immediately"]
pub struct LoadingHandle {
    on_dismiss: Option<Box<dyn FnOnce() + Send>>,
}

impl LoadingHandle {
    pub fn new(on_dismiss: impl FnOnce() + Send + 'static) -> Self {
        Self {
            on_dismiss: Some(Box::new(on_dismiss)),
        }
    }

    /// Dismiss the notice now
    pub fn dismiss(mut self) {
        self.run();
    }

    fn run(&mut self) {
        if let Some(f) = self.on_dismiss.take() {
            f();
        }
    }
}

impl Drop for LoadingHandle {
    fn drop(&mut self) {
        self.run();
    }
}

/// Notifier that writes through the `log` facade
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn show_loading(&self, message: &str) -> LoadingHandle {
        log::info!("{}", message);
        let message = message.to_string();
        LoadingHandle::new(move || log::debug!("done: {}", message))
    }

    fn show_error(&self, message: &str) {
        log::error!("{}", message);
    }

    fn show_success(&self, message: &str) {
        log::info!("{}", message);
    }
}
