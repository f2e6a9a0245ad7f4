//! Host event plumbing.
//!
//! The host shell's inter-process messaging is reduced to three inbound
//! signals, delivered over an mpsc channel and fanned out to the module
//! registry by the controller.

use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

use vitrine_core::{HostWindow, LogLevel};

use crate::controller::Controller;

/// One inbound signal from the host shell, scoped to a window.
#[derive(Clone)]
pub enum HostEvent {
    /// A window was created.
    WindowCreated(Arc<dyn HostWindow>),
    /// A window is closing.
    WindowClosed(Arc<dyn HostWindow>),
    /// "Refresh the effect state for this window."
    RefreshRequested(Arc<dyn HostWindow>),
}

impl fmt::Debug for HostEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WindowCreated(w) => write!(f, "WindowCreated({})", w.id()),
            Self::WindowClosed(w) => write!(f, "WindowClosed({})", w.id()),
            Self::RefreshRequested(w) => write!(f, "RefreshRequested({})", w.id()),
        }
    }
}

impl Controller {
    /// Dispatch one host event.
    pub async fn handle_event(&self, event: HostEvent) {
        debug!(?event, "Host event");
        match event {
            HostEvent::WindowCreated(window) => self.emit_window_init(window.as_ref()).await,
            HostEvent::WindowClosed(window) => self.emit_window_close(window.as_ref()).await,
            HostEvent::RefreshRequested(window) => {
                self.log_to_window(window.as_ref(), LogLevel::Log, "IPC requested update")
                    .await;
                self.update_variables(window.as_ref()).await;
            }
        }
    }

    /// Drain host events until the channel closes.
    ///
    /// Events are handled one at a time; the refresh fan-out inside a
    /// single event still runs concurrently.
    pub async fn run_event_loop(&self, mut events: mpsc::Receiver<HostEvent>) {
        while let Some(event) = events.recv().await {
            self.handle_event(event).await;
        }
        debug!("Host event channel closed");
    }
}
