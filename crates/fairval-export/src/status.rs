//! Single-slot status channel.
//!
//! Models the user-facing notification slot: exactly one notice is visible
//! at a time, each kind has its own auto-dismiss delay (loading is sticky),
//! and showing a new notice replaces the slot, which also cancels the
//! previous notice's pending dismissal.

use parking_lot::Mutex;
use std::time::{Duration, Instant};

/// Notification kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Work in progress; sticky until replaced.
    Loading,
    /// Terminal success.
    Success,
    /// Terminal failure.
    Error,
    /// Terminal partial success.
    Warning,
    /// Informational notice.
    Info,
}

impl StatusKind {
    /// Auto-dismiss delay for this kind; `None` is sticky.
    #[must_use]
    pub fn auto_dismiss(&self) -> Option<Duration> {
        match self {
            StatusKind::Loading => None,
            StatusKind::Success => Some(Duration::from_secs(3)),
            StatusKind::Info => Some(Duration::from_secs(4)),
            StatusKind::Warning => Some(Duration::from_secs(5)),
            StatusKind::Error => Some(Duration::from_secs(6)),
        }
    }
}

/// A visible notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEvent {
    /// Notification kind.
    pub kind: StatusKind,
    /// Human-readable message.
    pub message: String,
}

struct ActiveNotice {
    event: StatusEvent,
    expires_at: Option<Instant>,
}

/// The single-slot channel.
#[derive(Default)]
pub struct StatusChannel {
    slot: Mutex<Option<ActiveNotice>>,
}

impl StatusChannel {
    /// Creates an empty channel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows a notice with its kind's default auto-dismiss delay.
    pub fn show(&self, kind: StatusKind, message: impl Into<String>) {
        self.show_with_dismiss(kind, message, kind.auto_dismiss());
    }

    /// Shows a notice with an explicit dismiss delay (`None` is sticky).
    ///
    /// Replacing the slot drops the previous notice along with its pending
    /// dismissal.
    pub fn show_with_dismiss(
        &self,
        kind: StatusKind,
        message: impl Into<String>,
        dismiss_after: Option<Duration>,
    ) {
        let event = StatusEvent {
            kind,
            message: message.into(),
        };
        tracing::debug!(kind = ?event.kind, message = %event.message, "status");
        *self.slot.lock() = Some(ActiveNotice {
            event,
            expires_at: dismiss_after.map(|d| Instant::now() + d),
        });
    }

    /// The currently visible notice, if it has not auto-dismissed.
    #[must_use]
    pub fn current(&self) -> Option<StatusEvent> {
        let mut slot = self.slot.lock();
        if let Some(active) = slot.as_ref() {
            if active.expires_at.is_some_and(|at| Instant::now() >= at) {
                *slot = None;
            }
        }
        slot.as_ref().map(|a| a.event.clone())
    }

    /// Clears the slot.
    pub fn clear(&self) {
        *self.slot.lock() = None;
    }
}
