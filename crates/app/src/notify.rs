//! User-facing notifications ("toasts").

use std::{
    fmt,
    sync::{Mutex, PoisonError},
};

use tracing::debug;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    /// Confirmation of a completed action
    Success,

    /// A failed action
    Error,
}

impl fmt::Display for ToastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("success"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// A single notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Severity
    pub kind: ToastKind,

    /// Text shown to the user
    pub message: String,
}

/// Sink for user-facing notifications.
pub trait Notifier: Send + Sync {
    /// Shows a notification.
    fn notify(&self, toast: Toast);

    /// Shows a success notification.
    fn success(&self, message: &str) {
        self.notify(Toast {
            kind: ToastKind::Success,
            message: message.to_owned(),
        });
    }

    /// Shows an error notification.
    fn error(&self, message: &str) {
        self.notify(Toast {
            kind: ToastKind::Error,
            message: message.to_owned(),
        });
    }
}

/// Buffers notifications until they are drained. Each one is also logged at
/// debug level.
#[derive(Debug, Default)]
pub struct Toasts {
    pending: Mutex<Vec<Toast>>,
}

impl Toasts {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes every buffered notification, oldest first.
    pub fn drain(&self) -> Vec<Toast> {
        std::mem::take(&mut *self.pending.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Notifier for Toasts {
    fn notify(&self, toast: Toast) {
        debug!(kind = %toast.kind, message = %toast.message, "toast");

        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(toast);
    }
}
