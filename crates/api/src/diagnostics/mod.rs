// Path: crates/api/src/diagnostics/mod.rs
//! A non-blocking diagnostics channel.
//!
//! Generators and the field table report recoverable problems here instead of
//! returning errors. Every message is logged through `tracing`; when a
//! receiver is attached the message is also forwarded to it, and dropped if the
//! receiver has fallen behind. Reporting never blocks the caller.

use once_cell::sync::OnceCell;
use tokio::sync::mpsc;

/// Default capacity of the forwarding channel.
pub const DEFAULT_CAPACITY: usize = 64;

/// A handle for reporting diagnostics.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    tx: Option<mpsc::Sender<String>>,
}

static GLOBAL: OnceCell<Diagnostics> = OnceCell::new();

impl Diagnostics {
    /// Creates a handle that forwards to the returned receiver.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx: Some(tx) }, rx)
    }

    /// Creates a handle that only logs.
    pub fn log_only() -> Self {
        Self { tx: None }
    }

    /// Reports a message under `target`.
    pub fn report(&self, target: &str, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(target: "diagnostics", source = target, "{}", message);
        if let Some(tx) = &self.tx {
            if let Err(mpsc::error::TrySendError::Full(_)) = tx.try_send(message) {
                tracing::debug!(target: "diagnostics", "diagnostics receiver is full, message dropped");
            }
        }
    }

    /// Installs `self` as the process-wide handle. Only the first call wins.
    pub fn install_global(self) -> bool {
        GLOBAL.set(self).is_ok()
    }
}

/// Reports through the process-wide handle, or only logs if none is installed.
pub fn report(target: &str, message: impl Into<String>) {
    match GLOBAL.get() {
        Some(d) => d.report(target, message),
        None => Diagnostics::log_only().report(target, message),
    }
}
