//! Toast notification channel
//!
//! One slot. A new toast replaces whatever is showing and restarts the
//! clock; nothing is queued.

use std::time::{Duration, Instant};

use serde::Serialize;

pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub raised_at: Instant,
}

#[derive(Debug, Clone)]
pub struct Toaster {
    current: Option<Toast>,
    duration: Duration,
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION)
    }
}

impl Toaster {
    pub fn new(duration: Duration) -> Self {
        Self {
            current: None,
            duration,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.show_at(message, ToastKind::Success, Instant::now());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.show_at(message, ToastKind::Error, Instant::now());
    }

    pub fn show_at(&mut self, message: impl Into<String>, kind: ToastKind, now: Instant) {
        let message = message.into();
        match kind {
            ToastKind::Success => tracing::info!(%message, "toast"),
            ToastKind::Error => tracing::warn!(%message, "toast"),
        }
        self.current = Some(Toast {
            message,
            kind,
            raised_at: now,
        });
    }

    /// The toast still visible at `now`, if any
    pub fn visible_at(&self, now: Instant) -> Option<&Toast> {
        self.current
            .as_ref()
            .filter(|t| now.saturating_duration_since(t.raised_at) < self.duration)
    }

    pub fn visible(&self) -> Option<&Toast> {
        self.visible_at(Instant::now())
    }

    /// Most recent toast regardless of expiry
    pub fn last(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    /// Hand the most recent toast to the caller and clear the slot
    pub fn take(&mut self) -> Option<Toast> {
        self.current.take()
    }
}
