use std::time::Duration;

use crate::common::config::DEFAULT_NOTIFICATION_TIMEOUT_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// Single dismissible banner. There is no queue: a new message replaces the visible one.
///
/// Each hidden→visible transition starts a new generation; the auto-hide timer
/// armed for a showing carries its generation so a late timer cannot hide a
/// later showing.
#[derive(Debug, Clone)]
pub struct Notification {
    visible: bool,
    severity: Severity,
    message: String,
    generation: u64,
    auto_hide: Duration,
}

impl Default for Notification {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_NOTIFICATION_TIMEOUT_MS))
    }
}

impl Notification {
    pub fn new(auto_hide: Duration) -> Self {
        Self {
            visible: false,
            severity: Severity::Success,
            message: String::new(),
            generation: 0,
            auto_hide,
        }
    }

    /// Show `message`. Returns the generation to arm a hide timer for, or `None`
    /// when the banner was already visible and its running timer still applies.
    pub fn show(&mut self, severity: Severity, message: impl Into<String>) -> Option<u64> {
        self.severity = severity;
        self.message = message.into();
        if self.visible {
            return None;
        }
        self.visible = true;
        self.generation += 1;
        Some(self.generation)
    }

    pub fn dismiss(&mut self) {
        self.visible = false;
    }

    /// Hide the banner if `generation` is the current showing. Returns whether it was hidden.
    pub fn expire(&mut self, generation: u64) -> bool {
        if self.visible && generation == self.generation {
            self.visible = false;
            true
        } else {
            false
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn auto_hide(&self) -> Duration {
        self.auto_hide
    }
}

/// Resolves with `generation` once `after` has elapsed.
pub async fn hide_after(after: Duration, generation: u64) -> u64 {
    tokio::time::sleep(after).await;
    generation
}
