use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Failure,
}

/// What the visitor is shown once a submission settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Failure,
            message: message.into(),
        }
    }
}

pub trait Notifier: Send {
    fn notify(&mut self, notification: &Notification);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, notification: &Notification) {
        match notification.level {
            NotificationLevel::Success => tracing::info!(text = %notification.message, "notify"),
            NotificationLevel::Failure => tracing::warn!(text = %notification.message, "notify"),
        }
    }
}

/// Keeps every notification; clones share the same list.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    seen: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        match self.seen.lock() {
            Ok(seen) => seen.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn last(&self) -> Option<Notification> {
        self.notifications().pop()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, notification: &Notification) {
        let mut seen = match self.seen.lock() {
            Ok(seen) => seen,
            Err(poisoned) => poisoned.into_inner(),
        };
        seen.push(notification.clone());
    }
}
