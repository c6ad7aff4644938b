use std::time::Duration;

use crate::{Effect, Timer};

pub type NotificationId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl Severity {
    /// Alert class the host styles the toast with.
    pub fn alert_class(self) -> &'static str {
        match self {
            Severity::Success => "alert-success",
            Severity::Error => "alert-danger",
            Severity::Warning => "alert-warning",
            Severity::Info => "alert-info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
}

/// On-screen toasts, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct NotificationCenter {
    next_id: NotificationId,
    active: Vec<Notification>,
}

impl NotificationCenter {
    /// Shows a toast and returns the timer effect that dismisses it.
    pub(crate) fn push(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        timeout: Duration,
    ) -> Effect {
        self.next_id += 1;
        let id = self.next_id;
        self.active.push(Notification {
            id,
            message: message.into(),
            severity,
        });
        Effect::ScheduleTimer {
            timer: Timer::DismissNotification(id),
            delay: timeout,
        }
    }

    pub(crate) fn dismiss(&mut self, id: NotificationId) -> bool {
        let before = self.active.len();
        self.active.retain(|n| n.id != id);
        self.active.len() != before
    }

    pub(crate) fn active(&self) -> &[Notification] {
        &self.active
    }
}
