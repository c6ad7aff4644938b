use std::time::Duration;

use crate::{FieldIndex, NotificationId, RemoteSearchQuery, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Arm `timer` after `delay`, replacing whatever occupies its slot.
    ScheduleTimer { timer: Timer, delay: Duration },
    CancelTimer { slot: TimerSlot },
    /// Full-page navigation to a rewritten URL.
    Navigate { url: String },
    Reload,
    SendDelete { request_id: RequestId, url: String },
    SendBulkDelete {
        request_id: RequestId,
        url: String,
        ids: Vec<String>,
    },
    RemoteSearch {
        request_id: RequestId,
        field: FieldIndex,
        url: String,
        query: RemoteSearchQuery,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timer {
    SearchDebounce { generation: u64 },
    Reload,
    DismissNotification(NotificationId),
}

impl Timer {
    pub fn slot(self) -> TimerSlot {
        match self {
            Timer::SearchDebounce { .. } => TimerSlot::SearchDebounce,
            Timer::Reload => TimerSlot::Reload,
            Timer::DismissNotification(id) => TimerSlot::Notification(id),
        }
    }
}

/// At most one timer is armed per slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerSlot {
    SearchDebounce,
    Reload,
    Notification(NotificationId),
}
