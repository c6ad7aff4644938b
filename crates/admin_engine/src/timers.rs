use std::collections::HashMap;
use std::sync::mpsc;
use std::time::Duration;

use admin_core::{Timer, TimerSlot};
use tokio::runtime::Handle;
use tokio::task::AbortHandle;

use crate::EngineEvent;

/// Armed timers, one per slot. Arming an occupied slot aborts the timer
/// already in it.
#[derive(Default)]
pub(crate) struct TimerTable {
    armed: HashMap<TimerSlot, AbortHandle>,
}

impl TimerTable {
    pub(crate) fn schedule(
        &mut self,
        runtime: &Handle,
        timer: Timer,
        delay: Duration,
        event_tx: mpsc::Sender<EngineEvent>,
    ) {
        let task = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = event_tx.send(EngineEvent::TimerFired(timer));
        });
        if let Some(previous) = self.armed.insert(timer.slot(), task.abort_handle()) {
            previous.abort();
        }
    }

    pub(crate) fn cancel(&mut self, slot: TimerSlot) {
        if let Some(handle) = self.armed.remove(&slot) {
            handle.abort();
        }
    }

    /// Drops handles of timers that already went off.
    pub(crate) fn prune(&mut self) {
        self.armed.retain(|_, handle| !handle.is_finished());
    }
}
