use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use admin_core::{FieldIndex, RemoteSearchQuery, RequestId, Timer, TimerSlot};
use admin_logging::{admin_info, admin_warn};

use crate::client::{AdminClient, ClientSettings, ReqwestClient};
use crate::timers::TimerTable;
use crate::types::into_outcome;
use crate::{EngineEvent, RequestFailure};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build http client: {0}")]
    Client(#[from] RequestFailure),
}

enum EngineCommand {
    Delete {
        request_id: RequestId,
        url: String,
    },
    BulkDelete {
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
    Schedule {
        timer: Timer,
        delay: Duration,
    },
    Cancel {
        slot: TimerSlot,
    },
}

/// Runs requests and timers on a background runtime; results come back as
/// [`EngineEvent`]s.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings) -> Result<Self, EngineError> {
        let client = ReqwestClient::new(settings)?;
        Self::with_client(Arc::new(client))
    }

    pub fn with_client(client: Arc<dyn AdminClient>) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let mut timers = TimerTable::default();
            while let Ok(command) = cmd_rx.recv() {
                timers.prune();
                match command {
                    EngineCommand::Schedule { timer, delay } => {
                        timers.schedule(runtime.handle(), timer, delay, event_tx.clone());
                    }
                    EngineCommand::Cancel { slot } => timers.cancel(slot),
                    request => {
                        let client = client.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            handle_request(client.as_ref(), request, event_tx).await;
                        });
                    }
                }
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn delete(&self, request_id: RequestId, url: impl Into<String>) {
        self.send(EngineCommand::Delete {
            request_id,
            url: url.into(),
        });
    }

    pub fn bulk_delete(&self, request_id: RequestId, url: impl Into<String>, ids: Vec<String>) {
        self.send(EngineCommand::BulkDelete {
            request_id,
            url: url.into(),
            ids,
        });
    }

    pub fn remote_search(
        &self,
        request_id: RequestId,
        field: FieldIndex,
        url: impl Into<String>,
        query: RemoteSearchQuery,
    ) {
        self.send(EngineCommand::RemoteSearch {
            request_id,
            field,
            url: url.into(),
            query,
        });
    }

    pub fn schedule(&self, timer: Timer, delay: Duration) {
        self.send(EngineCommand::Schedule { timer, delay });
    }

    pub fn cancel(&self, slot: TimerSlot) {
        self.send(EngineCommand::Cancel { slot });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            admin_warn!("Engine thread is gone; command dropped");
        }
    }
}

async fn handle_request(
    client: &dyn AdminClient,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::Delete { request_id, url } => {
            let result = client.delete(&url).await;
            log_failure("Delete", &url, &result);
            EngineEvent::MutationCompleted {
                request_id,
                outcome: into_outcome(result),
            }
        }
        EngineCommand::BulkDelete {
            request_id,
            url,
            ids,
        } => {
            let result = client.bulk_delete(&url, &ids).await;
            log_failure("Bulk delete", &url, &result);
            EngineEvent::MutationCompleted {
                request_id,
                outcome: into_outcome(result),
            }
        }
        EngineCommand::RemoteSearch {
            request_id,
            field,
            url,
            query,
        } => {
            let result = client.remote_search(&url, &query).await;
            log_failure("Lookup", &url, &result);
            EngineEvent::OptionsLoaded {
                request_id,
                field,
                result,
            }
        }
        EngineCommand::Schedule { .. } | EngineCommand::Cancel { .. } => return,
    };
    let _ = event_tx.send(event);
}

fn log_failure<T>(what: &str, url: &str, result: &Result<T, RequestFailure>) {
    match result {
        Ok(_) => admin_info!("{} {} answered", what, url),
        Err(failure) => admin_warn!("{} {} failed: {}", what, url, failure),
    }
}
