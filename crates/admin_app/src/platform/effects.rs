use admin_core::{Effect, Msg};
use admin_engine::{EngineEvent, EngineHandle};
use admin_logging::{admin_info, admin_warn};

/// How the current page ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Navigate(String),
    Reload,
}

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    /// Hands requests and timers to the engine. Returns the page transition
    /// if one of the effects leaves the page.
    pub fn run(&self, effects: Vec<Effect>) -> Option<Transition> {
        let mut transition = None;
        for effect in effects {
            match effect {
                Effect::ScheduleTimer { timer, delay } => self.engine.schedule(timer, delay),
                Effect::CancelTimer { slot } => self.engine.cancel(slot),
                Effect::SendDelete { request_id, url } => {
                    admin_info!("SendDelete request_id={} url={}", request_id, url);
                    self.engine.delete(request_id, url);
                }
                Effect::SendBulkDelete {
                    request_id,
                    url,
                    ids,
                } => {
                    admin_info!(
                        "SendBulkDelete request_id={} url={} ids={}",
                        request_id,
                        url,
                        ids.len()
                    );
                    self.engine.bulk_delete(request_id, url, ids);
                }
                Effect::RemoteSearch {
                    request_id,
                    field,
                    url,
                    query,
                } => self.engine.remote_search(request_id, field, url, query),
                Effect::Navigate { url } => {
                    admin_info!("Navigate url={}", url);
                    transition = Some(Transition::Navigate(url));
                }
                Effect::Reload => {
                    admin_info!("Reload");
                    transition.get_or_insert(Transition::Reload);
                }
            }
        }
        transition
    }

    pub fn next_msg(&self, timeout: std::time::Duration) -> Option<Msg> {
        self.engine.recv_timeout(timeout).map(map_event)
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::MutationCompleted {
            request_id,
            outcome,
        } => Msg::MutationCompleted {
            request_id,
            outcome,
        },
        EngineEvent::OptionsLoaded {
            request_id,
            field,
            result: Ok(options),
        } => Msg::RemoteOptionsLoaded {
            request_id,
            field,
            options,
        },
        EngineEvent::OptionsLoaded {
            request_id,
            field,
            result: Err(failure),
        } => {
            admin_warn!("Lookup for field {} failed: {}", field + 1, failure);
            Msg::RemoteSearchFailed { request_id, field }
        }
        EngineEvent::TimerFired(timer) => Msg::TimerFired(timer),
    }
}
