use std::sync::{Arc, Mutex, Once};
use std::time::{Duration, Instant};

use admin_core::{
    DropdownOption, RemoteSearchQuery, RequestOutcome, ServerReply, Timer, TimerSlot,
};
use admin_engine::{AdminClient, EngineEvent, EngineHandle, FailureKind, RequestFailure};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(admin_logging::initialize_for_tests);
}

/// Answers deletes of `/ok` with success and everything else with a 500.
#[derive(Default)]
struct ScriptedClient {
    calls: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl AdminClient for ScriptedClient {
    async fn delete(&self, url: &str) -> Result<ServerReply, RequestFailure> {
        self.calls.lock().unwrap().push(format!("DELETE {url}"));
        if url.ends_with("/ok") {
            Ok(ServerReply::succeeded("Deleted"))
        } else {
            Err(RequestFailure {
                kind: FailureKind::HttpStatus(500),
                message: "500 Internal Server Error".to_string(),
                body: "boom".to_string(),
            })
        }
    }

    async fn bulk_delete(&self, url: &str, ids: &[String]) -> Result<ServerReply, RequestFailure> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("POST {url} {}", ids.join(",")));
        Ok(ServerReply::succeeded("Removed"))
    }

    async fn remote_search(
        &self,
        _url: &str,
        query: &RemoteSearchQuery,
    ) -> Result<Vec<DropdownOption>, RequestFailure> {
        Ok(vec![DropdownOption {
            id: "1".to_string(),
            text: query.term.to_uppercase(),
            selected: false,
        }])
    }
}

/// Waits until `count` events arrived or `within` elapsed.
fn collect(engine: &EngineHandle, count: usize, within: Duration) -> Vec<EngineEvent> {
    let deadline = Instant::now() + within;
    let mut events = Vec::new();
    while events.len() < count && Instant::now() < deadline {
        if let Some(event) = engine.recv_timeout(Duration::from_millis(50)) {
            events.push(event);
        }
    }
    events
}

#[test]
fn mutations_report_outcomes() {
    init_logging();
    let client = Arc::new(ScriptedClient::default());
    let engine = EngineHandle::with_client(client.clone()).expect("engine");

    engine.delete(1, "https://admin.test/ok");
    let events = collect(&engine, 1, Duration::from_secs(5));
    assert_eq!(
        events,
        vec![EngineEvent::MutationCompleted {
            request_id: 1,
            outcome: RequestOutcome::Replied(ServerReply::succeeded("Deleted")),
        }]
    );

    engine.delete(2, "https://admin.test/broken");
    let events = collect(&engine, 1, Duration::from_secs(5));
    assert_eq!(
        events,
        vec![EngineEvent::MutationCompleted {
            request_id: 2,
            outcome: RequestOutcome::Failed {
                status: Some(500),
                body: "boom".to_string(),
            },
        }]
    );

    engine.bulk_delete(3, "https://admin.test/bulk-delete", vec!["4".into(), "5".into()]);
    assert_eq!(collect(&engine, 1, Duration::from_secs(5)).len(), 1);
    assert_eq!(
        client.calls.lock().unwrap().last().map(String::as_str),
        Some("POST https://admin.test/bulk-delete 4,5")
    );
}

#[test]
fn lookups_report_options() {
    init_logging();
    let engine = EngineHandle::with_client(Arc::new(ScriptedClient::default())).expect("engine");
    engine.remote_search(
        9,
        2,
        "https://admin.test/lookup",
        RemoteSearchQuery {
            name: "owner".to_string(),
            term: "ann".to_string(),
        },
    );

    match collect(&engine, 1, Duration::from_secs(5)).pop() {
        Some(EngineEvent::OptionsLoaded {
            request_id,
            field,
            result: Ok(options),
        }) => {
            assert_eq!(request_id, 9);
            assert_eq!(field, 2);
            assert_eq!(options[0].text, "ANN");
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn rescheduling_a_slot_replaces_the_timer() {
    init_logging();
    let engine = EngineHandle::with_client(Arc::new(ScriptedClient::default())).expect("engine");
    for generation in 1..=3 {
        engine.schedule(
            Timer::SearchDebounce { generation },
            Duration::from_millis(40),
        );
    }

    let events = collect(&engine, 2, Duration::from_millis(500));
    assert_eq!(
        events,
        vec![EngineEvent::TimerFired(Timer::SearchDebounce { generation: 3 })]
    );
}

#[test]
fn cancelled_timer_never_fires() {
    init_logging();
    let engine = EngineHandle::with_client(Arc::new(ScriptedClient::default())).expect("engine");
    engine.schedule(Timer::Reload, Duration::from_millis(40));
    engine.schedule(Timer::DismissNotification(1), Duration::from_millis(60));
    engine.cancel(TimerSlot::Reload);

    let events = collect(&engine, 2, Duration::from_millis(500));
    assert_eq!(
        events,
        vec![EngineEvent::TimerFired(Timer::DismissNotification(1))]
    );
}
