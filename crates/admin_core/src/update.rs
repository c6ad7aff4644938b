use crate::confirm::PendingAction;
use crate::reply::{
    failure_message, rejection_message, RequestOutcome, BULK_DELETE_WORDING, DELETE_WORDING,
};
use crate::state::Mutation;
use crate::{AdminState, Effect, Msg, Severity, Timer, TimerSlot};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AdminState, msg: Msg) -> (AdminState, Vec<Effect>) {
    let mut effects = Vec::new();
    let changed = match msg {
        Msg::SearchInput(value) => {
            let delay = state.settings().debounce();
            let immediate = match state.search_mut() {
                Some(search) => search.input(value, delay, &mut effects),
                None => return (state, effects),
            };
            if let Some(query) = immediate {
                effects.extend(state.dispatch_search(&query));
            }
            true
        }
        Msg::SearchEnter | Msg::SearchButtonClicked => {
            let query = match state.search_mut() {
                Some(search) => search.submit(&mut effects),
                None => return (state, effects),
            };
            effects.extend(state.dispatch_search(&query));
            true
        }
        Msg::SelectAllToggled(checked) => match state.selection_mut() {
            Some(selection) => {
                selection.set_all(checked);
                true
            }
            None => false,
        },
        Msg::RowToggled { index, checked } => state
            .selection_mut()
            .is_some_and(|selection| selection.set_row(index, checked)),
        Msg::ClearSelection => match state.selection_mut() {
            Some(selection) => {
                selection.set_all(false);
                true
            }
            None => false,
        },
        Msg::BulkDeleteClicked => {
            let Some(ids) = state.selection_mut().map(|s| s.selected_ids()) else {
                return (state, effects);
            };
            if ids.is_empty() {
                effects.push(state.notify("No items selected", Severity::Warning));
            } else {
                state.dialog.open(PendingAction::Bulk { ids });
            }
            true
        }
        Msg::DeleteTriggerClicked { url, item_name } => {
            let url = state.resolve(&url);
            state.dialog.open(PendingAction::Single { url, item_name });
            true
        }
        Msg::ConfirmClicked => match state.dialog.confirm() {
            Some(action) => {
                effects.push(state.submit(action));
                true
            }
            None => false,
        },
        Msg::CancelClicked => {
            state.dialog.close();
            true
        }
        Msg::MutationCompleted {
            request_id,
            outcome,
        } => match state.take_in_flight(request_id) {
            Some(mutation) => {
                apply_outcome(&mut state, mutation, outcome, &mut effects);
                true
            }
            None => false,
        },
        Msg::RemoteTermTyped { field, term } => {
            let Some(query) = state
                .lookups
                .get(&field)
                .and_then(|lookup| lookup.source.query(&term))
            else {
                return (state, effects);
            };
            let request_id = state.next_request_id();
            let Some(lookup) = state.lookups.get_mut(&field) else {
                return (state, effects);
            };
            lookup.latest = Some(request_id);
            let url = lookup.source.url.clone();
            effects.push(Effect::RemoteSearch {
                request_id,
                field,
                url: state.resolve(&url),
                query,
            });
            true
        }
        Msg::RemoteOptionsLoaded {
            request_id,
            field,
            options,
        } => match state.lookups.get_mut(&field) {
            // Answers to superseded terms are dropped.
            Some(lookup) if lookup.latest == Some(request_id) => {
                lookup.options = options;
                lookup.latest = None;
                true
            }
            _ => false,
        },
        Msg::RemoteSearchFailed { request_id, field } => match state.lookups.get_mut(&field) {
            Some(lookup) if lookup.latest == Some(request_id) => {
                lookup.latest = None;
                true
            }
            _ => false,
        },
        Msg::TimerFired(Timer::SearchDebounce { generation }) => {
            let query = state
                .search_mut()
                .and_then(|search| search.elapsed(generation));
            match query {
                Some(query) => {
                    effects.extend(state.dispatch_search(&query));
                    true
                }
                None => false,
            }
        }
        Msg::TimerFired(Timer::Reload) => {
            effects.push(Effect::Reload);
            false
        }
        Msg::TimerFired(Timer::DismissNotification(id)) => state.dismiss_notification(id),
        Msg::NotificationClosed(id) => {
            let closed = state.dismiss_notification(id);
            if closed {
                effects.push(Effect::CancelTimer {
                    slot: TimerSlot::Notification(id),
                });
            }
            closed
        }
    };

    if changed {
        state.mark_dirty();
    }
    (state, effects)
}

fn apply_outcome(
    state: &mut AdminState,
    mutation: Mutation,
    outcome: RequestOutcome,
    effects: &mut Vec<Effect>,
) {
    let wording = match mutation {
        Mutation::Delete => DELETE_WORDING,
        Mutation::BulkDelete { .. } => BULK_DELETE_WORDING,
    };
    match outcome {
        RequestOutcome::Replied(reply) if reply.success => {
            state.dialog.close();
            let message = reply.message.filter(|message| !message.is_empty());
            let message = match mutation {
                Mutation::Delete => message,
                Mutation::BulkDelete { requested } => Some(message.unwrap_or_else(|| {
                    let deleted = reply
                        .data
                        .and_then(|data| data.deleted)
                        .unwrap_or(requested as u64);
                    format!("{deleted} items deleted successfully")
                })),
            };
            if let Some(message) = message {
                effects.push(state.notify(message, Severity::Success));
            }
            effects.push(state.schedule_reload());
        }
        RequestOutcome::Replied(reply) => {
            state.dialog.reopen();
            effects.push(state.notify(rejection_message(&reply, wording), Severity::Error));
        }
        RequestOutcome::Failed { body, .. } => {
            state.dialog.reopen();
            effects.push(state.notify(failure_message(&body, wording), Severity::Error));
        }
    }
}
