use std::sync::Once;
use std::time::Duration;

use admin_core::{
    update, AdminState, Effect, Msg, PageSnapshot, RowCheckbox, SelectAllState, Severity, Timer,
    UiSettings,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(admin_logging::initialize_for_tests);
}

fn list_page(rows: usize) -> AdminState {
    let snapshot = PageSnapshot {
        url: "https://admin.test/admin/users".to_string(),
        bulk_controls: true,
        rows: (1..=rows).map(|id| RowCheckbox::with_value(id.to_string())).collect(),
        ..PageSnapshot::default()
    };
    AdminState::new(snapshot, UiSettings::default()).unwrap()
}

fn toggle(state: AdminState, index: usize, checked: bool) -> AdminState {
    let (state, effects) = update(state, Msg::RowToggled { index, checked });
    assert!(effects.is_empty());
    state
}

#[test]
fn select_all_tracks_row_counts() {
    init_logging();
    let state = list_page(3);
    let selection = state.view().selection.unwrap();
    assert_eq!(selection.select_all, SelectAllState::default());
    assert!(!selection.action_bar_visible);
    assert_eq!(selection.label, None);

    let state = toggle(state, 0, true);
    let selection = state.view().selection.unwrap();
    assert_eq!(
        selection.select_all,
        SelectAllState {
            checked: false,
            indeterminate: true
        }
    );
    assert!(selection.action_bar_visible);
    assert_eq!(selection.label.as_deref(), Some("1 item selected"));

    let state = toggle(toggle(state, 1, true), 2, true);
    let selection = state.view().selection.unwrap();
    assert_eq!(
        selection.select_all,
        SelectAllState {
            checked: true,
            indeterminate: false
        }
    );
    assert_eq!(selection.label.as_deref(), Some("3 items selected"));

    let state = toggle(toggle(toggle(state, 0, false), 1, false), 2, false);
    let selection = state.view().selection.unwrap();
    assert_eq!(selection.select_all, SelectAllState::default());
    assert!(!selection.action_bar_visible);
}

#[test]
fn select_all_toggle_sets_every_row() {
    init_logging();
    let (state, effects) = update(list_page(4), Msg::SelectAllToggled(true));
    assert!(effects.is_empty());
    let selection = state.view().selection.unwrap();
    assert_eq!(selection.rows_checked, vec![true; 4]);
    assert_eq!(selection.checked_count, 4);
    assert!(selection.select_all.checked);

    let (state, _) = update(state, Msg::SelectAllToggled(false));
    let selection = state.view().selection.unwrap();
    assert_eq!(selection.rows_checked, vec![false; 4]);
    assert!(!selection.action_bar_visible);
}

#[test]
fn clear_selection_resets_everything_without_effects() {
    init_logging();
    let state = toggle(list_page(3), 1, true);
    let (state, effects) = update(state, Msg::ClearSelection);

    assert!(effects.is_empty());
    let selection = state.view().selection.unwrap();
    assert_eq!(selection.rows_checked, vec![false; 3]);
    assert_eq!(selection.select_all, SelectAllState::default());
    assert!(!selection.action_bar_visible);
    assert_eq!(selection.label, None);
}

#[test]
fn bulk_delete_without_selection_only_warns() {
    init_logging();
    let (state, effects) = update(list_page(2), Msg::BulkDeleteClicked);

    assert_eq!(
        effects,
        vec![Effect::ScheduleTimer {
            timer: Timer::DismissNotification(1),
            delay: Duration::from_millis(5000),
        }]
    );
    let view = state.view();
    assert_eq!(view.dialog, None);
    assert_eq!(view.notifications.len(), 1);
    assert_eq!(view.notifications[0].message, "No items selected");
    assert_eq!(view.notifications[0].severity, Severity::Warning);
}

#[test]
fn bulk_delete_asks_for_confirmation_first() {
    init_logging();
    let state = toggle(toggle(list_page(3), 0, true), 2, true);
    let (state, effects) = update(state, Msg::BulkDeleteClicked);

    assert!(effects.is_empty());
    let dialog = state.view().dialog.unwrap();
    assert_eq!(dialog.title, "Are you sure?");
    assert_eq!(
        dialog.body,
        "Delete 2 selected items? This action cannot be undone."
    );
    assert!(!dialog.submitting);

    let (state, effects) = update(state, Msg::ConfirmClicked);
    assert_eq!(
        effects,
        vec![Effect::SendBulkDelete {
            request_id: 1,
            url: "https://admin.test/admin/users/bulk-delete".to_string(),
            ids: vec!["1".to_string(), "3".to_string()],
        }]
    );
    assert!(state.view().dialog.unwrap().submitting);
}

#[test]
fn cancelled_bulk_delete_sends_nothing() {
    init_logging();
    let state = toggle(list_page(2), 0, true);
    let (state, _) = update(state, Msg::BulkDeleteClicked);
    let (state, effects) = update(state, Msg::CancelClicked);
    assert!(effects.is_empty());
    assert_eq!(state.view().dialog, None);

    let (_state, effects) = update(state, Msg::ConfirmClicked);
    assert!(effects.is_empty());
}

#[test]
fn ids_fall_back_to_data_id() {
    init_logging();
    let snapshot = PageSnapshot {
        url: "https://admin.test/admin/posts/".to_string(),
        bulk_controls: true,
        rows: vec![RowCheckbox {
            value: None,
            data_id: Some("p-9".to_string()),
            checked: true,
        }],
        ..PageSnapshot::default()
    };
    let state = AdminState::new(snapshot, UiSettings::default()).unwrap();
    let (state, _) = update(state, Msg::BulkDeleteClicked);
    let (_state, effects) = update(state, Msg::ConfirmClicked);

    assert_eq!(
        effects,
        vec![Effect::SendBulkDelete {
            request_id: 1,
            url: "https://admin.test/admin/posts/bulk-delete".to_string(),
            ids: vec!["p-9".to_string()],
        }]
    );
}
