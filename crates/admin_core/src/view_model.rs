use crate::enhance::{DropdownOption, FieldIndex};
use crate::notify::Notification;
use crate::selection::{select_all_state, selection_label, SelectAllState};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AdminViewModel {
    pub page_url: String,
    /// `None` when the page has no search box.
    pub search_value: Option<String>,
    pub search_pending: bool,
    /// `None` when the page has no bulk controls.
    pub selection: Option<SelectionView>,
    pub dialog: Option<DialogView>,
    pub notifications: Vec<Notification>,
    pub lookups: Vec<LookupView>,
    pub reload_scheduled: bool,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionView {
    pub rows_checked: Vec<bool>,
    pub select_all: SelectAllState,
    pub checked_count: usize,
    pub action_bar_visible: bool,
    /// Live count shown in the action bar while it is visible.
    pub label: Option<String>,
}

impl SelectionView {
    pub(crate) fn new(rows_checked: Vec<bool>, checked: usize, total: usize) -> Self {
        let visible = checked > 0;
        Self {
            rows_checked,
            select_all: select_all_state(checked, total),
            checked_count: checked,
            action_bar_visible: visible,
            label: visible.then(|| selection_label(checked)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogView {
    pub title: String,
    pub body: String,
    pub submitting: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupView {
    pub field: FieldIndex,
    pub name: String,
    pub options: Vec<DropdownOption>,
    pub loading: bool,
}
