use crate::{DropdownOption, FieldIndex, NotificationId, RequestId, RequestOutcome, Timer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The search box's value changed.
    SearchInput(String),
    /// Enter pressed in the search box.
    SearchEnter,
    SearchButtonClicked,
    SelectAllToggled(bool),
    RowToggled { index: usize, checked: bool },
    ClearSelection,
    BulkDeleteClicked,
    /// A delete trigger was clicked; `url` comes from its `data-delete-url`.
    DeleteTriggerClicked {
        url: String,
        item_name: Option<String>,
    },
    /// The dialog's confirm button.
    ConfirmClicked,
    /// The dialog was dismissed without confirming.
    CancelClicked,
    /// Reply (or transport failure) of a delete or bulk delete.
    MutationCompleted {
        request_id: RequestId,
        outcome: RequestOutcome,
    },
    /// The user typed into a remote dropdown. Lookup messages address the
    /// dropdown by its position among the page's fields.
    RemoteTermTyped { field: FieldIndex, term: String },
    RemoteOptionsLoaded {
        request_id: RequestId,
        field: FieldIndex,
        options: Vec<DropdownOption>,
    },
    /// The lookup failed; the dropdown keeps what it showed before.
    RemoteSearchFailed {
        request_id: RequestId,
        field: FieldIndex,
    },
    TimerFired(Timer),
    /// A toast's close button.
    NotificationClosed(NotificationId),
}
