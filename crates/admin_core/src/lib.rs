//! Admin page core: pure state machine and view-model helpers for the list
//! and form bindings of the admin interface.
mod confirm;
mod effect;
mod enhance;
mod msg;
mod notify;
mod reply;
mod search;
mod selection;
mod settings;
mod state;
mod update;
mod view_model;

pub use confirm::{PendingAction, DIALOG_TITLE};
pub use effect::{Effect, Timer, TimerSlot};
pub use enhance::{
    classify, parse_option_seeds, parse_tag_seeds, remote_source, DatePickerBinder,
    DatePickerConfig, DropdownBinder, DropdownConfig, DropdownOption, EnhanceReport,
    FieldElement, FieldIndex, FormEnhancer, RemoteSearchQuery, RemoteSource, SeedDataError,
    WidgetKind, DROPDOWN_THEME,
};
pub use msg::Msg;
pub use notify::{Notification, NotificationId, Severity};
pub use reply::{
    failure_message, rejection_message, FailureWording, ReplyData, RequestOutcome, ServerReply,
    BULK_DELETE_WORDING, DELETE_WORDING,
};
pub use search::rewrite_search_url;
pub use selection::{select_all_state, selection_label, RowCheckbox, SelectAllState};
pub use settings::UiSettings;
pub use state::{AdminState, PageError, PageSnapshot, RequestId};
pub use update::update;
pub use view_model::{AdminViewModel, DialogView, LookupView, SelectionView};
