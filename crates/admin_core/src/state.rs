use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::confirm::{ConfirmDialog, PendingAction};
use crate::enhance::{remote_source, DropdownOption, FieldElement, FieldIndex, RemoteSource};
use crate::notify::{NotificationCenter, Severity};
use crate::search::{rewrite_search_url, SearchDebouncer};
use crate::selection::{RowCheckbox, SelectionTracker};
use crate::view_model::{AdminViewModel, DialogView, LookupView, SelectionView};
use crate::{Effect, Timer, UiSettings};

pub type RequestId = u64;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PageError {
    #[error("page url must be absolute: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Everything the bindings read from a freshly loaded page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSnapshot {
    pub url: String,
    /// Initial value of the search box; `None` when the page has none.
    pub search: Option<String>,
    /// Whether the select-all checkbox and bulk action bar are rendered.
    pub bulk_controls: bool,
    pub rows: Vec<RowCheckbox>,
    pub fields: Vec<FieldElement>,
}

/// A mutation awaiting its reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mutation {
    Delete,
    BulkDelete { requested: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RemoteLookup {
    pub(crate) source: RemoteSource,
    pub(crate) options: Vec<DropdownOption>,
    pub(crate) latest: Option<RequestId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminState {
    settings: UiSettings,
    page_url: Url,
    search: Option<SearchDebouncer>,
    selection: Option<SelectionTracker>,
    pub(crate) dialog: ConfirmDialog,
    notifications: NotificationCenter,
    pub(crate) lookups: BTreeMap<FieldIndex, RemoteLookup>,
    in_flight: BTreeMap<RequestId, Mutation>,
    next_request_id: RequestId,
    reload_scheduled: bool,
    dirty: bool,
}

impl AdminState {
    pub fn new(snapshot: PageSnapshot, settings: UiSettings) -> Result<Self, PageError> {
        let page_url = Url::parse(&snapshot.url)?;
        let lookups = snapshot
            .fields
            .iter()
            .enumerate()
            .filter_map(|(index, field)| {
                let source = remote_source(field, settings.remote_min_input_len)?;
                Some((
                    index,
                    RemoteLookup {
                        source,
                        options: Vec::new(),
                        latest: None,
                    },
                ))
            })
            .collect();

        Ok(Self {
            page_url,
            search: snapshot.search.map(SearchDebouncer::new),
            selection: snapshot
                .bulk_controls
                .then(|| SelectionTracker::new(snapshot.rows)),
            dialog: ConfirmDialog::default(),
            notifications: NotificationCenter::default(),
            lookups,
            in_flight: BTreeMap::new(),
            next_request_id: 0,
            reload_scheduled: false,
            dirty: true,
            settings,
        })
    }

    pub fn settings(&self) -> &UiSettings {
        &self.settings
    }

    pub fn page_url(&self) -> &Url {
        &self.page_url
    }

    pub fn view(&self) -> AdminViewModel {
        let selection = self.selection.as_ref().map(|tracker| {
            SelectionView::new(
                tracker.rows().iter().map(|row| row.checked).collect(),
                tracker.checked_count(),
                tracker.total(),
            )
        });
        AdminViewModel {
            page_url: self.page_url.to_string(),
            search_value: self.search.as_ref().map(|s| s.value().to_string()),
            search_pending: self.search.as_ref().is_some_and(SearchDebouncer::is_pending),
            selection,
            dialog: self.dialog.action().map(|action| DialogView {
                title: crate::confirm::DIALOG_TITLE.to_string(),
                body: action.body_text(),
                submitting: self.dialog.is_submitting(),
            }),
            notifications: self.notifications.active().to_vec(),
            lookups: self
                .lookups
                .iter()
                .map(|(&field, lookup)| LookupView {
                    field,
                    name: lookup.source.field_name.clone(),
                    options: lookup.options.clone(),
                    loading: lookup.latest.is_some(),
                })
                .collect(),
            reload_scheduled: self.reload_scheduled,
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn search_mut(&mut self) -> Option<&mut SearchDebouncer> {
        self.search.as_mut()
    }

    pub(crate) fn selection_mut(&mut self) -> Option<&mut SelectionTracker> {
        self.selection.as_mut()
    }

    pub(crate) fn next_request_id(&mut self) -> RequestId {
        self.next_request_id += 1;
        self.next_request_id
    }

    /// Navigates when `query` changes the page URL; the state then tracks the
    /// target so an identical follow-up dispatch is a no-op.
    pub(crate) fn dispatch_search(&mut self, query: &str) -> Option<Effect> {
        let next = rewrite_search_url(&self.page_url, &self.settings.search_param, query)?;
        let url = next.to_string();
        self.page_url = next;
        Some(Effect::Navigate { url })
    }

    pub(crate) fn notify(&mut self, message: impl Into<String>, severity: Severity) -> Effect {
        self.notifications
            .push(message, severity, self.settings.notification_timeout())
    }

    pub(crate) fn dismiss_notification(&mut self, id: crate::NotificationId) -> bool {
        self.notifications.dismiss(id)
    }

    pub(crate) fn schedule_reload(&mut self) -> Effect {
        self.reload_scheduled = true;
        Effect::ScheduleTimer {
            timer: Timer::Reload,
            delay: self.settings.reload_delay(),
        }
    }

    /// Turns the confirmed dialog action into a request.
    pub(crate) fn submit(&mut self, action: PendingAction) -> Effect {
        let request_id = self.next_request_id();
        match action {
            PendingAction::Single { url, .. } => {
                self.in_flight.insert(request_id, Mutation::Delete);
                Effect::SendDelete { request_id, url }
            }
            PendingAction::Bulk { ids } => {
                self.in_flight.insert(
                    request_id,
                    Mutation::BulkDelete {
                        requested: ids.len(),
                    },
                );
                Effect::SendBulkDelete {
                    request_id,
                    url: self.bulk_delete_url(),
                    ids,
                }
            }
        }
    }

    pub(crate) fn take_in_flight(&mut self, request_id: RequestId) -> Option<Mutation> {
        self.in_flight.remove(&request_id)
    }

    /// Resolves a template-supplied path against the page.
    pub(crate) fn resolve(&self, raw: &str) -> String {
        self.page_url
            .join(raw)
            .map(String::from)
            .unwrap_or_else(|_| raw.to_string())
    }

    fn bulk_delete_url(&self) -> String {
        let path = self.page_url.path().trim_end_matches('/');
        self.resolve(&format!("{path}{}", self.settings.bulk_delete_suffix))
    }
}
