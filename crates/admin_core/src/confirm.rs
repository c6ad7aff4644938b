//! The shared "Are you sure?" dialog guarding destructive actions.

pub const DIALOG_TITLE: &str = "Are you sure?";
const DEFAULT_ITEM_NAME: &str = "this item";

/// The action the confirm button is currently bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    Single { url: String, item_name: Option<String> },
    Bulk { ids: Vec<String> },
}

impl PendingAction {
    pub fn body_text(&self) -> String {
        match self {
            PendingAction::Single { item_name, .. } => {
                let name = item_name
                    .as_deref()
                    .filter(|name| !name.is_empty())
                    .unwrap_or(DEFAULT_ITEM_NAME);
                format!("This will permanently delete {name}. This action cannot be undone.")
            }
            PendingAction::Bulk { ids } => format!(
                "Delete {} selected items? This action cannot be undone.",
                ids.len()
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) enum ConfirmDialog {
    #[default]
    Closed,
    Open(PendingAction),
    Submitting(PendingAction),
}

impl ConfirmDialog {
    /// Binds the dialog to `action`, discarding any previous binding.
    pub(crate) fn open(&mut self, action: PendingAction) {
        *self = ConfirmDialog::Open(action);
    }

    pub(crate) fn close(&mut self) {
        *self = ConfirmDialog::Closed;
    }

    /// The bound action, moving the dialog to `Submitting`. Confirming while a
    /// request is in flight sends the same action again.
    pub(crate) fn confirm(&mut self) -> Option<PendingAction> {
        let action = self.action()?.clone();
        *self = ConfirmDialog::Submitting(action.clone());
        Some(action)
    }

    /// The request failed: keep the dialog up so the user can retry.
    pub(crate) fn reopen(&mut self) {
        if let ConfirmDialog::Submitting(action) = std::mem::take(self) {
            *self = ConfirmDialog::Open(action);
        }
    }

    pub(crate) fn action(&self) -> Option<&PendingAction> {
        match self {
            ConfirmDialog::Closed => None,
            ConfirmDialog::Open(action) | ConfirmDialog::Submitting(action) => Some(action),
        }
    }

    pub(crate) fn is_submitting(&self) -> bool {
        matches!(self, ConfirmDialog::Submitting(_))
    }
}
