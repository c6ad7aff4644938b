use serde::{Deserialize, Serialize};

/// A per-row checkbox as rendered by the list template.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RowCheckbox {
    pub value: Option<String>,
    pub data_id: Option<String>,
    pub checked: bool,
}

impl RowCheckbox {
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// The checkbox value, or the `data-id` attribute when the value is blank.
    pub fn identifier(&self) -> Option<&str> {
        non_empty(self.value.as_deref()).or_else(|| non_empty(self.data_id.as_deref()))
    }
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectAllState {
    pub checked: bool,
    pub indeterminate: bool,
}

/// Select-all mirrors the rows: checked when every row is, indeterminate
/// when only some are.
pub fn select_all_state(checked: usize, total: usize) -> SelectAllState {
    SelectAllState {
        checked: total > 0 && checked == total,
        indeterminate: checked > 0 && checked < total,
    }
}

pub fn selection_label(count: usize) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("{count} item{plural} selected")
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct SelectionTracker {
    rows: Vec<RowCheckbox>,
}

impl SelectionTracker {
    pub(crate) fn new(rows: Vec<RowCheckbox>) -> Self {
        Self { rows }
    }

    pub(crate) fn set_all(&mut self, checked: bool) {
        for row in &mut self.rows {
            row.checked = checked;
        }
    }

    /// Returns false when `index` names no row.
    pub(crate) fn set_row(&mut self, index: usize, checked: bool) -> bool {
        match self.rows.get_mut(index) {
            Some(row) => {
                row.checked = checked;
                true
            }
            None => false,
        }
    }

    pub(crate) fn checked_count(&self) -> usize {
        self.rows.iter().filter(|row| row.checked).count()
    }

    pub(crate) fn total(&self) -> usize {
        self.rows.len()
    }

    /// Identifiers of the checked rows; rows without one are left out.
    pub(crate) fn selected_ids(&self) -> Vec<String> {
        self.rows
            .iter()
            .filter(|row| row.checked)
            .filter_map(RowCheckbox::identifier)
            .map(ToOwned::to_owned)
            .collect()
    }

    pub(crate) fn rows(&self) -> &[RowCheckbox] {
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_falls_back_to_data_id() {
        let row = RowCheckbox {
            value: Some(String::new()),
            data_id: Some("17".into()),
            checked: true,
        };
        assert_eq!(row.identifier(), Some("17"));
        assert_eq!(RowCheckbox::default().identifier(), None);
    }

    #[test]
    fn rows_without_identifier_are_not_selected() {
        let mut tracker = SelectionTracker::new(vec![
            RowCheckbox::with_value("1"),
            RowCheckbox::default(),
        ]);
        tracker.set_all(true);
        assert_eq!(tracker.checked_count(), 2);
        assert_eq!(tracker.selected_ids(), vec!["1".to_string()]);
    }

    #[test]
    fn out_of_range_row_is_rejected() {
        let mut tracker = SelectionTracker::new(vec![RowCheckbox::with_value("1")]);
        assert!(!tracker.set_row(3, true));
        assert_eq!(tracker.checked_count(), 0);
    }
}
