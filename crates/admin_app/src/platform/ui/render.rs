use admin_core::{AdminViewModel, SelectionView, Severity};

/// Renders the view model as console lines.
pub fn render(view: &AdminViewModel) -> Vec<String> {
    let mut lines = vec![format!("page: {}", view.page_url)];

    if let Some(value) = &view.search_value {
        let pending = if view.search_pending { " (pending)" } else { "" };
        lines.push(format!("search: [{value}]{pending}"));
    }

    if let Some(selection) = &view.selection {
        lines.extend(render_selection(selection));
    }

    for lookup in &view.lookups {
        let options: Vec<String> = lookup
            .options
            .iter()
            .map(|option| format!("{}={}", option.id, option.text))
            .collect();
        let loading = if lookup.loading { " (loading)" } else { "" };
        lines.push(format!(
            "lookup {} {}: {}{}",
            lookup.field + 1,
            lookup.name,
            options.join(", "),
            loading
        ));
    }

    if let Some(dialog) = &view.dialog {
        let state = if dialog.submitting { "submitting" } else { "open" };
        lines.push(format!("dialog ({state}): {} {}", dialog.title, dialog.body));
    }

    for notification in &view.notifications {
        lines.push(format!(
            "#{} [{}] {}",
            notification.id,
            severity_label(notification.severity),
            notification.message.replace('\n', " / ")
        ));
    }

    if view.reload_scheduled {
        lines.push("reload scheduled".to_string());
    }
    lines
}

fn render_selection(selection: &SelectionView) -> Vec<String> {
    let select_all = match (selection.select_all.checked, selection.select_all.indeterminate) {
        (true, _) => "[x]",
        (false, true) => "[-]",
        (false, false) => "[ ]",
    };
    let rows: Vec<String> = selection
        .rows_checked
        .iter()
        .enumerate()
        .map(|(index, checked)| format!("{}:{}", index + 1, if *checked { "x" } else { " " }))
        .collect();

    let mut lines = vec![format!("select all {select_all} rows {}", rows.join(" "))];
    if let Some(label) = selection.label.as_deref().filter(|_| selection.action_bar_visible) {
        lines.push(format!("action bar: {label}"));
    }
    lines
}

fn severity_label(severity: Severity) -> &'static str {
    severity.alert_class().trim_start_matches("alert-")
}
