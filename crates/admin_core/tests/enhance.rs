use std::cell::RefCell;
use std::rc::Rc;

use admin_core::{
    classify, update, AdminState, DatePickerBinder, DatePickerConfig, DropdownBinder,
    DropdownConfig, DropdownOption, Effect, FieldElement, FormEnhancer, Msg, PageSnapshot,
    RemoteSearchQuery, UiSettings, WidgetKind,
};
use pretty_assertions::assert_eq;

#[derive(Clone, Default)]
struct Recorder {
    dropdowns: Rc<RefCell<Vec<(String, DropdownConfig)>>>,
    pickers: Rc<RefCell<Vec<(String, DatePickerConfig)>>>,
}

impl DropdownBinder for Recorder {
    fn bind(&mut self, field: &FieldElement, config: &DropdownConfig) {
        self.dropdowns
            .borrow_mut()
            .push((field.name.clone(), config.clone()));
    }
}

impl DatePickerBinder for Recorder {
    fn bind(&mut self, field: &FieldElement, config: &DatePickerConfig) {
        self.pickers
            .borrow_mut()
            .push((field.name.clone(), config.clone()));
    }
}

/// Position of the remote dropdown in `form_fields`.
const OWNER: usize = 3;

fn form_fields() -> Vec<FieldElement> {
    vec![
        FieldElement::new("born").with_class("flatpickr"),
        FieldElement::new("starts_at")
            .with_class("flatpickr")
            .with_data("enable-time", "true"),
        FieldElement::new("country").with_class("select2"),
        FieldElement::new("owner")
            .with_class("select2")
            .with_data("role", "select2-ajax")
            .with_data("url", "/admin/lookup")
            .with_data("json", r#"[{"id": 4, "text": "Ann"}]"#),
        FieldElement::new("labels")
            .with_data("role", "select2-tags")
            .with_data("json", r#"["red", "blue"]"#),
        FieldElement::new("notes"),
    ]
}

#[test]
fn markers_classify_fields() {
    let kinds: Vec<_> = form_fields().iter().map(classify).collect();
    assert_eq!(
        kinds,
        vec![
            Some(WidgetKind::DatePicker),
            Some(WidgetKind::DateTimePicker),
            Some(WidgetKind::StaticDropdown),
            Some(WidgetKind::RemoteDropdown),
            Some(WidgetKind::TagDropdown),
            None,
        ]
    );
}

#[test]
fn every_field_is_bound_once() {
    let recorder = Recorder::default();
    let mut enhancer = FormEnhancer::new(
        Some(Box::new(recorder.clone())),
        Some(Box::new(recorder.clone())),
        1,
    );

    let report = enhancer.enhance(&form_fields());
    assert_eq!(report.bound.len(), 5);
    assert!(report.skipped.is_empty());
    assert!(report.seed_errors.is_empty());

    let again = enhancer.enhance(&form_fields());
    assert!(again.bound.is_empty());
    assert_eq!(recorder.dropdowns.borrow().len(), 3);
    assert_eq!(recorder.pickers.borrow().len(), 2);

    let pickers = recorder.pickers.borrow();
    assert_eq!(pickers[0].1, DatePickerConfig::date());
    assert_eq!(pickers[1].1.date_format, "Y-m-d H:i");
    assert!(pickers[1].1.time_24hr);

    let dropdowns = recorder.dropdowns.borrow();
    let (_, owner) = &dropdowns[1];
    assert_eq!(owner.theme, "bootstrap-5");
    assert_eq!(owner.remote.as_ref().unwrap().url, "/admin/lookup");
    assert_eq!(
        owner.seeds,
        vec![DropdownOption {
            id: "4".to_string(),
            text: "Ann".to_string(),
            selected: true,
        }]
    );
    let (_, labels) = &dropdowns[2];
    assert!(labels.tags && labels.multiple);
    assert_eq!(
        labels.seeds.iter().map(|o| o.id.as_str()).collect::<Vec<_>>(),
        vec!["red", "blue"]
    );
}

#[test]
fn fields_sharing_a_name_are_each_bound() {
    let recorder = Recorder::default();
    let mut enhancer = FormEnhancer::new(None, Some(Box::new(recorder.clone())), 1);
    let fields = vec![
        FieldElement::new("").with_class("flatpickr"),
        FieldElement::new("").with_class("flatpickr"),
        FieldElement::new("dates").with_class("flatpickr"),
        FieldElement::new("dates").with_class("flatpickr"),
    ];

    let report = enhancer.enhance(&fields);
    assert_eq!(
        report.bound,
        vec![
            (0, WidgetKind::DatePicker),
            (1, WidgetKind::DatePicker),
            (2, WidgetKind::DatePicker),
            (3, WidgetKind::DatePicker),
        ]
    );
    assert_eq!(recorder.pickers.borrow().len(), 4);

    assert!(enhancer.enhance(&fields).bound.is_empty());
    assert_eq!(recorder.pickers.borrow().len(), 4);
}

#[test]
fn remote_dropdowns_sharing_a_name_keep_separate_lookups() {
    let remote = |url: &str| {
        FieldElement::new("owner")
            .with_data("role", "select2-ajax")
            .with_data("url", url)
    };
    let snapshot = PageSnapshot {
        url: "https://admin.test/admin/projects/new".to_string(),
        fields: vec![remote("/admin/users/lookup"), remote("/admin/teams/lookup")],
        ..PageSnapshot::default()
    };
    let state = AdminState::new(snapshot, UiSettings::default()).unwrap();
    assert_eq!(state.view().lookups.len(), 2);

    let (state, effects) = update(
        state,
        Msg::RemoteTermTyped {
            field: 1,
            term: "a".to_string(),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::RemoteSearch {
            request_id: 1,
            field: 1,
            url: "https://admin.test/admin/teams/lookup".to_string(),
            query: RemoteSearchQuery {
                name: "owner".to_string(),
                term: "a".to_string(),
            },
        }]
    );
    let view = state.view();
    assert!(!view.lookups[0].loading);
    assert!(view.lookups[1].loading);
}

#[test]
fn missing_capability_skips_without_error() {
    let recorder = Recorder::default();
    let mut enhancer = FormEnhancer::new(None, Some(Box::new(recorder.clone())), 1);

    let report = enhancer.enhance(&form_fields());
    assert_eq!(report.bound.len(), 2);
    assert_eq!(
        report.skipped,
        vec![
            (2, WidgetKind::StaticDropdown),
            (OWNER, WidgetKind::RemoteDropdown),
            (4, WidgetKind::TagDropdown),
        ]
    );
}

#[test]
fn malformed_seed_data_still_binds() {
    let recorder = Recorder::default();
    let mut enhancer = FormEnhancer::new(Some(Box::new(recorder.clone())), None, 1);
    let field = FieldElement::new("labels")
        .with_data("role", "select2-tags")
        .with_data("json", "red, blue");

    let report = enhancer.enhance(&[field]);
    assert_eq!(report.bound, vec![(0, WidgetKind::TagDropdown)]);
    assert_eq!(report.seed_errors.len(), 1);
    assert_eq!(report.seed_errors[0].field, "labels");
    assert_eq!(report.clone(), report);
    assert!(recorder.dropdowns.borrow()[0].1.seeds.is_empty());
}

fn form_page() -> AdminState {
    let snapshot = PageSnapshot {
        url: "https://admin.test/admin/projects/new".to_string(),
        fields: form_fields(),
        ..PageSnapshot::default()
    };
    AdminState::new(snapshot, UiSettings::default()).unwrap()
}

#[test]
fn typing_in_remote_dropdown_queries_lookup_url() {
    let (state, effects) = update(
        form_page(),
        Msg::RemoteTermTyped {
            field: OWNER,
            term: "an".to_string(),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::RemoteSearch {
            request_id: 1,
            field: OWNER,
            url: "https://admin.test/admin/lookup".to_string(),
            query: RemoteSearchQuery {
                name: "owner".to_string(),
                term: "an".to_string(),
            },
        }]
    );
    assert!(state.view().lookups[0].loading);
}

#[test]
fn short_terms_do_not_query() {
    let (_state, effects) = update(
        form_page(),
        Msg::RemoteTermTyped {
            field: OWNER,
            term: String::new(),
        },
    );
    assert!(effects.is_empty());
}

#[test]
fn only_latest_lookup_results_are_shown() {
    let typed = |state, term: &str| {
        update(
            state,
            Msg::RemoteTermTyped {
                field: OWNER,
                term: term.to_string(),
            },
        )
        .0
    };
    let state = typed(typed(form_page(), "a"), "an");
    let option = |id: &str| DropdownOption {
        id: id.to_string(),
        text: format!("user {id}"),
        selected: false,
    };

    let (state, _) = update(
        state,
        Msg::RemoteOptionsLoaded {
            request_id: 1,
            field: OWNER,
            options: vec![option("1")],
        },
    );
    assert!(state.view().lookups[0].options.is_empty());

    let (state, _) = update(
        state,
        Msg::RemoteOptionsLoaded {
            request_id: 2,
            field: OWNER,
            options: vec![option("2")],
        },
    );
    let view = state.view();
    let lookup = &view.lookups[0];
    assert_eq!(lookup.field, OWNER);
    assert_eq!(lookup.name, "owner");
    assert_eq!(lookup.options, vec![option("2")]);
    assert!(!lookup.loading);
}

#[test]
fn failed_lookup_keeps_previous_options() {
    let typed = |state, term: &str| {
        update(
            state,
            Msg::RemoteTermTyped {
                field: OWNER,
                term: term.to_string(),
            },
        )
        .0
    };
    let previous = vec![DropdownOption {
        id: "4".to_string(),
        text: "Ann".to_string(),
        selected: false,
    }];
    let (state, _) = update(
        typed(form_page(), "a"),
        Msg::RemoteOptionsLoaded {
            request_id: 1,
            field: OWNER,
            options: previous.clone(),
        },
    );
    let (state, _) = update(
        typed(state, "an"),
        Msg::RemoteSearchFailed {
            request_id: 2,
            field: OWNER,
        },
    );

    let view = state.view();
    assert_eq!(view.lookups[0].options, previous);
    assert!(!view.lookups[0].loading);
}
