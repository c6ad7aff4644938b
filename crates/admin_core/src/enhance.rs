//! Upgrades plain form fields into dropdown and date-picker widgets.
//!
//! The widget libraries are host capabilities handed to [`FormEnhancer`];
//! a missing capability means fields of that family stay plain.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use url::Url;

pub const DROPDOWN_THEME: &str = "bootstrap-5";

/// Position of a field in the page's field list. Names may repeat or be
/// empty, so elements are told apart by position.
pub type FieldIndex = usize;

/// A form control as rendered by the server template. `data` holds the
/// `data-*` attributes without their prefix (`role`, `url`, `json`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldElement {
    pub name: String,
    pub classes: Vec<String>,
    pub data: BTreeMap<String, String>,
}

impl FieldElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn with_data(mut self, key: &str, value: &str) -> Self {
        self.data.insert(key.to_string(), value.to_string());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn data(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    DatePicker,
    DateTimePicker,
    StaticDropdown,
    RemoteDropdown,
    TagDropdown,
}

impl WidgetKind {
    pub fn is_dropdown(self) -> bool {
        matches!(
            self,
            WidgetKind::StaticDropdown | WidgetKind::RemoteDropdown | WidgetKind::TagDropdown
        )
    }
}

/// Maps the template's markers to a widget. Explicit `data-*` markers win
/// over the generic classes.
pub fn classify(field: &FieldElement) -> Option<WidgetKind> {
    if field.data("enable-time") == Some("true") {
        return Some(WidgetKind::DateTimePicker);
    }
    match field.data("role") {
        Some("select2-ajax") => return Some(WidgetKind::RemoteDropdown),
        Some("select2-tags") => return Some(WidgetKind::TagDropdown),
        _ => {}
    }
    if field.has_class("flatpickr") {
        Some(WidgetKind::DatePicker)
    } else if field.has_class("select2") {
        Some(WidgetKind::StaticDropdown)
    } else {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePickerConfig {
    pub date_format: &'static str,
    pub allow_input: bool,
    pub enable_time: bool,
    pub time_24hr: bool,
}

impl DatePickerConfig {
    pub fn date() -> Self {
        Self {
            date_format: "Y-m-d",
            allow_input: true,
            enable_time: false,
            time_24hr: false,
        }
    }

    pub fn date_time() -> Self {
        Self {
            date_format: "Y-m-d H:i",
            allow_input: true,
            enable_time: true,
            time_24hr: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownOption {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub selected: bool,
}

fn id_as_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "option id must be a string or number, got {other}"
        ))),
    }
}

/// Where a remote dropdown looks its options up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSource {
    pub url: String,
    pub field_name: String,
    pub min_input_len: usize,
}

impl RemoteSource {
    /// The lookup for `term`, or `None` while the term is too short.
    pub fn query(&self, term: &str) -> Option<RemoteSearchQuery> {
        (term.chars().count() >= self.min_input_len).then(|| RemoteSearchQuery {
            name: self.field_name.clone(),
            term: term.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSearchQuery {
    pub name: String,
    pub term: String,
}

impl RemoteSearchQuery {
    pub fn apply_to(&self, url: &mut Url) {
        url.query_pairs_mut()
            .append_pair("name", &self.name)
            .append_pair("term", &self.term);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownConfig {
    pub theme: &'static str,
    pub tags: bool,
    pub multiple: bool,
    pub remote: Option<RemoteSource>,
    /// Pre-selected options from the field's `data-json`.
    pub seeds: Vec<DropdownOption>,
}

impl DropdownConfig {
    fn plain() -> Self {
        Self {
            theme: DROPDOWN_THEME,
            tags: false,
            multiple: false,
            remote: None,
            seeds: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("field {field}: malformed data-json: {message}")]
pub struct SeedDataError {
    pub field: String,
    pub message: String,
}

/// `data-json` of a remote dropdown: `[{"id": .., "text": ..}]`.
pub fn parse_option_seeds(field: &FieldElement) -> Result<Vec<DropdownOption>, SeedDataError> {
    let Some(raw) = field.data("json") else {
        return Ok(Vec::new());
    };
    let mut options: Vec<DropdownOption> =
        serde_json::from_str(raw).map_err(|err| seed_error(field, err))?;
    for option in &mut options {
        option.selected = true;
    }
    Ok(options)
}

/// `data-json` of a tag dropdown: `["a", "b"]`, each tag its own id.
pub fn parse_tag_seeds(field: &FieldElement) -> Result<Vec<DropdownOption>, SeedDataError> {
    let Some(raw) = field.data("json") else {
        return Ok(Vec::new());
    };
    let tags: Vec<String> = serde_json::from_str(raw).map_err(|err| seed_error(field, err))?;
    Ok(tags
        .into_iter()
        .map(|tag| DropdownOption {
            id: tag.clone(),
            text: tag,
            selected: true,
        })
        .collect())
}

fn seed_error(field: &FieldElement, err: serde_json::Error) -> SeedDataError {
    SeedDataError {
        field: field.name.clone(),
        message: err.to_string(),
    }
}

/// The remote lookup of `field`, if it is a remote dropdown with a URL.
pub fn remote_source(field: &FieldElement, min_input_len: usize) -> Option<RemoteSource> {
    if classify(field) != Some(WidgetKind::RemoteDropdown) {
        return None;
    }
    field.data("url").map(|url| RemoteSource {
        url: url.to_string(),
        field_name: field.name.clone(),
        min_input_len,
    })
}

pub trait DropdownBinder {
    fn bind(&mut self, field: &FieldElement, config: &DropdownConfig);
}

pub trait DatePickerBinder {
    fn bind(&mut self, field: &FieldElement, config: &DatePickerConfig);
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnhanceReport {
    pub bound: Vec<(FieldIndex, WidgetKind)>,
    /// Fields whose widget library was not provided.
    pub skipped: Vec<(FieldIndex, WidgetKind)>,
    pub seed_errors: Vec<SeedDataError>,
}

pub struct FormEnhancer {
    dropdowns: Option<Box<dyn DropdownBinder>>,
    date_pickers: Option<Box<dyn DatePickerBinder>>,
    min_input_len: usize,
    bound: HashSet<FieldIndex>,
}

impl FormEnhancer {
    pub fn new(
        dropdowns: Option<Box<dyn DropdownBinder>>,
        date_pickers: Option<Box<dyn DatePickerBinder>>,
        min_input_len: usize,
    ) -> Self {
        Self {
            dropdowns,
            date_pickers,
            min_input_len,
            bound: HashSet::new(),
        }
    }

    /// Attaches a widget to every recognised field not bound before. Calling
    /// it again with the same page fields binds nothing twice.
    pub fn enhance(&mut self, fields: &[FieldElement]) -> EnhanceReport {
        let mut report = EnhanceReport::default();
        for (index, field) in fields.iter().enumerate() {
            let Some(kind) = classify(field) else {
                continue;
            };
            if self.bound.contains(&index) {
                continue;
            }
            let attached = if kind.is_dropdown() {
                self.bind_dropdown(field, kind, &mut report)
            } else {
                self.bind_date_picker(field, kind)
            };
            if attached {
                self.bound.insert(index);
                report.bound.push((index, kind));
            } else {
                report.skipped.push((index, kind));
            }
        }
        report
    }

    fn bind_dropdown(
        &mut self,
        field: &FieldElement,
        kind: WidgetKind,
        report: &mut EnhanceReport,
    ) -> bool {
        let Some(binder) = self.dropdowns.as_mut() else {
            return false;
        };
        let mut config = DropdownConfig::plain();
        let seeds = match kind {
            WidgetKind::RemoteDropdown => {
                config.remote = remote_source(field, self.min_input_len);
                parse_option_seeds(field)
            }
            WidgetKind::TagDropdown => {
                config.tags = true;
                config.multiple = true;
                parse_tag_seeds(field)
            }
            _ => Ok(Vec::new()),
        };
        match seeds {
            Ok(seeds) => config.seeds = seeds,
            Err(err) => report.seed_errors.push(err),
        }
        binder.bind(field, &config);
        true
    }

    fn bind_date_picker(&mut self, field: &FieldElement, kind: WidgetKind) -> bool {
        let Some(binder) = self.date_pickers.as_mut() else {
            return false;
        };
        let config = if kind == WidgetKind::DateTimePicker {
            DatePickerConfig::date_time()
        } else {
            DatePickerConfig::date()
        };
        binder.bind(field, &config);
        true
    }
}
