//! Field-level input rules.
//!
//! Every validator takes raw, untyped input and returns the list of problems it
//! found; an empty list means the input is acceptable. "Present" means anything
//! other than a missing value or JSON `null`, so an explicit empty string is
//! checked like any other value.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::collection::SortOrder;
use super::todo::{NewTodo, TodoChanges};

static ISO_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(-?(?:[1-9][0-9]*)?[0-9]{4})-(1[0-2]|0[1-9])-(3[01]|0[1-9]|[12][0-9])([T ](2[0-3]|[01][0-9]):([0-5][0-9]):([0-5][0-9])(\.[0-9]+)?(Z)?)?$",
    )
    .expect("valid ISO 8601 regex")
});

static POS_INT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("valid integer regex"));

/// Counted in UTF-16 code units, the way browsers count `String.length`.
pub const TITLE_MAX_CHARS: usize = 128;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub error: &'static str,
}

impl ValidationError {
    pub fn new(field: &'static str, error: &'static str) -> Self {
        Self { field, error }
    }
}

pub fn is_empty(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

pub fn is_full(value: Option<&Value>) -> bool {
    !is_empty(value)
}

pub fn is_iso_date(text: &str) -> bool {
    ISO_DATE.is_match(text)
}

pub fn is_pos_int(text: &str) -> bool {
    POS_INT.is_match(text)
}

/// String form of a JSON value: strings as-is, everything else as serialized.
fn as_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}

fn present(value: Option<&Value>) -> Option<&Value> {
    if is_full(value) { value } else { None }
}

pub fn id(value: Option<&Value>) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if let Some(v) = present(value) {
        if !is_pos_int(&as_text(v)) {
            errors.push(ValidationError::new("id", "id must be a valid integer value"));
        }
    }
    errors
}

pub fn completed(value: Option<&Value>) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if let Some(v) = present(value) {
        if !v.is_boolean() {
            errors.push(ValidationError::new("completed", "completed must be boolean"));
        }
    }
    errors
}

/// Ordering directive from the list query, not the stored position number.
pub fn position(value: Option<&Value>) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if let Some(v) = present(value) {
        if v.as_str().and_then(SortOrder::from_directive).is_none() {
            errors.push(ValidationError::new(
                "position",
                "position must start with \"asc\" or \"desc\"",
            ));
        }
    }
    errors
}

/// Raw todo fields as they arrive in a request body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TodoFields {
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub due: Option<Value>,
    #[serde(default)]
    pub position: Option<Value>,
    #[serde(default)]
    pub completed: Option<Value>,
    /// Set by the caller for creation; never read from the body.
    #[serde(skip)]
    pub post: bool,
}

impl TodoFields {
    /// Typed view of the present fields. Only meaningful once `data` returned no errors.
    pub fn changes(&self) -> TodoChanges {
        TodoChanges {
            title: present(self.title.as_ref()).and_then(Value::as_str).map(str::to_owned),
            due: present(self.due.as_ref()).and_then(Value::as_str).map(str::to_owned),
            position: present(self.position.as_ref()).and_then(|v| as_text(v).parse().ok()),
            completed: present(self.completed.as_ref()).and_then(Value::as_bool),
        }
    }

    pub fn new_todo(&self) -> Option<NewTodo> {
        let changes = self.changes();
        Some(NewTodo {
            title: changes.title?,
            due: changes.due,
            position: changes.position,
            completed: changes.completed,
        })
    }
}

pub fn data(fields: &TodoFields) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let title = present(fields.title.as_ref());
    let due = present(fields.due.as_ref());
    let position = present(fields.position.as_ref());
    let completed = present(fields.completed.as_ref());

    let title_blank = title.is_none() || title.and_then(Value::as_str) == Some("");
    if fields.post && title_blank {
        errors.push(ValidationError::new(
            "title",
            "There must be a title when creating a new todo",
        ));
    } else if let Some(t) = title {
        let valid = t
            .as_str()
            .is_some_and(|s| (1..=TITLE_MAX_CHARS).contains(&s.encode_utf16().count()));
        if !valid {
            errors.push(ValidationError::new(
                "title",
                "Title must be valid string between 1 and 128 characters",
            ));
        }
    }

    if title.is_none() && due.is_none() && position.is_none() && completed.is_none() {
        errors.push(ValidationError::new(
            "data",
            "at least one of title, due, position or completed is required",
        ));
    }

    if let Some(d) = due {
        if !is_iso_date(&as_text(d)) {
            errors.push(ValidationError::new("due", "due must be a valid ISO 8601 date"));
        }
    }

    if let Some(p) = position {
        let text = as_text(p);
        if !is_pos_int(&text) || text.parse::<i64>().is_err() {
            errors.push(ValidationError::new(
                "position",
                "position must be a valid, positive, integer value",
            ));
        }
    }

    errors.extend(self::completed(completed));
    errors
}
