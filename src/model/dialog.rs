//! Values crossing the dialog boundary.
//!
//! The desk hands a [`DialogIntent`] to whatever renders the dialog and gets a
//! [`DialogResult`] back when it closes. The event name is decoded into
//! [`DialogEvent`] exactly once, here.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ProductDraft;

/// What the dialog was opened for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialogAction {
    Add,
    Edit,
    Delete,
}

impl DialogAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            DialogAction::Add => "Add",
            DialogAction::Edit => "Edit",
            DialogAction::Delete => "Delete",
        }
    }
}

impl fmt::Display for DialogAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input handed to the dialog: the action and the record it acts on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DialogIntent {
    pub action: DialogAction,
    pub subject: Option<ProductDraft>,
}

/// Event name reported by the dialog when it closes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum DialogEvent {
    Add,
    Edit,
    Delete,
    /// Cancel, backdrop click, or anything else the desk does not act on.
    Unknown(String),
}

impl From<&str> for DialogEvent {
    fn from(name: &str) -> Self {
        match name {
            "Add" => DialogEvent::Add,
            "Edit" => DialogEvent::Edit,
            "Delete" => DialogEvent::Delete,
            other => DialogEvent::Unknown(other.to_string()),
        }
    }
}

impl From<String> for DialogEvent {
    fn from(name: String) -> Self {
        DialogEvent::from(name.as_str())
    }
}

/// Output of the dialog once it closes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DialogResult {
    pub event: DialogEvent,
    #[serde(default)]
    pub data: Option<ProductDraft>,
}

impl DialogResult {
    /// Decodes a raw `(event, data)` pair as emitted by the dialog.
    pub fn new(event: &str, data: Option<ProductDraft>) -> Self {
        Self {
            event: DialogEvent::from(event),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_decode_case_sensitively() {
        assert_eq!(DialogEvent::from("Add"), DialogEvent::Add);
        assert_eq!(DialogEvent::from("Edit"), DialogEvent::Edit);
        assert_eq!(DialogEvent::from("Delete"), DialogEvent::Delete);
        assert_eq!(DialogEvent::from("delete"), DialogEvent::Unknown("delete".into()));
        assert_eq!(DialogEvent::from("Cancel"), DialogEvent::Unknown("Cancel".into()));
    }

    #[test]
    fn test_result_deserializes_from_dialog_payload() {
        let raw = r#"{ "event": "Edit", "data": { "id": "x1", "name": "Pen", "price": 3, "quantity": 1 } }"#;
        let result: DialogResult = serde_json::from_str(raw).unwrap();
        assert_eq!(result.event, DialogEvent::Edit);
        assert_eq!(result.data.unwrap().id.as_deref(), Some("x1"));

        let cancelled: DialogResult = serde_json::from_str(r#"{ "event": "Cancel" }"#).unwrap();
        assert_eq!(cancelled.event, DialogEvent::Unknown("Cancel".into()));
        assert!(cancelled.data.is_none());
    }
}
