//! UI event model delivered by the shared event source.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// The DOM-style event types a [`crate::domain::event_source::Document`] routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Click,
    DblClick,
    ContextMenu,
    KeyDown,
}

impl EventKind {
    /// Returns the DOM event name (e.g. `"click"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::DblClick => "dblclick",
            Self::ContextMenu => "contextmenu",
            Self::KeyDown => "keydown",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "click" => Ok(Self::Click),
            "dblclick" => Ok(Self::DblClick),
            "contextmenu" => Ok(Self::ContextMenu),
            "keydown" => Ok(Self::KeyDown),
            other => Err(AppError::UnknownEventKind(other.to_string())),
        }
    }
}

/// A single event observed on the shared event source.
///
/// `target` is an optional selector-like description of the element the
/// event was fired on; the counter does not look at it.
#[derive(Debug, Clone, Serialize)]
pub struct UiEvent {
    pub kind: EventKind,
    pub target: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl UiEvent {
    /// Creates an event of the given kind, stamped with the current time.
    pub fn new(kind: EventKind, target: Option<&str>) -> Self {
        Self {
            kind,
            target: target.map(|s| s.to_string()),
            timestamp: Utc::now(),
        }
    }

    /// Shorthand for a click with no target.
    pub fn click() -> Self {
        Self::new(EventKind::Click, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_parse() {
        assert_eq!("click".parse::<EventKind>().unwrap(), EventKind::Click);
        assert_eq!(" DblClick ".parse::<EventKind>().unwrap(), EventKind::DblClick);
        assert_eq!(
            "contextmenu".parse::<EventKind>().unwrap(),
            EventKind::ContextMenu
        );
        assert_eq!("keydown".parse::<EventKind>().unwrap(), EventKind::KeyDown);
    }

    #[test]
    fn test_event_kind_parse_unknown() {
        let err = "tap".parse::<EventKind>().unwrap_err();
        assert_eq!(err, AppError::UnknownEventKind("tap".to_string()));
    }

    #[test]
    fn test_event_kind_display_matches_dom_name() {
        assert_eq!(EventKind::Click.to_string(), "click");
        assert_eq!(EventKind::ContextMenu.to_string(), "contextmenu");
    }

    #[test]
    fn test_ui_event_creation() {
        let event = UiEvent::new(EventKind::Click, Some("pre.code"));

        assert_eq!(event.kind, EventKind::Click);
        assert_eq!(event.target, Some("pre.code".to_string()));

        let bare = UiEvent::click();
        assert_eq!(bare.kind, EventKind::Click);
        assert!(bare.target.is_none());
    }

    #[test]
    fn test_ui_event_serializes_kind_as_dom_name() {
        let json = serde_json::to_value(UiEvent::click()).unwrap();
        assert_eq!(json["kind"], "click");
        assert!(json["target"].is_null());
    }
}
