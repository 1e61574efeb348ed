//! Structured payloads sent back into the component tree by handler id.

use crate::constants::{EVENT_CHANGE, EVENT_CLICK, EVENT_INPUT};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Change,
    Input,
}

impl EventKind {
    /// Lowercase binding name as used in `EventBinding::name`
    pub fn binding_name(self) -> &'static str {
        match self {
            Self::Click => EVENT_CLICK,
            Self::Change => EVENT_CHANGE,
            Self::Input => EVENT_INPUT,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.binding_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EventArgs {
    /// Synthetic click raised by activating the focused target
    Click { value: String },
    /// Committed value raised by activation
    Change { value: String },
    /// Live value after every buffer-changing keystroke
    Input { value: String },
}

impl EventArgs {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Click { .. } => EventKind::Click,
            Self::Change { .. } => EventKind::Change,
            Self::Input { .. } => EventKind::Input,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Click { value } | Self::Change { value } | Self::Input { value } => value,
        }
    }

    pub fn event_name(&self) -> &'static str {
        self.kind().binding_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_map_to_binding_names() {
        assert_eq!(EventKind::Click.binding_name(), "onclick");
        assert_eq!(EventKind::Change.to_string(), "onchange");
        let args = EventArgs::Input {
            value: "hi".to_string(),
        };
        assert_eq!(args.event_name(), "oninput");
        assert_eq!(args.value(), "hi");
    }

    #[test]
    fn test_serialized_shape() {
        let args = EventArgs::Change {
            value: "x".to_string(),
        };
        let json = serde_json::to_value(&args).unwrap();
        assert_eq!(json, serde_json::json!({"type": "change", "value": "x"}));
    }
}
