use crate::attributes::Attributes;
use crate::constants::{ATTR_FOCUS_KEY, ATTR_FOCUS_ORDER, ATTR_VALUE};
use crate::errors::{Error, Result};
use crate::events::EventKind;
use crate::view::{Element, EventBinding};

/// Read-only view of one focusable node, re-derived on every render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusTargetSnapshot {
    pub key: String,
    pub attributes: Attributes,
    pub events: Vec<EventBinding>,
}

impl FocusTargetSnapshot {
    /// Snapshot a focusable element; the focus key attribute is mandatory.
    pub fn from_element(element: &Element) -> Result<Self> {
        let key = element
            .focus_key()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| Error::missing_attribute(element.tag_name(), ATTR_FOCUS_KEY))?;

        Ok(Self {
            key: key.to_string(),
            attributes: element.attributes().clone(),
            events: element.events().to_vec(),
        })
    }

    /// Value the edit buffer is seeded with until the user types
    pub fn initial_value(&self) -> &str {
        self.attributes.get(ATTR_VALUE).unwrap_or_default()
    }

    /// Explicit traversal position, if the node declares one
    pub fn focus_order(&self) -> Result<Option<i32>> {
        self.attributes.parse_opt(ATTR_FOCUS_ORDER)
    }

    pub fn binding(&self, kind: EventKind) -> Option<&EventBinding> {
        self.events
            .iter()
            .find(|binding| binding.name == kind.binding_name())
    }
}
