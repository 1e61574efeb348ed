//! The view tree handed over by the component framework after every render.
//!
//! Trees are produced fresh for each pass and are read-only here; anything
//! that needs a variation (for example a container without its scrollbar
//! marker) works on a clone.

use crate::attributes::Attributes;
use crate::constants::{ATTR_FOCUSABLE, ATTR_FOCUS_KEY};
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ViewNode {
    Text { content: String },
    Element(Element),
}

impl ViewNode {
    pub fn text(content: impl Into<String>) -> Self {
        ViewNode::Text {
            content: content.into(),
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            ViewNode::Element(element) => Some(element),
            ViewNode::Text { .. } => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ViewNode::Text { content } => Some(content),
            ViewNode::Element(_) => None,
        }
    }

    /// Short human readable description used in error messages and logs
    pub fn describe(&self) -> String {
        match self {
            ViewNode::Text { content } => {
                let preview: String = content.chars().take(24).collect();
                if preview.len() < content.len() {
                    format!("text \"{preview}…\"")
                } else {
                    format!("text \"{preview}\"")
                }
            }
            ViewNode::Element(element) => element.describe(),
        }
    }
}

impl From<Element> for ViewNode {
    fn from(element: Element) -> Self {
        ViewNode::Element(element)
    }
}

/// Binding of a lowercase event kind to an opaque handler id.
///
/// A handler id of zero means the binding is not wired to anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventBinding {
    pub name: String,
    pub handler_id: u64,
}

impl EventBinding {
    pub fn new(name: impl Into<String>, handler_id: u64) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            handler_id,
        }
    }

    pub fn is_bound(&self) -> bool {
        self.handler_id != 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ElementRepr")]
pub struct Element {
    tag_name: String,
    attributes: Attributes,
    children: Vec<ViewNode>,
    events: Vec<EventBinding>,
}

#[derive(Deserialize)]
struct ElementRepr {
    tag_name: String,
    #[serde(default)]
    attributes: Attributes,
    #[serde(default)]
    children: Vec<ViewNode>,
    #[serde(default)]
    events: Vec<EventBinding>,
}

impl TryFrom<ElementRepr> for Element {
    type Error = Error;

    fn try_from(repr: ElementRepr) -> Result<Self> {
        let mut element = Element::new(repr.tag_name)?;
        element.attributes = repr.attributes;
        element.children = repr.children;
        element.events = repr
            .events
            .into_iter()
            .map(|e| EventBinding::new(e.name, e.handler_id))
            .collect();
        Ok(element)
    }
}

impl Element {
    /// Create an element. A blank tag name is rejected.
    pub fn new(tag_name: impl Into<String>) -> Result<Self> {
        let tag_name = tag_name.into();
        if tag_name.trim().is_empty() {
            return Err(Error::configuration("element node without a tag name"));
        }
        Ok(Self {
            tag_name,
            attributes: Attributes::new(),
            children: Vec::new(),
            events: Vec::new(),
        })
    }

    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name, value);
        self
    }

    #[must_use]
    pub fn child(mut self, node: impl Into<ViewNode>) -> Self {
        self.children.push(node.into());
        self
    }

    #[must_use]
    pub fn children_from(mut self, nodes: impl IntoIterator<Item = ViewNode>) -> Self {
        self.children.extend(nodes);
        self
    }

    #[must_use]
    pub fn on(mut self, event: impl Into<String>, handler_id: u64) -> Self {
        self.events.push(EventBinding::new(event, handler_id));
        self
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag_name.eq_ignore_ascii_case(tag)
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn children(&self) -> &[ViewNode] {
        &self.children
    }

    pub fn events(&self) -> &[EventBinding] {
        &self.events
    }

    /// First binding for the given event kind
    pub fn event(&self, kind: &str) -> Option<&EventBinding> {
        self.events
            .iter()
            .find(|binding| binding.name.eq_ignore_ascii_case(kind))
    }

    pub fn is_focusable(&self) -> bool {
        self.attributes.flag(ATTR_FOCUSABLE)
    }

    pub fn focus_key(&self) -> Option<&str> {
        self.attributes.get(ATTR_FOCUS_KEY)
    }

    /// Depth-first, pre-order walk over descendant elements (self excluded)
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// Clone of this element with every descendant element matching
    /// `predicate` removed, along with its subtree.
    #[must_use]
    pub fn without_descendants<F>(&self, predicate: F) -> Element
    where
        F: Fn(&Element) -> bool + Copy,
    {
        let children = self
            .children
            .iter()
            .filter_map(|child| match child {
                ViewNode::Element(element) if predicate(element) => None,
                ViewNode::Element(element) => {
                    Some(ViewNode::Element(element.without_descendants(predicate)))
                }
                text => Some(text.clone()),
            })
            .collect();
        Element {
            tag_name: self.tag_name.clone(),
            attributes: self.attributes.clone(),
            children,
            events: self.events.clone(),
        }
    }

    pub fn describe(&self) -> String {
        match self.focus_key() {
            Some(key) => format!("<{} {}=\"{}\">", self.tag_name, ATTR_FOCUS_KEY, key),
            None => format!("<{}>", self.tag_name),
        }
    }
}

pub struct Descendants<'a> {
    stack: Vec<&'a ViewNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            if let ViewNode::Element(element) = node {
                self.stack.extend(element.children.iter().rev());
                return Some(element);
            }
        }
        None
    }
}
