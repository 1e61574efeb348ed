//! Shared child conversion for middleware authors.
//!
//! Two strategies with deliberately different failure policies:
//! - [`translate_children`] is all-or-nothing: one failed child fails the
//!   whole conversion and no partial list is returned.
//! - [`translate_children_flow`] skips children that fail and only fails when
//!   nothing at all could be translated.

use crate::pipeline::TranslationContext;
use crate::renderable::RenderableRef;
use crate::widgets::{FlowItem, Placement, Text};
use ravel_core::{
    Error, Result, ViewNode, ATTR_CODE_PAYLOAD, ATTR_COLUMNS, ATTR_DISPLAY, ATTR_PANEL,
    ATTR_SCROLLABLE,
};
use std::sync::Arc;
use tracing::debug;

const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "div", "dl", "fieldset", "figure",
    "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav",
    "ol", "p", "panel", "pre", "scrollable", "section", "table", "ul",
];

/// Collapse whitespace in a text child.
///
/// Internal runs become one space. A leading run survives as a single space
/// only when the node is not the first sibling, a trailing run only when it
/// is not the last. Returns `None` when nothing is left to render.
pub fn normalize_text(content: &str, index: usize, sibling_count: usize) -> Option<String> {
    let is_first = index == 0;
    let is_last = index + 1 >= sibling_count;
    let has_leading = content.starts_with(char::is_whitespace);
    let has_trailing = content.ends_with(char::is_whitespace);

    let collapsed = content.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return (has_leading && !is_first && !is_last).then(|| " ".to_string());
    }

    let mut normalized = String::with_capacity(collapsed.len() + 2);
    if has_leading && !is_first {
        normalized.push(' ');
    }
    normalized.push_str(&collapsed);
    if has_trailing && !is_last {
        normalized.push(' ');
    }
    Some(normalized)
}

/// Text made only of whitespace, such as indentation between elements
pub fn is_blank_text(node: &ViewNode) -> bool {
    match node {
        ViewNode::Text { content } => content.trim().is_empty(),
        ViewNode::Element(_) => false,
    }
}

/// Whether any child is an element or carries visible text
pub fn has_content(children: &[ViewNode]) -> bool {
    children.iter().any(|child| !is_blank_text(child))
}

/// Whether a node occupies its own rows rather than flowing inline
pub fn is_block_node(node: &ViewNode) -> bool {
    let Some(element) = node.as_element() else {
        return false;
    };
    let attributes = element.attributes();
    if let Some(display) = attributes.get(ATTR_DISPLAY) {
        return !display.trim().eq_ignore_ascii_case("inline");
    }
    attributes.flag(ATTR_PANEL)
        || attributes.flag(ATTR_SCROLLABLE)
        || attributes.flag(ATTR_COLUMNS)
        || attributes.contains(ATTR_CODE_PAYLOAD)
        || BLOCK_TAGS.iter().any(|tag| element.is_tag(tag))
}

/// Convert children into a flat list, failing as soon as one child fails
pub fn translate_children(
    cx: &mut TranslationContext<'_>,
    children: &[ViewNode],
) -> Result<Vec<RenderableRef>> {
    let mut items = Vec::with_capacity(children.len());
    for (index, child) in children.iter().enumerate() {
        match child {
            ViewNode::Text { content } => {
                if let Some(text) = normalize_text(content, index, children.len()) {
                    items.push(Arc::new(Text::new(text)) as RenderableRef);
                }
            }
            ViewNode::Element(_) => items.push(cx.translate(child)?),
        }
    }
    Ok(items)
}

/// Convert children into block/inline flow items, skipping children that
/// fail to translate. Fails only when no item could be produced.
///
/// Whitespace next to a block child is dropped so indentation between
/// blocks does not become an empty row.
pub fn translate_children_flow(
    cx: &mut TranslationContext<'_>,
    children: &[ViewNode],
) -> Result<Vec<FlowItem>> {
    let mut items = Vec::with_capacity(children.len());
    for (index, child) in children.iter().enumerate() {
        match child {
            ViewNode::Text { .. } if is_blank_text(child) && touches_block(children, index) => {}
            ViewNode::Text { content } => {
                if let Some(text) = normalize_text(content, index, children.len()) {
                    items.push(FlowItem::inline(Arc::new(Text::new(text))));
                }
            }
            ViewNode::Element(_) => match cx.translate(child) {
                Ok(renderable) => {
                    let placement = if is_block_node(child) {
                        Placement::Block
                    } else {
                        Placement::Inline
                    };
                    items.push(FlowItem {
                        renderable,
                        placement,
                    });
                }
                Err(e) if e.is_cancelled() => return Err(e),
                Err(e) => {
                    debug!(
                        child = %child.describe(),
                        error = %e,
                        "skipping child that failed to translate"
                    );
                }
            },
        }
    }

    if items.is_empty() {
        return Err(Error::translation("no child could be translated"));
    }
    Ok(items)
}

fn touches_block(children: &[ViewNode], index: usize) -> bool {
    let before = index.checked_sub(1).and_then(|i| children.get(i));
    let after = children.get(index + 1);
    before.is_some_and(is_block_node) || after.is_some_and(is_block_node)
}
