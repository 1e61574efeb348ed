use crate::pipeline::{Middleware, Next, TranslationContext};
use crate::renderable::RenderableRef;
use crate::widgets::{Field, FieldKind};
use ravel_core::{Element, Result, ViewNode, ATTR_FOCUSED, ATTR_VALUE};
use std::sync::Arc;

/// Focusable `button` and `input` elements.
///
/// A field is drawn focused when the node says so itself or when its focus
/// key matches the key the host passed into this translation pass.
#[derive(Debug, Default)]
pub struct FocusableMiddleware;

fn field_kind(element: &Element) -> Option<FieldKind> {
    if element.is_tag("button") {
        Some(FieldKind::Button)
    } else if element.is_tag("input") || element.is_tag("textarea") {
        Some(FieldKind::Input)
    } else {
        None
    }
}

/// Whitespace-collapsed text of every text node below `element`
fn text_content(element: &Element) -> String {
    fn collect<'a>(element: &'a Element, out: &mut Vec<&'a str>) {
        for child in element.children() {
            match child {
                ViewNode::Text { content } => out.extend(content.split_whitespace()),
                ViewNode::Element(inner) => collect(inner, out),
            }
        }
    }

    let mut words = Vec::new();
    collect(element, &mut words);
    words.join(" ")
}

impl Middleware for FocusableMiddleware {
    fn name(&self) -> &'static str {
        "focusable"
    }

    fn translate(
        &self,
        cx: &mut TranslationContext<'_>,
        node: &ViewNode,
        next: Next<'_>,
    ) -> Result<RenderableRef> {
        let Some((element, kind)) = node
            .as_element()
            .filter(|e| e.is_focusable())
            .and_then(|e| field_kind(e).map(|kind| (e, kind)))
        else {
            return next.run(cx, node);
        };

        let label = match element.attributes().get(ATTR_VALUE) {
            Some(value) => value.to_string(),
            None => text_content(element),
        };
        let focused = element.attributes().flag(ATTR_FOCUSED)
            || matches!(
                (cx.focused_key(), element.focus_key()),
                (Some(current), Some(key)) if current == key.trim()
            );

        Ok(Arc::new(Field::new(kind, label, focused)))
    }
}
