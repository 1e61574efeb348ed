use crate::helpers::{has_content, is_block_node, translate_children_flow};
use crate::pipeline::{Middleware, Next, TranslationContext};
use crate::renderable::RenderableRef;
use crate::widgets::{Blank, Flow};
use ravel_core::{Element, Result, ViewNode};
use std::sync::Arc;

fn flow(cx: &mut TranslationContext<'_>, element: &Element) -> Result<RenderableRef> {
    if !has_content(element.children()) {
        return Ok(Blank::empty());
    }
    Ok(Arc::new(Flow::new(translate_children_flow(cx, element.children())?)))
}

/// Block-level elements (`div`, `p`, `section`, `li`, ...)
#[derive(Debug, Default)]
pub struct BlockMiddleware;

impl Middleware for BlockMiddleware {
    fn name(&self) -> &'static str {
        "block"
    }

    fn translate(
        &self,
        cx: &mut TranslationContext<'_>,
        node: &ViewNode,
        next: Next<'_>,
    ) -> Result<RenderableRef> {
        match node.as_element() {
            Some(element) if is_block_node(node) => flow(cx, element),
            _ => next.run(cx, node),
        }
    }
}

/// Any element nobody else claimed; its tag is transparent.
#[derive(Debug, Default)]
pub struct FallbackMiddleware;

impl Middleware for FallbackMiddleware {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn translate(
        &self,
        cx: &mut TranslationContext<'_>,
        node: &ViewNode,
        next: Next<'_>,
    ) -> Result<RenderableRef> {
        match node.as_element() {
            Some(element) => flow(cx, element),
            None => next.run(cx, node),
        }
    }
}
