use crate::pipeline::{Middleware, Next, TranslationContext};
use crate::renderable::RenderableRef;
use crate::widgets::{Blank, Text};
use ravel_core::{Result, ViewNode};
use std::sync::Arc;

/// Bare text nodes reached directly through the chain
#[derive(Debug, Default)]
pub struct TextNodeMiddleware;

impl Middleware for TextNodeMiddleware {
    fn name(&self) -> &'static str {
        "text-node"
    }

    fn translate(
        &self,
        cx: &mut TranslationContext<'_>,
        node: &ViewNode,
        next: Next<'_>,
    ) -> Result<RenderableRef> {
        match node {
            ViewNode::Text { content } => Ok(Arc::new(Text::new(content))),
            ViewNode::Element(_) => next.run(cx, node),
        }
    }
}

/// `<br>` becomes one empty row
#[derive(Debug, Default)]
pub struct LineBreakMiddleware;

impl Middleware for LineBreakMiddleware {
    fn name(&self) -> &'static str {
        "line-break"
    }

    fn translate(
        &self,
        cx: &mut TranslationContext<'_>,
        node: &ViewNode,
        next: Next<'_>,
    ) -> Result<RenderableRef> {
        match node.as_element() {
            Some(element) if element.is_tag("br") => Ok(Arc::new(Blank::new(1))),
            _ => next.run(cx, node),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Translator;
    use crate::registry::AnimatedRegistry;
    use crate::renderable::Renderable;
    use crate::testing::render_lines;
    use ravel_core::Element;

    fn chain() -> Translator {
        Translator::new(vec![Box::new(TextNodeMiddleware), Box::new(LineBreakMiddleware)]).unwrap()
    }

    #[test]
    fn test_root_text_is_escaped() {
        let rendered = chain()
            .translate(&ViewNode::text("ok\u{1b}[2J"), &mut AnimatedRegistry::new())
            .unwrap();
        assert_eq!(render_lines(rendered.as_ref(), 12), vec!["ok[2J"]);
    }

    #[test]
    fn test_line_break_is_one_row() {
        let rendered = chain()
            .translate(&Element::new("br").unwrap().into(), &mut AnimatedRegistry::new())
            .unwrap();
        assert_eq!(rendered.height(10), 1);
    }
}
