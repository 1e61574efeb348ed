use crate::helpers::translate_children;
use crate::pipeline::{Middleware, Next, TranslationContext};
use crate::renderable::RenderableRef;
use crate::widgets::Inline;
use ratatui::style::{Color, Modifier, Style};
use ravel_core::{Element, Result, ViewNode, ATTR_BACKGROUND, ATTR_FOREGROUND};
use std::sync::Arc;
use tracing::debug;

const STYLED_TAGS: &[(&str, Modifier)] = &[
    ("span", Modifier::empty()),
    ("strong", Modifier::BOLD),
    ("b", Modifier::BOLD),
    ("em", Modifier::ITALIC),
    ("i", Modifier::ITALIC),
    ("u", Modifier::UNDERLINED),
    ("code", Modifier::empty()),
];

/// Inline text elements. Children must all translate; a partially
/// rendered sentence is worse than none.
#[derive(Debug, Default)]
pub struct StyledTextMiddleware;

fn style_for(element: &Element, modifier: Modifier) -> Result<Style> {
    let attributes = element.attributes();
    let mut style = Style::default().add_modifier(modifier);
    if element.is_tag("code") {
        style = style.fg(Color::Yellow);
    }
    if let Some(fg) = attributes.parse_opt::<Color>(ATTR_FOREGROUND)? {
        style = style.fg(fg);
    }
    if let Some(bg) = attributes.parse_opt::<Color>(ATTR_BACKGROUND)? {
        style = style.bg(bg);
    }
    Ok(style)
}

impl Middleware for StyledTextMiddleware {
    fn name(&self) -> &'static str {
        "styled-text"
    }

    fn translate(
        &self,
        cx: &mut TranslationContext<'_>,
        node: &ViewNode,
        next: Next<'_>,
    ) -> Result<RenderableRef> {
        let Some((element, modifier)) = node.as_element().and_then(|e| {
            STYLED_TAGS
                .iter()
                .find(|(tag, _)| e.is_tag(tag))
                .map(|(_, modifier)| (e, *modifier))
        }) else {
            return next.run(cx, node);
        };

        let style = match style_for(element, modifier) {
            Ok(style) => style,
            Err(e) => {
                debug!(node = %node.describe(), error = %e, "text style rejected");
                return next.run(cx, node);
            }
        };

        let items = translate_children(cx, element.children())?;
        Ok(Arc::new(Inline::new(items).with_style(style)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::default_middleware;
    use crate::pipeline::Translator;
    use crate::registry::AnimatedRegistry;
    use crate::renderable::Renderable;
    use crate::testing::render_lines;
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;

    fn translate(node: Element) -> Result<RenderableRef> {
        Translator::new(default_middleware())
            .unwrap()
            .translate(&node.into(), &mut AnimatedRegistry::new())
    }

    #[test]
    fn test_nested_inline_text() {
        let node = Element::new("span")
            .unwrap()
            .child(ViewNode::text("Hello "))
            .child(Element::new("strong").unwrap().child(ViewNode::text("world")));
        let rendered = translate(node).unwrap();
        assert_eq!(render_lines(rendered.as_ref(), 20), vec!["Hello world"]);
    }

    #[test]
    fn test_colours_apply_to_cells() {
        let node = Element::new("strong")
            .unwrap()
            .attr(ATTR_FOREGROUND, "red")
            .child(ViewNode::text("hot"));
        let rendered = translate(node).unwrap();

        let area = Rect::new(0, 0, 5, 1);
        let mut buf = Buffer::empty(area);
        rendered.render(area, &mut buf);
        let cell = &buf[(0, 0)];
        assert_eq!(cell.fg, Color::Red);
        assert!(cell.modifier.contains(Modifier::BOLD));
    }
}
