//! Scrollable containers with an optional scrollbar marker descendant.
//!
//! Validation runs before anything is translated and is all-or-nothing:
//! 1. at most one descendant carries the scrollbar marker
//! 2. container geometry parses (`itemsCount`, `offset`, `pageSize` as
//!    non-negative integers, `embeddedMode` as a boolean)
//! 3. a present scrollbar has single-character track/thumb glyphs, valid
//!    colours and a non-negative minimum thumb height
//!
//! Any failure, including a failed child translation, hands the untouched
//! node to `next`.

use crate::helpers::translate_children;
use crate::pipeline::{Middleware, Next, TranslationContext};
use crate::renderable::RenderableRef;
use crate::widgets::{ScrollGeometry, ScrollableView, Scrollbar, ScrollbarStyle, Stack};
use ratatui::style::Color;
use ravel_core::{
    Attributes, Element, Error, Result, ViewNode, ATTR_EMBEDDED_MODE, ATTR_ITEMS_COUNT,
    ATTR_MIN_THUMB_HEIGHT, ATTR_OFFSET, ATTR_PAGE_SIZE, ATTR_SCROLLABLE, ATTR_SCROLLBAR,
    ATTR_THUMB_CHAR, ATTR_THUMB_COLOR, ATTR_TRACK_CHAR, ATTR_TRACK_COLOR,
};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Default)]
pub struct ScrollableMiddleware;

/// Everything a scrollable needs, parsed once up front
#[derive(Debug)]
struct Validated {
    geometry: ScrollGeometry,
    embedded: bool,
    scrollbar: Option<ScrollbarStyle>,
}

fn is_scrollable(element: &Element) -> bool {
    element.is_tag("scrollable") || element.attributes().flag(ATTR_SCROLLABLE)
}

fn is_scrollbar(element: &Element) -> bool {
    element.attributes().flag(ATTR_SCROLLBAR)
}

fn parse_geometry(attributes: &Attributes) -> Result<(ScrollGeometry, bool)> {
    let geometry = ScrollGeometry {
        items_count: attributes.parse(ATTR_ITEMS_COUNT)?,
        offset: attributes.parse(ATTR_OFFSET)?,
        page_size: attributes.parse(ATTR_PAGE_SIZE)?,
    };
    Ok((geometry, attributes.parse_bool(ATTR_EMBEDDED_MODE)?))
}

fn parse_scrollbar(attributes: &Attributes) -> Result<ScrollbarStyle> {
    Ok(ScrollbarStyle {
        track_char: attributes.parse_char(ATTR_TRACK_CHAR)?,
        thumb_char: attributes.parse_char(ATTR_THUMB_CHAR)?,
        track_color: attributes.parse::<Color>(ATTR_TRACK_COLOR)?,
        thumb_color: attributes.parse::<Color>(ATTR_THUMB_COLOR)?,
        min_thumb_height: attributes.parse(ATTR_MIN_THUMB_HEIGHT)?,
    })
}

fn validate(element: &Element) -> Result<Validated> {
    let mut markers = element.descendants().filter(|d| is_scrollbar(d));
    let marker = markers.next();
    if markers.next().is_some() {
        return Err(Error::translation(format!(
            "{} has more than one scrollbar",
            element.describe()
        )));
    }

    let (geometry, embedded) = parse_geometry(element.attributes())?;
    let scrollbar = marker
        .map(|marker| parse_scrollbar(marker.attributes()))
        .transpose()?;

    Ok(Validated {
        geometry,
        embedded,
        scrollbar,
    })
}

impl Middleware for ScrollableMiddleware {
    fn name(&self) -> &'static str {
        "scrollable"
    }

    fn translate(
        &self,
        cx: &mut TranslationContext<'_>,
        node: &ViewNode,
        next: Next<'_>,
    ) -> Result<RenderableRef> {
        let Some(element) = node.as_element().filter(|e| is_scrollable(e)) else {
            return next.run(cx, node);
        };

        let validated = match validate(element) {
            Ok(validated) => validated,
            Err(e) => {
                debug!(node = %node.describe(), error = %e, "scrollable rejected");
                return next.run(cx, node);
            }
        };

        let checkpoint = cx.animated().checkpoint();
        let content = match &validated.scrollbar {
            Some(_) => {
                let content = element.without_descendants(is_scrollbar);
                translate_children(cx, content.children())
            }
            None => translate_children(cx, element.children()),
        };
        let content = match content {
            Ok(items) => Stack::new(items),
            Err(e) if e.is_cancelled() => return Err(e),
            Err(e) => {
                debug!(node = %node.describe(), error = %e, "scrollable content failed");
                cx.animated().rollback(checkpoint);
                return next.run(cx, node);
            }
        };

        Ok(match validated.scrollbar {
            Some(style) => Arc::new(ScrollableView::new(
                Arc::new(content),
                Scrollbar::new(validated.geometry, style),
                validated.embedded,
            )),
            None => Arc::new(content),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::{SpinnerMiddleware, TextNodeMiddleware};
    use crate::pipeline::Translator;
    use crate::registry::AnimatedRegistry;
    use crate::testing::render_lines;
    use ravel_core::ATTR_SPINNER;
    use std::sync::Mutex;

    /// Records every node it receives and answers with a marker text
    #[derive(Debug, Default)]
    struct Recorder {
        seen: Arc<Mutex<Vec<ViewNode>>>,
    }

    impl Middleware for Recorder {
        fn name(&self) -> &'static str {
            "recorder"
        }

        fn translate(
            &self,
            _cx: &mut TranslationContext<'_>,
            node: &ViewNode,
            _next: Next<'_>,
        ) -> Result<RenderableRef> {
            self.seen.lock().unwrap().push(node.clone());
            Ok(Arc::new(crate::widgets::Text::new("recorded")))
        }
    }

    /// Fails on `<broken>`, delegates everything else
    #[derive(Debug)]
    struct Breaker;

    impl Middleware for Breaker {
        fn name(&self) -> &'static str {
            "breaker"
        }

        fn translate(
            &self,
            cx: &mut TranslationContext<'_>,
            node: &ViewNode,
            next: Next<'_>,
        ) -> Result<RenderableRef> {
            match node.as_element() {
                Some(element) if element.is_tag("broken") => Err(Error::translation("broken")),
                _ => next.run(cx, node),
            }
        }
    }

    fn chain() -> (Translator, Arc<Mutex<Vec<ViewNode>>>) {
        let recorder = Recorder::default();
        let seen = recorder.seen.clone();
        let translator = Translator::new(vec![
            Box::new(TextNodeMiddleware),
            Box::new(Breaker),
            Box::new(SpinnerMiddleware),
            Box::new(ScrollableMiddleware),
            Box::new(recorder),
        ])
        .unwrap();
        (translator, seen)
    }

    fn container() -> Element {
        Element::new("scrollable")
            .unwrap()
            .attr(ATTR_ITEMS_COUNT, "10")
            .attr(ATTR_OFFSET, "0")
            .attr(ATTR_PAGE_SIZE, "5")
            .attr(ATTR_EMBEDDED_MODE, "true")
    }

    fn scrollbar() -> Element {
        Element::new("div")
            .unwrap()
            .attr(ATTR_SCROLLBAR, "true")
            .attr(ATTR_TRACK_CHAR, ".")
            .attr(ATTR_THUMB_CHAR, "#")
            .attr(ATTR_TRACK_COLOR, "darkgray")
            .attr(ATTR_THUMB_COLOR, "white")
            .attr(ATTR_MIN_THUMB_HEIGHT, "1")
    }

    fn items(count: usize) -> Vec<ViewNode> {
        (0..count)
            .map(|i| ViewNode::text(format!("item {i}")))
            .collect()
    }

    #[test]
    fn test_without_scrollbar_is_a_plain_stack() {
        let (translator, seen) = chain();
        let node = container().children_from(items(2));
        let rendered = translator
            .translate(&node.into(), &mut AnimatedRegistry::new())
            .unwrap();

        assert!(seen.lock().unwrap().is_empty());
        assert!(format!("{rendered:?}").starts_with("Stack"));
        assert_eq!(render_lines(rendered.as_ref(), 10), vec!["item 0", "item 1"]);
    }

    #[test]
    fn test_invalid_offset_falls_through_unmodified() {
        let (translator, seen) = chain();
        let node: ViewNode = container()
            .attr(ATTR_OFFSET, "invalid")
            .child(scrollbar())
            .into();
        translator
            .translate(&node, &mut AnimatedRegistry::new())
            .unwrap();
        assert_eq!(seen.lock().unwrap().as_slice(), &[node]);
    }

    #[test]
    fn test_two_scrollbars_fall_through() {
        let (translator, seen) = chain();
        let node: ViewNode = container().child(scrollbar()).child(scrollbar()).into();
        translator
            .translate(&node, &mut AnimatedRegistry::new())
            .unwrap();
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_scrollbar_glyph_falls_through() {
        let (translator, seen) = chain();
        let node: ViewNode = container()
            .child(scrollbar().attr(ATTR_THUMB_CHAR, "##"))
            .into();
        translator
            .translate(&node, &mut AnimatedRegistry::new())
            .unwrap();
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_valid_scrollbar_composes_view() {
        let (translator, seen) = chain();
        let node = container()
            .attr(ATTR_EMBEDDED_MODE, "false")
            .children_from(items(4))
            .child(scrollbar());
        let rendered = translator
            .translate(&node.into(), &mut AnimatedRegistry::new())
            .unwrap();

        assert!(seen.lock().unwrap().is_empty());
        assert!(format!("{rendered:?}").starts_with("ScrollableView"));
        // 4 rows, 10 items, page of 5 at offset 0: thumb covers the top two rows
        assert_eq!(
            render_lines(rendered.as_ref(), 8),
            vec!["item 0 #", "item 1 #", "item 2 .", "item 3 ."]
        );
    }

    #[test]
    fn test_failed_content_rolls_back_animations() {
        let (translator, seen) = chain();
        let node = container()
            .child(Element::new("div").unwrap().attr(ATTR_SPINNER, "true"))
            .child(Element::new("broken").unwrap());
        let mut registry = AnimatedRegistry::new();
        translator.translate(&node.into(), &mut registry).unwrap();

        assert_eq!(seen.lock().unwrap().len(), 1);
        assert!(registry.is_empty());
    }
}
