use crate::helpers::{has_content, is_blank_text, translate_children, translate_children_flow};
use crate::pipeline::{Middleware, Next, TranslationContext};
use crate::renderable::RenderableRef;
use crate::widgets::{Blank, Columns, Flow, Panel};
use ratatui::style::{Color, Style};
use ravel_core::{Result, ViewNode, ATTR_BORDER_COLOR, ATTR_COLUMNS, ATTR_PANEL, ATTR_TITLE};
use std::sync::Arc;
use tracing::debug;

/// `data-panel` elements: a bordered box around block/inline content
#[derive(Debug, Default)]
pub struct PanelMiddleware;

impl Middleware for PanelMiddleware {
    fn name(&self) -> &'static str {
        "panel"
    }

    fn translate(
        &self,
        cx: &mut TranslationContext<'_>,
        node: &ViewNode,
        next: Next<'_>,
    ) -> Result<RenderableRef> {
        let Some(element) = node.as_element().filter(|e| e.attributes().flag(ATTR_PANEL)) else {
            return next.run(cx, node);
        };
        let attributes = element.attributes();

        let border = match attributes.parse_opt::<Color>(ATTR_BORDER_COLOR) {
            Ok(color) => color.map_or_else(Style::default, |c| Style::default().fg(c)),
            Err(e) => {
                debug!(node = %node.describe(), error = %e, "panel attributes rejected");
                return next.run(cx, node);
            }
        };

        let body: RenderableRef = if !has_content(element.children()) {
            Blank::empty()
        } else {
            Arc::new(Flow::new(translate_children_flow(cx, element.children())?))
        };

        let mut panel = Panel::new(body).with_border_style(border);
        if let Some(title) = attributes.get(ATTR_TITLE) {
            panel = panel.with_title(title);
        }
        Ok(Arc::new(panel))
    }
}

/// `data-columns` elements: every child in its own equal-width column
#[derive(Debug, Default)]
pub struct ColumnsMiddleware;

impl Middleware for ColumnsMiddleware {
    fn name(&self) -> &'static str {
        "columns"
    }

    fn translate(
        &self,
        cx: &mut TranslationContext<'_>,
        node: &ViewNode,
        next: Next<'_>,
    ) -> Result<RenderableRef> {
        let Some(element) = node.as_element().filter(|e| e.attributes().flag(ATTR_COLUMNS)) else {
            return next.run(cx, node);
        };
        // indentation between columns is not a column of its own
        let children: Vec<ViewNode> = element
            .children()
            .iter()
            .filter(|child| !is_blank_text(child))
            .cloned()
            .collect();
        Ok(Arc::new(Columns::new(translate_children(cx, &children)?)))
    }
}
