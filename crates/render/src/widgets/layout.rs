//! Composite renderables: vertical stacks, inline runs, block/inline flow and
//! equal-width columns.

use crate::renderable::{Renderable, RenderableRef};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

/// Children one below another, each at full width
#[derive(Debug, Clone, Default)]
pub struct Stack {
    items: Vec<RenderableRef>,
}

impl Stack {
    pub fn new(items: Vec<RenderableRef>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[RenderableRef] {
        &self.items
    }
}

impl Renderable for Stack {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        let mut y = area.y;
        for item in &self.items {
            if y >= area.bottom() {
                break;
            }
            let height = item.height(area.width).min(area.bottom() - y);
            item.render(Rect::new(area.x, y, area.width, height), buf);
            y += height;
        }
    }

    fn height(&self, width: u16) -> u16 {
        self.items
            .iter()
            .fold(0u16, |acc, item| acc.saturating_add(item.height(width)))
    }

    fn width(&self) -> u16 {
        self.items.iter().map(|i| i.width()).max().unwrap_or(0)
    }
}

/// Children side by side at their natural widths, clipped at the right edge
#[derive(Debug, Clone, Default)]
pub struct Inline {
    items: Vec<RenderableRef>,
    style: Style,
}

impl Inline {
    pub fn new(items: Vec<RenderableRef>) -> Self {
        Self {
            items,
            style: Style::default(),
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn items(&self) -> &[RenderableRef] {
        &self.items
    }

    /// Column width granted to each item when laid out in `width` columns,
    /// with the rows it needs at its natural width. A clipped item keeps
    /// those rows and is cut at the edge instead of wrapping.
    fn placements(&self, width: u16) -> impl Iterator<Item = (&RenderableRef, u16, u16)> {
        let mut remaining = width;
        self.items.iter().filter_map(move |item| {
            let natural = item.width();
            let w = natural.min(remaining);
            remaining -= w;
            (w > 0).then(|| (item, w, item.height(natural)))
        })
    }
}

impl Renderable for Inline {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        let mut x = area.x;
        for (item, w, rows) in self.placements(area.width) {
            let height = rows.min(area.height);
            let natural = item.width();
            if w < natural {
                render_clipped(item.as_ref(), Rect::new(x, area.y, w, height), natural, buf);
            } else {
                item.render(Rect::new(x, area.y, w, height), buf);
            }
            x += w;
        }
        if self.style != Style::default() && x > area.x {
            buf.set_style(Rect::new(area.x, area.y, x - area.x, area.height), self.style);
        }
    }

    fn height(&self, width: u16) -> u16 {
        self.placements(width)
            .map(|(_, _, rows)| rows)
            .max()
            .unwrap_or(0)
    }

    fn width(&self) -> u16 {
        self.items
            .iter()
            .fold(0u16, |acc, item| acc.saturating_add(item.width()))
    }
}

/// Lay `item` out at its natural width and copy only the cells inside `area`
fn render_clipped(item: &dyn Renderable, area: Rect, natural: u16, buf: &mut Buffer) {
    let full = Rect::new(0, 0, natural, area.height);
    let mut scratch = Buffer::empty(full);
    item.render(full, &mut scratch);
    for dy in 0..area.height {
        for dx in 0..area.width {
            buf[(area.x + dx, area.y + dy)] = scratch[(dx, dy)].clone();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Block,
    Inline,
}

#[derive(Debug, Clone)]
pub struct FlowItem {
    pub renderable: RenderableRef,
    pub placement: Placement,
}

impl FlowItem {
    pub fn block(renderable: RenderableRef) -> Self {
        Self {
            renderable,
            placement: Placement::Block,
        }
    }

    pub fn inline(renderable: RenderableRef) -> Self {
        Self {
            renderable,
            placement: Placement::Inline,
        }
    }
}

/// Block items take their own rows; consecutive inline items share a row.
#[derive(Debug, Clone)]
pub struct Flow {
    rows: Stack,
}

impl Flow {
    pub fn new(items: Vec<FlowItem>) -> Self {
        let mut rows: Vec<RenderableRef> = Vec::new();
        let mut run: Vec<RenderableRef> = Vec::new();

        for item in items {
            match item.placement {
                Placement::Inline => run.push(item.renderable),
                Placement::Block => {
                    flush_run(&mut run, &mut rows);
                    rows.push(item.renderable);
                }
            }
        }
        flush_run(&mut run, &mut rows);

        Self {
            rows: Stack::new(rows),
        }
    }

    pub fn rows(&self) -> &[RenderableRef] {
        self.rows.items()
    }
}

fn flush_run(run: &mut Vec<RenderableRef>, rows: &mut Vec<RenderableRef>) {
    match run.len() {
        0 => {}
        1 => rows.extend(run.drain(..)),
        _ => rows.push(std::sync::Arc::new(Inline::new(std::mem::take(run)))),
    }
}

impl Renderable for Flow {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        self.rows.render(area, buf);
    }

    fn height(&self, width: u16) -> u16 {
        self.rows.height(width)
    }

    fn width(&self) -> u16 {
        self.rows.width()
    }
}

/// Equal-width columns; the last column absorbs the remainder
#[derive(Debug, Clone, Default)]
pub struct Columns {
    items: Vec<RenderableRef>,
}

impl Columns {
    pub fn new(items: Vec<RenderableRef>) -> Self {
        Self { items }
    }

    fn column_widths(&self, width: u16) -> Vec<u16> {
        let count = self.items.len() as u16;
        if count == 0 {
            return Vec::new();
        }
        let base = width / count;
        let mut widths = vec![base; self.items.len()];
        if let Some(last) = widths.last_mut() {
            *last += width - base * count;
        }
        widths
    }
}

impl Renderable for Columns {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        let mut x = area.x;
        for (item, w) in self.items.iter().zip(self.column_widths(area.width)) {
            item.render(Rect::new(x, area.y, w, area.height), buf);
            x += w;
        }
    }

    fn height(&self, width: u16) -> u16 {
        self.items
            .iter()
            .zip(self.column_widths(width))
            .map(|(item, w)| item.height(w))
            .max()
            .unwrap_or(0)
    }

    fn width(&self) -> u16 {
        self.items
            .iter()
            .fold(0u16, |acc, item| acc.saturating_add(item.width()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::render_lines;
    use crate::widgets::Text;
    use std::sync::Arc;

    fn text(s: &str) -> RenderableRef {
        Arc::new(Text::new(s))
    }

    #[test]
    fn test_stack_renders_rows_in_order() {
        let stack = Stack::new(vec![text("one"), text("two")]);
        assert_eq!(stack.height(10), 2);
        assert_eq!(render_lines(&stack, 10), vec!["one", "two"]);
    }

    #[test]
    fn test_inline_places_items_side_by_side() {
        let inline = Inline::new(vec![text("Hello "), text("world")]);
        assert_eq!(inline.width(), 11);
        assert_eq!(render_lines(&inline, 20), vec!["Hello world"]);
        // clipped at the right edge
        assert_eq!(render_lines(&inline, 8), vec!["Hello wo"]);
    }

    #[test]
    fn test_clipped_item_is_cut_not_wrapped() {
        let inline = Inline::new(vec![text("foo bar"), text("!")]);
        assert_eq!(inline.height(5), 1);
        assert_eq!(render_lines(&inline, 5), vec!["foo b"]);
    }

    #[test]
    fn test_flow_groups_inline_runs() {
        let flow = Flow::new(vec![
            FlowItem::inline(text("a ")),
            FlowItem::inline(text("b")),
            FlowItem::block(text("block")),
            FlowItem::inline(text("c")),
        ]);
        assert_eq!(flow.rows().len(), 3);
        assert_eq!(render_lines(&flow, 10), vec!["a b", "block", "c"]);
    }

    #[test]
    fn test_columns_split_width() {
        let columns = Columns::new(vec![text("left"), text("right")]);
        assert_eq!(columns.column_widths(11), vec![5, 6]);
        assert_eq!(render_lines(&columns, 11), vec!["left right"]);
    }
}
