use crate::renderable::{Renderable, RenderableRef};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Widget};
use unicode_width::UnicodeWidthStr;

/// Bordered box around a body
#[derive(Debug, Clone)]
pub struct Panel {
    body: RenderableRef,
    title: Option<String>,
    border_style: Style,
}

impl Panel {
    pub fn new(body: RenderableRef) -> Self {
        Self {
            body,
            title: None,
            border_style: Style::default(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(super::text::escape(&title.into()));
        self
    }

    #[must_use]
    pub fn with_border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }
}

impl Renderable for Panel {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        let mut block = Block::bordered().border_style(self.border_style);
        if let Some(title) = &self.title {
            block = block.title(Line::from(format!(" {title} ")));
        }
        let inner = block.inner(area);
        block.render(area, buf);
        self.body.render(inner, buf);
    }

    fn height(&self, width: u16) -> u16 {
        self.body.height(width.saturating_sub(2)).saturating_add(2)
    }

    fn width(&self) -> u16 {
        let title = self.title.as_deref().map_or(0, |t| t.width() + 2);
        let title = u16::try_from(title).unwrap_or(u16::MAX);
        self.body.width().max(title).saturating_add(2)
    }
}
