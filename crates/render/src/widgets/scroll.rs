//! Scrollable content with a character-drawn scrollbar.
//!
//! The component framework already renders only the visible window of items;
//! the geometry here only positions the thumb so it reflects where that window
//! sits within the full item list.

use crate::renderable::{Renderable, RenderableRef};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollGeometry {
    pub items_count: u32,
    pub offset: u32,
    pub page_size: u32,
}

impl ScrollGeometry {
    /// Thumb start row and length for a track of `track` rows
    pub fn thumb(&self, track: u16, min_thumb: u16) -> (u16, u16) {
        if track == 0 {
            return (0, 0);
        }
        let min_thumb = min_thumb.clamp(1, track);
        if self.items_count == 0 || self.page_size >= self.items_count {
            return (0, track);
        }

        let track_len = u64::from(track);
        let proportional = (track_len * u64::from(self.page_size)) / u64::from(self.items_count);
        let thumb_len = (proportional as u16).clamp(min_thumb, track);

        let max_offset = u64::from(self.items_count - self.page_size);
        let offset = u64::from(self.offset).min(max_offset);
        let free = u64::from(track - thumb_len);
        let start = (free * offset + max_offset / 2) / max_offset;

        (start as u16, thumb_len)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollbarStyle {
    pub track_char: char,
    pub thumb_char: char,
    pub track_color: Color,
    pub thumb_color: Color,
    pub min_thumb_height: u16,
}

impl Default for ScrollbarStyle {
    fn default() -> Self {
        Self {
            track_char: '│',
            thumb_char: '┃',
            track_color: Color::DarkGray,
            thumb_color: Color::White,
            min_thumb_height: 1,
        }
    }
}

/// One-column vertical scrollbar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scrollbar {
    geometry: ScrollGeometry,
    style: ScrollbarStyle,
}

impl Scrollbar {
    pub fn new(geometry: ScrollGeometry, style: ScrollbarStyle) -> Self {
        Self { geometry, style }
    }

    pub fn geometry(&self) -> ScrollGeometry {
        self.geometry
    }
}

impl Renderable for Scrollbar {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let (start, len) = self.geometry.thumb(area.height, self.style.min_thumb_height);
        let track = Style::default().fg(self.style.track_color);
        let thumb = Style::default().fg(self.style.thumb_color);
        let mut track_symbol = [0u8; 4];
        let mut thumb_symbol = [0u8; 4];
        let track_symbol: &str = self.style.track_char.encode_utf8(&mut track_symbol);
        let thumb_symbol: &str = self.style.thumb_char.encode_utf8(&mut thumb_symbol);

        for row in 0..area.height {
            let (symbol, style) = if row >= start && row < start + len {
                (thumb_symbol, thumb)
            } else {
                (track_symbol, track)
            };
            buf.set_string(area.x, area.y + row, symbol, style);
        }
    }

    fn height(&self, _width: u16) -> u16 {
        1
    }

    fn width(&self) -> u16 {
        1
    }
}

/// Content composed with a scrollbar in its rightmost column.
///
/// In embedded mode the scrollbar is drawn over the content's last column;
/// otherwise the content is narrowed by one column to make room.
#[derive(Debug, Clone)]
pub struct ScrollableView {
    content: RenderableRef,
    scrollbar: Scrollbar,
    embedded: bool,
}

impl ScrollableView {
    pub fn new(content: RenderableRef, scrollbar: Scrollbar, embedded: bool) -> Self {
        Self {
            content,
            scrollbar,
            embedded,
        }
    }

    pub fn scrollbar(&self) -> &Scrollbar {
        &self.scrollbar
    }

    pub fn is_embedded(&self) -> bool {
        self.embedded
    }

    fn content_width(&self, width: u16) -> u16 {
        if self.embedded {
            width
        } else {
            width.saturating_sub(1)
        }
    }
}

impl Renderable for ScrollableView {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let content_area = Rect {
            width: self.content_width(area.width),
            ..area
        };
        self.content.render(content_area, buf);

        let bar_area = Rect::new(area.right() - 1, area.y, 1, area.height);
        self.scrollbar.render(bar_area, buf);
    }

    fn height(&self, width: u16) -> u16 {
        self.content.height(self.content_width(width)).max(1)
    }

    fn width(&self) -> u16 {
        if self.embedded {
            self.content.width().max(1)
        } else {
            self.content.width().saturating_add(1)
        }
    }
}
