use crate::renderable::{Renderable, RenderableRef};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Plain text, word-wrapped to the available width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    content: String,
    style: Style,
}

impl Text {
    /// Text taken verbatim from the view tree; control characters are
    /// stripped so content can never emit terminal escape sequences.
    pub fn new(content: impl AsRef<str>) -> Self {
        Self {
            content: escape(content.as_ref()),
            style: Style::default(),
        }
    }

    pub fn styled(content: impl AsRef<str>, style: Style) -> Self {
        Self {
            content: escape(content.as_ref()),
            style,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn style(&self) -> Style {
        self.style
    }
}

impl Renderable for Text {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        for (row, line) in wrap(&self.content, area.width)
            .iter()
            .take(area.height as usize)
            .enumerate()
        {
            buf.set_stringn(
                area.x,
                area.y + row as u16,
                line,
                area.width as usize,
                self.style,
            );
        }
    }

    fn height(&self, width: u16) -> u16 {
        u16::try_from(wrap(&self.content, width).len()).unwrap_or(u16::MAX)
    }

    fn width(&self) -> u16 {
        u16::try_from(self.content.width()).unwrap_or(u16::MAX)
    }
}

/// Empty vertical space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blank {
    lines: u16,
}

impl Blank {
    pub fn new(lines: u16) -> Self {
        Self { lines }
    }

    pub fn empty() -> RenderableRef {
        std::sync::Arc::new(Self::new(0))
    }
}

impl Renderable for Blank {
    fn render(&self, _area: Rect, _buf: &mut Buffer) {}

    fn height(&self, _width: u16) -> u16 {
        self.lines
    }

    fn width(&self) -> u16 {
        0
    }
}

/// Strip control characters; tabs become four spaces
pub fn escape(content: &str) -> String {
    let mut escaped = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '\t' => escaped.push_str("    "),
            c if c.is_control() => {}
            c => escaped.push(c),
        }
    }
    escaped
}

/// Greedy word wrap by display width. Words wider than `width` are split.
pub(crate) fn wrap(content: &str, width: u16) -> Vec<String> {
    let width = width as usize;
    if content.is_empty() || width == 0 {
        return Vec::new();
    }
    if content.width() <= width {
        return vec![content.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in content.split(' ') {
        let word_width = word.width();
        let needed = if current.is_empty() {
            word_width
        } else {
            current_width + 1 + word_width
        };

        if needed <= width {
            if !current.is_empty() {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(word);
            current_width += word_width;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }

        if word_width <= width {
            current.push_str(word);
            current_width = word_width;
            continue;
        }

        // hard split
        for c in word.chars() {
            let cw = c.width().unwrap_or(0);
            if current_width + cw > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push(c);
            current_width += cw;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
