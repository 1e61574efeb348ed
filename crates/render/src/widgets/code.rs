use crate::renderable::Renderable;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ravel_core::HighlightedCode;
use unicode_width::UnicodeWidthStr;

/// Pre-highlighted code with an optional line-number gutter
#[derive(Debug, Clone)]
pub struct CodeBlock {
    lines: Vec<String>,
    show_line_numbers: bool,
    placeholder: Option<String>,
}

impl CodeBlock {
    pub fn new(code: &HighlightedCode) -> Self {
        Self {
            lines: code.lines.iter().map(|l| super::text::escape(l)).collect(),
            show_line_numbers: code.show_line_numbers,
            placeholder: code
                .placeholder_markup
                .as_deref()
                .map(|m| super::text::escape(&strip_markup(m))),
        }
    }

    fn gutter_width(&self) -> u16 {
        if !self.show_line_numbers || self.lines.is_empty() {
            return 0;
        }
        // digits + " │ "
        self.lines.len().to_string().len() as u16 + 3
    }
}

impl Renderable for CodeBlock {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        if self.lines.is_empty() {
            if let Some(placeholder) = &self.placeholder {
                let style = Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC);
                buf.set_stringn(area.x, area.y, placeholder, area.width as usize, style);
            }
            return;
        }

        let gutter = self.gutter_width().min(area.width);
        let digits = gutter.saturating_sub(3) as usize;
        let gutter_style = Style::default().fg(Color::DarkGray);

        for (index, line) in self.lines.iter().enumerate().take(area.height as usize) {
            let y = area.y + index as u16;
            if gutter > 0 {
                let number = format!("{:>digits$} │ ", index + 1);
                buf.set_stringn(area.x, y, number, gutter as usize, gutter_style);
            }
            buf.set_stringn(
                area.x + gutter,
                y,
                line,
                (area.width - gutter) as usize,
                Style::default(),
            );
        }
    }

    fn height(&self, _width: u16) -> u16 {
        if self.lines.is_empty() {
            u16::from(self.placeholder.is_some())
        } else {
            u16::try_from(self.lines.len()).unwrap_or(u16::MAX)
        }
    }

    fn width(&self) -> u16 {
        let body = if self.lines.is_empty() {
            self.placeholder.as_deref().map_or(0, UnicodeWidthStr::width)
        } else {
            self.lines.iter().map(|l| l.width()).max().unwrap_or(0)
        };
        u16::try_from(body)
            .unwrap_or(u16::MAX)
            .saturating_add(self.gutter_width())
    }
}

/// Drop `[style]` / `[/]` tags; `[[` and `]]` are literal brackets
pub fn strip_markup(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut chars = markup.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '[' if chars.peek() == Some(&'[') => {
                chars.next();
                out.push('[');
            }
            ']' if chars.peek() == Some(&']') => {
                chars.next();
                out.push(']');
            }
            '[' => {
                for inner in chars.by_ref() {
                    if inner == ']' {
                        break;
                    }
                }
            }
            c => out.push(c),
        }
    }
    out
}
