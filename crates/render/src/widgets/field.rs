use crate::renderable::Renderable;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Button,
    Input,
}

/// Single-line interactive control: `[ label ]` buttons and `value_` inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    kind: FieldKind,
    label: String,
    focused: bool,
}

impl Field {
    pub fn new(kind: FieldKind, label: impl AsRef<str>, focused: bool) -> Self {
        Self {
            kind,
            label: super::text::escape(label.as_ref()),
            focused,
        }
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    fn display(&self) -> String {
        match self.kind {
            FieldKind::Button => format!("[ {} ]", self.label),
            FieldKind::Input if self.focused => format!("{}▏", self.label),
            FieldKind::Input => self.label.clone(),
        }
    }

    fn style(&self) -> Style {
        match (self.kind, self.focused) {
            (FieldKind::Button, true) => Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::REVERSED | Modifier::BOLD),
            (FieldKind::Button, false) => Style::default().fg(Color::Cyan),
            (FieldKind::Input, true) => Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::UNDERLINED),
            (FieldKind::Input, false) => Style::default().add_modifier(Modifier::UNDERLINED),
        }
    }
}

impl Renderable for Field {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let display = self.display();
        let (end, _) = buf.set_stringn(area.x, area.y, &display, area.width as usize, self.style());
        // inputs keep at least a one-cell underline even when empty
        if self.kind == FieldKind::Input && end == area.x {
            buf.set_string(area.x, area.y, " ", self.style());
        }
    }

    fn height(&self, _width: u16) -> u16 {
        1
    }

    fn width(&self) -> u16 {
        u16::try_from(self.display().width().max(1)).unwrap_or(u16::MAX)
    }
}
