use crate::renderable::{AnimatedRenderable, Renderable};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use std::str::FromStr;
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

/// Spinner animation frames
const DOTS_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const LINE_FRAMES: &[&str] = &["-", "\\", "|", "/"];
const ARC_FRAMES: &[&str] = &["◜", "◠", "◝", "◞", "◡", "◟"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpinnerStyle {
    #[default]
    Dots,
    Line,
    Arc,
}

impl SpinnerStyle {
    pub fn frames(self) -> &'static [&'static str] {
        match self {
            Self::Dots => DOTS_FRAMES,
            Self::Line => LINE_FRAMES,
            Self::Arc => ARC_FRAMES,
        }
    }

    pub fn interval(self) -> Duration {
        match self {
            Self::Dots => Duration::from_millis(80),
            Self::Line => Duration::from_millis(130),
            Self::Arc => Duration::from_millis(100),
        }
    }
}

impl FromStr for SpinnerStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dots" => Ok(Self::Dots),
            "line" => Ok(Self::Line),
            "arc" => Ok(Self::Arc),
            other => Err(format!("unknown spinner style '{other}'")),
        }
    }
}

/// Spinner whose frame is derived from wall-clock time, so repainting is
/// all it takes to animate it.
#[derive(Debug, Clone)]
pub struct Spinner {
    style: SpinnerStyle,
    message: Option<String>,
    started: Instant,
}

impl Spinner {
    pub fn new(style: SpinnerStyle, message: Option<String>) -> Self {
        Self {
            style,
            message: message.map(|m| super::text::escape(&m)),
            started: Instant::now(),
        }
    }

    pub fn frame_at(&self, elapsed: Duration) -> &'static str {
        let frames = self.style.frames();
        let interval = self.style.interval().as_millis().max(1);
        let index = (elapsed.as_millis() / interval) as usize % frames.len();
        frames[index]
    }

    fn current_frame(&self) -> &'static str {
        self.frame_at(self.started.elapsed())
    }
}

impl Renderable for Spinner {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let frame_style = Style::default().fg(Color::Blue);
        let (x, _) = buf.set_stringn(
            area.x,
            area.y,
            self.current_frame(),
            area.width as usize,
            frame_style,
        );
        if let Some(message) = &self.message {
            let used = x - area.x;
            if used + 1 < area.width {
                buf.set_stringn(
                    x + 1,
                    area.y,
                    message,
                    (area.width - used - 1) as usize,
                    Style::default(),
                );
            }
        }
    }

    fn height(&self, _width: u16) -> u16 {
        1
    }

    fn width(&self) -> u16 {
        let message = self.message.as_deref().map_or(0, |m| m.width() + 1);
        u16::try_from(1 + message).unwrap_or(u16::MAX)
    }
}

impl AnimatedRenderable for Spinner {
    fn refresh_interval(&self) -> Duration {
        self.style.interval()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::render_lines;

    #[test]
    fn test_frames_advance_with_time_and_wrap() {
        let spinner = Spinner::new(SpinnerStyle::Line, None);
        assert_eq!(spinner.frame_at(Duration::ZERO), "-");
        assert_eq!(spinner.frame_at(Duration::from_millis(130)), "\\");
        assert_eq!(spinner.frame_at(Duration::from_millis(130 * 4)), "-");
    }

    #[test]
    fn test_style_parsing() {
        assert_eq!("Arc".parse::<SpinnerStyle>().unwrap(), SpinnerStyle::Arc);
        assert!("bouncing".parse::<SpinnerStyle>().is_err());
    }

    #[test]
    fn test_message_follows_frame() {
        let spinner = Spinner::new(SpinnerStyle::Line, Some("Loading".to_string()));
        assert_eq!(spinner.width(), 9);
        let lines = render_lines(&spinner, 12);
        assert!(lines[0].ends_with(" Loading"), "{lines:?}");
    }
}
