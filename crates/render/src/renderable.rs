use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Terminal-drawable unit produced by translation.
///
/// Layout beyond "how tall am I at this width" is left to the painter; a
/// renderable only ever writes inside the area it is given.
pub trait Renderable: fmt::Debug + Send + Sync {
    /// Paint into `area` of `buf`
    fn render(&self, area: Rect, buf: &mut Buffer);

    /// Rows needed when laid out at `width` columns
    fn height(&self, width: u16) -> u16;

    /// Natural single-line width, used to place inline content
    fn width(&self) -> u16;
}

/// A renderable whose appearance changes over time without a new view tree
pub trait AnimatedRenderable: Renderable {
    /// How often the painter should repaint while this is on screen
    fn refresh_interval(&self) -> Duration;
}

pub type RenderableRef = Arc<dyn Renderable>;
