use crate::renderable::Renderable;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

/// Cell symbols of `buf`, one string per row, trailing blanks trimmed
pub(crate) fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let width = buf.area.width as usize;
    if width == 0 {
        return Vec::new();
    }
    buf.content()
        .chunks(width)
        .map(|row| {
            let line: String = row.iter().map(|cell| cell.symbol()).collect();
            line.trim_end().to_string()
        })
        .collect()
}

/// Paint `renderable` at `width` columns and its own height
pub(crate) fn render_lines(renderable: &dyn Renderable, width: u16) -> Vec<String> {
    let height = renderable.height(width).max(1);
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    renderable.render(area, &mut buf);
    buffer_lines(&buf)
}
