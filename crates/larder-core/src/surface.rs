use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Widget;

use crate::geometry::Bounds;
use crate::metrics::FontMetrics;

/// Drawing primitives widgets render through.
pub trait Surface {
    /// Draws `bounds` filled when `border_width` is zero, otherwise as an outline.
    fn draw_rect(&mut self, bounds: Bounds, color: Color, border_width: f32, corner_radius: f32);

    /// Draws one line of text centered in `bounds`, measured with `metrics`.
    fn draw_text_centered(
        &mut self,
        text: &str,
        color: Color,
        bounds: Bounds,
        metrics: &dyn FontMetrics,
    );
}

/// A [`Surface`] over a ratatui [`Buffer`], one unit per terminal cell.
///
/// Fills only paint the background so glyphs underneath stay readable (the caret relies on this
/// to render as a block cursor over the character it sits on).
pub struct BufferSurface<'a> {
    buf: &'a mut Buffer,
}

impl<'a> BufferSurface<'a> {
    pub fn new(buf: &'a mut Buffer) -> Self {
        Self { buf }
    }

    fn cell_rect(&self, bounds: Bounds) -> Rect {
        if bounds.width <= 0.0 || bounds.height <= 0.0 {
            return Rect::default();
        }
        let x = bounds.x.floor().max(0.0) as u16;
        let y = bounds.y.floor().max(0.0) as u16;
        let w = bounds.width.round().max(1.0) as u16;
        let h = bounds.height.round().max(1.0) as u16;
        Rect::new(x, y, w, h).intersection(self.buf.area)
    }
}

impl Surface for BufferSurface<'_> {
    fn draw_rect(&mut self, bounds: Bounds, color: Color, border_width: f32, corner_radius: f32) {
        let area = self.cell_rect(bounds);
        if area.is_empty() {
            return;
        }
        if border_width <= 0.0 {
            self.buf.set_style(area, Style::default().bg(color));
            return;
        }
        let border_type = if corner_radius > 0.0 {
            BorderType::Rounded
        } else if border_width >= 2.0 {
            BorderType::Thick
        } else {
            BorderType::Plain
        };
        Block::bordered()
            .border_type(border_type)
            .border_style(Style::default().fg(color))
            .render(area, self.buf);
    }

    fn draw_text_centered(
        &mut self,
        text: &str,
        color: Color,
        bounds: Bounds,
        metrics: &dyn FontMetrics,
    ) {
        let clip = self.cell_rect(bounds);
        if clip.is_empty() || text.is_empty() {
            return;
        }
        let start_x = bounds.x + (bounds.width - metrics.text_width(text)) * 0.5;
        let start_y = bounds.y + (bounds.height - metrics.line_height()) * 0.5;
        let x = (start_x.floor().max(0.0) as u16).max(clip.x);
        let y = start_y.floor().max(0.0) as u16;
        if y < clip.y || y >= clip.bottom() || x >= clip.right() {
            return;
        }
        let max_cols = (clip.right() - x) as usize;
        self.buf.set_stringn(x, y, text, max_cols, Style::default().fg(color));
    }
}
