use ratatui::style::Color;

use crate::error::EditError;
use crate::geometry::Bounds;
use crate::geometry::Point;
use crate::metrics::FontMetrics;
use crate::surface::Surface;
use crate::timer::Interval;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaretOptions {
    pub color: Color,
    pub bar_width: f32,
    /// Extra height above and below the glyph row.
    pub inset: f32,
    /// Seconds between visibility toggles.
    pub blink_period: f32,
}

impl Default for CaretOptions {
    fn default() -> Self {
        Self {
            color: Color::Rgb(230, 230, 230),
            bar_width: 2.0,
            inset: 3.0,
            blink_period: 0.5,
        }
    }
}

impl CaretOptions {
    /// One cell wide, no inset: for [`crate::surface::BufferSurface`].
    pub fn cells() -> Self {
        Self {
            bar_width: 1.0,
            inset: 0.0,
            ..Self::default()
        }
    }
}

/// Insertion point of a text line: a char index plus its projection onto the surface.
///
/// Text is rendered centered in its line box, so growing or shrinking the text by one glyph moves
/// every glyph by half that glyph's width. That is why insertion and deletion step the caret by
/// half a glyph while arrow movement, which leaves the text in place, steps by a full glyph:
///
/// ```text
/// abc|defg  index 3
/// |abcdefg  index 0
/// abcdefg|  index 7 == len
/// ```
///
/// The owner must pair every text mutation with exactly one of the stepping methods, passing the
/// glyph as it is displayed.
#[derive(Clone, Debug)]
pub struct Caret {
    index: usize,
    position: Point,
    height: f32,
    visible: bool,
    hidden: bool,
    blink: Interval,
    options: CaretOptions,
}

impl Caret {
    pub fn new(options: CaretOptions) -> Self {
        let mut blink = Interval::new(options.blink_period);
        blink.start();
        Self {
            index: 0,
            position: Point::default(),
            height: 0.0,
            visible: true,
            hidden: false,
            blink,
            options,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn options(&self) -> &CaretOptions {
        &self.options
    }

    /// Puts the caret after the last glyph of `text` rendered centered in `line_box`.
    pub fn reset_position(&mut self, line_box: Bounds, text: &str, metrics: &dyn FontMetrics) {
        let width = metrics.text_width(text);
        self.project(line_box, width, width, metrics);
        self.index = text.chars().count();
    }

    /// Puts the caret before the `index`-th glyph of `text`. An index past the end is clamped to
    /// the end and reported.
    pub fn place(
        &mut self,
        line_box: Bounds,
        text: &str,
        index: usize,
        metrics: &dyn FontMetrics,
    ) -> Result<(), EditError> {
        let len = text.chars().count();
        self.move_to(line_box, text, index.min(len), metrics);
        if index > len {
            return Err(EditError::IndexOutOfRange { index, len });
        }
        Ok(())
    }

    /// Recomputes the position for the current index, e.g. after `line_box` moved.
    pub fn reproject(&mut self, line_box: Bounds, text: &str, metrics: &dyn FontMetrics) {
        let index = self.index.min(text.chars().count());
        self.move_to(line_box, text, index, metrics);
    }

    fn move_to(&mut self, line_box: Bounds, text: &str, index: usize, metrics: &dyn FontMetrics) {
        let prefix: f32 = text.chars().take(index).map(|c| metrics.glyph_width(c)).sum();
        self.project(line_box, metrics.text_width(text), prefix, metrics);
        self.index = index;
    }

    fn project(
        &mut self,
        line_box: Bounds,
        text_width: f32,
        prefix: f32,
        metrics: &dyn FontMetrics,
    ) {
        let line_height = metrics.line_height();
        let x = line_box.x + line_box.width * 0.5 - text_width * 0.5 + prefix;
        let y = line_box.y + (line_box.height - line_height) * 0.5 - self.options.inset;
        self.position = Point::new(x, y);
        self.height = line_height + self.options.inset * 2.0;
    }

    pub fn insert_char(&mut self, ch: char, metrics: &dyn FontMetrics) {
        self.position.x += metrics.glyph_width(ch) * 0.5;
        self.index += 1;
    }

    pub fn remove_char_before(&mut self, ch: char, metrics: &dyn FontMetrics) {
        self.position.x -= metrics.glyph_width(ch) * 0.5;
        self.index = self.index.saturating_sub(1);
    }

    /// The glyph after the caret disappears; the text recenters under a fixed index.
    pub fn delete_char_after(&mut self, ch: char, metrics: &dyn FontMetrics) {
        self.position.x += metrics.glyph_width(ch) * 0.5;
    }

    pub fn shift_left(&mut self, ch: char, metrics: &dyn FontMetrics) {
        self.position.x -= metrics.glyph_width(ch);
        self.index = self.index.saturating_sub(1);
    }

    pub fn shift_right(&mut self, ch: char, metrics: &dyn FontMetrics) {
        self.position.x += metrics.glyph_width(ch);
        self.index += 1;
    }

    pub fn move_by(&mut self, dx: f32, dy: f32) {
        self.position.x += dx;
        self.position.y += dy;
    }

    /// Hides the caret and stops blinking until [`Caret::show`].
    pub fn hide(&mut self) {
        self.visible = false;
        self.hidden = true;
    }

    pub fn show(&mut self) {
        self.hidden = false;
        self.visible = true;
    }

    pub fn update(&mut self, dt: f32) {
        if self.hidden {
            return;
        }
        if self.blink.update(dt) % 2 == 1 {
            self.visible = !self.visible;
        }
    }

    pub fn render(&self, surface: &mut dyn Surface, focused: bool) {
        if !self.visible || !focused {
            return;
        }
        let bar = Bounds::new(
            self.position.x,
            self.position.y,
            self.options.bar_width,
            self.height,
        );
        surface.draw_rect(bar, self.options.color, 0.0, 0.0);
    }
}
