use larder_core::context::InputContext;
use larder_core::geometry::Bounds;
use larder_core::metrics::FontMetrics;
use larder_core::surface::Surface;
use ratatui::style::Color;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ButtonStyle {
    pub background: Color,
    pub foreground: Color,
    pub hover: Color,
}

/// Clickable text label. Clicks on it are claimed so widgets updated afterwards ignore them.
#[derive(Clone, Debug)]
pub struct Button {
    label: String,
    bounds: Bounds,
    style: ButtonStyle,
    hovered: bool,
}

impl Button {
    pub fn new(label: impl Into<String>, bounds: Bounds, style: ButtonStyle) -> Self {
        Self {
            label: label.into(),
            bounds,
            style,
            hovered: false,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Returns `true` when clicked this frame.
    pub fn update(&mut self, ctx: &mut InputContext) -> bool {
        self.hovered = self.bounds.contains(ctx.pointer());
        match ctx.click() {
            Some(p) if self.bounds.contains(p) => {
                ctx.claim_click();
                true
            }
            _ => false,
        }
    }

    pub fn render(&self, surface: &mut dyn Surface, metrics: &dyn FontMetrics) {
        let background = if self.hovered {
            self.style.hover
        } else {
            self.style.background
        };
        surface.draw_rect(self.bounds, background, 0.0, 0.0);
        surface.draw_text_centered(&self.label, self.style.foreground, self.bounds, metrics);
    }
}
