use ratatui::style::Color;

#[derive(Clone, Debug)]
pub struct Theme {
    pub label: Color,
    pub border: Color,
    pub panel: Color,
    pub field_background: Color,
    pub field_text: Color,
    pub field_focus: Color,
    pub confirm: Color,
    pub cancel: Color,
    pub hover: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            label: Color::Rgb(255, 255, 255),
            border: Color::Rgb(30, 30, 30),
            panel: Color::Rgb(20, 20, 20),
            field_background: Color::Rgb(40, 40, 40),
            field_text: Color::Rgb(200, 200, 200),
            field_focus: Color::Rgb(255, 255, 255),
            confirm: Color::Rgb(120, 220, 120),
            cancel: Color::Rgb(230, 90, 70),
            hover: Color::Rgb(30, 30, 30),
        }
    }
}
