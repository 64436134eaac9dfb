use ratatui::style::Color;

use crate::bindings::EditAction;
use crate::bindings::EditBindings;
use crate::buffer::LineBuffer;
use crate::caret::Caret;
use crate::caret::CaretOptions;
use crate::context::FieldId;
use crate::context::InputContext;
use crate::error::EditError;
use crate::geometry::Bounds;
use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::metrics::FontMetrics;
use crate::surface::Surface;
use crate::timer::Timer;

/// Symbols accepted as input besides alphanumerics.
pub const ALLOWED_SYMBOLS: &[char] = &[
    ' ', '.', ',', '!', '?', ':', ';', '-', '_', '+', '=', '(', ')', '[', ']', '{', '}', '<', '>',
    '/', '\\', '|', '*', '&', '%', '$', '#', '@', '\'', '"', '`', '^', '~',
];

pub fn is_accepted_char(ch: char) -> bool {
    ch.is_alphanumeric() || ALLOWED_SYMBOLS.contains(&ch)
}

/// What happens when a typed character would overflow the line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InsertionPolicy {
    /// One line; overflowing characters are dropped.
    #[default]
    SingleLine,
    /// As many rows as fit the field's height. An overflowing character opens the next row and
    /// lands there; once the last row is full, characters are dropped.
    WrappingMultiLine,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldStyle {
    pub background: Color,
    pub foreground: Color,
    /// Replaces `foreground` while focused.
    pub focus: Color,
    pub border_width: f32,
    pub corner_radius: f32,
}

impl Default for FieldStyle {
    fn default() -> Self {
        Self {
            background: Color::Rgb(50, 50, 50),
            foreground: Color::Rgb(0, 0, 0),
            focus: Color::Rgb(150, 150, 150),
            border_width: 1.0,
            corner_radius: 10.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct FieldOptions {
    pub placeholder: String,
    pub password: bool,
    pub mask_char: char,
    pub policy: InsertionPolicy,
    pub style: FieldStyle,
    /// Horizontal room kept free for padding: a line may grow to `width - width_margin`.
    pub width_margin: f32,
    /// Hold time before a held key starts repeating every frame. `None` disables repeating, for
    /// hosts that deliver their own key repeats.
    pub repeat_delay: Option<f32>,
    pub caret: CaretOptions,
    pub bindings: EditBindings,
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self {
            placeholder: String::new(),
            password: false,
            mask_char: '*',
            policy: InsertionPolicy::default(),
            style: FieldStyle::default(),
            width_margin: 40.0,
            repeat_delay: Some(0.5),
            caret: CaretOptions::default(),
            bindings: EditBindings::default(),
        }
    }
}

impl FieldOptions {
    /// Defaults scaled for terminal cells.
    pub fn cells() -> Self {
        Self {
            width_margin: 4.0,
            caret: CaretOptions::cells(),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldAction {
    None,
    Changed,
    Submitted(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Held {
    Edit(EditAction),
    Insert(char),
}

pub type EnterCallback = Box<dyn FnMut()>;

/// Editable text widget: a single-line entry or a wrapping paragraph, depending on its
/// [`InsertionPolicy`].
///
/// The buffer holds plaintext; masking and the placeholder exist only in what is displayed.
pub struct TextField<M> {
    id: FieldId,
    bounds: Bounds,
    metrics: M,
    options: FieldOptions,
    lines: Vec<LineBuffer>,
    line: usize,
    caret: Caret,
    focused: bool,
    visible: bool,
    held: Option<Held>,
    repeat_timer: Timer,
    on_enter: Option<EnterCallback>,
}

impl<M: FontMetrics> TextField<M> {
    pub fn new(bounds: Bounds, metrics: M, options: FieldOptions) -> Self {
        let capacity = match options.policy {
            InsertionPolicy::SingleLine => 1,
            InsertionPolicy::WrappingMultiLine => {
                let line_height = metrics.line_height();
                if line_height > 0.0 {
                    ((bounds.height / line_height).floor() as usize).max(1)
                } else {
                    1
                }
            }
        };
        let caret = Caret::new(options.caret);
        let mut field = Self {
            id: FieldId::next(),
            bounds,
            metrics,
            options,
            lines: vec![LineBuffer::new(); capacity],
            line: 0,
            caret,
            focused: false,
            visible: true,
            held: None,
            repeat_timer: Timer::new(),
            on_enter: None,
        };
        field.reset_caret();
        field
    }

    pub fn entry(bounds: Bounds, metrics: M, options: FieldOptions) -> Self {
        Self::new(
            bounds,
            metrics,
            FieldOptions {
                policy: InsertionPolicy::SingleLine,
                ..options
            },
        )
    }

    pub fn paragraph(bounds: Bounds, metrics: M, options: FieldOptions) -> Self {
        Self::new(
            bounds,
            metrics,
            FieldOptions {
                policy: InsertionPolicy::WrappingMultiLine,
                ..options
            },
        )
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
        let text = self.lines[self.line].display(self.mask());
        let line_box = self.line_box(self.line);
        self.caret.reproject(line_box, &text, &self.metrics);
    }

    pub fn options(&self) -> &FieldOptions {
        &self.options
    }

    pub fn caret(&self) -> &Caret {
        &self.caret
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Hiding a focused field blurs it, so it stops owning keyboard input.
    pub fn set_visible(&mut self, visible: bool, ctx: &mut InputContext) {
        self.visible = visible;
        if !visible && self.focused {
            self.blur(ctx);
        }
    }

    pub fn line_capacity(&self) -> usize {
        self.lines.len()
    }

    pub fn current_line(&self) -> usize {
        self.line
    }

    pub fn line(&self, index: usize) -> Option<String> {
        self.lines.get(index).map(LineBuffer::to_string)
    }

    /// The plaintext. Multi-line text joins its non-empty lines with `\n`; blank lines are
    /// skipped.
    pub fn text(&self) -> String {
        join_non_empty(self.lines.iter().map(LineBuffer::to_string))
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(LineBuffer::is_empty)
    }

    /// Replaces the content. Single-line fields drop line breaks; multi-line fields keep at most
    /// as many lines as they can show. The width budget only applies to typed input.
    pub fn set_text(&mut self, text: &str) {
        for line in &mut self.lines {
            line.clear();
        }
        match self.options.policy {
            InsertionPolicy::SingleLine => {
                let flat: String = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();
                self.lines[0] = LineBuffer::from(flat.as_str());
                self.line = 0;
            }
            InsertionPolicy::WrappingMultiLine => {
                let normalized = text.replace("\r\n", "\n");
                let parts: Vec<&str> = normalized.split('\n').collect();
                if parts.len() > self.lines.len() {
                    tracing::warn!(
                        lines = parts.len(),
                        capacity = self.lines.len(),
                        "text has more lines than the field shows; extra lines dropped"
                    );
                }
                let used = parts.len().min(self.lines.len());
                for (line, part) in self.lines.iter_mut().zip(parts) {
                    *line = LineBuffer::from(part);
                }
                self.line = used.saturating_sub(1);
            }
        }
        self.release_held();
        self.reset_caret();
    }

    pub fn clear_text(&mut self) {
        self.set_text("");
    }

    /// What the field shows: the placeholder while unfocused and empty, the masked text for
    /// password fields, the text otherwise.
    pub fn display_text(&self) -> String {
        if self.showing_placeholder() {
            return self.options.placeholder.clone();
        }
        let mask = self.mask();
        join_non_empty(self.lines.iter().map(|l| l.display(mask)))
    }

    pub fn showing_placeholder(&self) -> bool {
        !self.focused && self.is_empty()
    }

    pub fn set_enter_key_callback(&mut self, callback: impl FnMut() + 'static) {
        self.on_enter = Some(Box::new(callback));
    }

    /// Moves the caret within the current line. Out-of-range indices are clamped to the end of
    /// the line and reported.
    pub fn set_caret_index(&mut self, index: usize) -> Result<(), EditError> {
        self.place_caret(index)
    }

    pub fn hide_caret(&mut self) {
        self.caret.hide();
    }

    pub fn show_caret(&mut self) {
        self.caret.show();
        self.reset_caret();
    }

    pub fn focus(&mut self, ctx: &mut InputContext) {
        self.focused = true;
        ctx.take_focus(self.id);
        if self.is_empty() {
            self.reset_caret();
        }
        tracing::debug!(field = ?self.id, "field focused");
    }

    pub fn blur(&mut self, ctx: &mut InputContext) {
        self.focused = false;
        ctx.release_focus(self.id);
        self.release_held();
        if self.is_empty() {
            self.reset_caret();
        }
        tracing::debug!(field = ?self.id, "field blurred");
    }

    /// Runs one frame: caret blink, focus arbitration, then key repeat and the frame's events if
    /// still focused. Returns the last non-`None` action of the frame.
    pub fn update(&mut self, dt: f32, ctx: &mut InputContext) -> FieldAction {
        if !self.visible {
            return FieldAction::None;
        }
        self.caret.update(dt);
        self.arbitrate_focus(ctx);
        if !self.focused {
            return FieldAction::None;
        }

        let mut result = self.repeat(dt);

        for event in ctx.events() {
            let action = match event {
                InputEvent::Key(key) => self.handle_key(key),
                InputEvent::Paste(text) => self.paste(text),
                InputEvent::Mouse(_) => FieldAction::None,
            };
            if action != FieldAction::None {
                result = action;
            }
        }
        result
    }

    /// Applies one key event. Callers route keys only to the focused field; [`TextField::update`]
    /// does this.
    pub fn handle_key(&mut self, key: &KeyEvent) -> FieldAction {
        if !key.is_press() {
            self.release_held();
            return FieldAction::None;
        }
        if let Some(action) = self.options.bindings.action_for(key) {
            return self.run(Held::Edit(action));
        }
        match key.code {
            KeyCode::Char(ch) if !key.modifiers.ctrl && !key.modifiers.alt => {
                self.run(Held::Insert(ch))
            }
            _ => FieldAction::None,
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        if !self.visible {
            return;
        }
        let style = &self.options.style;
        let color = if self.focused {
            style.focus
        } else {
            style.foreground
        };
        match self.options.policy {
            InsertionPolicy::SingleLine => {
                surface.draw_rect(self.bounds, style.background, 0.0, style.corner_radius);
                if style.border_width > 0.0 {
                    surface.draw_rect(
                        self.bounds,
                        color,
                        style.border_width,
                        style.corner_radius,
                    );
                }
                surface.draw_text_centered(&self.display_text(), color, self.bounds, &self.metrics);
                self.caret.render(surface, self.focused);
            }
            InsertionPolicy::WrappingMultiLine => {
                surface.draw_rect(
                    self.bounds,
                    style.background,
                    style.border_width,
                    style.corner_radius,
                );
                self.caret.render(surface, self.focused);
                if self.showing_placeholder() {
                    surface.draw_text_centered(
                        &self.options.placeholder,
                        color,
                        self.line_box(0),
                        &self.metrics,
                    );
                    return;
                }
                let mask = self.mask();
                for (i, line) in self.lines.iter().enumerate() {
                    surface.draw_text_centered(
                        &line.display(mask),
                        color,
                        self.line_box(i),
                        &self.metrics,
                    );
                }
            }
        }
    }

    fn arbitrate_focus(&mut self, ctx: &mut InputContext) {
        if self.focused && ctx.focus_owner() != Some(self.id) {
            self.blur(ctx);
        }
        let Some(click) = ctx.click() else {
            return;
        };
        let inside = self.bounds.contains(click);
        if inside && !self.focused {
            self.focus(ctx);
        } else if !inside && self.focused {
            self.blur(ctx);
        }
    }

    fn repeat(&mut self, dt: f32) -> FieldAction {
        let (Some(held), Some(delay)) = (self.held, self.options.repeat_delay) else {
            return FieldAction::None;
        };
        self.repeat_timer.start(delay);
        let action = if self.repeat_timer.finished() {
            self.run(held)
        } else {
            FieldAction::None
        };
        self.repeat_timer.update(dt);
        action
    }

    fn release_held(&mut self) {
        self.held = None;
        self.repeat_timer.stop();
    }

    fn run(&mut self, held: Held) -> FieldAction {
        match self.apply(held) {
            Ok(action) => {
                if held != Held::Edit(EditAction::Submit) && self.held != Some(held) {
                    self.repeat_timer.stop();
                    self.held = Some(held);
                }
                action
            }
            Err(err) => {
                tracing::trace!(field = ?self.id, %err, "edit ignored");
                FieldAction::None
            }
        }
    }

    fn apply(&mut self, held: Held) -> Result<FieldAction, EditError> {
        let action = match held {
            Held::Insert(ch) => {
                self.insert(ch)?;
                FieldAction::Changed
            }
            Held::Edit(EditAction::Backspace) => {
                self.backspace()?;
                FieldAction::Changed
            }
            Held::Edit(EditAction::Delete) => {
                self.delete()?;
                FieldAction::Changed
            }
            Held::Edit(EditAction::WordBackspace) => {
                self.word_backspace()?;
                FieldAction::Changed
            }
            Held::Edit(EditAction::WordDelete) => {
                self.word_delete()?;
                FieldAction::Changed
            }
            Held::Edit(EditAction::Left) => {
                self.move_left()?;
                FieldAction::None
            }
            Held::Edit(EditAction::Right) => {
                self.move_right()?;
                FieldAction::None
            }
            Held::Edit(EditAction::Submit) => self.submit(),
        };
        Ok(action)
    }

    fn paste(&mut self, text: &str) -> FieldAction {
        let mut changed = false;
        for ch in text.chars() {
            match self.insert(ch) {
                Ok(()) => changed = true,
                Err(err) => tracing::trace!(field = ?self.id, %err, "pasted char ignored"),
            }
        }
        if changed {
            FieldAction::Changed
        } else {
            FieldAction::None
        }
    }

    fn submit(&mut self) -> FieldAction {
        if let Some(callback) = self.on_enter.as_mut() {
            callback();
        }
        FieldAction::Submitted(self.text())
    }

    fn insert(&mut self, ch: char) -> Result<(), EditError> {
        if !is_accepted_char(ch) {
            return Err(EditError::Rejected(ch));
        }
        let glyph = self.glyph(ch);
        let budget = self.bounds.width - self.options.width_margin;
        let advance = self.metrics.glyph_width(glyph);

        if self.line_width(self.line) + advance <= budget {
            let index = self.caret.index();
            self.lines[self.line].insert(index, ch)?;
            self.caret.insert_char(glyph, &self.metrics);
            return Ok(());
        }

        match self.options.policy {
            InsertionPolicy::SingleLine => Err(EditError::WidthExceeded { ch, budget }),
            InsertionPolicy::WrappingMultiLine => {
                let next = self.line + 1;
                if next >= self.lines.len() {
                    return Err(EditError::LinesExhausted {
                        capacity: self.lines.len(),
                    });
                }
                if self.line_width(next) + advance > budget {
                    return Err(EditError::WidthExceeded { ch, budget });
                }
                self.line = next;
                self.reset_caret();
                tracing::debug!(field = ?self.id, line = next, "wrapped to next line");
                let index = self.caret.index();
                self.lines[self.line].insert(index, ch)?;
                self.caret.insert_char(glyph, &self.metrics);
                Ok(())
            }
        }
    }

    fn backspace(&mut self) -> Result<(), EditError> {
        let index = self.caret.index();
        if index == 0 {
            return Err(EditError::AtStart);
        }
        let ch = self.lines[self.line].remove(index - 1)?;
        let glyph = self.glyph(ch);
        self.caret.remove_char_before(glyph, &self.metrics);
        Ok(())
    }

    fn delete(&mut self) -> Result<(), EditError> {
        let index = self.caret.index();
        if index >= self.lines[self.line].len() {
            return Err(EditError::AtEnd);
        }
        let ch = self.lines[self.line].remove(index)?;
        let glyph = self.glyph(ch);
        self.caret.delete_char_after(glyph, &self.metrics);
        Ok(())
    }

    fn word_backspace(&mut self) -> Result<(), EditError> {
        let index = self.caret.index();
        if index == 0 {
            return Err(EditError::AtStart);
        }
        if self.lines[self.line].get(index - 1) == Some(' ') {
            return self.backspace();
        }
        while self.caret.index() > 0
            && self.lines[self.line].get(self.caret.index() - 1) != Some(' ')
        {
            self.backspace()?;
        }
        Ok(())
    }

    fn word_delete(&mut self) -> Result<(), EditError> {
        let index = self.caret.index();
        if index >= self.lines[self.line].len() {
            return Err(EditError::AtEnd);
        }
        if self.lines[self.line].get(index) == Some(' ') {
            return self.delete();
        }
        while self.caret.index() < self.lines[self.line].len()
            && self.lines[self.line].get(self.caret.index()) != Some(' ')
        {
            self.delete()?;
        }
        Ok(())
    }

    fn move_left(&mut self) -> Result<(), EditError> {
        let index = self.caret.index();
        if index == 0 {
            return Err(EditError::AtStart);
        }
        let ch = self.lines[self.line]
            .get(index - 1)
            .ok_or(EditError::IndexOutOfRange {
                index: index - 1,
                len: self.lines[self.line].len(),
            })?;
        let glyph = self.glyph(ch);
        self.caret.shift_left(glyph, &self.metrics);
        Ok(())
    }

    fn move_right(&mut self) -> Result<(), EditError> {
        let index = self.caret.index();
        let ch = self.lines[self.line].get(index).ok_or(EditError::AtEnd)?;
        let glyph = self.glyph(ch);
        self.caret.shift_right(glyph, &self.metrics);
        Ok(())
    }

    fn mask(&self) -> Option<char> {
        self.options.password.then_some(self.options.mask_char)
    }

    fn glyph(&self, ch: char) -> char {
        self.mask().unwrap_or(ch)
    }

    fn line_width(&self, index: usize) -> f32 {
        self.metrics.text_width(&self.lines[index].display(self.mask()))
    }

    fn line_box(&self, index: usize) -> Bounds {
        match self.options.policy {
            InsertionPolicy::SingleLine => self.bounds,
            InsertionPolicy::WrappingMultiLine => {
                self.bounds.row(index, self.metrics.line_height())
            }
        }
    }

    fn reset_caret(&mut self) {
        let text = self.lines[self.line].display(self.mask());
        let line_box = self.line_box(self.line);
        self.caret.reset_position(line_box, &text, &self.metrics);
    }

    fn place_caret(&mut self, index: usize) -> Result<(), EditError> {
        let text = self.lines[self.line].display(self.mask());
        let line_box = self.line_box(self.line);
        self.caret.place(line_box, &text, index, &self.metrics)
    }
}

fn join_non_empty(lines: impl Iterator<Item = String>) -> String {
    lines
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::input::KeyModifiers;
    use crate::input::MouseButton;
    use crate::input::MouseEvent;
    use crate::input::MouseEventKind;
    use crate::keymap;
    use crate::metrics::CellMetrics;
    use crate::metrics::MonospaceMetrics;
    use crate::surface::BufferSurface;
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;
    use std::cell::Cell;
    use std::rc::Rc;

    // 200 wide with the default 40 margin: room for 16 glyphs of 10.
    const BOUNDS: Bounds = Bounds::new(0.0, 0.0, 200.0, 40.0);

    fn px() -> MonospaceMetrics {
        MonospaceMetrics::new(10.0, 20.0)
    }

    fn entry(options: FieldOptions) -> TextField<MonospaceMetrics> {
        TextField::entry(BOUNDS, px(), options)
    }

    fn click(x: f32, y: f32) -> InputEvent {
        InputEvent::Mouse(MouseEvent::new(
            Point::new(x, y),
            MouseEventKind::Down(MouseButton::Left),
        ))
    }

    fn focused<M: FontMetrics>(field: &mut TextField<M>) -> InputContext {
        let mut ctx = InputContext::new();
        let c = field.bounds().center();
        ctx.begin_frame([click(c.x, c.y)]);
        field.update(0.0, &mut ctx);
        assert!(field.is_focused());
        ctx
    }

    fn type_str<M: FontMetrics>(field: &mut TextField<M>, s: &str) {
        for ch in s.chars() {
            field.handle_key(&keymap::key_char(ch));
        }
    }

    fn press<M: FontMetrics>(field: &mut TextField<M>, code: KeyCode) -> FieldAction {
        field.handle_key(&keymap::key(code))
    }

    fn ctrl<M: FontMetrics>(field: &mut TextField<M>, code: KeyCode) -> FieldAction {
        field.handle_key(&keymap::key_ctrl_code(code))
    }

    /// Where the caret must sit for centered rendering of the current line.
    fn projected_x<M: FontMetrics>(field: &TextField<M>, metrics: &M) -> f32 {
        let line: Vec<char> = field.line(field.current_line()).unwrap().chars().collect();
        let total: f32 = line.iter().map(|c| metrics.glyph_width(*c)).sum();
        let prefix: f32 = line[..field.caret().index()]
            .iter()
            .map(|c| metrics.glyph_width(*c))
            .sum();
        let b = field.line_box(field.current_line());
        b.x + b.width * 0.5 - total * 0.5 + prefix
    }

    #[test]
    fn placeholder_shows_only_while_unfocused_and_empty() {
        let mut f = entry(FieldOptions {
            placeholder: "Name".to_string(),
            ..FieldOptions::default()
        });
        assert_eq!(f.display_text(), "Name");
        assert_eq!(f.text(), "");

        let mut ctx = focused(&mut f);
        assert_eq!(f.display_text(), "");
        assert!(ctx.shortcuts_suppressed());

        type_str(&mut f, "Al");
        ctx.begin_frame([click(500.0, 500.0)]);
        f.update(0.0, &mut ctx);
        assert!(!f.is_focused());
        assert!(!ctx.shortcuts_suppressed());
        assert_eq!(f.display_text(), "Al");

        let mut ctx = focused(&mut f);
        ctrl(&mut f, KeyCode::Backspace);
        assert_eq!(f.display_text(), "");
        ctx.begin_frame([click(500.0, 500.0)]);
        f.update(0.0, &mut ctx);
        assert_eq!(f.display_text(), "Name");
    }

    #[test]
    fn password_masks_display_only() {
        let mut f = entry(FieldOptions {
            password: true,
            ..FieldOptions::default()
        });
        let _ctx = focused(&mut f);
        type_str(&mut f, "abc");
        assert_eq!(f.display_text(), "***");
        assert_eq!(f.text(), "abc");

        f.set_text("hunter2");
        assert_eq!(f.display_text(), "*******");
    }

    #[test]
    fn set_text_round_trips_through_display() {
        let mut f = entry(FieldOptions::default());
        f.set_text("hello");
        assert_eq!(f.display_text(), "hello");
        assert_eq!(f.caret().index(), 5);
        f.set_text("two\nlines");
        assert_eq!(f.text(), "twolines");
    }

    #[test]
    fn edits_at_boundaries_are_no_ops() {
        let mut f = entry(FieldOptions::default());
        let _ctx = focused(&mut f);
        assert_eq!(press(&mut f, KeyCode::Backspace), FieldAction::None);
        assert_eq!(press(&mut f, KeyCode::Left), FieldAction::None);
        assert_eq!(ctrl(&mut f, KeyCode::Backspace), FieldAction::None);
        assert_eq!((f.text(), f.caret().index()), (String::new(), 0));

        f.set_text("ab");
        let x = f.caret().position().x;
        assert_eq!(press(&mut f, KeyCode::Delete), FieldAction::None);
        assert_eq!(press(&mut f, KeyCode::Right), FieldAction::None);
        assert_eq!(ctrl(&mut f, KeyCode::Delete), FieldAction::None);
        assert_eq!((f.text(), f.caret().index()), ("ab".to_string(), 2));
        assert_eq!(f.caret().position().x, x);
    }

    #[test]
    fn typing_stops_at_the_width_budget() {
        let mut f = entry(FieldOptions::default());
        let _ctx = focused(&mut f);
        type_str(&mut f, &"x".repeat(20));
        assert_eq!(f.text().chars().count(), 16);
        assert_eq!(f.caret().index(), 16);
        assert_eq!(press(&mut f, KeyCode::Left), FieldAction::None);
        assert_eq!(f.handle_key(&keymap::key_char('y')), FieldAction::None);
        assert_eq!(f.text(), "x".repeat(16));
    }

    #[test]
    fn caret_tracks_centered_projection_through_edits() {
        let metrics = CellMetrics;
        let mut f = TextField::entry(
            Bounds::new(3.0, 1.0, 30.0, 3.0),
            metrics,
            FieldOptions::cells(),
        );
        let _ctx = focused(&mut f);
        let steps: Vec<KeyEvent> = vec![
            keymap::key_char('a'),
            keymap::key_char('界'),
            keymap::key_char('b'),
            keymap::key(KeyCode::Left),
            keymap::key(KeyCode::Left),
            keymap::key_char('c'),
            keymap::key(KeyCode::Delete),
            keymap::key_char('語'),
            keymap::key(KeyCode::Right),
            keymap::key(KeyCode::Backspace),
            keymap::key(KeyCode::Left),
            keymap::key(KeyCode::Left),
            keymap::key(KeyCode::Left),
            keymap::key(KeyCode::Delete),
            keymap::key(KeyCode::Right),
        ];
        for step in &steps {
            f.handle_key(step);
            assert_eq!(f.caret().position().x, projected_x(&f, &metrics), "after {step:?}");
        }
        assert_eq!(f.text(), "c語");

        let incremental = f.caret().position();
        let index = f.caret().index();
        f.set_caret_index(index).unwrap();
        assert_eq!(f.caret().position(), incremental);
    }

    #[test]
    fn word_backspace_removes_the_run_before_the_caret() {
        let mut f = entry(FieldOptions::default());
        let _ctx = focused(&mut f);
        f.set_text("foo bar baz");
        f.set_caret_index(7).unwrap();
        ctrl(&mut f, KeyCode::Backspace);
        assert_eq!(f.text(), "foo  baz");
        assert_eq!(f.caret().index(), 4);

        ctrl(&mut f, KeyCode::Backspace);
        assert_eq!(f.text(), "foo baz");
        assert_eq!(f.caret().index(), 3);

        f.handle_key(&keymap::key_ctrl('w'));
        assert_eq!(f.text(), " baz");
        assert_eq!(f.caret().index(), 0);
    }

    #[test]
    fn word_delete_mirrors_forward() {
        let mut f = entry(FieldOptions::default());
        let _ctx = focused(&mut f);
        f.set_text("foo bar");
        f.set_caret_index(0).unwrap();
        ctrl(&mut f, KeyCode::Delete);
        assert_eq!(f.text(), " bar");
        ctrl(&mut f, KeyCode::Delete);
        assert_eq!(f.text(), "bar");
        ctrl(&mut f, KeyCode::Delete);
        assert_eq!(f.text(), "");
        assert_eq!(f.caret().index(), 0);
    }

    #[test]
    fn enter_runs_callback_without_editing() {
        let calls = Rc::new(Cell::new(0));
        let mut f = entry(FieldOptions::default());
        let seen = Rc::clone(&calls);
        f.set_enter_key_callback(move || seen.set(seen.get() + 1));
        let _ctx = focused(&mut f);
        type_str(&mut f, "hi");
        assert_eq!(
            press(&mut f, KeyCode::Enter),
            FieldAction::Submitted("hi".to_string())
        );
        assert_eq!(calls.get(), 1);
        assert_eq!(f.text(), "hi");
    }

    #[test]
    fn modified_and_unlisted_chars_are_ignored() {
        let mut f = entry(FieldOptions::default());
        let _ctx = focused(&mut f);
        f.handle_key(&keymap::key_ctrl('a'));
        f.handle_key(&keymap::key_char('a').with_modifiers(KeyModifiers {
            shift: false,
            ctrl: false,
            alt: true,
        }));
        f.handle_key(&keymap::key_char('€'));
        f.handle_key(&keymap::key_char('\t'));
        assert_eq!(f.text(), "");
        type_str(&mut f, "É_1?");
        assert_eq!(f.text(), "É_1?");
    }

    #[test]
    fn held_key_repeats_every_frame_after_delay() {
        let mut f = entry(FieldOptions::default());
        let mut ctx = focused(&mut f);

        ctx.begin_frame([InputEvent::Key(keymap::key_char('a'))]);
        f.update(0.0, &mut ctx);
        assert_eq!(f.text(), "a");

        ctx.begin_frame([]);
        f.update(0.3, &mut ctx);
        f.update(0.3, &mut ctx);
        assert_eq!(f.text(), "a");

        f.update(0.016, &mut ctx);
        assert_eq!(f.text(), "aa");
        f.update(0.016, &mut ctx);
        assert_eq!(f.text(), "aaa");

        ctx.begin_frame([InputEvent::Key(keymap::key_char('a').released())]);
        f.update(0.016, &mut ctx);
        assert_eq!(f.text(), "aaaa");
        ctx.begin_frame([]);
        f.update(1.0, &mut ctx);
        f.update(1.0, &mut ctx);
        assert_eq!(f.text(), "aaaa");
    }

    #[test]
    fn held_backspace_repeats_and_disabled_repeat_does_not() {
        let mut f = entry(FieldOptions::default());
        let mut ctx = focused(&mut f);
        f.set_text("abcdef");
        ctx.begin_frame([InputEvent::Key(keymap::key(KeyCode::Backspace))]);
        f.update(0.0, &mut ctx);
        ctx.begin_frame([]);
        for _ in 0..3 {
            f.update(0.25, &mut ctx);
        }
        assert_eq!(f.text(), "abcd");

        let mut g = entry(FieldOptions {
            repeat_delay: None,
            ..FieldOptions::default()
        });
        let mut ctx = focused(&mut g);
        ctx.begin_frame([InputEvent::Key(keymap::key_char('z'))]);
        g.update(0.0, &mut ctx);
        ctx.begin_frame([]);
        for _ in 0..5 {
            g.update(0.5, &mut ctx);
        }
        assert_eq!(g.text(), "z");
    }

    #[test]
    fn only_one_field_owns_focus() {
        let mut a = entry(FieldOptions::default());
        let mut b = TextField::entry(
            Bounds::new(0.0, 50.0, 200.0, 40.0),
            px(),
            FieldOptions::default(),
        );
        let mut ctx = InputContext::new();

        ctx.begin_frame([click(10.0, 10.0)]);
        a.update(0.0, &mut ctx);
        b.update(0.0, &mut ctx);
        assert!(a.is_focused() && !b.is_focused());

        ctx.begin_frame([click(10.0, 60.0)]);
        b.update(0.0, &mut ctx);
        a.update(0.0, &mut ctx);
        assert!(!a.is_focused() && b.is_focused());
        assert_eq!(ctx.focus_owner(), Some(b.id()));

        a.focus(&mut ctx);
        ctx.begin_frame([]);
        b.update(0.0, &mut ctx);
        assert!(!b.is_focused());
        assert_eq!(ctx.focus_owner(), Some(a.id()));
    }

    #[test]
    fn unfocused_field_ignores_keys() {
        let mut f = entry(FieldOptions::default());
        let mut ctx = InputContext::new();
        ctx.begin_frame([InputEvent::Key(keymap::key_char('a'))]);
        assert_eq!(f.update(0.0, &mut ctx), FieldAction::None);
        assert_eq!(f.text(), "");
    }

    #[test]
    fn paste_inserts_until_the_budget() {
        let mut f = entry(FieldOptions::default());
        let mut ctx = focused(&mut f);
        ctx.begin_frame([InputEvent::Paste("hello world, and more text".to_string())]);
        assert_eq!(f.update(0.0, &mut ctx), FieldAction::Changed);
        assert_eq!(f.text(), "hello world, and");
    }

    #[test]
    fn set_caret_index_clamps() {
        let mut f = entry(FieldOptions::default());
        f.set_text("abc");
        assert_eq!(
            f.set_caret_index(10),
            Err(EditError::IndexOutOfRange { index: 10, len: 3 })
        );
        assert_eq!(f.caret().index(), 3);
    }

    fn paragraph() -> TextField<MonospaceMetrics> {
        // 60 wide for 6 glyphs per line, 3 lines of 20
        TextField::paragraph(Bounds::new(0.0, 0.0, 100.0, 60.0), px(), FieldOptions::default())
    }

    #[test]
    fn paragraph_wraps_at_the_overflowing_char() {
        let mut p = paragraph();
        assert_eq!(p.line_capacity(), 3);
        let _ctx = focused(&mut p);
        type_str(&mut p, "hello world");
        assert_eq!(p.line(0).unwrap(), "hello ");
        assert_eq!(p.line(1).unwrap(), "world");
        assert_eq!(p.text(), "hello \nworld");
        assert_eq!(p.current_line(), 1);
        assert_eq!(p.caret().index(), 5);
        // row 1 center is 50, "world" is 50 wide
        assert_eq!(p.caret().position(), Point::new(75.0, 20.0 - 3.0));
    }

    #[test]
    fn paragraph_drops_input_once_lines_run_out() {
        let mut p = paragraph();
        let _ctx = focused(&mut p);
        type_str(&mut p, &"abcdef".repeat(5));
        assert_eq!(p.current_line(), 2);
        assert_eq!(p.text(), "abcdef\nabcdef\nabcdef");
        assert_eq!(p.caret().index(), 6);
    }

    #[test]
    fn paragraph_backspace_stays_within_the_line() {
        let mut p = paragraph();
        let _ctx = focused(&mut p);
        type_str(&mut p, "abcdefg");
        assert_eq!(p.current_line(), 1);
        press(&mut p, KeyCode::Backspace);
        assert_eq!(p.caret().index(), 0);
        assert_eq!(press(&mut p, KeyCode::Backspace), FieldAction::None);
        assert_eq!(press(&mut p, KeyCode::Left), FieldAction::None);
        assert_eq!(p.current_line(), 1);
        assert_eq!(p.text(), "abcdef");
    }

    #[test]
    fn paragraph_text_skips_blank_lines() {
        let mut p = paragraph();
        p.set_text("a\n\nb");
        assert_eq!(p.line(1).unwrap(), "");
        assert_eq!(p.text(), "a\nb");
        assert_eq!(p.current_line(), 2);

        p.set_text("1\n2\n3\n4");
        assert_eq!(p.text(), "1\n2\n3");

        p.clear_text();
        assert!(p.is_empty());
        assert_eq!(p.current_line(), 0);
    }

    #[test]
    fn renders_entry_with_caret_after_text() {
        let mut f = TextField::entry(
            Bounds::new(0.0, 0.0, 20.0, 3.0),
            CellMetrics,
            FieldOptions::cells(),
        );
        let _ctx = focused(&mut f);
        type_str(&mut f, "hi");

        let mut buf = Buffer::empty(Rect::new(0, 0, 20, 3));
        f.render(&mut BufferSurface::new(&mut buf));
        assert_eq!(buf[(0, 0)].symbol(), "╭");
        assert_eq!(buf[(9, 1)].symbol(), "h");
        assert_eq!(buf[(10, 1)].symbol(), "i");
        assert_eq!(buf[(11, 1)].bg, Color::Rgb(230, 230, 230));
        assert_eq!(buf[(10, 1)].fg, FieldStyle::default().focus);

        f.hide_caret();
        let mut buf = Buffer::empty(Rect::new(0, 0, 20, 3));
        f.render(&mut BufferSurface::new(&mut buf));
        assert_eq!(buf[(11, 1)].bg, FieldStyle::default().background);
    }

    #[test]
    fn renders_paragraph_rows() {
        let mut p = TextField::paragraph(
            Bounds::new(0.0, 0.0, 10.0, 3.0),
            CellMetrics,
            FieldOptions {
                style: FieldStyle {
                    border_width: 0.0,
                    ..FieldStyle::default()
                },
                ..FieldOptions::cells()
            },
        );
        p.set_text("ab\ncd");
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 3));
        p.render(&mut BufferSurface::new(&mut buf));
        assert_eq!(buf[(4, 0)].symbol(), "a");
        assert_eq!(buf[(4, 1)].symbol(), "c");
        assert_eq!(buf[(0, 2)].bg, FieldStyle::default().background);
    }

    #[test]
    fn field_losing_focus_mid_frame_does_not_repeat() {
        let mut a = entry(FieldOptions::default());
        let mut b = TextField::entry(
            Bounds::new(0.0, 50.0, 200.0, 40.0),
            px(),
            FieldOptions::default(),
        );
        let mut ctx = InputContext::new();
        ctx.begin_frame([click(10.0, 10.0)]);
        a.update(0.0, &mut ctx);
        b.update(0.0, &mut ctx);

        ctx.begin_frame([InputEvent::Key(keymap::key_char('x'))]);
        a.update(0.0, &mut ctx);
        ctx.begin_frame([]);
        a.update(0.6, &mut ctx);
        assert_eq!(a.text(), "x");

        // `b` takes ownership before `a` runs its frame with the repeat already due.
        ctx.begin_frame([click(10.0, 60.0)]);
        b.update(0.016, &mut ctx);
        assert_eq!(a.update(0.016, &mut ctx), FieldAction::None);
        assert_eq!(a.text(), "x");
        assert!(!a.is_focused());
        assert_eq!(ctx.focus_owner(), Some(b.id()));

        ctx.begin_frame([]);
        a.update(0.016, &mut ctx);
        assert_eq!(a.text(), "x");
    }

    #[test]
    fn refocus_keeps_caret_index() {
        let mut f = entry(FieldOptions::default());
        f.set_text("abcd");
        let mut ctx = focused(&mut f);
        press(&mut f, KeyCode::Left);
        press(&mut f, KeyCode::Left);

        ctx.begin_frame([click(500.0, 500.0)]);
        f.update(0.0, &mut ctx);
        assert!(!f.is_focused());
        assert_eq!(f.caret().index(), 2);

        ctx.begin_frame([click(100.0, 20.0)]);
        f.update(0.0, &mut ctx);
        assert!(f.is_focused());
        assert_eq!(f.caret().index(), 2);
        assert_eq!(f.caret().position().x, 100.0);
    }

    #[test]
    fn hiding_a_focused_field_releases_focus() {
        let mut f = entry(FieldOptions::default());
        let mut ctx = focused(&mut f);
        assert!(ctx.shortcuts_suppressed());

        f.set_visible(false, &mut ctx);
        assert!(!f.is_focused());
        assert_eq!(ctx.focus_owner(), None);
        assert!(!ctx.shortcuts_suppressed());

        f.set_visible(true, &mut ctx);
        assert!(f.is_visible());
        assert!(!f.is_focused());
    }

    #[test]
    fn moving_bounds_keeps_caret_index() {
        let mut f = entry(FieldOptions::default());
        f.set_text("abc");
        f.set_caret_index(1).unwrap();
        assert_eq!(f.caret().position().x, 95.0);

        f.set_bounds(Bounds::new(10.0, 0.0, 200.0, 40.0));
        assert_eq!(f.caret().index(), 1);
        assert_eq!(f.caret().position().x, 105.0);
    }
}
