use larder_core::context::InputContext;
use larder_core::field::FieldOptions;
use larder_core::field::FieldStyle;
use larder_core::field::TextField;
use larder_core::geometry::Bounds;
use larder_core::metrics::FontMetrics;
use larder_core::surface::Surface;

use crate::button::Button;
use crate::button::ButtonStyle;
use crate::models::SlotDraft;
use crate::theme::Theme;

#[derive(Clone, Debug)]
pub struct SlotFormOptions {
    pub theme: Theme,
    /// Template for the four fields; colors come from `theme`.
    pub field: FieldOptions,
    /// Added to the line height to size label and entry rows.
    pub row_padding: f32,
    pub row_gap: f32,
    pub padding: f32,
    pub button_width: f32,
    pub button_height: f32,
    pub button_padding: f32,
    pub border_width: f32,
}

impl Default for SlotFormOptions {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            field: FieldOptions::default(),
            row_padding: 10.0,
            row_gap: 5.0,
            padding: 20.0,
            button_width: 100.0,
            button_height: 30.0,
            button_padding: 10.0,
            border_width: 2.0,
        }
    }
}

impl SlotFormOptions {
    /// Sizes for a terminal, one unit per cell.
    pub fn cells() -> Self {
        Self {
            field: FieldOptions::cells(),
            row_padding: 2.0,
            row_gap: 0.0,
            padding: 2.0,
            button_width: 12.0,
            button_height: 1.0,
            button_padding: 1.0,
            border_width: 1.0,
            ..Self::default()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotField {
    Name,
    Kind,
    Date,
    Description,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormOutcome {
    Inserted(SlotDraft),
    Cancelled,
}

/// Slot entry form: name, type and date entries on the left, a description paragraph on the
/// right, Insert and Cancel buttons at the bottom.
///
/// Closing either way hides the form, resets its fields and leaves a [`FormOutcome`] for
/// [`SlotForm::take_outcome`].
pub struct SlotForm<M> {
    bounds: Bounds,
    metrics: M,
    options: SlotFormOptions,
    visible: bool,
    labels: Vec<(&'static str, Bounds)>,
    name: TextField<M>,
    kind: TextField<M>,
    date: TextField<M>,
    description: TextField<M>,
    insert: Button,
    cancel: Button,
    outcome: Option<FormOutcome>,
    on_close: Option<Box<dyn FnMut()>>,
}

impl<M: FontMetrics + Clone> SlotForm<M> {
    pub fn new(bounds: Bounds, metrics: M, options: SlotFormOptions) -> Self {
        let theme = &options.theme;
        let pad = options.padding;
        let row_h = metrics.line_height() + options.row_padding;
        let step = row_h + options.row_gap;
        let col_w = ((bounds.width - pad * 3.0) * 0.5).floor();
        let left_x = bounds.x + pad;
        let right_x = left_x + col_w + pad;
        let top = bounds.y + pad;
        let row = |i: usize, x: f32| Bounds::new(x, top + step * i as f32, col_w, row_h);

        let entry_options = FieldOptions {
            style: FieldStyle {
                background: theme.field_background,
                foreground: theme.field_text,
                focus: theme.field_focus,
                corner_radius: 0.0,
                ..options.field.style
            },
            ..options.field.clone()
        };
        let paragraph_options = FieldOptions {
            style: FieldStyle {
                border_width: 0.0,
                ..entry_options.style
            },
            ..entry_options.clone()
        };

        let name = TextField::entry(row(1, left_x), metrics.clone(), entry_options.clone());
        let kind = TextField::entry(row(3, left_x), metrics.clone(), entry_options.clone());
        let date = TextField::entry(row(5, left_x), metrics.clone(), entry_options);
        let description_top = name.bounds().y;
        let description = TextField::paragraph(
            Bounds::new(
                right_x,
                description_top,
                col_w,
                date.bounds().bottom() - description_top,
            ),
            metrics.clone(),
            paragraph_options,
        );

        let labels = vec![
            ("Name", row(0, left_x)),
            ("Type", row(2, left_x)),
            ("Date", row(4, left_x)),
            ("Description", row(0, right_x)),
        ];

        let total = options.button_width * 2.0 + options.button_padding;
        let buttons_x = (bounds.center().x - total * 0.5).floor();
        let buttons_y = bounds.bottom() - options.button_padding - options.button_height;
        let button = |i: usize| {
            Bounds::new(
                buttons_x + (options.button_width + options.button_padding) * i as f32,
                buttons_y,
                options.button_width,
                options.button_height,
            )
        };
        let insert = Button::new(
            "Insert",
            button(0),
            ButtonStyle {
                background: theme.panel,
                foreground: theme.confirm,
                hover: theme.hover,
            },
        );
        let cancel = Button::new(
            "Cancel",
            button(1),
            ButtonStyle {
                background: theme.panel,
                foreground: theme.cancel,
                hover: theme.hover,
            },
        );

        Self {
            bounds,
            metrics,
            options,
            visible: true,
            labels,
            name,
            kind,
            date,
            description,
            insert,
            cancel,
            outcome: None,
            on_close: None,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Hiding blurs whichever field is focused.
    pub fn toggle_visibility(&mut self, ctx: &mut InputContext) {
        self.visible = !self.visible;
        if !self.visible {
            for field in self.fields_mut() {
                if field.is_focused() {
                    field.blur(ctx);
                }
            }
        }
    }

    pub fn field(&self, which: SlotField) -> &TextField<M> {
        match which {
            SlotField::Name => &self.name,
            SlotField::Kind => &self.kind,
            SlotField::Date => &self.date,
            SlotField::Description => &self.description,
        }
    }

    pub fn field_mut(&mut self, which: SlotField) -> &mut TextField<M> {
        match which {
            SlotField::Name => &mut self.name,
            SlotField::Kind => &mut self.kind,
            SlotField::Date => &mut self.date,
            SlotField::Description => &mut self.description,
        }
    }

    pub fn insert_button(&self) -> &Button {
        &self.insert
    }

    pub fn cancel_button(&self) -> &Button {
        &self.cancel
    }

    pub fn set_on_close(&mut self, callback: impl FnMut() + 'static) {
        self.on_close = Some(Box::new(callback));
    }

    pub fn draft(&self) -> SlotDraft {
        SlotDraft {
            name: self.name.text(),
            kind: self.kind.text(),
            date: self.date.text(),
            description: self.description.text(),
        }
    }

    pub fn take_outcome(&mut self) -> Option<FormOutcome> {
        self.outcome.take()
    }

    pub fn reset(&mut self) {
        for field in self.fields_mut() {
            field.clear_text();
        }
    }

    /// Closes with the current draft as the outcome.
    pub fn close(&mut self, ctx: &mut InputContext) {
        let draft = self.draft();
        self.finish(FormOutcome::Inserted(draft), ctx);
    }

    pub fn cancel(&mut self, ctx: &mut InputContext) {
        self.finish(FormOutcome::Cancelled, ctx);
    }

    pub fn update(&mut self, dt: f32, ctx: &mut InputContext) {
        if !self.visible {
            return;
        }
        let insert = self.insert.update(ctx);
        let cancel = self.cancel.update(ctx);
        for field in self.fields_mut() {
            field.update(dt, ctx);
        }
        if insert {
            self.close(ctx);
        } else if cancel {
            self.cancel(ctx);
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        if !self.visible {
            return;
        }
        let theme = &self.options.theme;
        surface.draw_rect(self.bounds, theme.panel, 0.0, 0.0);
        surface.draw_rect(self.bounds, theme.border, self.options.border_width, 0.0);
        for (text, bounds) in &self.labels {
            surface.draw_text_centered(text, theme.label, *bounds, &self.metrics);
        }
        for field in [&self.name, &self.kind, &self.date, &self.description] {
            field.render(surface);
        }
        self.insert.render(surface, &self.metrics);
        self.cancel.render(surface, &self.metrics);
    }

    fn fields_mut(&mut self) -> [&mut TextField<M>; 4] {
        [
            &mut self.name,
            &mut self.kind,
            &mut self.date,
            &mut self.description,
        ]
    }

    fn finish(&mut self, outcome: FormOutcome, ctx: &mut InputContext) {
        match &outcome {
            FormOutcome::Inserted(draft) => {
                tracing::debug!(name = %draft.name, "slot form inserted")
            }
            FormOutcome::Cancelled => tracing::debug!("slot form cancelled"),
        }
        self.outcome = Some(outcome);
        if let Some(callback) = self.on_close.as_mut() {
            callback();
        }
        if self.visible {
            self.toggle_visibility(ctx);
        }
        self.reset();
    }
}
