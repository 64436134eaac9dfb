use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::event::KeyboardEnhancementFlags;
use crossterm::event::PopKeyboardEnhancementFlags;
use crossterm::event::PushKeyboardEnhancementFlags;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::supports_keyboard_enhancement;
use larder::context::InputContext;
use larder::crossterm_input::input_event_from_crossterm;
use larder::form::FormOutcome;
use larder::form::SlotForm;
use larder::form::SlotFormOptions;
use larder::geometry::Bounds;
use larder::input::InputEvent;
use larder::input::KeyCode;
use larder::metrics::CellMetrics;
use larder::models::Freezer;
use larder::models::Slot;
use larder::models::StorageBox;
use larder::surface::BufferSurface;
use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::backend::CrosstermBackend;
use ratatui::style::Style;
use std::io;
use std::time::Duration;
use std::time::Instant;

const FORM_WIDTH: u16 = 60;
const FORM_HEIGHT: u16 = 26;

fn main() -> io::Result<()> {
    let mut stdout = io::stdout();
    enable_raw_mode()?;
    // Key release events drive key repeat; without them the terminal's own repeats are used.
    let enhanced = supports_keyboard_enhancement().unwrap_or(false);
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    if enhanced {
        crossterm::execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run(&mut terminal, enhanced);

    if enhanced {
        crossterm::execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    res
}

fn run<B: Backend>(terminal: &mut Terminal<B>, enhanced: bool) -> io::Result<()> {
    let mut freezer = Freezer::new("Freezer 1");
    freezer.id = 1;
    let mut storage_box = StorageBox::new("Box A", freezer.id);
    storage_box.id = 1;
    let mut slots: Vec<Slot> = Vec::new();

    let area = terminal.size()?;
    let bounds = Bounds::new(
        f32::from(area.width.saturating_sub(FORM_WIDTH) / 2),
        f32::from(area.height.saturating_sub(FORM_HEIGHT) / 2),
        f32::from(FORM_WIDTH),
        f32::from(FORM_HEIGHT),
    );
    let mut options = SlotFormOptions::cells();
    if !enhanced {
        options.field.repeat_delay = None;
    }
    let mut form = SlotForm::new(bounds, CellMetrics, options);
    let mut ctx = InputContext::new();
    let mut last = Instant::now();

    loop {
        let mut events = Vec::new();
        if crossterm::event::poll(Duration::from_millis(16))? {
            while crossterm::event::poll(Duration::ZERO)? {
                if let Some(ev) = input_event_from_crossterm(crossterm::event::read()?) {
                    events.push(ev);
                }
            }
        }

        let quit = events.iter().any(|ev| match ev {
            InputEvent::Key(key) if key.is_press() => match key.code {
                KeyCode::Esc => !ctx.shortcuts_suppressed(),
                KeyCode::Char('q') => !form.is_visible(),
                _ => false,
            },
            _ => false,
        });
        if quit {
            return Ok(());
        }
        let reopen = !form.is_visible()
            && events.iter().any(|ev| {
                matches!(
                    ev,
                    InputEvent::Key(key) if key.is_press() && key.code == KeyCode::Char('n')
                )
            });

        let now = Instant::now();
        let dt = now.duration_since(last).as_secs_f32();
        last = now;

        ctx.begin_frame(events);
        form.update(dt, &mut ctx);
        if let Some(outcome) = form.take_outcome() {
            tracing::info!(?outcome, "form closed");
            if let FormOutcome::Inserted(draft) = outcome {
                slots.push(draft.into_slot(&storage_box));
            }
        }
        if reopen {
            form.toggle_visibility(&mut ctx);
        }

        terminal.draw(|f| {
            let area = f.area();
            let buf = f.buffer_mut();
            let status = format!(
                "{} / {}: {} slots   n: new slot   q: quit",
                freezer.name,
                storage_box.name,
                slots.len()
            );
            buf.set_stringn(0, 0, status, area.width as usize, Style::default());
            for (i, slot) in slots.iter().enumerate() {
                let y = 1 + i as u16;
                if y >= area.height {
                    break;
                }
                let line = format!(
                    "{}  {}  {}  {}",
                    slot.name, slot.kind, slot.date, slot.description
                );
                buf.set_stringn(0, y, line, area.width as usize, Style::default());
            }
            form.render(&mut BufferSurface::new(buf));
        })?;
    }
}
