use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering;

use crate::geometry::Point;
use crate::input::InputEvent;
use crate::input::MouseButton;
use crate::input::MouseEventKind;

/// Identity of a focusable widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FieldId(u32);

impl FieldId {
    pub fn next() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Per-frame input state shared by every widget of one UI.
///
/// The host keeps one context alive across frames, calls [`InputContext::begin_frame`] with the
/// frame's events, then updates widgets one after another with `&mut` access. Focus ownership
/// persists between frames; the click is valid for one frame only.
#[derive(Clone, Debug, Default)]
pub struct InputContext {
    events: Vec<InputEvent>,
    pointer: Point,
    click: Option<Point>,
    click_claimed: bool,
    focus_owner: Option<FieldId>,
}

impl InputContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_frame(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        self.events = events.into_iter().collect();
        self.click = None;
        self.click_claimed = false;
        for ev in &self.events {
            if let InputEvent::Mouse(m) = ev {
                self.pointer = m.position;
                if m.kind == MouseEventKind::Down(MouseButton::Left) {
                    self.click = Some(m.position);
                }
            }
        }
    }

    pub fn events(&self) -> &[InputEvent] {
        &self.events
    }

    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// The frame's left click, unless a widget already claimed it.
    pub fn click(&self) -> Option<Point> {
        if self.click_claimed { None } else { self.click }
    }

    /// Consumes the click so widgets updated later in the frame do not react to it.
    pub fn claim_click(&mut self) -> Option<Point> {
        let click = self.click();
        if click.is_some() {
            self.click_claimed = true;
        }
        click
    }

    pub fn focus_owner(&self) -> Option<FieldId> {
        self.focus_owner
    }

    /// Global key shortcuts should be ignored while a field owns keyboard input.
    pub fn shortcuts_suppressed(&self) -> bool {
        self.focus_owner.is_some()
    }

    pub fn take_focus(&mut self, id: FieldId) {
        self.focus_owner = Some(id);
    }

    /// Releases focus only if `id` still holds it.
    pub fn release_focus(&mut self, id: FieldId) {
        if self.focus_owner == Some(id) {
            self.focus_owner = None;
        }
    }
}
