use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::keymap;

/// Editing commands a text field understands besides plain character input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditAction {
    Backspace,
    Delete,
    WordBackspace,
    WordDelete,
    Left,
    Right,
    Submit,
}

/// Key bindings for text editing.
///
/// Shift is ignored for non-character keys, so Shift+Backspace still deletes. `Ctrl+W` is
/// accepted for word deletion because many terminals cannot report Ctrl+Backspace.
#[derive(Clone, Debug)]
pub struct EditBindings {
    pub backspace: Vec<KeyEvent>,
    pub delete: Vec<KeyEvent>,
    pub word_backspace: Vec<KeyEvent>,
    pub word_delete: Vec<KeyEvent>,
    pub left: Vec<KeyEvent>,
    pub right: Vec<KeyEvent>,
    pub submit: Vec<KeyEvent>,
}

impl Default for EditBindings {
    fn default() -> Self {
        Self {
            backspace: vec![keymap::key(KeyCode::Backspace)],
            delete: vec![keymap::key(KeyCode::Delete)],
            word_backspace: vec![
                keymap::key_ctrl_code(KeyCode::Backspace),
                keymap::key_ctrl('w'),
            ],
            word_delete: vec![keymap::key_ctrl_code(KeyCode::Delete)],
            left: vec![keymap::key(KeyCode::Left)],
            right: vec![keymap::key(KeyCode::Right)],
            submit: vec![keymap::key(KeyCode::Enter)],
        }
    }
}

impl EditBindings {
    pub fn action_for(&self, key: &KeyEvent) -> Option<EditAction> {
        let mut key = key.clone();
        if !matches!(key.code, KeyCode::Char(_)) {
            key.modifiers.shift = false;
        }
        let table = [
            (&self.word_backspace, EditAction::WordBackspace),
            (&self.word_delete, EditAction::WordDelete),
            (&self.backspace, EditAction::Backspace),
            (&self.delete, EditAction::Delete),
            (&self.left, EditAction::Left),
            (&self.right, EditAction::Right),
            (&self.submit, EditAction::Submit),
        ];
        table
            .into_iter()
            .find(|(patterns, _)| patterns.iter().any(|p| keymap::key_event_matches(p, &key)))
            .map(|(_, action)| action)
    }
}
