use crate::error::EditError;

/// One line of text stored as code points, edited by char index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineBuffer {
    chars: Vec<char>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn insert(&mut self, index: usize, ch: char) -> Result<(), EditError> {
        if index > self.chars.len() {
            return Err(EditError::IndexOutOfRange {
                index,
                len: self.chars.len(),
            });
        }
        self.chars.insert(index, ch);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<char, EditError> {
        if index >= self.chars.len() {
            return Err(EditError::IndexOutOfRange {
                index,
                len: self.chars.len(),
            });
        }
        Ok(self.chars.remove(index))
    }

    pub fn clear(&mut self) {
        self.chars.clear();
    }

    /// Renders the line with every char replaced by `mask`, or as-is.
    pub fn display(&self, mask: Option<char>) -> String {
        match mask {
            Some(m) => std::iter::repeat_n(m, self.chars.len()).collect(),
            None => self.chars.iter().collect(),
        }
    }
}

impl From<&str> for LineBuffer {
    fn from(s: &str) -> Self {
        Self {
            chars: s.chars().collect(),
        }
    }
}

impl std::fmt::Display for LineBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.chars.iter().try_for_each(|c| std::fmt::Write::write_char(f, *c))
    }
}
