//! Forward scanning iterator over a [`CaretString`].

use super::caret_string::{CaretGravity, CaretString};

/// Scans a caret string one char at a time and reports whether an insertion or
/// deletion at the current index would move the caret.
#[derive(Debug, Clone)]
pub struct CaretStringIterator {
    chars: Vec<char>,
    caret_position: usize,
    caret_gravity: CaretGravity,
    current_index: usize,
}

impl CaretStringIterator {
    pub fn new(caret_string: &CaretString) -> Self {
        Self {
            chars: caret_string.string.chars().collect(),
            caret_position: caret_string.caret_position,
            caret_gravity: caret_string.caret_gravity,
            current_index: 0,
        }
    }

    /// Index of the next char to be returned by [`Iterator::next`]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Forward gravity leans right: positions at or before the caret push it.
    /// Backward gravity leans left: only positions strictly before it do.
    pub fn insertion_affects_caret(&self) -> bool {
        match self.caret_gravity {
            CaretGravity::Backward { .. } => self.current_index < self.caret_position,
            CaretGravity::Forward { .. } => {
                self.current_index <= self.caret_position
                    || (self.current_index == 0 && self.caret_position == 0)
            }
        }
    }

    pub fn deletion_affects_caret(&self) -> bool {
        self.current_index < self.caret_position
    }
}

impl Iterator for CaretStringIterator {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        let ch = *self.chars.get(self.current_index)?;
        self.current_index += 1;
        Some(ch)
    }
}
