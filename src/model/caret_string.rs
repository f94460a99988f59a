//! Text with a caret position and a caret gravity policy.

use serde::{Deserialize, Serialize};

/// How the caret reacts to characters inserted or removed around it.
///
/// `Forward` is used when the user inserts text, `Backward` when the user
/// deletes text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaretGravity {
    /// Insertion: optionally autocomplete fixed characters after the input
    Forward { autocomplete: bool },
    /// Deletion: optionally skip auto-inserted characters before the caret
    Backward { autoskip: bool },
}

impl CaretGravity {
    pub fn autocomplete(&self) -> bool {
        matches!(self, Self::Forward { autocomplete: true })
    }

    pub fn autoskip(&self) -> bool {
        matches!(self, Self::Backward { autoskip: true })
    }

    pub fn is_forward(&self) -> bool {
        matches!(self, Self::Forward { .. })
    }
}

impl Default for CaretGravity {
    fn default() -> Self {
        Self::Forward {
            autocomplete: false,
        }
    }
}

/// Text with a caret position (in chars) and gravity.
///
/// Invariant: `caret_position <= string.chars().count()`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaretString {
    pub string: String,
    pub caret_position: usize,
    pub caret_gravity: CaretGravity,
}

impl CaretString {
    /// Create a caret string; an out-of-range caret is clamped to the end of the text.
    pub fn new(string: impl Into<String>, caret_position: usize, caret_gravity: CaretGravity) -> Self {
        let string = string.into();
        let len = string.chars().count();
        Self {
            string,
            caret_position: caret_position.min(len),
            caret_gravity,
        }
    }

    /// Caret string with the caret placed after the last character
    pub fn at_end(string: impl Into<String>, caret_gravity: CaretGravity) -> Self {
        let string = string.into();
        let len = string.chars().count();
        Self {
            string,
            caret_position: len,
            caret_gravity,
        }
    }

    /// Length of the text in chars
    pub fn len(&self) -> usize {
        self.string.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.string.is_empty()
    }

    /// Mirror the text; the caret keeps its distance from the opposite end.
    pub fn reversed(&self) -> Self {
        let len = self.len();
        Self {
            string: self.string.chars().rev().collect(),
            caret_position: len.saturating_sub(self.caret_position),
            caret_gravity: self.caret_gravity,
        }
    }
}
