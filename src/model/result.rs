//! Output of a mask application.

use serde::Serialize;

use super::caret_string::CaretString;
use super::state::{Next, StateId};

/// Formatted text, extracted value and scoring of one `apply` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaskResult {
    /// Formatted text with the adjusted caret
    pub formatted_text: CaretString,
    /// Raw value with free decoration removed
    pub extracted_value: String,
    /// Similarity between the input and the mask; may be negative
    pub affinity: i32,
    /// No mandatory characters remain to be filled
    pub complete: bool,
    /// Placeholder for the part of the format after the current content
    pub tail_placeholder: String,
}

impl MaskResult {
    /// Mirror every text field, used by right-to-left masks.
    pub fn reversed(&self) -> Self {
        Self {
            formatted_text: self.formatted_text.reversed(),
            extracted_value: self.extracted_value.chars().rev().collect(),
            affinity: self.affinity,
            complete: self.complete,
            tail_placeholder: self.tail_placeholder.chars().rev().collect(),
        }
    }
}

/// A literal passed while scanning that autoskip may remove again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skip {
    /// State that produced the literal
    pub origin: StateId,
    pub insert: Option<char>,
    pub value: Option<char>,
}

/// Autocompletion transitions collected while scanning the input.
///
/// Pushing `None` (a state that cannot autocomplete) resets the stack, so it
/// only ever holds the run of literals directly behind the scan position.
#[derive(Debug, Clone, Default)]
pub struct AutocompletionStack {
    stack: Vec<Skip>,
}

impl AutocompletionStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, origin: StateId, item: Option<Next>) {
        match item {
            Some(next) => self.stack.push(Skip {
                origin,
                insert: next.insert,
                value: next.value,
            }),
            None => self.stack.clear(),
        }
    }

    pub fn pop(&mut self) -> Option<Skip> {
        self.stack.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }
}
