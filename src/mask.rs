//! Compiled masks and the `apply` algorithm.
//!
//! A [`Mask`] owns the [`Automaton`] compiled from its format string. Applying
//! it walks the input once, feeding characters to the automaton, and then
//! runs two optional passes:
//!
//! - **autocomplete** (forward gravity): append literals that follow the
//!   input, so typing `12` into `[00]-[00]` yields `12-`
//! - **autoskip** (backward gravity): remove literals directly before the
//!   caret, so deleting from `12-` yields `12`
//!
//! Right-to-left masks compile the mirrored format and apply it to the
//! reversed input; see [`crate::rtl`].

use serde::{Deserialize, Serialize};

use crate::format::{Compiler, FormatError};
use crate::model::{
    Automaton, AutocompletionStack, CaretGravity, CaretString, CaretStringIterator, MaskResult,
    Notation, State,
};
use crate::rtl::mirror_format;

/// Direction the mask reads its input in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

impl TextDirection {
    pub fn from_right_to_left(right_to_left: bool) -> Self {
        if right_to_left {
            Self::RightToLeft
        } else {
            Self::LeftToRight
        }
    }

    pub fn is_right_to_left(self) -> bool {
        self == Self::RightToLeft
    }
}

/// A compiled format string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    format: String,
    custom_notations: Vec<Notation>,
    direction: TextDirection,
    automaton: Automaton,
}

impl Mask {
    /// Compile a left-to-right mask.
    pub fn new(format: &str, custom_notations: &[Notation]) -> Result<Self, FormatError> {
        Self::with_direction(format, custom_notations, TextDirection::LeftToRight)
    }

    pub fn with_direction(
        format: &str,
        custom_notations: &[Notation],
        direction: TextDirection,
    ) -> Result<Self, FormatError> {
        let compiled_format = match direction {
            TextDirection::LeftToRight => format.to_string(),
            TextDirection::RightToLeft => mirror_format(format),
        };
        let automaton = Compiler::new(custom_notations).compile(&compiled_format)?;
        Ok(Self {
            format: format.to_string(),
            custom_notations: custom_notations.to_vec(),
            direction,
            automaton,
        })
    }

    /// Format string as given by the caller
    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn custom_notations(&self) -> &[Notation] {
        &self.custom_notations
    }

    pub fn direction(&self) -> TextDirection {
        self.direction
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    /// Format the text, extract its value and move the caret.
    pub fn apply(&self, text: &CaretString) -> MaskResult {
        match self.direction {
            TextDirection::LeftToRight => self.apply_in_reading_order(text),
            TextDirection::RightToLeft => self.apply_in_reading_order(&text.reversed()).reversed(),
        }
    }

    fn apply_in_reading_order(&self, text: &CaretString) -> MaskResult {
        let automaton = &self.automaton;
        let gravity = text.caret_gravity;
        let mut iterator = CaretStringIterator::new(text);

        let mut affinity: i32 = 0;
        let mut extracted_value: Vec<char> = Vec::new();
        let mut modified_string: Vec<char> = Vec::new();
        let mut modified_caret_position = text.caret_position as isize;

        let mut state = automaton.root();
        let mut autocompletion_stack = AutocompletionStack::new();

        let mut insertion_affects_caret = iterator.insertion_affects_caret();
        let mut deletion_affects_caret = iterator.deletion_affects_caret();
        let mut character = iterator.next();

        while let Some(ch) = character {
            match automaton.accept(state, ch) {
                Some(next) => {
                    if deletion_affects_caret {
                        autocompletion_stack.push(state, automaton.autocomplete(state));
                    }
                    state = next.state;
                    modified_string.extend(next.insert);
                    extracted_value.extend(next.value);
                    if next.pass {
                        insertion_affects_caret = iterator.insertion_affects_caret();
                        deletion_affects_caret = iterator.deletion_affects_caret();
                        character = iterator.next();
                        affinity += 1;
                    } else {
                        if insertion_affects_caret && next.insert.is_some() {
                            modified_caret_position += 1;
                        }
                        affinity -= 1;
                    }
                }
                None => {
                    if deletion_affects_caret {
                        modified_caret_position -= 1;
                    }
                    insertion_affects_caret = iterator.insertion_affects_caret();
                    deletion_affects_caret = iterator.deletion_affects_caret();
                    character = iterator.next();
                    affinity -= 1;
                }
            }
        }

        while gravity.autocomplete() && insertion_affects_caret {
            let Some(next) = automaton.autocomplete(state) else {
                break;
            };
            state = next.state;
            modified_string.extend(next.insert);
            extracted_value.extend(next.value);
            if next.insert.is_some() {
                modified_caret_position += 1;
            }
        }

        let mut tail_state = state;
        while gravity.autoskip() {
            let Some(skip) = autocompletion_stack.pop() else {
                break;
            };
            if modified_string.len() as isize == modified_caret_position {
                if skip.insert.is_some() && skip.insert == modified_string.last().copied() {
                    modified_string.pop();
                    modified_caret_position -= 1;
                }
                if skip.value.is_some() && skip.value == extracted_value.last().copied() {
                    extracted_value.pop();
                }
            } else if skip.insert.is_some() {
                modified_caret_position -= 1;
            }
            tail_state = skip.origin;
        }

        let caret_position = modified_caret_position.clamp(0, modified_string.len() as isize);
        MaskResult {
            formatted_text: CaretString {
                string: modified_string.into_iter().collect(),
                caret_position: caret_position as usize,
                caret_gravity: gravity,
            },
            extracted_value: extracted_value.into_iter().collect(),
            affinity,
            complete: automaton.no_mandatory_characters_left_after(state),
            tail_placeholder: automaton.placeholder_from(tail_state, ""),
        }
    }

    /// Placeholder text for the whole format, e.g. `+7 (000) 000-00-00`.
    pub fn placeholder(&self) -> String {
        let placeholder = self.automaton.placeholder_from(self.automaton.root(), "");
        match self.direction {
            TextDirection::LeftToRight => placeholder,
            TextDirection::RightToLeft => placeholder.chars().rev().collect(),
        }
    }

    /// Minimum length of a complete formatted text.
    pub fn acceptable_text_length(&self) -> usize {
        self.count_states(|state| {
            matches!(
                state,
                State::Fixed { .. } | State::Free { .. } | State::Value { .. }
            )
        })
    }

    /// Maximum length of a formatted text.
    pub fn total_text_length(&self) -> usize {
        self.count_states(|state| {
            matches!(
                state,
                State::Fixed { .. }
                    | State::Free { .. }
                    | State::Value { .. }
                    | State::OptionalValue { .. }
            )
        })
    }

    /// Minimum length of a complete extracted value.
    pub fn acceptable_value_length(&self) -> usize {
        self.count_states(|state| matches!(state, State::Fixed { .. } | State::Value { .. }))
    }

    /// Maximum length of an extracted value.
    pub fn total_value_length(&self) -> usize {
        self.count_states(|state| {
            matches!(
                state,
                State::Fixed { .. } | State::Value { .. } | State::OptionalValue { .. }
            )
        })
    }

    fn count_states(&self, predicate: impl Fn(&State) -> bool) -> usize {
        self.automaton.chain().filter(|&state| predicate(state)).count()
    }
}

/// Compile a mask, mirroring the format for right-to-left input.
pub fn compile_mask(
    format: &str,
    custom_notations: &[Notation],
    right_to_left: bool,
) -> Result<Mask, FormatError> {
    Mask::with_direction(
        format,
        custom_notations,
        TextDirection::from_right_to_left(right_to_left),
    )
}

/// Whether `format` compiles with the given notations.
pub fn is_valid(format: &str, custom_notations: &[Notation]) -> bool {
    Mask::new(format, custom_notations).is_ok()
}

/// Format `text` with `format`, caret at the end.
pub fn mask(format: &str, text: &str, autocomplete: bool) -> Result<String, FormatError> {
    let mask = Mask::new(format, &[])?;
    let text = CaretString::at_end(text, CaretGravity::Forward { autocomplete });
    Ok(mask.apply(&text).formatted_text.string)
}

/// Extract the value of `text` formatted with `format`.
pub fn unmask(format: &str, text: &str, autocomplete: bool) -> Result<String, FormatError> {
    let mask = Mask::new(format, &[])?;
    let text = CaretString::at_end(text, CaretGravity::Forward { autocomplete });
    Ok(mask.apply(&text).extracted_value)
}
