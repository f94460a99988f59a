//! Format string compiler.
//!
//! Turns a sanitized format string into an [`Automaton`]. The string is
//! scanned once, left to right, carrying three pieces of context: whether
//! the scan is inside `[...]` (value slots), inside `{...}` (fixed
//! literals), and the previous character (escapes, ellipsis inheritance).
//!
//! | Symbol in `[...]` | State |
//! |---|---|
//! | `0` / `9` | mandatory / optional digit |
//! | `A` / `a` | mandatory / optional letter |
//! | `_` / `-` | mandatory / optional letter or digit |
//! | `…` | ellipsis repeating the previous symbol's type |
//! | other | custom [`Notation`] |

use super::error::FormatError;
use super::sanitizer::{sanitize, ELLIPSIS};
use crate::model::state::ChainNode;
use crate::model::{Automaton, Notation, ValueKind};

/// Compiles format strings against a set of custom notations.
#[derive(Debug, Clone, Copy)]
pub struct Compiler<'a> {
    custom_notations: &'a [Notation],
}

impl<'a> Compiler<'a> {
    pub fn new(custom_notations: &'a [Notation]) -> Self {
        Self { custom_notations }
    }

    /// Sanitize and compile `format`.
    pub fn compile(&self, format: &str) -> Result<Automaton, FormatError> {
        let sanitized = sanitize(format)?;
        let automaton = self.compile_sanitized(&sanitized)?;
        tracing::debug!(
            format,
            sanitized = %sanitized,
            states = automaton.state_count(),
            "compiled mask format"
        );
        Ok(automaton)
    }

    fn compile_sanitized(&self, sanitized: &str) -> Result<Automaton, FormatError> {
        let mut nodes = Vec::with_capacity(sanitized.len());
        let mut valuable = false;
        let mut fixed = false;
        let mut last_character: Option<char> = None;

        for ch in sanitized.chars() {
            if last_character != Some('\\') {
                let context = match ch {
                    '[' => Some((true, false)),
                    '{' => Some((false, true)),
                    ']' | '}' => Some((false, false)),
                    '\\' => Some((valuable, fixed)),
                    _ => None,
                };
                if let Some((next_valuable, next_fixed)) = context {
                    valuable = next_valuable;
                    fixed = next_fixed;
                    last_character = Some(ch);
                    continue;
                }
            }

            if valuable {
                let node = match ch {
                    '0' => ChainNode::Value(ValueKind::Numeric),
                    'A' => ChainNode::Value(ValueKind::Literal),
                    '_' => ChainNode::Value(ValueKind::AlphaNumeric),
                    '9' => ChainNode::OptionalValue(ValueKind::Numeric),
                    'a' => ChainNode::OptionalValue(ValueKind::Literal),
                    '-' => ChainNode::OptionalValue(ValueKind::AlphaNumeric),
                    ELLIPSIS => {
                        // Nothing after an ellipsis can ever be reached
                        nodes.push(ChainNode::Ellipsis(
                            self.determine_inherited_type(last_character)?,
                        ));
                        break;
                    }
                    other => self.compile_with_custom_notations(other)?,
                };
                nodes.push(node);
            } else if fixed {
                nodes.push(ChainNode::Fixed(ch));
            } else {
                nodes.push(ChainNode::Free(ch));
            }
            last_character = Some(ch);
        }

        Ok(Automaton::from_chain(nodes))
    }

    fn compile_with_custom_notations(&self, ch: char) -> Result<ChainNode, FormatError> {
        let notation = self
            .find_notation(ch)
            .ok_or(FormatError::UnknownSymbol(ch))?;
        let kind = ValueKind::Custom {
            character: ch,
            character_set: notation.character_set.clone(),
        };
        Ok(if notation.is_optional {
            ChainNode::OptionalValue(kind)
        } else {
            ChainNode::Value(kind)
        })
    }

    fn determine_inherited_type(
        &self,
        last_character: Option<char>,
    ) -> Result<ValueKind, FormatError> {
        match last_character.ok_or(FormatError::DanglingEllipsis)? {
            '0' | '9' => Ok(ValueKind::Numeric),
            'A' | 'a' => Ok(ValueKind::Literal),
            '_' | '-' | ELLIPSIS | '[' => Ok(ValueKind::AlphaNumeric),
            other => self
                .find_notation(other)
                .map(|notation| ValueKind::Custom {
                    character: other,
                    character_set: notation.character_set.clone(),
                })
                .ok_or(FormatError::DanglingEllipsis),
        }
    }

    fn find_notation(&self, ch: char) -> Option<&'a Notation> {
        self.custom_notations
            .iter()
            .find(|notation| notation.character == ch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::State;

    fn compile(format: &str) -> Result<Automaton, FormatError> {
        Compiler::new(&[]).compile(format)
    }

    #[test]
    fn test_groups_and_free_text() {
        let automaton = compile("[00]-[00]").unwrap();
        assert_eq!(automaton.describe(), "[0] -> [0] -> - -> [0] -> [0] -> EOL");
    }

    #[test]
    fn test_curly_group_is_fixed() {
        let automaton = compile("{+7}[0]").unwrap();
        let states: Vec<&State> = automaton.chain().collect();
        assert!(matches!(states[0], State::Fixed { character: '+', .. }));
        assert!(matches!(states[1], State::Fixed { character: '7', .. }));
        assert!(matches!(
            states[2],
            State::Value {
                kind: ValueKind::Numeric,
                ..
            }
        ));
    }

    #[test]
    fn test_optional_symbols() {
        let automaton = compile("[09a-]").unwrap();
        assert_eq!(automaton.describe(), "[0] -> [9] -> [a] -> [-] -> EOL");
    }

    #[test]
    fn test_escaped_bracket_is_free_literal() {
        let automaton = compile("\\[[0]").unwrap();
        let states: Vec<&State> = automaton.chain().collect();
        assert_eq!(states.len(), 2);
        assert!(matches!(states[0], State::Free { character: '[', .. }));
    }

    #[test]
    fn test_custom_notations() {
        let notations = vec![
            Notation::mandatory('X', "XYZ"),
            Notation::optional('h', "0123456789abcdef"),
        ];
        let automaton = Compiler::new(&notations).compile("[X][hh]").unwrap();
        assert_eq!(automaton.describe(), "[X] -> [h] -> [h] -> EOL");
        let states: Vec<&State> = automaton.chain().collect();
        assert!(matches!(states[0], State::Value { .. }));
        assert!(matches!(states[1], State::OptionalValue { .. }));
    }

    #[test]
    fn test_builtin_symbols_win_over_notations() {
        let notations = vec![Notation::mandatory('A', "XYZ")];
        let automaton = Compiler::new(&notations).compile("[A]").unwrap();
        assert!(matches!(
            automaton.chain().next(),
            Some(State::Value {
                kind: ValueKind::Literal,
                ..
            })
        ));
    }

    #[test]
    fn test_unknown_symbol_fails() {
        assert_eq!(compile("[0X]"), Err(FormatError::UnknownSymbol('X')));
    }

    #[test]
    fn test_ellipsis_inherits_previous_type() {
        let automaton = compile("[0…]").unwrap();
        let states: Vec<&State> = automaton.chain().collect();
        assert_eq!(states.len(), 2);
        assert!(matches!(
            states[1],
            State::Value {
                kind: ValueKind::Numeric,
                elliptical: true,
                ..
            }
        ));

        let letters = compile("[a...]").unwrap();
        assert_eq!(letters.describe(), "[a] -> […] -> EOL");
        assert!(matches!(
            letters.chain().nth(1),
            Some(State::Value {
                kind: ValueKind::Literal,
                ..
            })
        ));
    }

    #[test]
    fn test_lone_ellipsis_is_alphanumeric() {
        let automaton = compile("[…]").unwrap();
        assert!(matches!(
            automaton.chain().next(),
            Some(State::Value {
                kind: ValueKind::AlphaNumeric,
                elliptical: true,
                ..
            })
        ));
    }

    #[test]
    fn test_ellipsis_with_custom_notation() {
        let notations = vec![Notation::mandatory('b', "01")];
        let automaton = Compiler::new(&notations).compile("[b…]").unwrap();
        assert!(matches!(
            automaton.chain().nth(1),
            Some(State::Value {
                kind: ValueKind::Custom { character: 'b', .. },
                elliptical: true,
                ..
            })
        ));
    }

    #[test]
    fn test_format_after_ellipsis_is_ignored() {
        let automaton = compile("[0…]-[00]").unwrap();
        assert_eq!(automaton.chain().count(), 2);
    }

    #[test]
    fn test_ellipsis_after_escape_fails() {
        assert_eq!(compile("[\\…]"), Err(FormatError::DanglingEllipsis));
    }

    #[test]
    fn test_unbalanced_format_fails() {
        assert!(matches!(
            compile("[00"),
            Err(FormatError::UnbalancedBrackets { .. })
        ));
    }
}
