//! Custom notation rules for square-bracket format groups.

use serde::{Deserialize, Serialize};

/// A custom symbol rule usable inside `[...]` groups of a format string.
///
/// A notation with `character: 'X'` and `character_set: "ABC"` lets a format
/// like `[XX]` accept two characters out of `A`, `B` or `C`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Notation {
    /// Trigger character used in the format string
    pub character: char,

    /// Characters accepted by the slot (membership test, order irrelevant)
    #[serde(alias = "characterSet")]
    pub character_set: String,

    /// Optional slots are skipped when the input does not match
    #[serde(default, alias = "isOptional")]
    pub is_optional: bool,
}

impl Notation {
    pub fn new(character: char, character_set: impl Into<String>, is_optional: bool) -> Self {
        Self {
            character,
            character_set: character_set.into(),
            is_optional,
        }
    }

    /// Mandatory notation shorthand
    pub fn mandatory(character: char, character_set: impl Into<String>) -> Self {
        Self::new(character, character_set, false)
    }

    /// Optional notation shorthand
    pub fn optional(character: char, character_set: impl Into<String>) -> Self {
        Self::new(character, character_set, true)
    }

    /// Check if the notation's character set contains `ch`
    pub fn accepts(&self, ch: char) -> bool {
        self.character_set.contains(ch)
    }
}
