//! Right-to-left masks.
//!
//! An RTL mask compiles the mirrored format and applies it to the reversed
//! input; the result is reversed back before it is returned.

use crate::format::FormatError;
use crate::mask::{Mask, TextDirection};
use crate::model::Notation;

/// Mirror a format string so it reads right to left.
///
/// Brackets swap sides while escaped brackets stay escaped:
/// `\[[00]` becomes `[00]\[`.
pub fn mirror_format(format: &str) -> String {
    let reversed: String = format.chars().rev().collect();
    reversed
        .replace("[\\", "\\]")
        .replace("]\\", "\\[")
        .replace("{\\", "\\}")
        .replace("}\\", "\\{")
        .chars()
        .map(|ch| match ch {
            '[' => ']',
            ']' => '[',
            '{' => '}',
            '}' => '{',
            other => other,
        })
        .collect()
}

impl Mask {
    /// Compile a right-to-left mask.
    pub fn right_to_left(format: &str, custom_notations: &[Notation]) -> Result<Self, FormatError> {
        Self::with_direction(format, custom_notations, TextDirection::RightToLeft)
    }
}
