//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use inputmask::{CaretGravity, CaretString, Mask, MaskResult, Notation};

/// Compile a left-to-right mask without custom notations
pub fn mask(format: &str) -> Mask {
    Mask::new(format, &[]).unwrap()
}

pub fn mask_with(format: &str, notations: &[Notation]) -> Mask {
    Mask::new(format, notations).unwrap()
}

/// Text produced by typing, caret at `caret`
pub fn insert(text: &str, caret: usize, autocomplete: bool) -> CaretString {
    CaretString::new(text, caret, CaretGravity::Forward { autocomplete })
}

/// Text produced by deleting, caret at `caret`
pub fn delete(text: &str, caret: usize, autoskip: bool) -> CaretString {
    CaretString::new(text, caret, CaretGravity::Backward { autoskip })
}

/// Typed text with the caret at the end
pub fn typed(text: &str, autocomplete: bool) -> CaretString {
    CaretString::at_end(text, CaretGravity::Forward { autocomplete })
}

pub fn apply(format: &str, text: &CaretString) -> MaskResult {
    mask(format).apply(text)
}

/// Check formatted text, caret and extracted value in one go
pub fn assert_formatted(result: &MaskResult, string: &str, caret: usize, extracted: &str) {
    assert_eq!(result.formatted_text.string, string, "formatted text");
    assert_eq!(result.formatted_text.caret_position, caret, "caret position");
    assert_eq!(result.extracted_value, extracted, "extracted value");
}
