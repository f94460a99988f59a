//! inputmask - masked text input formatting
//!
//! This crate compiles format strings such as `+1 ([000]) [000]-[00]-[00]`
//! into masks, applies them to text with a caret, and picks the best of
//! several masks for a given input.

pub mod affinity;
pub mod cache;
pub mod cli;
pub mod config;
pub mod config_paths;
pub mod field;
pub mod format;
pub mod mask;
pub mod model;
pub mod rtl;
pub mod tracing;

// Re-export commonly used types
pub use affinity::{select_best_mask, AffinityCalculationStrategy, InvalidStrategy};
pub use cache::MaskCache;
pub use config::{MaskConfig, MaskOptions};
pub use field::MaskedField;
pub use format::FormatError;
pub use mask::{compile_mask, is_valid, mask, unmask, Mask, TextDirection};
pub use model::{CaretGravity, CaretString, MaskResult, Notation};
