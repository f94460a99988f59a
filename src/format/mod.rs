//! Format string handling: sanitizing and compiling into an automaton

pub mod compiler;
pub mod error;
pub mod sanitizer;

pub use compiler::Compiler;
pub use error::FormatError;
pub use sanitizer::{sanitize, ELLIPSIS};
