//! Data model of the masking engine
//!
//! This module contains the input model ([`CaretString`]), the compiled
//! automaton ([`Automaton`] and its [`State`] nodes) and the output model
//! ([`MaskResult`]).

pub mod caret_iterator;
pub mod caret_string;
pub mod notation;
pub mod result;
pub mod state;

pub use caret_iterator::CaretStringIterator;
pub use caret_string::{CaretGravity, CaretString};
pub use notation::Notation;
pub use result::{AutocompletionStack, MaskResult, Skip};
pub use state::{Automaton, Next, State, StateId, ValueKind};
