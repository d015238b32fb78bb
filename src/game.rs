//! Trivia protocol parser and game-state machine
//!
//! The model's free-form replies carry bracketed sentinel markers. This module
//! recognises them and derives the next [`GameState`] without any I/O.

pub mod marker;
mod parser;
mod state;
mod transition;

#[cfg(test)]
mod proptests;

pub use marker::{Marker, PROTOCOL_VERSION};
pub use parser::Directive;
#[allow(unused_imports)] // Public API re-exports
pub use state::{GameState, LastAnswer, StateError};
#[allow(unused_imports)] // Public API re-exports
pub use transition::{parse, parse_report, CategoryRejection, ParseReport};
