//! G-Code line handling and modal state
//!
//! This module provides:
//! - Comment stripping and whitespace normalisation
//! - Word tokenization (letter/value pairs)
//! - Grouping of words into dispatchable commands
//! - The closed set of recognised commands
//! - Modal state tracking

pub mod command;
pub mod parser;
pub mod state;
pub mod tokenizer;

pub use command::*;
pub use parser::*;
pub use state::*;
pub use tokenizer::*;
