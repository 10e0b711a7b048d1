//! netdecker-core: Backend-independent data types and algorithms.
//!
//! This crate provides the foundational types (Vertex, BoundingBox, Word,
//! Textbox, Decklist, etc.) and algorithms (line assembly, card-name matching,
//! deck list cleanup) used by netdecker-rs. Card data is consulted only
//! through the [`CardReference`] trait, so nothing here touches storage.

pub mod decklist;
pub mod error;
pub mod format;
pub mod geometry;
pub mod lines;
pub mod parser;
pub mod reference;
pub mod text;

#[cfg(test)]
mod testing;

pub use decklist::{CardQuantity, CardTuple, Decklist, MIN_HEIGHT_FRACTION};
pub use error::DecklistError;
pub use format::Format;
pub use geometry::{BoundingBox, Vertex};
pub use lines::{LineAssembler, LineOptions};
pub use parser::{DecklistParser, LineOutcome, MatchOptions, parse_textboxes, preprocess_line};
pub use reference::CardReference;
pub use text::{Textbox, Word};
