//! Error types for loading card data.
//!
//! Uses [`thiserror`] for ergonomic error derivation. [`CardfileError`]
//! wraps I/O and JSON decode failures and converts to [`DecklistError`]
//! for callers that only deal in core errors.

use netdecker_core::DecklistError;
use thiserror::Error;

/// Error type for card database operations.
#[derive(Debug, Error)]
pub enum CardfileError {
    /// Error reading the card file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The card file is not valid Scryfall JSON.
    #[error("card file decode error: {0}")]
    Json(#[from] serde_json::Error),

    /// The card file decoded, but no card in it is legal in a supported format.
    #[error("card file contains no cards legal in any supported format")]
    NoCards,

    /// A core library error.
    #[error(transparent)]
    Core(#[from] DecklistError),
}

impl From<CardfileError> for DecklistError {
    fn from(err: CardfileError) -> Self {
        match err {
            CardfileError::Core(e) => e,
            other => DecklistError::Upstream(other.to_string()),
        }
    }
}
