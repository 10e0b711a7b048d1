//! Error type for the public API.

use netdecker_cardfile::CardfileError;
use netdecker_core::DecklistError;
use thiserror::Error;

/// Any error the deck list pipeline can surface.
#[derive(Debug, Error)]
pub enum Error {
    /// OCR failure or invalid format.
    #[error(transparent)]
    Decklist(#[from] DecklistError),

    /// The card file could not be loaded.
    #[error(transparent)]
    Cardfile(#[from] CardfileError),

    /// The Vision response is not valid JSON of the expected shape.
    #[error("Vision response decode error: {0}")]
    VisionDecode(#[from] serde_json::Error),

    /// A batch Vision response carried no per-image results.
    #[error("Vision batch response contains no results")]
    EmptyBatch,
}

/// Result alias for the public API.
pub type Result<T> = std::result::Result<T, Error>;
