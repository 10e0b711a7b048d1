//! Error types for netdecker-rs.
//!
//! Only two conditions are errors: the upstream OCR call failing, and an
//! unknown format name. Noisy or unmatched OCR lines are never errors; the
//! parser discards them.

use thiserror::Error;

use crate::format::Format;

/// Fatal error types for deck list parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecklistError {
    /// The OCR provider reported a failure; no parsing was attempted.
    #[error("OCR failed: {0}")]
    Upstream(String),

    /// A format name outside the supported set.
    #[error("invalid format `{0}`, options are {supported}", supported = Format::supported_list())]
    UnknownFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_display() {
        let err = DecklistError::Upstream("Bad image data.".to_string());
        assert_eq!(err.to_string(), "OCR failed: Bad image data.");
    }

    #[test]
    fn unknown_format_display_lists_options() {
        let err = DecklistError::UnknownFormat("brawl".to_string());
        let msg = err.to_string();
        assert!(msg.starts_with("invalid format `brawl`"));
        assert!(msg.ends_with("vintage, pauper"));
    }
}
