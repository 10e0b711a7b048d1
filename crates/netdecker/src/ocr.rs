//! OCR collaborator abstraction.

use netdecker_core::Word;

/// The words an OCR provider found on one image, or the reason it failed.
#[derive(Debug, Clone, PartialEq)]
pub struct OcrResponse {
    pub success: bool,
    /// Detected words in the provider's reading order. Empty on failure.
    pub words: Vec<Word>,
    pub error_message: Option<String>,
}

impl OcrResponse {
    pub fn success(words: Vec<Word>) -> Self {
        Self {
            success: true,
            words,
            error_message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            words: Vec::new(),
            error_message: Some(message.into()),
        }
    }
}

/// A text detection backend.
///
/// Implementations report provider errors through an unsuccessful
/// [`OcrResponse`] instead of panicking or returning `Err`.
pub trait OcrEngine {
    /// Detect the words on an encoded image.
    fn detect_text(&self, image: &[u8]) -> OcrResponse;
}
