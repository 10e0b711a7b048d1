//! netdecker: Turn OCR'd deck list screenshots into importable deck lists.
//!
//! This is the public API facade crate for netdecker-rs. It re-exports types
//! from netdecker-core and netdecker-cardfile and ties them to an OCR backend.
//!
//! # Architecture
//!
//! - **netdecker-core**: Line assembly, card-name matching and deck list assembly
//! - **netdecker-cardfile**: In-memory card reference data loaded from Scryfall
//! - **netdecker** (this crate): OCR collaborator, Vision decoding and the pipeline
//!
//! # Usage
//!
//! ```ignore
//! let cards = CardDatabase::open("oracle-cards.json")?;
//! let ocr = vision::parse_response(&std::fs::read_to_string("screenshot.json")?)?;
//! let deck = generate_decklist(&ocr, &cards, Format::Historic)?;
//! print!("{}", deck.serialize());
//! ```

pub mod error;
pub mod ocr;
pub mod vision;

pub use error::{Error, Result};
pub use netdecker_cardfile::{CardDatabase, CardRecord, CardfileError};
pub use netdecker_core::{
    BoundingBox, CardQuantity, CardReference, CardTuple, Decklist, DecklistError,
    DecklistParser, Format, LineAssembler, LineOptions, LineOutcome, MatchOptions, Textbox,
    Vertex, Word,
};
pub use ocr::{OcrEngine, OcrResponse};

use tracing::warn;

/// Options for the whole pipeline.
#[derive(Debug, Clone, Default)]
pub struct DecklistOptions {
    pub lines: LineOptions,
    pub matching: MatchOptions,
}

/// Build a deck list from an OCR result using default options.
///
/// An unsuccessful OCR result is returned as [`DecklistError::Upstream`]
/// without parsing anything.
pub fn generate_decklist<R: CardReference + ?Sized>(
    response: &OcrResponse,
    reference: &R,
    format: Format,
) -> Result<Decklist> {
    generate_decklist_with(response, reference, format, &DecklistOptions::default())
}

/// Build a deck list from an OCR result.
pub fn generate_decklist_with<R: CardReference + ?Sized>(
    response: &OcrResponse,
    reference: &R,
    format: Format,
    options: &DecklistOptions,
) -> Result<Decklist> {
    if !response.success {
        let message = response.error_message.clone().unwrap_or_default();
        warn!(error = %message, "OCR failed");
        return Err(DecklistError::Upstream(message).into());
    }

    let lines = LineAssembler::assemble(&response.words, &options.lines);
    let parser = DecklistParser::with_options(reference, format, options.matching.clone());
    Ok(parser.create_decklist(&lines))
}

/// Run `engine` on an encoded image, then build the deck list.
pub fn recognize_decklist<E, R>(
    engine: &E,
    image: &[u8],
    reference: &R,
    format: Format,
) -> Result<Decklist>
where
    E: OcrEngine + ?Sized,
    R: CardReference + ?Sized,
{
    let response = engine.detect_text(image);
    generate_decklist(&response, reference, format)
}
