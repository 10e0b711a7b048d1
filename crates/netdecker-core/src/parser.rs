//! Line classification and card-name matching.
//!
//! [`DecklistParser`] takes the line-level textboxes of one deck list image,
//! classifies every line as a sideboard label, a quantity token or a card
//! name candidate, resolves candidates against a [`CardReference`], and
//! finally runs the [`Decklist`] cleanup passes in their fixed order.

use std::sync::LazyLock;

use regex::Regex;
use strsim::levenshtein;
use tracing::{debug, info};

use crate::decklist::{CardQuantity, CardTuple, Decklist, MIN_HEIGHT_FRACTION};
use crate::format::Format;
use crate::geometry::BoundingBox;
use crate::reference::CardReference;
use crate::text::Textbox;

/// "x4" style quantity tokens. A leading zero never starts a quantity.
static QUANTITY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[xX][1-9][0-9]*").expect("valid quantity pattern"));

/// Two or more consecutive periods: the ellipsis a client draws over a long name.
static ELLIPSIS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.{2,}").expect("valid ellipsis pattern"));

/// The label that separates the maindeck from the sideboard.
const SIDEBOARD_LABEL: &str = "Sideboard";

/// Options for line classification and card-name matching.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchOptions {
    /// Maximum edit distance between a line and "Sideboard" for the line to
    /// be taken as the sideboard label. Default: `3`.
    pub sideboard_tolerance: usize,
    /// One mistake is tolerated for every `distance_threshold` characters of
    /// the shorter of the line and the candidate name. Default: `6`.
    pub distance_threshold: usize,
    /// Lines shorter than this are never treated as truncated. Default: `13`.
    ///
    /// The exact cut-off depends on the mana cost printed next to the name
    /// and on the proportional font, so this is an approximation.
    pub truncation_threshold: usize,
    /// Upper bound on the length of a card name. Default: `34`.
    pub max_card_length: usize,
    /// Lines shorter than this cannot be card names. Default: `3`.
    pub min_line_length: usize,
    /// Height fraction used by [`Decklist::cull_outliers_below`]. Default: `0.55`.
    pub min_height_fraction: f64,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            sideboard_tolerance: 3,
            distance_threshold: 6,
            truncation_threshold: 13,
            max_card_length: 34,
            min_line_length: 3,
            min_height_fraction: MIN_HEIGHT_FRACTION,
        }
    }
}

/// How a single line was classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// The line was accepted as the sideboard label.
    Sideboard,
    /// The line was a quantity token.
    Quantity(u32),
    /// The line resolved to a card name.
    Card(String),
    /// The line is noise.
    Discarded,
}

/// Strip whitespace and characters the OCR picked up that cannot appear in a card name.
///
/// A quantity token anywhere in the line takes priority: only the token is
/// returned and the rest of the line is dropped.
pub fn preprocess_line(line: &str) -> String {
    if let Some(m) = QUANTITY_PATTERN.find(line) {
        return m.as_str().to_string();
    }

    // TODO: allow digits once a handful of card names containing numbers are
    // supported; mana costs make digit false positives common.
    line.chars()
        .filter(|c| c.is_ascii_alphabetic() || matches!(c, ' ' | ',' | '\'' | '-' | '.'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Parses the lines of one deck list image into a [`Decklist`].
pub struct DecklistParser<'a, R: CardReference + ?Sized> {
    reference: &'a R,
    format: Format,
    options: MatchOptions,
    decklist: Decklist,
    quantities: Vec<CardQuantity>,
}

impl<'a, R: CardReference + ?Sized> DecklistParser<'a, R> {
    pub fn new(reference: &'a R, format: Format) -> Self {
        Self::with_options(reference, format, MatchOptions::default())
    }

    pub fn with_options(reference: &'a R, format: Format, options: MatchOptions) -> Self {
        Self {
            reference,
            format,
            options,
            decklist: Decklist::new(),
            quantities: Vec::new(),
        }
    }

    /// The deck list accumulated so far.
    pub fn decklist(&self) -> &Decklist {
        &self.decklist
    }

    /// Quantity tokens seen so far, in line order.
    pub fn quantities(&self) -> &[CardQuantity] {
        &self.quantities
    }

    /// Classify every line, then cull outliers, match quantities and fold the companion.
    pub fn create_decklist(mut self, textboxes: &[Textbox]) -> Decklist {
        for textbox in textboxes {
            let line = preprocess_line(&textbox.text);
            self.parse_line(&line, textbox.bounding_box);
        }

        self.decklist
            .cull_outliers_below(self.options.min_height_fraction);
        self.decklist.match_quantities(&self.quantities);
        self.decklist.companion_check(self.reference);
        self.decklist
    }

    /// Classify one preprocessed line found at `bounding_box`.
    pub fn parse_line(&mut self, line: &str, bounding_box: BoundingBox) -> LineOutcome {
        if self.decklist.sideboard_position.is_none()
            && levenshtein(line, SIDEBOARD_LABEL) <= self.options.sideboard_tolerance
        {
            self.decklist.mark_sideboard(bounding_box.upper_left);
            info!(line, position = %bounding_box, "found sideboard label");
            return LineOutcome::Sideboard;
        }

        if let Some(m) = QUANTITY_PATTERN.find(line) {
            return match m.as_str()[1..].parse::<u32>() {
                Ok(quantity) => {
                    info!(line, quantity, position = %bounding_box, "found quantity");
                    self.quantities
                        .push(CardQuantity::new(quantity, bounding_box));
                    LineOutcome::Quantity(quantity)
                }
                Err(_) => {
                    debug!(line, "discarding oversized quantity");
                    LineOutcome::Discarded
                }
            };
        }

        if line.chars().count() < self.options.min_line_length {
            return LineOutcome::Discarded;
        }

        match self.match_to_card_name(line) {
            Some(name) => {
                info!(line, card = %name, "matched card name");
                self.decklist
                    .add_card(CardTuple::new(name.clone(), bounding_box));
                LineOutcome::Card(name)
            }
            None => {
                debug!(line, "discarding line");
                LineOutcome::Discarded
            }
        }
    }

    /// Cut a long line at an ellipsis.
    ///
    /// Returns the text before the first run of two or more periods and
    /// `true`, or the unchanged line and `false`.
    pub fn truncation_check<'l>(&self, line: &'l str) -> (&'l str, bool) {
        if line.chars().count() < self.options.truncation_threshold {
            return (line, false);
        }
        match ELLIPSIS_PATTERN.find(line) {
            Some(m) => (&line[..m.start()], true),
            None => (line, false),
        }
    }

    /// Resolve a line to a canonical card name legal in the parser's format.
    ///
    /// Tries an exact alias first. Failing that, scans names of a similar
    /// length and accepts the first one within the distance threshold,
    /// recording the line as an alias of it.
    pub fn match_to_card_name(&self, line: &str) -> Option<String> {
        let (line, truncated) = self.truncation_check(line);
        if truncated && line.chars().count() < self.options.min_line_length {
            // A prefix this short matches almost any name.
            debug!(line, "discarding truncated line");
            return None;
        }

        if let Some(name) = self.reference.name_from_alias(line, self.format, truncated) {
            return Some(name);
        }

        let len = line.chars().count();
        let candidates = if truncated {
            // At least three characters are hidden behind the ellipsis.
            self.reference
                .names_in_range(len + 3, self.options.max_card_length, self.format)
        } else {
            // The OCR rarely drops characters from a name but often appends
            // some from the mana cost.
            self.reference
                .names_in_range(len.saturating_sub(3), len + 1, self.format)
        };

        for candidate in candidates {
            let distance = if truncated {
                let prefix: String = candidate.chars().take(len).collect();
                levenshtein(&prefix, line)
            } else {
                levenshtein(&candidate, line)
            };

            let max_distance = candidate.chars().count().min(len) / self.options.distance_threshold;
            if distance <= max_distance {
                debug!(line, card = %candidate, distance, "learned alias");
                self.reference.add_alias(line, &candidate);
                return Some(candidate);
            }
        }

        None
    }
}

/// Parse `textboxes` with default options.
pub fn parse_textboxes<R: CardReference + ?Sized>(
    textboxes: &[Textbox],
    reference: &R,
    format: Format,
) -> Decklist {
    DecklistParser::new(reference, format).create_decklist(textboxes)
}
