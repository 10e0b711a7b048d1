//! Constructed formats a deck list can be validated against.

use std::fmt;
use std::str::FromStr;

use crate::error::DecklistError;

/// A constructed format supported by the card reference data.
///
/// Card legality, and therefore the set of names a line can resolve to,
/// depends on the format the deck list is parsed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Format {
    Standard,
    Historic,
    Pioneer,
    Modern,
    Legacy,
    Vintage,
    Pauper,
}

impl Format {
    /// Every supported format, in display order.
    pub const ALL: [Format; 7] = [
        Format::Standard,
        Format::Historic,
        Format::Pioneer,
        Format::Modern,
        Format::Legacy,
        Format::Vintage,
        Format::Pauper,
    ];

    /// Returns the lowercase identifier used by the reference data.
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Standard => "standard",
            Format::Historic => "historic",
            Format::Pioneer => "pioneer",
            Format::Modern => "modern",
            Format::Legacy => "legacy",
            Format::Vintage => "vintage",
            Format::Pauper => "pauper",
        }
    }

    /// Comma-separated list of every supported format, for user-facing messages.
    pub fn supported_list() -> String {
        Self::ALL
            .iter()
            .map(Format::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = DecklistError;

    /// Parses a format name case-insensitively, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == name)
            .ok_or(DecklistError::UnknownFormat(name))
    }
}
