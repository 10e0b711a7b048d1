//! Deck list model and the cleanup passes applied after line classification.

use std::fmt;

use crate::geometry::{BoundingBox, Vertex};
use crate::reference::CardReference;

/// The minimum height needed to be kept as a maindeck card, as a fraction of
/// the mean height among all maindeck cards.
pub const MIN_HEIGHT_FRACTION: f64 = 0.55;

/// A card quantity token (e.g. "x2") on the deck list image, not yet tied to a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardQuantity {
    pub quantity: u32,
    pub bounding_box: BoundingBox,
}

impl CardQuantity {
    pub fn new(quantity: u32, bounding_box: BoundingBox) -> Self {
        Self {
            quantity,
            bounding_box,
        }
    }
}

/// A resolved card name on the deck list image.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardTuple {
    /// Canonical card name.
    pub name: String,
    /// Where the name was found. `None` once the card has been moved to the
    /// companion slot.
    pub bounding_box: Option<BoundingBox>,
    pub quantity: u32,
}

impl CardTuple {
    /// A single copy of `name` found at `bounding_box`.
    pub fn new(name: impl Into<String>, bounding_box: BoundingBox) -> Self {
        Self {
            name: name.into(),
            bounding_box: Some(bounding_box),
            quantity: 1,
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }
}

impl fmt::Display for CardTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.quantity, self.name)
    }
}

/// A parsed deck list: maindeck, sideboard and an optional companion.
///
/// The position of the first "Sideboard" label is kept as the delimiter
/// between the two lists: cards whose right edge lies to the right of the
/// label belong to the sideboard.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decklist {
    pub maindeck: Vec<CardTuple>,
    pub sideboard: Vec<CardTuple>,
    pub sideboard_position: Option<Vertex>,
    pub companion: Option<CardTuple>,
}

impl Decklist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the position of the sideboard label.
    ///
    /// Only the first label counts; returns `false` if a position was already set.
    pub fn mark_sideboard(&mut self, position: Vertex) -> bool {
        if self.sideboard_position.is_some() {
            return false;
        }
        self.sideboard_position = Some(position);
        true
    }

    /// Add a card, combining quantities with an existing entry of the same name.
    pub fn add_card(&mut self, card: CardTuple) {
        // TODO: very short sideboard names can end left of the label and land in the maindeck.
        let in_sideboard = match (self.sideboard_position, card.bounding_box) {
            (Some(position), Some(bbox)) => bbox.lower_right.x > position.x,
            _ => false,
        };
        let list = if in_sideboard {
            &mut self.sideboard
        } else {
            &mut self.maindeck
        };

        match list.iter_mut().find(|existing| existing.name == card.name) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(card.quantity),
            None => list.push(card),
        }
    }

    /// Remove maindeck names that are abnormally small compared to the average.
    ///
    /// Keeps rules text on the body of a card from being read as a card name.
    /// Only the maindeck is culled: sideboard rows carry no body text in one
    /// supported layout, and in the other the body text is too close in size
    /// to the title text to tell apart.
    pub fn cull_outliers(&mut self) {
        self.cull_outliers_below(MIN_HEIGHT_FRACTION);
    }

    /// [`cull_outliers`](Self::cull_outliers) with an explicit height fraction.
    pub fn cull_outliers_below(&mut self, min_height_fraction: f64) {
        let heights: Vec<f64> = self
            .maindeck
            .iter()
            .filter_map(|card| card.bounding_box)
            .map(|bbox| f64::from(bbox.height()))
            .collect();
        if heights.is_empty() {
            return;
        }

        let mean_height = heights.iter().sum::<f64>() / heights.len() as f64;
        let threshold = mean_height * min_height_fraction;
        self.maindeck.retain(|card| {
            card.bounding_box
                .is_none_or(|bbox| f64::from(bbox.height()) > threshold)
        });
    }

    /// Attach each quantity token to the closest maindeck card above and left of it.
    ///
    /// Only cards still at quantity 1 are candidates. The card name must sit
    /// just above the quantity: no more than twice the quantity's height away
    /// vertically. Quantities with no candidate are dropped.
    pub fn match_quantities(&mut self, quantities: &[CardQuantity]) {
        for quantity in quantities {
            let position = quantity.bounding_box.upper_left;
            let max_gap = quantity.bounding_box.height().saturating_mul(2);

            let mut closest: Option<(usize, f64)> = None;
            for (idx, card) in self.maindeck.iter().enumerate() {
                if card.quantity != 1 {
                    continue;
                }
                let Some(bbox) = card.bounding_box else {
                    continue;
                };

                let card_left = bbox.upper_left;
                if card_left.x > position.x || card_left.y > position.y {
                    continue;
                }
                if position.y_delta(&card_left) > max_gap {
                    continue;
                }

                let distance = position.distance(&bbox.lower_right);
                if closest.is_none_or(|(_, best)| distance < best) {
                    closest = Some((idx, distance));
                }
            }

            if let Some((idx, _)) = closest {
                self.maindeck[idx].quantity = quantity.quantity;
            }
        }
    }

    /// Move a companion listed in both maindeck and sideboard into the companion slot.
    ///
    /// Some clients show the companion as the first card of both lists. If
    /// the first entries share a name, are both single copies, and the
    /// reference data confirms a companion, both entries are removed.
    pub fn companion_check<R: CardReference + ?Sized>(&mut self, reference: &R) {
        let (Some(main_first), Some(side_first)) = (self.maindeck.first(), self.sideboard.first())
        else {
            return;
        };

        if main_first.name != side_first.name {
            return;
        }
        if main_first.quantity != 1 || side_first.quantity != 1 {
            return;
        }
        if !reference.is_companion(&main_first.name) {
            return;
        }

        let companion = self.maindeck.remove(0);
        self.sideboard.remove(0);
        self.companion = Some(CardTuple {
            name: companion.name,
            bounding_box: None,
            quantity: 1,
        });
    }

    /// Total number of cards in the maindeck and the sideboard, saturating at `u32::MAX`.
    pub fn deck_size(&self) -> (u32, u32) {
        let total = |cards: &[CardTuple]| {
            cards
                .iter()
                .fold(0u32, |sum, card| sum.saturating_add(card.quantity))
        };
        (total(&self.maindeck), total(&self.sideboard))
    }

    /// Render the deck list in the plain-text import format.
    pub fn serialize(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Decklist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(companion) = &self.companion {
            writeln!(f, "Companion")?;
            writeln!(f, "{companion}")?;
            writeln!(f)?;
        }

        writeln!(f, "Deck")?;
        for card in &self.maindeck {
            writeln!(f, "{card}")?;
        }

        if !self.sideboard.is_empty() {
            writeln!(f)?;
            writeln!(f, "Sideboard")?;
            for card in &self.sideboard {
                writeln!(f, "{card}")?;
            }
        }
        Ok(())
    }
}
