//! Line assembly: merges word-level OCR detections into line-level textboxes.

use crate::text::{Textbox, Word};

/// Options for line assembly.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineOptions {
    /// Maximum vertical offset (in pixels) between the end of a line and the
    /// next word for the word to continue that line. Default: `3`.
    pub y_tolerance: i32,
}

impl Default for LineOptions {
    fn default() -> Self {
        Self { y_tolerance: 3 }
    }
}

/// Groups words into lines based on baseline adjacency.
pub struct LineAssembler;

impl LineAssembler {
    /// Assemble `words` into lines.
    ///
    /// Words must arrive in the OCR provider's reading order (top-to-bottom,
    /// left-to-right within a block); the order is not re-derived here. Each
    /// word either continues the current line, when its left edge sits on the
    /// same baseline as the line's right edge, or starts a new one.
    pub fn assemble(words: &[Word], options: &LineOptions) -> Vec<Textbox> {
        let mut lines = Vec::new();
        let mut current: Option<Textbox> = None;

        for word in words {
            match current.as_mut() {
                Some(line) if line.is_adjacent(&word.bounding_box, options.y_tolerance) => {
                    line.add_word(word);
                }
                _ => lines.extend(current.replace(Textbox::from_word(word))),
            }
        }

        lines.extend(current);
        lines
    }
}
