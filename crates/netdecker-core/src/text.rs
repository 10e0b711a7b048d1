use crate::geometry::BoundingBox;

/// A single word detected by the OCR provider.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Word {
    /// Bounds of the word on the image.
    pub bounding_box: BoundingBox,
    /// The recognized text.
    pub text: String,
}

impl Word {
    pub fn new(bounding_box: BoundingBox, text: impl Into<String>) -> Self {
        Self {
            bounding_box,
            text: text.into(),
        }
    }
}

/// A line of text merged from one or more adjacent words.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Textbox {
    /// Bounds of the whole line.
    pub bounding_box: BoundingBox,
    /// The words of the line joined by single spaces.
    pub text: String,
}

impl Textbox {
    /// Start a new line from its first word.
    pub fn from_word(word: &Word) -> Self {
        Self {
            bounding_box: word.bounding_box,
            text: word.text.clone(),
        }
    }

    /// Append `word` to the end of this line.
    ///
    /// Only single lines are stored, so only the x coordinates of the right
    /// edge move.
    pub fn add_word(&mut self, word: &Word) {
        self.bounding_box.upper_right.x = word.bounding_box.upper_right.x;
        self.bounding_box.lower_right.x = word.bounding_box.lower_right.x;
        self.text.push(' ');
        self.text.push_str(&word.text);
    }

    /// Returns `true` if `candidate` sits on the same baseline as the end of this line.
    pub fn is_adjacent(&self, candidate: &BoundingBox, y_tolerance: i32) -> bool {
        let upper = self.bounding_box.upper_right.y_delta(&candidate.upper_left);
        let lower = self.bounding_box.lower_right.y_delta(&candidate.lower_left);
        upper <= y_tolerance && lower <= y_tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn left_word() -> Word {
        Word::new(BoundingBox::from_corners(0, 0, 3, 2), "one")
    }

    fn right_word() -> Word {
        Word::new(BoundingBox::from_corners(4, 0, 7, 2), "two")
    }

    #[test]
    fn test_textbox_add_word() {
        let mut line = Textbox::from_word(&left_word());
        line.add_word(&right_word());

        assert_eq!(line.text, "one two");
        assert_eq!(line.bounding_box.upper_right.x, 7);
        assert_eq!(line.bounding_box.lower_right.x, 7);
        assert_eq!(line.bounding_box.upper_left.x, 0);
        assert_eq!(line.bounding_box.lower_left.x, 0);
    }

    #[test]
    fn test_textbox_adjacent_same_baseline() {
        let line = Textbox::from_word(&left_word());
        assert!(line.is_adjacent(&right_word().bounding_box, 3));
    }

    #[test]
    fn test_textbox_adjacent_within_tolerance() {
        let line = Textbox::from_word(&left_word());
        let shifted = BoundingBox::from_corners(4, 3, 7, 5);
        assert!(line.is_adjacent(&shifted, 3));
    }

    #[test]
    fn test_textbox_not_adjacent_beyond_tolerance() {
        let line = Textbox::from_word(&left_word());
        let shifted = BoundingBox::from_corners(4, 4, 7, 6);
        assert!(!line.is_adjacent(&shifted, 3));
    }

    #[test]
    fn test_textbox_not_adjacent_when_only_top_aligns() {
        let line = Textbox::from_word(&left_word());
        let taller = BoundingBox::from_corners(4, 0, 7, 20);
        assert!(!line.is_adjacent(&taller, 3));
    }
}
