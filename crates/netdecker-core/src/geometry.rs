use std::fmt;

/// A single pixel position on the image being parsed.
///
/// Coordinates follow the OCR provider's convention: origin at the top-left
/// corner of the image, `y` growing downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vertex {
    pub x: i32,
    pub y: i32,
}

impl Vertex {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Absolute horizontal offset to `target`, saturating at `i32::MAX`.
    pub fn x_delta(&self, target: &Vertex) -> i32 {
        saturate(self.x.abs_diff(target.x))
    }

    /// Absolute vertical offset to `target`, saturating at `i32::MAX`.
    pub fn y_delta(&self, target: &Vertex) -> i32 {
        saturate(self.y.abs_diff(target.y))
    }

    /// Euclidean distance to `target`.
    pub fn distance(&self, target: &Vertex) -> f64 {
        let dx = f64::from(self.x_delta(target));
        let dy = f64::from(self.y_delta(target));
        dx.hypot(dy)
    }

    /// Returns `true` if this vertex lies vertically between `upper` and `lower` (inclusive).
    pub fn vertical_is_between(&self, upper: &Vertex, lower: &Vertex) -> bool {
        upper.y <= self.y && self.y <= lower.y
    }
}

fn saturate(delta: u32) -> i32 {
    i32::try_from(delta).unwrap_or(i32::MAX)
}

/// Bounds of a piece of recognized text, one vertex per corner.
///
/// The OCR provider reports boxes as polygons in clockwise order starting at
/// the upper-left corner; rotated text therefore keeps its own notion of
/// "upper-left" even when it is not the minimum coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub upper_left: Vertex,
    pub upper_right: Vertex,
    pub lower_right: Vertex,
    pub lower_left: Vertex,
}

impl BoundingBox {
    pub fn new(
        upper_left: Vertex,
        upper_right: Vertex,
        lower_right: Vertex,
        lower_left: Vertex,
    ) -> Self {
        Self {
            upper_left,
            upper_right,
            lower_right,
            lower_left,
        }
    }

    /// Axis-aligned box spanning `(x0, y0)` to `(x1, y1)`.
    pub fn from_corners(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self::new(
            Vertex::new(x0, y0),
            Vertex::new(x1, y0),
            Vertex::new(x1, y1),
            Vertex::new(x0, y1),
        )
    }

    /// Build a box from a clockwise polygon starting at the upper-left vertex.
    ///
    /// Returns `None` unless exactly four vertices are supplied.
    pub fn from_polygon(vertices: &[Vertex]) -> Option<Self> {
        match vertices {
            [ul, ur, lr, ll] => Some(Self::new(*ul, *ur, *lr, *ll)),
            _ => None,
        }
    }

    /// Height of the box, measured along its left edge.
    pub fn height(&self) -> i32 {
        self.lower_left.y.saturating_sub(self.upper_left.y)
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) to ({}, {})",
            self.upper_left.x, self.upper_left.y, self.lower_right.x, self.lower_right.y
        )
    }
}
