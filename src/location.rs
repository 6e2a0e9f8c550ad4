//! Board coordinates.

use ndarray::Ix;

/// One coordinate of a [`Location`].
pub type Coord = usize;

#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
/// A location `(x, y)` on a board: `x` is the column, `y` the row. The top left corner is `Location(0, 0)`.
///
/// Depending on context this names either a cell or a lattice point (a grid-line intersection).
pub struct Location(pub Coord, pub Coord);

impl Location {
    /// The `(row, column)` index of this location in a row-major [`ndarray::Array2`].
    pub fn as_index(&self) -> (Coord, Coord) {
        (self.1, self.0)
    }

    /// Offset this location, wrapping on underflow so the result simply falls out of bounds.
    pub fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }

    /// Whether this location lies in a `width` by `height` rectangle anchored at the origin.
    #[inline]
    pub fn within(&self, width: Coord, height: Coord) -> bool {
        self.0 < width && self.1 < height
    }
}

impl From<(Ix, Ix)> for Location {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.1, value.0)
    }
}
