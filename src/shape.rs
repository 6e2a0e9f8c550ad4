//! Directions on a square grid and the shape a line takes through a single cell.

use strum::VariantArray;

use crate::location::Location;

/// A step between orthogonally adjacent cells or lattice points.
///
/// The same enum names the four sides of a cell: `Up` is the top side, `Left` the left side, and so on.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum SquareStep {
    /// Towards row 0.
    Up,
    /// Away from row 0.
    Down,
    /// Towards column 0.
    Left,
    /// Away from column 0.
    Right,
}

impl SquareStep {
    /// The "forward" directions: stepping in one of these never lowers the row-major index.
    pub const FORWARD_VARIANTS: &'static [Self] = &[Self::Right, Self::Down];

    /// Attempt the step from `location` in the direction specified by `self` and return the resultant [`Location`].
    ///
    /// Stepping off the top or left edge wraps around to a huge coordinate, which no bounds check accepts.
    pub fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Up => location.offset_by((0, -1)),
            Self::Down => location.offset_by((0, 1)),
            Self::Left => location.offset_by((-1, 0)),
            Self::Right => location.offset_by((1, 0)),
        }
    }

    /// Invert the direction specified by `self`.
    pub fn invert(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// The axis this step moves along.
    pub fn axis(&self) -> Axis {
        match self {
            Self::Up | Self::Down => Axis::Vertical,
            Self::Left | Self::Right => Axis::Horizontal,
        }
    }

    /// Determine the direction from `a` to `b`, if they are adjacent.
    pub fn direction_to(a: Location, b: Location) -> Option<Self> {
        Self::VARIANTS.iter().find(|dir| dir.attempt_from(a) == b).copied()
    }

    /// Convert this step to a forward direction, if it is not already one.
    pub fn ensure_forward(&self) -> Self {
        match Self::FORWARD_VARIANTS.contains(self) {
            true => *self,
            false => self.invert(),
        }
    }
}

/// The two axes of a square grid.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum Axis {
    /// Along a row.
    Horizontal,
    /// Along a column.
    Vertical,
}

/// How a cell sits on a drawn loop, judged only by which of its four sides are drawn.
///
/// A cell has a shape only when exactly two of its sides are drawn.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CellShape {
    /// Two opposite sides are drawn.
    /// [`Axis::Horizontal`] means the left and right sides; [`Axis::Vertical`] the top and bottom sides.
    Straight(Axis),
    /// Two adjacent sides are drawn; always `(Up | Down, Left | Right)`.
    Turn(SquareStep, SquareStep),
}

impl CellShape {
    /// Classify a set of drawn sides. Returns [`None`] unless exactly two sides are present.
    pub fn from_sides(sides: &[SquareStep]) -> Option<Self> {
        let [a, b] = sides else {
            return None;
        };

        let (vertical, horizontal) = match (a.axis(), b.axis()) {
            (Axis::Horizontal, Axis::Horizontal) if a != b => return Some(Self::Straight(Axis::Horizontal)),
            (Axis::Vertical, Axis::Vertical) if a != b => return Some(Self::Straight(Axis::Vertical)),
            (Axis::Vertical, Axis::Horizontal) => (*a, *b),
            (Axis::Horizontal, Axis::Vertical) => (*b, *a),
            _ => return None,
        };

        Some(Self::Turn(vertical, horizontal))
    }

    /// Whether this is a [`CellShape::Turn`].
    #[inline]
    pub fn is_turn(&self) -> bool {
        matches!(self, Self::Turn(..))
    }

    /// For a turn, the two arms paired with the straight axis each neighboring cell must have.
    ///
    /// A turn using the top and right sides needs the cell above to be vertically straight and the cell to the right to be horizontally straight.
    pub fn arms(&self) -> Option<[(SquareStep, Axis); 2]> {
        match self {
            Self::Straight(_) => None,
            Self::Turn(vertical, horizontal) => Some([
                (*vertical, vertical.axis()),
                (*horizontal, horizontal.axis()),
            ]),
        }
    }
}
