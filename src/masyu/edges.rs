//! The drawn segments of the lattice.
//!
//! Segments are named by their top or left endpoint. Cells are classified by which of their four sides are drawn.

use std::fmt::{Display, Formatter};

use itertools::Itertools;
use ndarray::Array2;
use petgraph::graphmap::UnGraphMap;
use strum::VariantArray;
use unordered_pair::UnorderedPair;

use crate::location::Location;
use crate::masyu::clues::Clues;
use crate::masyu::MasyuError;
use crate::shape::{Axis, CellShape, SquareStep};

/// One unit segment of the lattice of grid points.
///
/// `Horizontal(Location(j, i))` runs along grid line `i` over column `j`, joining points `(j, i)` and `(j + 1, i)`.
/// `Vertical(Location(j, i))` runs along grid line `j` over row `i`, joining points `(j, i)` and `(j, i + 1)`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Segment {
    /// Named after its left endpoint.
    Horizontal(Location),
    /// Named after its upper endpoint.
    Vertical(Location),
}

impl Segment {
    /// The two lattice points this segment joins.
    pub fn endpoints(&self) -> UnorderedPair<Location> {
        match self {
            Self::Horizontal(origin) => UnorderedPair(*origin, SquareStep::Right.attempt_from(*origin)),
            Self::Vertical(origin) => UnorderedPair(*origin, SquareStep::Down.attempt_from(*origin)),
        }
    }

    /// The segment joining two lattice points, if they are adjacent.
    pub fn between(points: UnorderedPair<Location>) -> Option<Self> {
        let UnorderedPair(a, b) = points;
        let forward = SquareStep::direction_to(a, b)?;
        // the segment is named after its upper or left endpoint
        let origin = if forward == forward.ensure_forward() { a } else { b };

        Some(match forward.axis() {
            Axis::Horizontal => Self::Horizontal(origin),
            Axis::Vertical => Self::Vertical(origin),
        })
    }

    /// The segment forming side `side` of `cell`.
    pub fn side_of(cell: Location, side: SquareStep) -> Self {
        match side {
            SquareStep::Up => Self::Horizontal(cell),
            SquareStep::Down => Self::Horizontal(SquareStep::Down.attempt_from(cell)),
            SquareStep::Left => Self::Vertical(cell),
            SquareStep::Right => Self::Vertical(SquareStep::Right.attempt_from(cell)),
        }
    }
}

/// Pixel layout of a drawn board, for mapping clicks onto segments.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Geometry {
    /// Pixels between neighboring grid lines.
    pub cell_size: f64,
    /// Pixels from the canvas edge to the first grid line.
    pub margin: f64,
}

impl Default for Geometry {
    fn default() -> Self {
        Self { cell_size: 80.0, margin: 20.0 }
    }
}

impl Geometry {
    /// How far from a grid line a click still counts as hitting it.
    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.cell_size * 0.3
    }
}

/// The segments drawn by the player on an `n×n` board.
///
/// `hor` has shape `(n + 1, n)` and `ver` has shape `(n, n + 1)`; together they cover every segment of the `(n + 1)×(n + 1)` point lattice.
/// Nothing derived from the drawing is stored.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct EdgeSet {
    n: usize,
    hor: Array2<bool>,
    ver: Array2<bool>,
}

impl EdgeSet {
    /// An empty drawing on a board of side `n`.
    pub fn empty(n: usize) -> Self {
        Self {
            n,
            hor: Array2::from_elem((n + 1, n), false),
            ver: Array2::from_elem((n, n + 1), false),
        }
    }

    /// Draw a closed path through lattice points. The closing segment back to the first point is implied.
    pub fn from_loop(n: usize, points: &[Location]) -> Result<Self, MasyuError> {
        let mut edges = Self::empty(n);
        for (a, b) in points.iter().circular_tuple_windows() {
            let segment = Segment::between(UnorderedPair(*a, *b)).ok_or(MasyuError::NotAdjacent(*a, *b))?;
            edges.set(segment, true)?;
        }

        Ok(edges)
    }

    /// Board side in cells.
    #[inline]
    pub fn side(&self) -> usize {
        self.n
    }

    /// Whether `segment` lies on this board.
    pub fn in_bounds(&self, segment: Segment) -> bool {
        match segment {
            Segment::Horizontal(origin) => origin.within(self.n, self.n + 1),
            Segment::Vertical(origin) => origin.within(self.n + 1, self.n),
        }
    }

    /// Whether `segment` is drawn. Out-of-bounds segments never are.
    pub fn contains(&self, segment: Segment) -> bool {
        match segment {
            Segment::Horizontal(origin) => self.hor.get(origin.as_index()),
            Segment::Vertical(origin) => self.ver.get(origin.as_index()),
        }.copied().unwrap_or(false)
    }

    fn slot(&mut self, segment: Segment) -> Result<&mut bool, MasyuError> {
        match segment {
            Segment::Horizontal(origin) => self.hor.get_mut(origin.as_index()),
            Segment::Vertical(origin) => self.ver.get_mut(origin.as_index()),
        }.ok_or(MasyuError::SegmentOutOfBounds(segment))
    }

    pub(crate) fn set(&mut self, segment: Segment, value: bool) -> Result<(), MasyuError> {
        *self.slot(segment)? = value;
        Ok(())
    }

    /// Flip one segment, returning whether it is now drawn.
    pub fn toggle(&mut self, segment: Segment) -> Result<bool, MasyuError> {
        let slot = self.slot(segment)?;
        *slot ^= true;
        Ok(*slot)
    }

    /// Erase everything.
    pub fn clear(&mut self) {
        self.hor.fill(false);
        self.ver.fill(false);
    }

    /// Every drawn segment; horizontal ones first, each kind in row-major order.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        let hor = self.hor.indexed_iter()
            .filter(|(_, drawn)| **drawn)
            .map(|(index, _)| Segment::Horizontal(Location::from(index)));
        let ver = self.ver.indexed_iter()
            .filter(|(_, drawn)| **drawn)
            .map(|(index, _)| Segment::Vertical(Location::from(index)));
        hor.chain(ver)
    }

    /// Every segment of the board, drawn or not.
    pub fn all_segments(&self) -> impl Iterator<Item = Segment> + '_ {
        let hor = self.hor.indexed_iter().map(|(index, _)| Segment::Horizontal(Location::from(index)));
        let ver = self.ver.indexed_iter().map(|(index, _)| Segment::Vertical(Location::from(index)));
        hor.chain(ver)
    }

    /// Number of drawn segments.
    pub fn count(&self) -> usize {
        self.hor.iter().chain(self.ver.iter()).filter(|drawn| **drawn).count()
    }

    /// Every lattice point in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Location> {
        let side = self.n + 1;
        (0..side).cartesian_product(0..side).map(|(y, x)| Location(x, y))
    }

    /// The in-bounds segments touching lattice point `point`, drawn or not.
    pub fn incident(&self, point: Location) -> Vec<Segment> {
        SquareStep::VARIANTS.iter()
            .filter_map(|step| {
                let neighbor = step.attempt_from(point);
                neighbor.within(self.n + 1, self.n + 1)
                    .then(|| Segment::between(UnorderedPair(point, neighbor)))
                    .flatten()
            })
            .filter(|segment| self.in_bounds(*segment))
            .collect_vec()
    }

    /// Number of drawn segments touching lattice point `point`.
    pub fn degree(&self, point: Location) -> usize {
        self.incident(point).into_iter().filter(|segment| self.contains(*segment)).count()
    }

    /// The drawn sides of `cell`, in [`SquareStep::VARIANTS`] order.
    pub fn cell_sides(&self, cell: Location) -> Vec<SquareStep> {
        SquareStep::VARIANTS.iter()
            .filter(|side| self.contains(Segment::side_of(cell, **side)))
            .copied()
            .collect_vec()
    }

    /// The shape of the drawing through `cell`; [`None`] when out of bounds or unless exactly two sides are drawn.
    pub fn cell_shape(&self, cell: Location) -> Option<CellShape> {
        if !cell.within(self.n, self.n) {
            return None;
        }
        CellShape::from_sides(&self.cell_sides(cell))
    }

    /// The drawing as a graph over lattice points; points without drawn segments are left out.
    pub fn to_graph(&self) -> UnGraphMap<Location, Segment> {
        let mut graph = UnGraphMap::with_capacity((self.n + 1) * (self.n + 1), self.count());
        for segment in self.segments() {
            let UnorderedPair(a, b) = segment.endpoints();
            graph.add_edge(a, b, segment);
        }
        graph
    }

    /// Map a click at pixel `(x, y)` to the nearest segment within tolerance. Horizontal segments win ties.
    pub fn segment_at(&self, x: f64, y: f64, geometry: &Geometry) -> Option<Segment> {
        let Geometry { cell_size, margin } = *geometry;
        let tol = geometry.tolerance();
        let line = |k: usize| margin + k as f64 * cell_size;

        for i in 0..=self.n {
            if (y - line(i)).abs() < tol {
                if let Some(j) = (0..self.n).find(|j| x >= line(*j) - tol && x <= line(j + 1) + tol) {
                    return Some(Segment::Horizontal(Location(j, i)));
                }
            }
        }

        for j in 0..=self.n {
            if (x - line(j)).abs() < tol {
                if let Some(i) = (0..self.n).find(|i| y >= line(*i) - tol && y <= line(i + 1) + tol) {
                    return Some(Segment::Vertical(Location(j, i)));
                }
            }
        }

        None
    }

    /// Lay the drawing out as text, with `+` for lattice points and each cell showing its circle, if any.
    pub(crate) fn render(&self, clues: Option<&Clues>) -> String {
        let mut out = String::with_capacity((2 * self.n + 1) * (2 * self.n + 2));

        for y in 0..=self.n {
            for x in 0..=self.n {
                out.push('+');
                if x < self.n {
                    out.push(if self.contains(Segment::Horizontal(Location(x, y))) { '-' } else { ' ' });
                }
            }
            out.push('\n');

            if y == self.n {
                break;
            }

            for x in 0..=self.n {
                out.push(if self.contains(Segment::Vertical(Location(x, y))) { '|' } else { ' ' });
                if x < self.n {
                    out.push(clues.and_then(|clues| clues.get(Location(x, y))).map_or(' ', |circle| circle.display()));
                }
            }
            out.push('\n');
        }

        out
    }
}

impl Display for EdgeSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render(None))
    }
}
