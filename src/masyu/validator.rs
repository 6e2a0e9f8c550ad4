//! Deciding whether a drawing solves a Masyu board.
//!
//! The check runs in a fixed order, and the first failure is reported:
//! 1. Every lattice point has degree 0 or 2.
//! 2. Something is drawn.
//! 3. The drawing is one connected component; with step 1 this makes it a single simple loop.
//! 4. Every circle, in row-major order, sits on the loop and agrees with the shape of the loop through it and its neighbors.

use std::collections::HashSet;

use thiserror::Error;

use crate::location::Location;
use crate::masyu::clues::{Circle, Clues};
use crate::masyu::edges::EdgeSet;
use crate::shape::{Axis, CellShape, SquareStep};

/// The first reason a drawing is not a solution.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Error)]
pub enum Violation {
    /// A point with exactly one drawn segment.
    #[error("the line ends at point {0:?}")]
    DeadEnd(Location),
    /// A point with three or four drawn segments.
    #[error("the line branches at point {0:?}")]
    Branch(Location),
    /// No segment is drawn.
    #[error("nothing is drawn")]
    Empty,
    /// More than one loop is drawn.
    #[error("only {reached} of {total} segments form one loop")]
    Disconnected {
        /// Segments on the loop through the first drawn point.
        reached: usize,
        /// Segments drawn.
        total: usize,
    },
    /// A circled cell without exactly two drawn sides.
    #[error("the circle at {0:?} is not on the loop")]
    OffLoop(Location),
    /// A white circle on a turn.
    #[error("the white circle at {0:?} is not passed straight through")]
    WhiteNotStraight(Location),
    /// A straight white circle with no turn in either cell along its line.
    #[error("the loop does not turn next to the white circle at {0:?}")]
    WhiteWithoutTurn(Location),
    /// A black circle passed straight through.
    #[error("the loop does not turn on the black circle at {0:?}")]
    BlackNotTurn(Location),
    /// The first arm of a black circle, in the order of [`CellShape::arms`], whose cell is not straight.
    #[error("the loop does not run straight through the cell {arm:?} of the black circle at {cell:?}")]
    BlackArmBent {
        /// The circled cell.
        cell: Location,
        /// The side of `cell` the arm leaves through.
        arm: SquareStep,
    },
}

/// Check that the drawing is exactly one simple loop.
pub fn check_loop(edges: &EdgeSet) -> Result<(), Violation> {
    let mut seed = None;
    for point in edges.points() {
        match edges.degree(point) {
            0 => {}
            1 => return Err(Violation::DeadEnd(point)),
            2 => { seed.get_or_insert(point); }
            _ => return Err(Violation::Branch(point)),
        }
    }

    let seed = seed.ok_or(Violation::Empty)?;

    let graph = edges.to_graph();
    let mut visited = HashSet::from([seed]);
    let mut stack = vec![seed];
    let mut traversals = 0;
    while let Some(point) = stack.pop() {
        for neighbor in graph.neighbors(point) {
            if visited.insert(neighbor) {
                stack.push(neighbor);
            }
            traversals += 1;
        }
    }

    // each segment was traversed once from either end
    let reached = traversals / 2;
    let total = edges.count();
    if reached != total {
        return Err(Violation::Disconnected { reached, total });
    }

    Ok(())
}

/// Whether `cell`, passed straight through, is next to a turn along its line.
pub(crate) fn white_satisfied(edges: &EdgeSet, cell: Location, axis: Axis) -> bool {
    let along = match axis {
        Axis::Horizontal => [SquareStep::Left, SquareStep::Right],
        Axis::Vertical => [SquareStep::Up, SquareStep::Down],
    };

    along.iter()
        .filter_map(|step| edges.cell_shape(step.attempt_from(cell)))
        .any(|shape| shape.is_turn())
}

/// The first arm of the turn at `cell` whose neighbor is missing or not straight along that arm.
pub(crate) fn black_bent_arm(edges: &EdgeSet, cell: Location, shape: CellShape) -> Option<SquareStep> {
    let arms = shape.arms()?;

    arms.iter()
        .find(|(arm, axis)| edges.cell_shape(arm.attempt_from(cell)) != Some(CellShape::Straight(*axis)))
        .map(|(arm, _)| *arm)
}

/// Check one circle against the drawing.
pub fn check_circle(edges: &EdgeSet, cell: Location, circle: Circle) -> Result<(), Violation> {
    let shape = edges.cell_shape(cell).ok_or(Violation::OffLoop(cell))?;

    match (circle, shape) {
        (Circle::White, CellShape::Straight(axis)) => match white_satisfied(edges, cell, axis) {
            true => Ok(()),
            false => Err(Violation::WhiteWithoutTurn(cell)),
        },
        (Circle::White, CellShape::Turn(..)) => Err(Violation::WhiteNotStraight(cell)),
        (Circle::Black, CellShape::Turn(..)) => match black_bent_arm(edges, cell, shape) {
            None => Ok(()),
            Some(arm) => Err(Violation::BlackArmBent { cell, arm }),
        },
        (Circle::Black, CellShape::Straight(_)) => Err(Violation::BlackNotTurn(cell)),
    }
}

/// Check every circle against the drawing, in row-major order.
pub fn check_circles(edges: &EdgeSet, clues: &Clues) -> Result<(), Violation> {
    clues.iter().try_for_each(|(cell, circle)| check_circle(edges, cell, circle))
}

/// Check the loop, then the circles.
pub fn validate(edges: &EdgeSet, clues: &Clues) -> Result<(), Violation> {
    check_loop(edges)?;
    check_circles(edges, clues)
}

/// Whether the drawing solves the board.
pub fn is_solved(edges: &EdgeSet, clues: &Clues) -> bool {
    validate(edges, clues).is_ok()
}
