//! Masyu.
//!
//! The player draws one closed loop along the grid lines of an `n×n` board, passing through every circle.
//! The loop must go straight through white circles and turn next to at least one of them along its line;
//! it must turn on black circles and go straight through both cells beyond the turn.

use thiserror::Error;

pub use builder::{Builder, BuilderInvalidReason};
pub use clues::{Circle, Clues};
pub use edges::{EdgeSet, Geometry, Segment};
pub use generator::{derive_clues, generate, generate_with_solution, Generated, MasyuSettings, Strategy};
pub use session::MasyuSession;
pub use solver::{LoopSolver, Uniqueness};
pub use validator::{is_solved, validate, Violation};

use crate::location::Location;

pub mod builder;
pub mod clues;
pub mod edges;
pub mod generator;
pub mod session;
pub mod solver;
pub mod validator;

/// Reasons a Masyu operation may be refused.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum MasyuError {
    /// A segment with an endpoint off the lattice.
    #[error("segment {0:?} is not on the board")]
    SegmentOutOfBounds(Segment),
    /// Two consecutive loop points that are not neighbors.
    #[error("points {0:?} and {1:?} are not adjacent")]
    NotAdjacent(Location, Location),
    /// A board side outside [`generator::SIDE_RANGE`].
    #[error("board side {0} is not supported")]
    SideOutOfRange(usize),
    /// Every grown candidate the budget allowed had more than one solution.
    #[error("no unique puzzle found in {attempts} attempts")]
    NoUniquePuzzle {
        /// The attempts made.
        attempts: usize,
    },
}
