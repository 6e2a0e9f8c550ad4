//! A playable Masyu board.

use std::fmt::{Display, Formatter};

use log::debug;

use crate::masyu::clues::Clues;
use crate::masyu::edges::{EdgeSet, Geometry, Segment};
use crate::masyu::validator::{validate, Violation};
use crate::masyu::MasyuError;
use crate::SolveTransition;

/// One Masyu board being played.
#[derive(Clone, Debug)]
pub struct MasyuSession {
    clues: Clues,
    edges: EdgeSet,
    solved: bool,
    was_solved: bool,
}

impl MasyuSession {
    /// Start playing on `clues` with nothing drawn.
    pub fn new(clues: Clues) -> Self {
        Self {
            edges: EdgeSet::empty(clues.side()),
            clues,
            solved: false,
            was_solved: false,
        }
    }

    /// The circles of this board.
    #[inline]
    pub fn clues(&self) -> &Clues {
        &self.clues
    }

    /// The player's drawing.
    #[inline]
    pub fn edges(&self) -> &EdgeSet {
        &self.edges
    }

    /// Whether the drawing currently solves the board.
    #[inline]
    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Whether this board has ever been solved.
    #[inline]
    pub fn was_solved(&self) -> bool {
        self.was_solved
    }

    /// The first reason the current drawing is not a solution.
    pub fn validate(&self) -> Result<(), Violation> {
        validate(&self.edges, &self.clues)
    }

    /// Flip one segment, then re-check the solution.
    pub fn toggle(&mut self, segment: Segment) -> Result<SolveTransition, MasyuError> {
        self.edges.toggle(segment)?;
        Ok(self.recheck())
    }

    /// Flip the segment under a click at pixel `(x, y)`, if any.
    ///
    /// Returns [`None`] when the click hits no segment; nothing changes then.
    pub fn toggle_at(&mut self, x: f64, y: f64, geometry: &Geometry) -> Option<SolveTransition> {
        let segment = self.edges.segment_at(x, y, geometry)?;
        // segment_at only yields segments of this board
        self.toggle(segment).ok()
    }

    /// Erase the drawing. The board itself and whether it was ever solved are kept.
    pub fn reset(&mut self) -> SolveTransition {
        self.edges.clear();
        self.recheck()
    }

    fn recheck(&mut self) -> SolveTransition {
        let now_solved = self.validate().is_ok();
        match (self.solved, now_solved) {
            (false, true) => {
                self.solved = true;
                let first = !self.was_solved;
                self.was_solved = true;
                debug!("masyu solved with {} segments (first: {first})", self.edges.count());
                SolveTransition::Solved { first }
            }
            (true, false) => {
                self.solved = false;
                SolveTransition::Unsolved
            }
            _ => SolveTransition::Unchanged,
        }
    }
}

impl Display for MasyuSession {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.edges.render(Some(&self.clues)))
    }
}
