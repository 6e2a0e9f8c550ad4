//! Hand-made boards.

use crate::location::Location;
use crate::masyu::clues::{Circle, Clues};
use crate::masyu::generator::SIDE_RANGE;

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BuilderInvalidReason {
    /// The board side is outside the supported range.
    SideOutOfRange,
    /// A circle was placed outside the board.
    FeatureOutOfBounds,
}

/// A builder for hand-made Masyu boards.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
#[derive(Clone, Debug)]
pub struct Builder {
    clues: Clues,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl Default for Builder {
    fn default() -> Self {
        Self::with_side(3)
    }
}

impl Builder {
    /// Construct a builder for a board of side `n`.
    ///
    /// The builder starts out invalid if `n` is outside the supported range.
    pub fn with_side(n: usize) -> Self {
        let mut invalid_reasons = Vec::new();
        if !SIDE_RANGE.contains(&n) {
            invalid_reasons.push(BuilderInvalidReason::SideOutOfRange);
        }

        Self {
            clues: Clues::empty(n),
            invalid_reasons,
        }
    }

    /// Place `circle` at `location`, replacing any circle already there.
    ///
    /// May cause the builder to enter a [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds) invalid state if `location` is out of bounds.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn add_circle(&mut self, location: Location, circle: Circle) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if !self.clues.set(location, Some(circle)) {
            self.invalid_reasons.push(BuilderInvalidReason::FeatureOutOfBounds);
        }

        self
    }

    /// Place circles from rows such as `"B.W"`; `B` and `W` are circles and anything else leaves the cell alone.
    ///
    /// Rows or columns beyond the board invalidate the builder the same way [`Self::add_circle`] does.
    pub fn add_rows(&mut self, rows: &[&str]) -> &mut Self {
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                if let Some(circle) = Circle::from_display(c) {
                    self.add_circle(Location(x, y), circle);
                }
            }
        }

        self
    }

    /// Remove the circle at `location`, if any.
    ///
    /// If the builder is in an invalid state or `location` is out of bounds, this function does nothing.
    pub fn remove_circle(&mut self, location: Location) -> &mut Self {
        if self.invalid_reasons.is_empty() {
            self.clues.set(location, None);
        }

        self
    }

    /// Check the validity of this builder.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into [`Clues`].
    /// If the builder is invalid for any reason, a reference to a [`Vec`] of [`BuilderInvalidReason`] will indicate why.
    pub fn build(&self) -> Result<Clues, &Vec<BuilderInvalidReason>> {
        if !self.invalid_reasons.is_empty() {
            return Err(&self.invalid_reasons);
        }

        Ok(self.clues.clone())
    }
}
