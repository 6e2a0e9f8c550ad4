//! Circle placements.

use std::fmt::{Display, Formatter};

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use strum::VariantArray;

use crate::location::Location;

/// A clue circle.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, VariantArray, Serialize, Deserialize)]
pub enum Circle {
    /// The loop turns here and runs straight through both neighboring cells it enters.
    Black,
    /// The loop runs straight through here and turns in at least one neighboring cell along the line.
    White,
}

impl Circle {
    /// The character used for this circle in text boards.
    pub fn display(&self) -> char {
        match self {
            Self::Black => 'B',
            Self::White => 'W',
        }
    }

    /// Read a circle back from [`Circle::display`], in either case.
    pub fn from_display(c: char) -> Option<Self> {
        Self::VARIANTS.iter().find(|circle| circle.display() == c.to_ascii_uppercase()).copied()
    }
}

/// The clue circles of an `n×n` board, fixed for a puzzle instance.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Clues {
    cells: Array2<Option<Circle>>,
}

impl Clues {
    /// A board of side `n` without any circle.
    pub fn empty(n: usize) -> Self {
        Self { cells: Array2::from_elem((n, n), None) }
    }

    /// Parse rows such as `".W."`, where `B` and `W` are circles and anything else is an empty cell.
    ///
    /// Returns [`None`] unless the rows form a square.
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        let n = rows.len();
        let cells = rows.iter()
            .flat_map(|row| row.chars().map(Circle::from_display))
            .collect::<Vec<_>>();

        Array2::from_shape_vec((n, n), cells).ok()
            .filter(|_| rows.iter().all(|row| row.chars().count() == n))
            .map(|cells| Self { cells })
    }

    /// Board side.
    #[inline]
    pub fn side(&self) -> usize {
        self.cells.nrows()
    }

    /// The circle at `cell`, if any. Out-of-bounds cells never hold a circle.
    pub fn get(&self, cell: Location) -> Option<Circle> {
        self.cells.get(cell.as_index()).copied().flatten()
    }

    /// Place or clear a circle. Returns `false` if `cell` is out of bounds.
    pub fn set(&mut self, cell: Location, circle: Option<Circle>) -> bool {
        match self.cells.get_mut(cell.as_index()) {
            Some(slot) => {
                *slot = circle;
                true
            }
            None => false,
        }
    }

    /// Every circle with its cell, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Location, Circle)> + '_ {
        self.cells.indexed_iter()
            .filter_map(|(index, circle)| circle.map(|circle| (Location::from(index), circle)))
    }

    /// Number of circles.
    pub fn count(&self) -> usize {
        self.iter().count()
    }
}

impl Display for Clues {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.rows() {
            writeln!(f, "{}", row.iter().map(|cell| cell.map_or('.', |circle| circle.display())).collect::<String>())?;
        }

        Ok(())
    }
}
