//! Square bit matrices and the two ways rank-1 terms merge into them.

use std::fmt::{Display, Formatter};

use itertools::Itertools;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// How rank-1 terms are merged into one matrix.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Saturating: once a cell is set, further terms keep it set.
    Or,
    /// Toggling: overlapping terms cancel.
    #[default]
    Xor,
}

impl Mode {
    /// Apply one term's contribution to `cell`.
    #[inline]
    pub fn combine(&self, cell: &mut bool) {
        match self {
            Self::Or => *cell = true,
            Self::Xor => *cell ^= true,
        }
    }

    /// The 4-bit mode flag used by the puzzle code.
    pub(crate) fn flag(&self) -> u8 {
        match self {
            Self::Or => 0,
            Self::Xor => 1,
        }
    }

    pub(crate) fn from_flag(flag: u8) -> Option<Self> {
        match flag {
            0 => Some(Self::Or),
            1 => Some(Self::Xor),
            _ => None,
        }
    }
}

/// A square matrix of bits.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BitMatrix {
    cells: Array2<bool>,
}

impl BitMatrix {
    /// An `n×n` matrix of zeros.
    pub fn zeros(n: usize) -> Self {
        Self { cells: Array2::from_elem((n, n), false) }
    }

    /// Build an `n×n` matrix from `n*n` bits in row-major order.
    ///
    /// Returns [`None`] if the number of bits is wrong.
    pub fn from_row_major(n: usize, bits: Vec<bool>) -> Option<Self> {
        Array2::from_shape_vec((n, n), bits).ok().map(|cells| Self { cells })
    }

    /// Build a matrix from nested rows, e.g. `[[1, 0], [1, 0]]`. Any nonzero entry is a set bit.
    ///
    /// Returns [`None`] unless the rows form a square.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Option<Self> {
        let n = rows.len();
        if rows.iter().any(|row| row.as_ref().len() != n) {
            return None;
        }

        Self::from_row_major(n, rows.iter().flat_map(|row| row.as_ref().iter().map(|bit| *bit != 0)).collect_vec())
    }

    /// The side length of this matrix.
    #[inline]
    pub fn side(&self) -> usize {
        self.cells.nrows()
    }

    /// The bit at row `i`, column `j`. Out-of-range reads are [`None`].
    pub fn get(&self, i: usize, j: usize) -> Option<bool> {
        self.cells.get((i, j)).copied()
    }

    /// Merge the outer product `u ⊗ v` into this matrix using `mode`.
    pub fn apply_rank_one<U, V>(&mut self, u: U, v: V, mode: Mode)
    where
        U: IntoIterator<Item = bool>,
        V: IntoIterator<Item = bool> + Clone,
    {
        for (i, row_selected) in u.into_iter().enumerate() {
            if !row_selected {
                continue;
            }
            for (j, col_selected) in v.clone().into_iter().enumerate() {
                if col_selected {
                    if let Some(cell) = self.cells.get_mut((i, j)) {
                        mode.combine(cell);
                    }
                }
            }
        }
    }

    /// The bits in row-major order.
    pub fn iter_row_major(&self) -> impl Iterator<Item = bool> + '_ {
        self.cells.iter().copied()
    }

    /// The rows as vectors, for snapshots.
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        self.cells.rows().into_iter().map(|row| row.to_vec()).collect_vec()
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.cells.iter().filter(|bit| **bit).count()
    }
}

impl Display for BitMatrix {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.rows() {
            writeln!(f, "{}", row.iter().map(|bit| if *bit { '#' } else { '.' }).collect::<String>())?;
        }

        Ok(())
    }
}
