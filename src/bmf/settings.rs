//! Board side, rank and mode.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bmf::matrix::Mode;

/// Allowed board sides.
pub const SIDE_RANGE: RangeInclusive<usize> = 2..=10;
/// Allowed factorization ranks.
pub const RANK_RANGE: RangeInclusive<usize> = 1..=6;

/// Reasons a set of [`BmfSettings`] may be rejected.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum SettingsError {
    /// The board side is not in [`SIDE_RANGE`].
    #[error("board side {0} is outside 2..=10")]
    SideOutOfRange(usize),
    /// The rank is not in [`RANK_RANGE`].
    #[error("rank {0} is outside 1..=6")]
    RankOutOfRange(usize),
}

/// The shape of one BMF puzzle instance. Changing any field means a new instance.
///
/// Deserializing goes through [`BmfSettings::new`], so out-of-range values are rejected there too.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSettings")]
pub struct BmfSettings {
    n: usize,
    r: usize,
    mode: Mode,
}

#[derive(Deserialize)]
struct RawSettings {
    n: usize,
    r: usize,
    mode: Mode,
}

impl TryFrom<RawSettings> for BmfSettings {
    type Error = SettingsError;

    fn try_from(raw: RawSettings) -> Result<Self, Self::Error> {
        Self::new(raw.n, raw.r, raw.mode)
    }
}

impl Default for BmfSettings {
    fn default() -> Self {
        Self { n: 5, r: 3, mode: Mode::Xor }
    }
}

impl BmfSettings {
    /// Validate and construct settings.
    pub fn new(n: usize, r: usize, mode: Mode) -> Result<Self, SettingsError> {
        if !SIDE_RANGE.contains(&n) {
            return Err(SettingsError::SideOutOfRange(n));
        }
        if !RANK_RANGE.contains(&r) {
            return Err(SettingsError::RankOutOfRange(r));
        }

        Ok(Self { n, r, mode })
    }

    /// Construct settings, clamping `n` and `r` into their ranges the way the page's steppers do.
    pub fn clamped(n: usize, r: usize, mode: Mode) -> Self {
        Self {
            n: n.clamp(*SIDE_RANGE.start(), *SIDE_RANGE.end()),
            r: r.clamp(*RANK_RANGE.start(), *RANK_RANGE.end()),
            mode,
        }
    }

    /// Board side.
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of layers.
    #[inline]
    pub fn r(&self) -> usize {
        self.r
    }

    /// How layers combine.
    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }
}
