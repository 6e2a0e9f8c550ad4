//! The player's row and column selectors.

use ndarray::{Array2, ArrayView1};

use crate::bmf::matrix::{BitMatrix, Mode};
use crate::bmf::settings::BmfSettings;

/// Which toggle vector of the current layer an action addresses.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Selector {
    /// The row selector `U_cur`.
    Row,
    /// The column selector `V_cur`.
    Column,
}

/// The player's editable state: `r` layers, each a pair of toggle vectors `(U_k, V_k)`, and the selected layer.
///
/// Both vector sets live in fixed `r×n` buffers allocated once per instance.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlayerState {
    u: Array2<bool>,
    v: Array2<bool>,
    cur: usize,
}

impl PlayerState {
    /// An all-zero state shaped for `settings`, with layer 0 selected.
    pub fn new(settings: &BmfSettings) -> Self {
        Self {
            u: Array2::from_elem((settings.r(), settings.n()), false),
            v: Array2::from_elem((settings.r(), settings.n()), false),
            cur: 0,
        }
    }

    /// Assemble a state from raw layers. Returns [`None`] if the shapes disagree or `cur` is out of range.
    pub fn from_layers(u: Vec<Vec<bool>>, v: Vec<Vec<bool>>, cur: usize) -> Option<Self> {
        let r = u.len();
        let n = u.first().map_or(0, Vec::len);
        if r == 0 || v.len() != r || cur >= r || u.iter().chain(v.iter()).any(|layer| layer.len() != n) {
            return None;
        }

        Some(Self {
            u: Array2::from_shape_vec((r, n), u.into_iter().flatten().collect()).ok()?,
            v: Array2::from_shape_vec((r, n), v.into_iter().flatten().collect()).ok()?,
            cur,
        })
    }

    /// Number of layers.
    #[inline]
    pub fn layers(&self) -> usize {
        self.u.nrows()
    }

    /// Length of each toggle vector.
    #[inline]
    pub fn side(&self) -> usize {
        self.u.ncols()
    }

    /// The selected layer.
    #[inline]
    pub fn cur(&self) -> usize {
        self.cur
    }

    /// The row selector of `layer`, if it exists.
    pub fn row_selector(&self, layer: usize) -> Option<ArrayView1<'_, bool>> {
        (layer < self.layers()).then(|| self.u.row(layer))
    }

    /// The column selector of `layer`, if it exists.
    pub fn column_selector(&self, layer: usize) -> Option<ArrayView1<'_, bool>> {
        (layer < self.layers()).then(|| self.v.row(layer))
    }

    /// Flip one bit of the current layer. Returns `false`, changing nothing, if `index` is out of range.
    pub fn toggle(&mut self, selector: Selector, index: usize) -> bool {
        let cur = self.cur;
        let vectors = match selector {
            Selector::Row => &mut self.u,
            Selector::Column => &mut self.v,
        };

        match vectors.get_mut((cur, index)) {
            Some(bit) => {
                *bit ^= true;
                true
            }
            None => false,
        }
    }

    /// Set one bit of an arbitrary layer, used when building a known solution.
    pub(crate) fn set(&mut self, selector: Selector, layer: usize, index: usize, value: bool) {
        let vectors = match selector {
            Selector::Row => &mut self.u,
            Selector::Column => &mut self.v,
        };
        if let Some(bit) = vectors.get_mut((layer, index)) {
            *bit = value;
        }
    }

    /// Select layer `layer`. Returns `false`, changing nothing, if out of range.
    pub fn select_layer(&mut self, layer: usize) -> bool {
        if layer >= self.layers() {
            return false;
        }
        self.cur = layer;
        true
    }

    /// Zero every toggle. The selected layer is kept.
    pub fn clear(&mut self) {
        self.u.fill(false);
        self.v.fill(false);
    }

    /// Whether the outer product of `layer` covers `(i, j)`. Missing layers cover nothing.
    pub fn covers(&self, layer: usize, i: usize, j: usize) -> bool {
        self.u.get((layer, i)).copied().unwrap_or(false) && self.v.get((layer, j)).copied().unwrap_or(false)
    }

    /// Compose all layers into one matrix. Never cached, so it always reflects the toggles.
    pub fn compose(&self, mode: Mode) -> BitMatrix {
        let mut matrix = BitMatrix::zeros(self.side());
        for (u, v) in self.u.rows().into_iter().zip(self.v.rows()) {
            matrix.apply_rank_one(u.iter().copied(), v.iter().copied(), mode);
        }
        matrix
    }

    pub(crate) fn rows_u(&self) -> Vec<Vec<bool>> {
        self.u.rows().into_iter().map(|row| row.to_vec()).collect()
    }

    pub(crate) fn rows_v(&self) -> Vec<Vec<bool>> {
        self.v.rows().into_iter().map(|row| row.to_vec()).collect()
    }
}
