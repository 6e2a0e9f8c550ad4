//! Random targets with a known factorization.

use itertools::Itertools;
use log::debug;
use rand::Rng;

use crate::bmf::matrix::BitMatrix;
use crate::bmf::settings::BmfSettings;
use crate::bmf::state::{PlayerState, Selector};

/// Generate a target reachable with `settings.r()` layers under `settings.mode()`.
pub fn generate_target<R: Rng + ?Sized>(settings: &BmfSettings, rng: &mut R) -> BitMatrix {
    generate_with_witness(settings, rng).0
}

/// Generate a target together with a [`PlayerState`] that composes to it.
///
/// Each layer draws two independent vectors whose entries are set with probability one half.
/// Nothing guarantees `r` is the minimal rank, only that a rank-`r` witness exists.
pub fn generate_with_witness<R: Rng + ?Sized>(settings: &BmfSettings, rng: &mut R) -> (BitMatrix, PlayerState) {
    let n = settings.n();
    let mut target = BitMatrix::zeros(n);
    let mut witness = PlayerState::new(settings);

    for layer in 0..settings.r() {
        let t_u = (0..n).map(|_| rng.gen_bool(0.5)).collect_vec();
        let t_v = (0..n).map(|_| rng.gen_bool(0.5)).collect_vec();

        target.apply_rank_one(t_u.iter().copied(), t_v.iter().copied(), settings.mode());

        for (index, (bit_u, bit_v)) in t_u.into_iter().zip(t_v).enumerate() {
            witness.set(Selector::Row, layer, index, bit_u);
            witness.set(Selector::Column, layer, index, bit_v);
        }
    }

    debug!("generated {n}x{n} target with {} set cells from {} {:?} layers", target.count_ones(), settings.r(), settings.mode());
    (target, witness)
}
