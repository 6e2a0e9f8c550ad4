//! Binary matrix factorization.
//!
//! The player rebuilds a target bit matrix as a combination of `r` rank-1 terms, each the outer product of a row selector and a column selector.
//! Terms merge either by OR or by XOR, see [`Mode`].

pub use codec::{decode, encode, DecodeError};
pub use generator::{generate_target, generate_with_witness};
pub use matrix::{BitMatrix, Mode};
pub use session::{BmfError, BmfSession, BmfSnapshot, TileHint};
pub use settings::{BmfSettings, SettingsError, RANK_RANGE, SIDE_RANGE};
pub use state::{PlayerState, Selector};

pub mod codec;
pub mod generator;
pub mod matrix;
pub mod session;
pub mod settings;
pub mod state;
