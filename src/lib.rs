#![warn(missing_docs)]

//! # `bichromate`
//!
//! Generators, validators and player state for two single-player logic puzzles:
//! [binary matrix factorization](bmf) and [Masyu](masyu).
//!
//! Neither engine renders anything. A front end owns a session object such as [`BmfSession`](bmf::BmfSession)
//! or [`MasyuSession`](masyu::MasyuSession), forwards player input to it, and redraws from its accessors.
//! Every mutating call reports whether it solved or unsolved the puzzle as a [`SolveTransition`].
//! With the `wasm` feature, the [`wasm`] module wraps both sessions for use from JavaScript.
//!
//! # BMF
//! A target `n×n` bit matrix is generated as a combination of `r` random rank-1 terms.
//! The player toggles row and column selectors of each term until their combination, by OR or XOR, equals the target.
//! Instances can be shared as short hexadecimal codes, see [`bmf::codec`].
//!
//! # Masyu
//! A reference loop is drawn on the grid lines, and black and white circles are read off it.
//! The player draws a loop satisfying the circles; [`masyu::validate`] decides whether it does.
//!
//! Uniqueness of generated boards is graded by expressing the board as a Boolean satisfiability problem (a "SAT"),
//! see [`masyu::LoopSolver`]. Connectivity is not expressible locally, so models are checked loop by loop after the fact.

pub use location::Location;

mod tests;
pub mod bmf;
pub mod location;
pub(crate) mod logic;
pub mod masyu;
pub mod shape;
#[cfg(feature = "wasm")]
pub mod wasm;

/// How a mutation changed whether a puzzle is solved.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SolveTransition {
    /// Solved before and after, or unsolved before and after.
    Unchanged,
    /// The puzzle just became solved. `first` is true the first time this instance is solved.
    Solved { first: bool },
    /// The puzzle was solved and no longer is.
    Unsolved,
}
