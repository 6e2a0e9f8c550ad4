//! The shareable puzzle code.
//!
//! A code is a bitstring packed into uppercase hexadecimal:
//! 4 bits of `n`, 4 bits of `r`, 4 bits of mode flag (`1` for XOR, `0` for OR),
//! then the `n*n` target bits in row-major order, padded with zeros to a whole nibble.

use itertools::Itertools;
use log::warn;
use thiserror::Error;

use crate::bmf::matrix::{BitMatrix, Mode};
use crate::bmf::settings::{BmfSettings, RANK_RANGE, SIDE_RANGE};

const HEADER_BITS: usize = 12;

/// Reasons a puzzle code may be rejected.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum DecodeError {
    /// Nothing to decode.
    #[error("empty code")]
    Empty,
    /// A character that is not a hexadecimal digit.
    #[error("character {found:?} at position {position} is not a hex digit")]
    NotHex {
        /// Character offset into the code.
        position: usize,
        /// The offending character.
        found: char,
    },
    /// Too short to hold the header.
    #[error("code holds {bits} bits, fewer than the 12-bit header")]
    HeaderTruncated {
        /// Bits available.
        bits: usize,
    },
    /// The header's side nibble is not a supported board side.
    #[error("board side {0} is outside 2..=10")]
    SideOutOfRange(u8),
    /// The header's rank nibble is not a supported rank.
    #[error("rank {0} is outside 1..=6")]
    RankOutOfRange(u8),
    /// The mode nibble is neither OR nor XOR.
    #[error("mode flag {0} is neither 0 nor 1")]
    BadModeFlag(u8),
}

fn nibble_bits(value: u8) -> [bool; 4] {
    [value & 0b1000 != 0, value & 0b0100 != 0, value & 0b0010 != 0, value & 0b0001 != 0]
}

fn bits_value(bits: &[bool]) -> u8 {
    bits.iter().fold(0, |acc, bit| (acc << 1) | u8::from(*bit))
}

/// Encode `settings` and `target` as a puzzle code.
///
/// The code describes whatever matrix is passed; its side should match `settings.n()`.
pub fn encode(settings: &BmfSettings, target: &BitMatrix) -> String {
    let header = [settings.n() as u8, settings.r() as u8, settings.mode().flag()];

    let bits = header.iter()
        .flat_map(|value| nibble_bits(*value))
        .chain(target.iter_row_major())
        .collect_vec();

    bits.chunks(4)
        .map(|chunk| {
            // trailing zeros pad the final nibble
            let value = bits_value(chunk) << (4 - chunk.len());
            char::from_digit(u32::from(value), 16).unwrap_or('0').to_ascii_uppercase()
        })
        .collect()
}

/// Decode a puzzle code into settings and target.
///
/// Validation is a hard gate; nothing is clamped. A code shorter than its board is padded with zeros.
pub fn decode(code: &str) -> Result<(BmfSettings, BitMatrix), DecodeError> {
    let result = decode_inner(code);
    if let Err(e) = &result {
        warn!("rejected puzzle code {code:?}: {e}");
    }
    result
}

fn decode_inner(code: &str) -> Result<(BmfSettings, BitMatrix), DecodeError> {
    if code.is_empty() {
        return Err(DecodeError::Empty);
    }

    let mut bits = Vec::with_capacity(code.len() * 4);
    for (position, found) in code.chars().enumerate() {
        let value = found.to_digit(16).ok_or(DecodeError::NotHex { position, found })?;
        bits.extend(nibble_bits(value as u8));
    }

    if bits.len() < HEADER_BITS {
        return Err(DecodeError::HeaderTruncated { bits: bits.len() });
    }

    let n = bits_value(&bits[0..4]);
    let r = bits_value(&bits[4..8]);
    let flag = bits_value(&bits[8..12]);

    if !SIDE_RANGE.contains(&usize::from(n)) {
        return Err(DecodeError::SideOutOfRange(n));
    }
    if !RANK_RANGE.contains(&usize::from(r)) {
        return Err(DecodeError::RankOutOfRange(r));
    }
    let mode = Mode::from_flag(flag).ok_or(DecodeError::BadModeFlag(flag))?;

    let n = usize::from(n);
    let board_bits = bits.into_iter()
        .skip(HEADER_BITS)
        .pad_using(n * n, |_| false)
        .take(n * n)
        .collect_vec();

    let settings = BmfSettings::clamped(n, usize::from(r), mode);
    let target = BitMatrix::from_row_major(n, board_bits).unwrap_or_else(|| BitMatrix::zeros(n));

    Ok((settings, target))
}
