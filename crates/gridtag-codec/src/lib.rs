//! Binary building blocks for grid tag markers.
//!
//! This crate is intentionally small and self-contained. It knows nothing
//! about images, grids, or orientations; it provides the three pieces the
//! tag layer composes into a payload codec:
//!
//! - [`Bitfield`], a fixed-size bit container with permutation-based
//!   addressing for bulk reads and writes,
//! - [`crc16_ccitt`], the CRC16-CCITT checksum,
//! - [`ReedSolomon`], a general GF(2^m) forward-error-correction codec for
//!   shortened codewords.

mod bitfield;
mod crc16;
mod fec;

pub use bitfield::{Bitfield, BitfieldError};
pub use crc16::crc16_ccitt;
pub use fec::{FecParamsError, ReedSolomon, Uncorrectable, MAX_PARITY};
