//! Rotation type and the orientation permutation tables.
//!
//! Each table assigns logical payload bit `i` to a physical cell of the 8x8
//! grid, one table per 90-degree viewing rotation. The tables are part of
//! the printed wire format: a reader and the artwork generator must agree on
//! them bit for bit, so they are fixed constants, never derived at runtime.

use serde::{Deserialize, Serialize};

/// One of the four 90-degree rotations a square marker can present.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Cyclic shift mapping image-order corners into marker-order corners.
    #[inline]
    pub(crate) fn corner_shift(self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }
}

/// Bit mapping for an upright marker.
#[rustfmt::skip]
pub const MAPPING_NORTH: [u8; 64] = [
     0,  1,  2,  3, 16, 17, 18, 19,
     4,  5,  6,  7, 20, 21, 22, 23,
    32, 33, 34, 35, 48, 49, 50, 51,
    36, 37, 38, 39, 52, 53, 54, 55,
    40, 41, 42, 43, 56, 57, 58, 59,
    44, 45, 46, 47, 60, 61, 62, 63,
    24, 25, 26, 27,  8,  9, 10, 11,
    28, 29, 30, 31, 12, 13, 14, 15,
];

/// Bit mapping for a marker viewed rotated one quarter turn.
#[rustfmt::skip]
pub const MAPPING_EAST: [u8; 64] = [
    28, 24, 44, 40, 36, 32,  4,  0,
    29, 25, 45, 41, 37, 33,  5,  1,
    30, 26, 46, 42, 38, 34,  6,  2,
    31, 27, 47, 43, 39, 35,  7,  3,
    12,  8, 60, 56, 52, 48, 20, 16,
    13,  9, 61, 57, 53, 49, 21, 17,
    14, 10, 62, 58, 54, 50, 22, 18,
    15, 11, 63, 59, 55, 51, 23, 19,
];

/// Bit mapping for a marker viewed upside down.
#[rustfmt::skip]
pub const MAPPING_SOUTH: [u8; 64] = [
    15, 14, 13, 12, 31, 30, 29, 28,
    11, 10,  9,  8, 27, 26, 25, 24,
    63, 62, 61, 60, 47, 46, 45, 44,
    59, 58, 57, 56, 43, 42, 41, 40,
    55, 54, 53, 52, 39, 38, 37, 36,
    51, 50, 49, 48, 35, 34, 33, 32,
    23, 22, 21, 20,  7,  6,  5,  4,
    19, 18, 17, 16,  3,  2,  1,  0,
];

/// Bit mapping for a marker viewed rotated three quarter turns.
#[rustfmt::skip]
pub const MAPPING_WEST: [u8; 64] = [
    19, 23, 51, 55, 59, 63, 11, 15,
    18, 22, 50, 54, 58, 62, 10, 14,
    17, 21, 49, 53, 57, 61,  9, 13,
    16, 20, 48, 52, 56, 60,  8, 12,
     3,  7, 35, 39, 43, 47, 27, 31,
     2,  6, 34, 38, 42, 46, 26, 30,
     1,  5, 33, 37, 41, 45, 25, 29,
     0,  4, 32, 36, 40, 44, 24, 28,
];

/// Decoder trial order.
pub(crate) const TRIALS: [(Rotation, &[u8; 64]); 4] = [
    (Rotation::North, &MAPPING_NORTH),
    (Rotation::West, &MAPPING_WEST),
    (Rotation::South, &MAPPING_SOUTH),
    (Rotation::East, &MAPPING_EAST),
];
