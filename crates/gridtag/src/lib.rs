//! Square grid tag markers: 16-bit ids on an 8x8 black/white cell pattern.
//!
//! A tag carries its id in an 8-byte payload (whitened id, CRC16, and
//! Reed-Solomon parity) spread over the grid through fixed permutation
//! tables, one per 90-degree viewing rotation. Decoding tries all four
//! tables and accepts a read only when exactly one of them produces a
//! correctable, checksum-valid payload; the winning rotation then reorders
//! the observed quadrilateral corners into a canonical marker-relative
//! order.
//!
//! This crate does **not** detect quadrilaterals or sample pixels. It
//! expects a vision front end to hand it four corner coordinates and the 64
//! binary cell samples, and gives back the validated id, rotation, and
//! reordered corners.

mod decode;
mod encode;
mod orientation;
mod tag;

pub use decode::{GridDecoder, PAYLOAD_LEN, SAMPLE_COUNT};
pub use encode::TagEncoder;
pub use orientation::{Rotation, MAPPING_EAST, MAPPING_NORTH, MAPPING_SOUTH, MAPPING_WEST};
pub use tag::{TagDecoder, TagDetection, CORNER_COUNT};
