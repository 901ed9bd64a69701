//! Orientation-resolving payload decoder.

use gridtag_codec::{crc16_ccitt, Bitfield, ReedSolomon};

use crate::orientation::{Rotation, TRIALS};

/// Number of cells sampled from the marker grid.
pub const SAMPLE_COUNT: usize = 64;

/// Byte length of the packed payload block.
pub const PAYLOAD_LEN: usize = 8;

/// Whitening constant XORed into the payload id field.
pub(crate) const ID_WHITENING: u16 = 0xa5a5;

/// Decodes 64 grid cell samples into a tag id and viewing rotation.
///
/// The decoder owns its scratch bitfield, so decoding takes `&mut self`;
/// give each worker thread its own instance rather than sharing one.
#[derive(Clone, Debug)]
pub struct GridDecoder {
    fec: ReedSolomon,
    bits: Bitfield,
}

impl GridDecoder {
    pub fn new() -> Self {
        // RS(8, 4, 4): byte symbols, 4 data bytes, up to 2 byte errors fixed.
        let fec = ReedSolomon::new(8, 4, 4).expect("fixed codec parameters");
        let bits = Bitfield::new(SAMPLE_COUNT).expect("fixed sample count");
        Self { fec, bits }
    }

    /// Try all four orientations and return the id and rotation if exactly
    /// one of them yields a correctable, CRC-valid payload.
    ///
    /// `samples` holds one value per grid cell (black = 0, white = 1) in the
    /// fixed physical scan order. Zero validating orientations is an
    /// ordinary miss; more than one means the read cannot be trusted, and
    /// both come back as `None`.
    pub fn decode(&mut self, samples: &[u8; SAMPLE_COUNT]) -> Option<(u16, Rotation)> {
        self.decode_trials(samples, &TRIALS)
    }

    fn decode_trials(
        &mut self,
        samples: &[u8; SAMPLE_COUNT],
        trials: &[(Rotation, &[u8; 64])],
    ) -> Option<(u16, Rotation)> {
        let mut winner = None;
        let mut candidates = 0usize;

        for &(rotation, mapping) in trials {
            self.bits.set_bits(samples, Some(mapping));
            let mut block = [0u8; PAYLOAD_LEN];
            block.copy_from_slice(self.bits.as_bytes());

            if self.fec.correct(&mut block).is_err() {
                continue;
            }
            if block[2..4] != crc16_ccitt(&block[..2]) {
                continue;
            }

            let id = (u16::from(block[0]) << 8 | u16::from(block[1])) ^ ID_WHITENING;
            winner = Some((id, rotation));
            candidates += 1;
        }

        // A genuine payload validates under exactly one orientation. Anything
        // else signals an unreliable read, never a tie to break.
        match candidates {
            1 => winner,
            0 => None,
            n => {
                log::debug!("rejecting ambiguous read: {n} orientations validated");
                None
            }
        }
    }
}

impl Default for GridDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::TagEncoder;
    use crate::orientation::MAPPING_NORTH;

    #[test]
    fn uniform_samples_never_decode() {
        // All-same cells produce the identical payload in every orientation:
        // either invalid four times over, or a four-way ambiguity. Both fail.
        let mut decoder = GridDecoder::new();
        assert_eq!(decoder.decode(&[0u8; SAMPLE_COUNT]), None);
        assert_eq!(decoder.decode(&[1u8; SAMPLE_COUNT]), None);
    }

    #[test]
    fn duplicate_validations_are_rejected() {
        // Force two trials through the same table: both validate, and the
        // uniqueness rule must throw the read away.
        let samples = TagEncoder::new().bit_pattern(77);
        let mut decoder = GridDecoder::new();
        assert_eq!(
            decoder.decode_trials(&samples, &[(Rotation::North, &MAPPING_NORTH)]),
            Some((77, Rotation::North))
        );
        assert_eq!(
            decoder.decode_trials(
                &samples,
                &[
                    (Rotation::North, &MAPPING_NORTH),
                    (Rotation::East, &MAPPING_NORTH),
                ],
            ),
            None
        );
    }
}
