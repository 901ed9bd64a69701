//! Encode-side payload and artwork bit pattern construction.

use gridtag_codec::{crc16_ccitt, Bitfield, ReedSolomon};

use crate::decode::{ID_WHITENING, PAYLOAD_LEN, SAMPLE_COUNT};
use crate::orientation::MAPPING_NORTH;

/// Builds payload blocks and printable cell patterns for tag ids.
#[derive(Clone, Debug)]
pub struct TagEncoder {
    fec: ReedSolomon,
    bits: Bitfield,
}

impl TagEncoder {
    pub fn new() -> Self {
        let fec = ReedSolomon::new(8, 4, 4).expect("fixed codec parameters");
        let bits = Bitfield::new(SAMPLE_COUNT).expect("fixed sample count");
        Self { fec, bits }
    }

    /// The 8-byte payload for `id`: whitened id, CRC16 over the id bytes,
    /// then Reed-Solomon parity over id and CRC.
    pub fn payload_block(&self, id: u16) -> [u8; PAYLOAD_LEN] {
        let whitened = id ^ ID_WHITENING;
        let mut block = [0u8; PAYLOAD_LEN];
        block[0] = (whitened >> 8) as u8;
        block[1] = whitened as u8;
        let crc = crc16_ccitt(&block[..2]);
        block[2..4].copy_from_slice(&crc);
        let parity = self.fec.encode(&block[..4]);
        block[4..].copy_from_slice(&parity);
        block
    }

    /// The 64 cell values (0 or 1) of the printed marker in physical scan
    /// order, as an upright reader would sample them.
    pub fn bit_pattern(&mut self, id: u16) -> [u8; SAMPLE_COUNT] {
        let block = self.payload_block(id);
        self.bits.set_bytes(&block);
        let mut cells = [0u8; SAMPLE_COUNT];
        self.bits.get_bits(&mut cells, Some(&MAPPING_NORTH));
        cells
    }
}

impl Default for TagEncoder {
    fn default() -> Self {
        Self::new()
    }
}
