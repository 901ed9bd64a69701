//! Tag-level decoding: payload plus canonical corner ordering.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::decode::{GridDecoder, SAMPLE_COUNT};
use crate::orientation::Rotation;

/// Number of quadrilateral corners.
pub const CORNER_COUNT: usize = 4;

/// A successfully decoded tag.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TagDetection {
    /// Decoded 16-bit tag id.
    pub id: u16,
    /// Rotation the marker presented to the camera.
    pub rotation: Rotation,
    /// Image corners reordered so index 0 is the marker's own top-left.
    pub corners: [Point2<f32>; CORNER_COUNT],
}

/// Decodes sampled quadrilaterals into [`TagDetection`]s.
#[derive(Clone, Debug, Default)]
pub struct TagDecoder {
    decoder: GridDecoder,
}

impl TagDecoder {
    pub fn new() -> Self {
        Self {
            decoder: GridDecoder::new(),
        }
    }

    /// Decode 64 cell samples taken inside the quadrilateral `corners`.
    ///
    /// On success the returned corners are cyclically shifted into marker
    /// order, so downstream geometry sees the same corner layout no matter
    /// how the marker appeared in the image.
    pub fn decode(
        &mut self,
        corners: &[Point2<f32>; CORNER_COUNT],
        samples: &[u8; SAMPLE_COUNT],
    ) -> Option<TagDetection> {
        let (id, rotation) = self.decoder.decode(samples)?;
        let shift = rotation.corner_shift();
        let corners = std::array::from_fn(|k| corners[(k + shift) % CORNER_COUNT]);
        Some(TagDetection {
            id,
            rotation,
            corners,
        })
    }
}
