use gridtag::{
    GridDecoder, Rotation, TagDecoder, TagEncoder, MAPPING_EAST, MAPPING_SOUTH, MAPPING_WEST,
    SAMPLE_COUNT,
};
use gridtag_codec::Bitfield;
use nalgebra::Point2;

const TEST_ID: u16 = 1234;

fn image_corners() -> [Point2<f32>; 4] {
    [
        Point2::new(10.0, 10.0),
        Point2::new(90.0, 12.0),
        Point2::new(88.0, 91.0),
        Point2::new(9.0, 89.0),
    ]
}

/// Samples a reader would take from the tag when the given mapping is the
/// one that lines up with its physical orientation.
fn samples_for(id: u16, mapping: &[u8; 64]) -> [u8; SAMPLE_COUNT] {
    let block = TagEncoder::new().payload_block(id);
    let mut bits = Bitfield::new(SAMPLE_COUNT).unwrap();
    bits.set_bytes(&block);
    let mut samples = [0u8; SAMPLE_COUNT];
    bits.get_bits(&mut samples, Some(mapping));
    samples
}

#[test]
fn upright_tag_decodes_north() {
    let samples = TagEncoder::new().bit_pattern(TEST_ID);
    let mut decoder = GridDecoder::new();
    assert_eq!(decoder.decode(&samples), Some((TEST_ID, Rotation::North)));
}

#[test]
fn rotated_tags_decode_with_their_rotation() {
    let mut decoder = GridDecoder::new();
    for (mapping, rotation) in [
        (&MAPPING_EAST, Rotation::East),
        (&MAPPING_SOUTH, Rotation::South),
        (&MAPPING_WEST, Rotation::West),
    ] {
        let samples = samples_for(TEST_ID, mapping);
        assert_eq!(
            decoder.decode(&samples),
            Some((TEST_ID, rotation)),
            "{rotation:?}"
        );
    }
}

#[test]
fn corners_are_reordered_into_marker_order() {
    let corners = image_corners();
    let mut decoder = TagDecoder::new();

    let north = decoder
        .decode(&corners, &samples_for(TEST_ID, &gridtag::MAPPING_NORTH))
        .expect("north decode");
    assert_eq!(north.corners, corners);

    let east = decoder
        .decode(&corners, &samples_for(TEST_ID, &MAPPING_EAST))
        .expect("east decode");
    assert_eq!(
        east.corners,
        [corners[1], corners[2], corners[3], corners[0]]
    );

    let south = decoder
        .decode(&corners, &samples_for(TEST_ID, &MAPPING_SOUTH))
        .expect("south decode");
    assert_eq!(
        south.corners,
        [corners[2], corners[3], corners[0], corners[1]]
    );

    let west = decoder
        .decode(&corners, &samples_for(TEST_ID, &MAPPING_WEST))
        .expect("west decode");
    assert_eq!(
        west.corners,
        [corners[3], corners[0], corners[1], corners[2]]
    );
}

#[test]
fn corner_zero_tracks_the_same_physical_corner() {
    // Whatever rotation the marker shows up in, corner 0 of the result must
    // name the marker's own top-left as it appears in the image.
    let corners = image_corners();
    let mut decoder = TagDecoder::new();

    let expected = [
        (&gridtag::MAPPING_NORTH, corners[0]),
        (&MAPPING_EAST, corners[1]),
        (&MAPPING_SOUTH, corners[2]),
        (&MAPPING_WEST, corners[3]),
    ];
    for (mapping, marker_top_left) in expected {
        let detection = decoder
            .decode(&corners, &samples_for(TEST_ID, mapping))
            .expect("decode");
        assert_eq!(detection.corners[0], marker_top_left);
    }
}

#[test]
fn single_flipped_cells_are_corrected() {
    let clean = TagEncoder::new().bit_pattern(TEST_ID);
    let mut decoder = GridDecoder::new();
    for cell in 0..SAMPLE_COUNT {
        let mut noisy = clean;
        noisy[cell] ^= 1;
        assert_eq!(
            decoder.decode(&noisy),
            Some((TEST_ID, Rotation::North)),
            "cell {cell}"
        );
    }
}

#[test]
fn two_byte_burst_is_corrected() {
    // Wipe the cells of two whole payload bytes; that is exactly the
    // correction capacity of the RS(8,4,4) code.
    let mut encoder = TagEncoder::new();
    let clean = encoder.bit_pattern(TEST_ID);
    let mut noisy = clean;
    for (i, &cell) in gridtag::MAPPING_NORTH.iter().enumerate() {
        // Logical bits 40..56 span payload bytes 5 and 6.
        if (40u8..56).contains(&cell) {
            noisy[i] ^= 1;
        }
    }
    assert_ne!(noisy, clean);
    let mut decoder = GridDecoder::new();
    assert_eq!(decoder.decode(&noisy), Some((TEST_ID, Rotation::North)));
}
