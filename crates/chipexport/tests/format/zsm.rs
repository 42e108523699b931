use chipexport::format::zsm::ZSM_HEADER_SIZE;
use chipexport::{ChipType, ExportOptions, LoopPoint, RegisterWrite};
use pretty_assertions::assert_eq;

use crate::{export_titled, u16_le};

fn writes() -> Vec<RegisterWrite> {
    vec![
        RegisterWrite::new(0, ChipType::Opm, 0x28, 0x4A),
        RegisterWrite::new(0, ChipType::Opm, 0x08, 0x7B),
        RegisterWrite::new(735, ChipType::Vera, 0x06, 0x3F),
        RegisterWrite::new(735 * 200, ChipType::Opm, 0x08, 0x03),
    ]
}

#[test]
fn test_zsm_header_and_stream() {
    let result = export_titled(&writes(), "zsm", "X16", ExportOptions::default());
    let bytes = &result.bytes;

    assert_eq!(&bytes[0x00..0x02], b"zm");
    assert_eq!(bytes[0x02], 1);
    assert_eq!(&bytes[0x03..0x06], &[0, 0, 0]);
    assert_eq!(&bytes[0x06..0x09], &[0, 0, 0]);
    // channel 0 (0x28) and channel 3 (key-on 0x7B)
    assert_eq!(bytes[0x09], 0b0000_1001);
    // PSG register 6 belongs to voice 1
    assert_eq!(u16_le(bytes, 0x0A), 0b10);
    assert_eq!(u16_le(bytes, 0x0C), 60);

    #[rustfmt::skip]
    let stream = [
        0x41, 0x28, 0x4A,
        0x41, 0x08, 0x7B,
        0x81,
        0x06, 0x3F,
        0xFF, 0xC8,        // 199 ticks as 127 + 72
        0x41, 0x08, 0x03,
        0x80,
    ];
    assert_eq!(&bytes[ZSM_HEADER_SIZE..], &stream);
}

#[test]
fn test_zsm_loop_offset_is_a_file_offset() {
    let options = ExportOptions {
        loop_point: Some(LoopPoint::Sample(735)),
        ..ExportOptions::default()
    };
    let result = export_titled(&writes(), "zsm", "X16 loop", options);
    let loop_point = u32::from_le_bytes([result.bytes[3], result.bytes[4], result.bytes[5], 0]);
    assert_eq!(loop_point as usize, ZSM_HEADER_SIZE + 7);
}
