use chipexport::format::gym::GYMX_HEADER_SIZE;
use chipexport::{ChipType, ExportOptions, LoopPoint, RegisterWrite};
use pretty_assertions::assert_eq;

use crate::{ascii_at, export_titled, u32_le};

fn writes() -> Vec<RegisterWrite> {
    vec![
        RegisterWrite::new(0, ChipType::Opn2, 0x028, 0xF0),
        RegisterWrite::new(0, ChipType::Opn2, 0x1B4, 0xC0),
        RegisterWrite::new(735, ChipType::Psg, 0, 0x9F),
        // 2 frames later, not a GYM chip
        RegisterWrite::new(2205, ChipType::Opm, 0x08, 0x00),
    ]
}

const STREAM: [u8; 11] = [
    0x01, 0x28, 0xF0, // YM2612 port 0
    0x02, 0xB4, 0xC0, // YM2612 port 1
    0x00, // frame
    0x03, 0x9F, // PSG
    0x00, 0x00, // two frames to the end of the trace
];

#[test]
fn test_gymx_header_and_stream() {
    let options = ExportOptions {
        game: Some("Sonic Test".to_string()),
        copyright: Some("SEGA".to_string()),
        ..ExportOptions::default()
    };
    let result = export_titled(&writes(), "gym", "Green Hill", options);
    let bytes = &result.bytes;
    assert_eq!(&bytes[..4], b"GYMX");
    assert_eq!(ascii_at(bytes, 0x004, 32), "Green Hill");
    assert_eq!(ascii_at(bytes, 0x024, 32), "Sonic Test");
    assert_eq!(ascii_at(bytes, 0x044, 32), "SEGA");
    assert_eq!(ascii_at(bytes, 0x064, 32), "chipexport");
    assert_eq!(u32_le(bytes, 0x1A4), 0);
    assert_eq!(u32_le(bytes, 0x1A8), 0);
    assert_eq!(&bytes[GYMX_HEADER_SIZE..], &STREAM);
}

#[test]
fn test_raw_gym_without_header() {
    let options = ExportOptions {
        gym_header: Some(false),
        // loops are a GYMX feature; a raw stream ignores them
        loop_point: Some(LoopPoint::Sample(735)),
        ..ExportOptions::default()
    };
    let result = export_titled(&writes(), "gym", "Raw", options);
    assert_eq!(result.bytes, STREAM.to_vec());
}

#[test]
fn test_gymx_loop_frame_is_one_based() {
    let options = ExportOptions {
        loop_point: Some(LoopPoint::Sample(735)),
        ..ExportOptions::default()
    };
    let result = export_titled(&writes(), "gym", "Loop", options);
    assert_eq!(u32_le(&result.bytes, 0x1A4), 2);
}
