use chipexport::driver::mos6502;
use chipexport::format::nsf::NSF_HEADER_SIZE;
use chipexport::{ChipType, ExportOptions, LoopPoint, RegisterWrite};
use pretty_assertions::assert_eq;

use crate::{ascii_at, export_titled, u16_le, u32_le};

/// File offsets of the driver's data and loop words.
const DATA_WORD: usize = NSF_HEADER_SIZE + 0x15 + 0x2A;
const LOOP_WORD: usize = DATA_WORD + 2;

#[test]
fn test_nsf_header() {
    let writes = [
        RegisterWrite::new(0, ChipType::Nes, 0x4015, 0x0F),
        RegisterWrite::new(735, ChipType::Nes, 0x4000, 0xBF),
    ];
    let options = ExportOptions {
        author: Some("Someone".to_string()),
        copyright: Some("2026".to_string()),
        ..ExportOptions::default()
    };
    let result = export_titled(&writes, "nsf", "Overworld", options);
    let bytes = &result.bytes;

    assert_eq!(&bytes[0x00..0x05], b"NESM\x1A");
    assert_eq!(bytes[0x05], 1);
    assert_eq!(bytes[0x06], 1);
    assert_eq!(bytes[0x07], 1);
    assert_eq!(u16_le(bytes, 0x08), 0x8000);
    assert_eq!(u16_le(bytes, 0x0A), 0x8000);
    assert_eq!(u16_le(bytes, 0x0C), 0x8015);
    assert_eq!(ascii_at(bytes, 0x0E, 32), "Overworld");
    assert_eq!(ascii_at(bytes, 0x2E, 32), "Someone");
    assert_eq!(ascii_at(bytes, 0x4E, 32), "2026");
    assert_eq!(u16_le(bytes, 0x6E), 16_639);
    assert_eq!(bytes[0x7A], 0);
    assert_eq!(bytes[0x7B], 0);
    assert_eq!(u32_le(bytes, 0x7C), 735);

    assert_eq!(
        &bytes[NSF_HEADER_SIZE..NSF_HEADER_SIZE + 0x15],
        &mos6502::INIT[..]
    );
    assert_eq!(u16_le(bytes, DATA_WORD), 0x8043);
    assert_eq!(u16_le(bytes, LOOP_WORD), 0x8043);
    assert_eq!(
        &bytes[NSF_HEADER_SIZE + 0x43..],
        &[0x15, 0x0F, 0xFF, 0x00, 0xBF, 0xFE]
    );
}

#[test]
fn test_nsf_fds_enables_expansion_first() {
    let writes = [
        RegisterWrite::new(0, ChipType::Fds, 0x4080, 0x80),
        RegisterWrite::new(735, ChipType::Nes, 0x4015, 0x0F),
    ];
    let options = ExportOptions {
        loop_point: Some(LoopPoint::Sample(0)),
        ..ExportOptions::default()
    };
    let result = export_titled(&writes, "nsf", "Disk", options);
    let bytes = &result.bytes;

    assert_eq!(bytes[0x7B], 0x04);
    assert_eq!(
        &bytes[NSF_HEADER_SIZE + 0x43..],
        &[0x23, 0x83, 0x80, 0x80, 0xFF, 0x15, 0x0F, 0xFE]
    );
    // the loop skips the one-time enable
    assert_eq!(u16_le(bytes, LOOP_WORD), 0x8045);
}

#[test]
fn test_nsf_pal_rate() {
    let writes = [
        RegisterWrite::new(0, ChipType::Nes, 0x4015, 0x0F),
        RegisterWrite::new(882, ChipType::Nes, 0x4015, 0x00),
    ];
    let options = ExportOptions {
        frame_rate: Some(50),
        ..ExportOptions::default()
    };
    let result = export_titled(&writes, "nsf", "PAL", options);
    let bytes = &result.bytes;
    assert_eq!(bytes[0x7A], 1);
    assert_eq!(u16_le(bytes, 0x78), 19_997);
    assert_eq!(
        &bytes[NSF_HEADER_SIZE + 0x43..],
        &[0x15, 0x0F, 0xFF, 0x15, 0x00, 0xFE]
    );
}
