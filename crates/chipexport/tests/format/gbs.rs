use chipexport::driver::sm83;
use chipexport::format::gbs::GBS_HEADER_SIZE;
use chipexport::{ChipType, ExportOptions, RegisterWrite};
use pretty_assertions::assert_eq;

use crate::{ascii_at, export_titled, u16_le};

fn writes() -> Vec<RegisterWrite> {
    vec![
        RegisterWrite::new(0, ChipType::Gb, 0xFF26, 0x80),
        RegisterWrite::new(0, ChipType::Gb, 0x12, 0xF0),
        RegisterWrite::new(735, ChipType::Gb, 0xFF14, 0x87),
    ]
}

#[test]
fn test_gbs_header_and_image() {
    let options = ExportOptions {
        author: Some("Someone".to_string()),
        ..ExportOptions::default()
    };
    let result = export_titled(&writes(), "gbs", "Route 1", options);
    let bytes = &result.bytes;
    let driver = &sm83::DRIVER;

    assert_eq!(&bytes[0x00..0x03], b"GBS");
    assert_eq!(bytes[0x03], 1);
    assert_eq!(bytes[0x04], 1);
    assert_eq!(bytes[0x05], 1);
    assert_eq!(u16_le(bytes, 0x06), 0x0400);
    assert_eq!(u16_le(bytes, 0x08), 0x0400);
    assert_eq!(u16_le(bytes, 0x0A), 0x0419);
    assert_eq!(u16_le(bytes, 0x0C), 0xFFFE);
    // 60 Hz plays from VBlank
    assert_eq!((bytes[0x0E], bytes[0x0F]), (0, 0));
    assert_eq!(ascii_at(bytes, 0x10, 32), "Route 1");
    assert_eq!(ascii_at(bytes, 0x30, 32), "Someone");

    assert_eq!(bytes.len(), GBS_HEADER_SIZE + driver.code_len() + 8);
    assert_eq!(
        &bytes[GBS_HEADER_SIZE + driver.code_len()..],
        &[0x26, 0x80, 0x12, 0xF0, 0xFF, 0x14, 0x87, 0xFE]
    );
}

#[test]
fn test_gbs_timer_rate() {
    let options = ExportOptions {
        frame_rate: Some(64),
        ..ExportOptions::default()
    };
    let result = export_titled(&writes(), "gbs", "Timer", options);
    assert_eq!((result.bytes[0x0E], result.bytes[0x0F]), (192, 0x04));
}
