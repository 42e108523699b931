use chipexport::format::tiuna::TIUNA_HEADER_SIZE;
use chipexport::loops::{TiunaGrammar, stream_ticks};
use chipexport::{ChipType, ExportOptions, LoopPoint, RegisterWrite};
use pretty_assertions::assert_eq;

use crate::{ascii_at, export_titled};

fn tia(ts: u32, port: u32, value: u8) -> RegisterWrite {
    RegisterWrite::new(ts, ChipType::Tia, port, value)
}

#[test]
fn test_tiuna_loop_inside_a_hold() {
    let writes = [
        tia(0, 0x15, 0x04),
        tia(0, 0x19, 0x08),
        tia(735 * 2, 0x19, 0x00),
    ];
    let options = ExportOptions {
        loop_point: Some(LoopPoint::Sample(735)),
        ..ExportOptions::default()
    };
    let result = export_titled(&writes, "tiuna", "Pitfall", options);
    let bytes = &result.bytes;

    assert_eq!(&bytes[0x00..0x05], b"TIunA");
    assert_eq!(bytes[0x05], 1);
    assert_eq!(bytes[0x06], 60);
    assert_eq!(bytes[0x07], 0x01);
    assert_eq!(&bytes[0x08..0x0A], &[0x00, 0x03]);
    assert_eq!(&bytes[0x0A..0x0C], &[0x00, 0x07]);
    assert_eq!(&bytes[0x0C..0x0E], &[0x00, 0x0B]);
    assert_eq!(ascii_at(bytes, 0x0E, 32), "Pitfall");

    let data = &bytes[TIUNA_HEADER_SIZE..];
    #[rustfmt::skip]
    let expected = [
        0x3F, 0x04, 0x00, 0x00, 0x00, 0x08, 0x00, // frame 0, every register
        0x80,                                     // frame 1, hold
        0x10, 0x00,                               // frame 2, AUDV0
        0x00,
    ];
    assert_eq!(data, &expected);
    assert_eq!(stream_ticks(data, &TiunaGrammar), 3);
}

#[test]
fn test_tiuna_long_hold_and_ignored_registers() {
    let writes = [
        tia(0, 0x17, 0x1F),
        // collision register, not audio
        tia(0, 0x02, 0xFF),
        tia(735 * 200, 0x17, 0x1F),
    ];
    let result = export_titled(&writes, "tiuna", "Hold", ExportOptions::default());
    let data = &result.bytes[TIUNA_HEADER_SIZE..];
    // frame 0, then 200 unchanged frames as 128 + 72
    assert_eq!(
        data,
        &[0x3F, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00, 0xFF, 0xC7, 0x00]
    );
    assert_eq!(stream_ticks(data, &TiunaGrammar), 201);
}
