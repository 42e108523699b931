use chipexport::{ChipType, ExportOptions, RegisterWrite};
use pretty_assertions::assert_eq;

use crate::export_titled;

/// Split a SAP file into its header text and binary frame data. The TIME
/// tag is always the last header line.
fn split(bytes: &[u8]) -> (String, &[u8]) {
    let time = bytes.windows(5).position(|w| w == b"TIME ").unwrap();
    let at = time
        + bytes[time..]
            .windows(2)
            .position(|pair| pair == b"\r\n")
            .unwrap()
        + 2;
    (String::from_utf8(bytes[..at].to_vec()).unwrap(), &bytes[at..])
}

fn pokey(ts: u32, port: u32, value: u8) -> RegisterWrite {
    RegisterWrite::new(ts, ChipType::Pokey, port, value)
}

#[test]
fn test_sap_mono_pal() {
    let writes = [
        pokey(0, 0x00, 0x50),
        pokey(0, 0x01, 0xAF),
        pokey(0, 0x0F, 0x03), // SKCTL, not part of a frame
        pokey(1764, 0x01, 0xA0),
    ];
    let options = ExportOptions {
        author: Some("Someone".to_string()),
        date: Some("2026".to_string()),
        ..ExportOptions::default()
    };
    let result = export_titled(&writes, "sap", "Atari \"Demo\"", options);
    let (header, frames) = split(&result.bytes);

    assert_eq!(
        header,
        "SAP\r\n\
         AUTHOR \"Someone\"\r\n\
         NAME \"Atari ?Demo?\"\r\n\
         DATE \"2026\"\r\n\
         TYPE R\r\n\
         TIME 00:00.060\r\n"
    );
    #[rustfmt::skip]
    let expected: [u8; 27] = [
        0x50, 0xAF, 0, 0, 0, 0, 0, 0, 0,
        0x50, 0xAF, 0, 0, 0, 0, 0, 0, 0,
        0x50, 0xA0, 0, 0, 0, 0, 0, 0, 0,
    ];
    assert_eq!(frames, &expected);
}

#[test]
fn test_sap_stereo_ntsc() {
    let writes = [pokey(0, 0x08, 0x01), pokey(735, 0x18, 0x40)];
    let options = ExportOptions {
        frame_rate: Some(60),
        ..ExportOptions::default()
    };
    let result = export_titled(&writes, "sap", "Stereo", options);
    let (header, frames) = split(&result.bytes);

    assert!(header.contains("\r\nNTSC\r\nSTEREO\r\n"));
    assert!(header.contains("AUTHOR \"<?>\""));
    assert_eq!(frames.len(), 2 * 18);
    assert_eq!(frames[8], 0x01);
    assert_eq!(frames[17], 0x00);
    assert_eq!(frames[18 + 8], 0x01);
    assert_eq!(frames[18 + 17], 0x40);
}

#[test]
fn test_sap_fastplay_for_other_rates() {
    let writes = [pokey(0, 0x00, 0x10)];
    let options = ExportOptions {
        frame_rate: Some(100),
        ..ExportOptions::default()
    };
    let result = export_titled(&writes, "sap", "Fast", options);
    let (header, _) = split(&result.bytes);
    assert!(header.contains("\r\nFASTPLAY 156\r\n"));
}

#[test]
fn test_sap_last_write_in_a_frame_wins() {
    // 882 samples per PAL frame at 44.1 kHz
    let writes = [
        pokey(0, 0x00, 0x10),
        pokey(100, 0x00, 0x20),
        pokey(881, 0x02, 0x30),
        pokey(900, 0x00, 0x40),
    ];
    let result = export_titled(&writes, "sap", "Coalesce", ExportOptions::default());
    let (_, frames) = split(&result.bytes);
    #[rustfmt::skip]
    let expected: [u8; 18] = [
        0x20, 0, 0x30, 0, 0, 0, 0, 0, 0,
        0x40, 0, 0x30, 0, 0, 0, 0, 0, 0,
    ];
    assert_eq!(frames, &expected);
}
