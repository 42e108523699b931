use chipexport::{ChipType, ExportOptions, RegisterWrite};
use pretty_assertions::assert_eq;

use crate::{export_titled, u16_le, u32_le};

/// Decode the eleven GD3 strings.
fn gd3_strings(gd3: &[u8]) -> Vec<String> {
    assert_eq!(&gd3[..4], b"Gd3 ");
    assert_eq!(u32_le(gd3, 4), 0x100);
    let len = u32_le(gd3, 8) as usize;
    let units: Vec<u16> = gd3[12..12 + len]
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    let mut strings: Vec<String> = units
        .split(|&unit| unit == 0)
        .map(String::from_utf16_lossy)
        .collect();
    // trailing terminator leaves one empty piece
    assert_eq!(strings.pop().as_deref(), Some(""));
    strings
}

#[test]
fn test_vgm_opn2_and_psg() {
    let writes = [
        RegisterWrite::new(0, ChipType::Psg, 0, 0x9F),
        RegisterWrite::new(735, ChipType::Opn2, 0x028, 0xF0),
        RegisterWrite::new(1470, ChipType::Opn2, 0x1B4, 0xC0),
    ];
    let options = ExportOptions {
        author: Some("Composer".to_string()),
        copyright: Some("(c) 2026".to_string()),
        comment: Some("hello".to_string()),
        ..ExportOptions::default()
    };
    let result = export_titled(&writes, "vgm", "Chip Test", options);
    let bytes = &result.bytes;

    assert_eq!(&bytes[0x00..0x04], b"Vgm ");
    assert_eq!(u32_le(bytes, 0x04) as usize, bytes.len() - 0x04);
    assert_eq!(u32_le(bytes, 0x08), 0x172);
    assert_eq!(u32_le(bytes, 0x0C), 3_579_545);
    assert_eq!(u32_le(bytes, 0x18), 1470);
    assert_eq!(u32_le(bytes, 0x1C), 0);
    assert_eq!(u16_le(bytes, 0x28), 0x0009);
    assert_eq!(bytes[0x2A], 16);
    assert_eq!(u32_le(bytes, 0x2C), 7_670_453);
    assert_eq!(u32_le(bytes, 0x34), 0xCC);

    #[rustfmt::skip]
    let stream = [
        0x50, 0x9F,
        0x62,
        0x52, 0x28, 0xF0,
        0x62,
        0x53, 0xB4, 0xC0,
        0x66,
    ];
    assert_eq!(&bytes[0x100..0x100 + stream.len()], &stream);

    let gd3_pos = 0x14 + u32_le(bytes, 0x14) as usize;
    assert_eq!(gd3_pos, 0x100 + stream.len());
    let strings = gd3_strings(&bytes[gd3_pos..]);
    assert_eq!(
        strings,
        vec![
            "Chip Test",
            "",
            "",
            "",
            "YM2612 (OPN2) + SN76489 (PSG)",
            "",
            "Composer",
            "",
            "",
            "chipexport",
            "(c) 2026\nhello",
        ]
    );
}

#[test]
fn test_vgm_fds_flags_the_nes_clock() {
    let writes = [
        RegisterWrite::new(0, ChipType::Nes, 0x4015, 0x0F),
        RegisterWrite::new(0, ChipType::Fds, 0x4080, 0x80),
        RegisterWrite::new(0, ChipType::Fds, 0x4040, 0x3F),
    ];
    let result = export_titled(&writes, "vgm", "FDS", ExportOptions::default());
    let bytes = &result.bytes;
    assert_eq!(u32_le(bytes, 0x84), 1_789_773 | 0x8000_0000);
    assert_eq!(
        &bytes[0x100..0x10A],
        &[0xB4, 0x15, 0x0F, 0xB4, 0x20, 0x80, 0xB4, 0x40, 0x3F, 0x66]
    );
    assert_eq!(u32_le(bytes, 0x18), 0);
}

#[test]
fn test_vgm_t6w28_declares_a_dual_psg() {
    let writes = [
        RegisterWrite::new(0, ChipType::T6w28, 0, 0x9F),
        RegisterWrite::new(0, ChipType::T6w28, 1, 0xBF),
    ];
    let result = export_titled(&writes, "vgm", "T6W28", ExportOptions::default());
    let bytes = &result.bytes;
    // bit 31 marks the T6W28 only together with the dual-chip bit 30
    assert_eq!(u32_le(bytes, 0x0C), 3_072_000 | 0xC000_0000);
    assert_eq!(u16_le(bytes, 0x28), 0x0003);
    assert_eq!(bytes[0x2A], 15);
    // right channel goes to the second chip
    assert_eq!(&bytes[0x100..0x105], &[0x50, 0x9F, 0x30, 0xBF, 0x66]);
}

#[test]
fn test_vgm_psg_and_t6w28_keep_the_first_clock() {
    let writes = [
        RegisterWrite::new(0, ChipType::Psg, 0, 0x9F),
        RegisterWrite::new(0, ChipType::T6w28, 0, 0x9F),
    ];
    let result = export_titled(&writes, "vgm", "Shared", ExportOptions::default());
    let clock = u32_le(&result.bytes, 0x0C);
    assert_eq!(clock & 0x3FFF_FFFF, 3_579_545);
}

#[test]
fn test_vgm_skips_unmappable_writes() {
    let writes = [
        RegisterWrite::new(0, ChipType::Gb, 0xFF26, 0x80),
        // outside the APU register window
        RegisterWrite::new(0, ChipType::Gb, 0xFF80, 0x12),
        RegisterWrite::new(10, ChipType::Unknown(250), 0, 0),
    ];
    let result = export_titled(&writes, "vgm", "GB", ExportOptions::default());
    let bytes = &result.bytes;
    assert_eq!(u32_le(bytes, 0x80), 4_194_304);
    // B3 16 80 | wait 10 | end
    assert_eq!(&bytes[0x100..0x105], &[0xB3, 0x16, 0x80, 0x79, 0x66]);
    assert_eq!(u32_le(bytes, 0x18), 10);
}
