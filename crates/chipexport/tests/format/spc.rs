use chipexport::driver::{PatchMeaning, Routine, spc700};
use chipexport::format::spc::{DSP_OFFSET, RAM_OFFSET, SPC_FILE_SIZE};
use chipexport::{ChipType, ExportOptions, RegisterWrite};
use pretty_assertions::assert_eq;

use crate::{ascii_at, export_titled, u16_le};

fn writes() -> Vec<RegisterWrite> {
    vec![
        RegisterWrite::new(0, ChipType::Snes, 0x4C, 0x01),
        RegisterWrite::new(735, ChipType::Snes, 0x5C, 0x00),
    ]
}

/// File offset of the driver patch site with `meaning`.
fn patch_offset(meaning: PatchMeaning) -> usize {
    let driver = &spc700::DRIVER;
    let site = driver
        .patch_sites
        .iter()
        .find(|site| site.meaning == meaning)
        .unwrap();
    let base = match site.routine {
        Routine::Init => 0,
        Routine::Play => driver.init.len(),
    };
    RAM_OFFSET + driver.load_address as usize + base + site.offset
}

#[test]
fn test_spc_snapshot() {
    let options = ExportOptions {
        game: Some("Demo Game".to_string()),
        author: Some("Someone".to_string()),
        ..ExportOptions::default()
    };
    let result = export_titled(&writes(), "spc", "Title Screen", options);
    let bytes = &result.bytes;
    let driver = &spc700::DRIVER;

    assert_eq!(bytes.len(), SPC_FILE_SIZE);
    assert_eq!(&bytes[..33], b"SNES-SPC700 Sound File Data v0.30");
    assert_eq!(&bytes[0x21..0x25], &[0x1A, 0x1A, 0x1A, 30]);
    assert_eq!(u16_le(bytes, 0x25), 0x0200);
    assert_eq!(bytes[0x2B], 0xEF);

    assert_eq!(ascii_at(bytes, 0x2E, 32), "Title Screen");
    assert_eq!(ascii_at(bytes, 0x4E, 32), "Demo Game");
    assert_eq!(ascii_at(bytes, 0x6E, 16), "chipexport");
    assert_eq!(ascii_at(bytes, 0xA9, 3), "1");
    assert_eq!(ascii_at(bytes, 0xAC, 5), "10000");
    assert_eq!(ascii_at(bytes, 0xB1, 32), "Someone");

    let data = RAM_OFFSET + driver.data_start() as usize;
    assert_eq!(&bytes[data..data + 6], &[0x4C, 0x01, 0xFF, 0x5C, 0x00, 0xFE]);
    assert!(bytes[data + 6..DSP_OFFSET].iter().all(|&b| b == 0));

    assert_eq!(u16_le(bytes, patch_offset(PatchMeaning::DataStart)), 0x0245);
    assert_eq!(u16_le(bytes, patch_offset(PatchMeaning::LoopStart)), 0x0245);
    assert_eq!(bytes[patch_offset(PatchMeaning::TimerTarget)], 0x85);
    assert_eq!(bytes[DSP_OFFSET + 0x6C], 0x20);
}

#[test]
fn test_spc_pal_timer() {
    let options = ExportOptions {
        frame_rate: Some(50),
        ..ExportOptions::default()
    };
    let result = export_titled(&writes(), "spc", "PAL", options);
    assert_eq!(result.bytes[patch_offset(PatchMeaning::TimerTarget)], 0xA0);
}
