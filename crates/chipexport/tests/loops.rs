use chipexport::driver::{EmbeddedDriver, PatchMeaning, Routine, mos6502, sm83};
use chipexport::format::gym::GYMX_HEADER_SIZE;
use chipexport::format::tiuna::TIUNA_HEADER_SIZE;
use chipexport::format::zsm::ZSM_HEADER_SIZE;
use chipexport::loops::{DriverGrammar, VgmGrammar, resolve_loop};
use chipexport::{ChipType, ExportOptions, LoopPoint, RegisterWrite, encode_log, export};
use pretty_assertions::assert_eq;

const VGM_LOOP_OFFSET: usize = 0x1C;
const VGM_LOOP_SAMPLES: usize = 0x20;
const GYMX_LOOP_START: usize = 0x1A4;

fn u16_le(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn u32_le(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
}

fn export_with_loop(writes: &[RegisterWrite], format: &str, loop_sample: u64) -> Vec<u8> {
    let options = ExportOptions {
        loop_point: Some(LoopPoint::Sample(loop_sample)),
        ..ExportOptions::default()
    };
    export(&encode_log(writes), format, &options).unwrap().bytes
}

/// Loop address the driver image was linked with.
fn driver_loop_word(driver: &EmbeddedDriver, file: &[u8], header: usize) -> u16 {
    let site = driver
        .patch_sites
        .iter()
        .find(|site| site.meaning == PatchMeaning::LoopStart)
        .unwrap();
    let base = match site.routine {
        Routine::Init => header,
        Routine::Play => header + driver.init.len(),
    };
    u16_le(file, base + site.offset)
}

fn psg_trace() -> Vec<RegisterWrite> {
    vec![
        RegisterWrite::new(0, ChipType::Psg, 0, 0x9F),
        RegisterWrite::new(735, ChipType::Psg, 0, 0xBF),
        RegisterWrite::new(1470, ChipType::Psg, 0, 0xDF),
    ]
}

#[test]
fn test_vgm_loop_on_a_write() {
    let bytes = export_with_loop(&psg_trace(), "vgm", 735);
    // 50 9F | 62 | 50 BF | 62 | 50 DF | 66
    assert_eq!(
        &bytes[0x100..0x10A],
        &[0x50, 0x9F, 0x62, 0x50, 0xBF, 0x62, 0x50, 0xDF, 0x66, b'G']
    );
    assert_eq!(u32_le(&bytes, VGM_LOOP_OFFSET) as usize, 0x103 - VGM_LOOP_OFFSET);
    assert_eq!(u32_le(&bytes, VGM_LOOP_SAMPLES), 735);
}

#[test]
fn test_vgm_loop_between_writes_splits_the_wait() {
    let writes = [
        RegisterWrite::new(0, ChipType::Psg, 0, 0x9F),
        RegisterWrite::new(2000, ChipType::Psg, 0, 0xBF),
    ];
    let bytes = export_with_loop(&writes, "vgm", 1000);
    assert_eq!(
        &bytes[0x100..0x10B],
        &[0x50, 0x9F, 0x61, 0xE8, 0x03, 0x61, 0xE8, 0x03, 0x50, 0xBF, 0x66]
    );
    assert_eq!(u32_le(&bytes, VGM_LOOP_OFFSET) as usize, 0x105 - VGM_LOOP_OFFSET);
    assert_eq!(u32_le(&bytes, VGM_LOOP_SAMPLES), 1000);

    let resolved = resolve_loop(&bytes[0x100..], &VgmGrammar, 1000).unwrap();
    assert_eq!(resolved.offset, 5);
}

#[test]
fn test_loop_zero_is_stream_start() {
    let bytes = export_with_loop(&psg_trace(), "vgm", 0);
    assert_eq!(u32_le(&bytes, VGM_LOOP_OFFSET) as usize, 0x100 - VGM_LOOP_OFFSET);
    assert_eq!(u32_le(&bytes, VGM_LOOP_SAMPLES), 1470);

    let bytes = export_with_loop(&psg_trace(), "gym", 0);
    assert_eq!(u32_le(&bytes, GYMX_LOOP_START), 1);

    let opm = [
        RegisterWrite::new(0, ChipType::Opm, 0x08, 0x78),
        RegisterWrite::new(1470, ChipType::Opm, 0x08, 0x00),
    ];
    let bytes = export_with_loop(&opm, "zsm", 0);
    assert_eq!(&bytes[0x03..0x06], &[ZSM_HEADER_SIZE as u8, 0, 0]);

    let tia = [
        RegisterWrite::new(0, ChipType::Tia, 0x19, 0x08),
        RegisterWrite::new(1470, ChipType::Tia, 0x19, 0x00),
    ];
    let bytes = export_with_loop(&tia, "tiuna", 0);
    assert_eq!(bytes[0x07], 0x01);
    assert_eq!(&bytes[0x0A..0x0C], &[0x00, 0x00]);

    let nes = [
        RegisterWrite::new(0, ChipType::Nes, 0x4015, 0x0F),
        RegisterWrite::new(1470, ChipType::Nes, 0x4015, 0x00),
    ];
    let bytes = export_with_loop(&nes, "nsf", 0);
    let driver = &mos6502::DRIVER;
    assert_eq!(driver_loop_word(driver, &bytes, 0x80), driver.data_start());
}

#[test]
fn test_loop_past_the_end_writes_no_loop() {
    let beyond = 1_000_000;

    let bytes = export_with_loop(&psg_trace(), "vgm", beyond);
    assert_eq!(u32_le(&bytes, VGM_LOOP_OFFSET), 0);
    assert_eq!(u32_le(&bytes, VGM_LOOP_SAMPLES), 0);

    // the very end is past the end as well
    let bytes = export_with_loop(&psg_trace(), "vgm", 1470);
    assert_eq!(u32_le(&bytes, VGM_LOOP_OFFSET), 0);

    let bytes = export_with_loop(&psg_trace(), "gym", beyond);
    assert_eq!(u32_le(&bytes, GYMX_LOOP_START), 0);
    assert_eq!(bytes.len(), GYMX_HEADER_SIZE + 8);

    let opm = [RegisterWrite::new(0, ChipType::Opm, 0x08, 0x78)];
    let bytes = export_with_loop(&opm, "zsm", beyond);
    assert_eq!(&bytes[0x03..0x06], &[0, 0, 0]);

    let tia = [
        RegisterWrite::new(0, ChipType::Tia, 0x19, 0x08),
        RegisterWrite::new(1470, ChipType::Tia, 0x19, 0x00),
    ];
    let bytes = export_with_loop(&tia, "tiuna", beyond);
    assert_eq!(bytes[0x07], 0x00);
    assert_eq!(&bytes[0x0A..0x0C], &[0xFF, 0xFF]);
    assert!(bytes.len() > TIUNA_HEADER_SIZE);

    let pokey = [
        RegisterWrite::new(0, ChipType::Pokey, 0x01, 0xAF),
        RegisterWrite::new(1764, ChipType::Pokey, 0x01, 0xA0),
    ];
    let text = String::from_utf8_lossy(&export_with_loop(&pokey, "sap", beyond)).into_owned();
    assert!(text.contains("TIME 00:00.060\r\n"));
    let text = String::from_utf8_lossy(&export_with_loop(&pokey, "sap", 0)).into_owned();
    assert!(text.contains("TIME 00:00.060 LOOP\r\n"));
}

#[test]
fn test_driver_loop_inside_the_song() {
    let gb = [
        RegisterWrite::new(0, ChipType::Gb, 0xFF26, 0x80),
        RegisterWrite::new(735, ChipType::Gb, 0xFF12, 0xF0),
        RegisterWrite::new(1470, ChipType::Gb, 0xFF12, 0x00),
    ];
    let bytes = export_with_loop(&gb, "gbs", 735);
    let driver = &sm83::DRIVER;
    let data = &bytes[0x70 + driver.code_len()..];
    // 26 80 | FF | 12 F0 | FF | 12 00 | FE
    assert_eq!(data, &[0x26, 0x80, 0xFF, 0x12, 0xF0, 0xFF, 0x12, 0x00, 0xFE]);
    assert_eq!(driver_loop_word(driver, &bytes, 0x70), driver.data_start() + 3);
    assert_eq!(resolve_loop(data, &DriverGrammar, 1).unwrap().offset, 3);

    // past the end falls back to the data start
    let bytes = export_with_loop(&gb, "gbs", 44_100);
    assert_eq!(driver_loop_word(driver, &bytes, 0x70), driver.data_start());
}

#[test]
fn test_row_loop_point_resolves_to_samples() {
    let options = ExportOptions {
        loop_point: Some(LoopPoint::Row {
            row: 3,
            samples_per_row: 245,
        }),
        ..ExportOptions::default()
    };
    let bytes = export(&encode_log(&psg_trace()), "vgm", &options)
        .unwrap()
        .bytes;
    assert_eq!(u32_le(&bytes, VGM_LOOP_OFFSET) as usize, 0x103 - VGM_LOOP_OFFSET);
    assert_eq!(u32_le(&bytes, VGM_LOOP_SAMPLES), 735);
}
