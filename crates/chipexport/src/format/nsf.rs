//! NSF (NES Sound Format) encoder.
//!
//! The file is a 0x80-byte header followed by a program image loaded at
//! `$8000`: the 6502 driver from [`crate::driver::mos6502`] and its
//! register stream. Header layout (little-endian):
//!
//! | offset | size | field                                           |
//! |--------|------|-------------------------------------------------|
//! | 0x00   | 5    | `"NESM\x1A"`                                    |
//! | 0x05   | 1    | version (1)                                     |
//! | 0x06   | 1    | total songs                                     |
//! | 0x07   | 1    | starting song (1-based)                         |
//! | 0x08   | 2    | load address                                    |
//! | 0x0A   | 2    | init address                                    |
//! | 0x0C   | 2    | play address                                    |
//! | 0x0E   | 32   | song name                                       |
//! | 0x2E   | 32   | artist                                          |
//! | 0x4E   | 32   | copyright                                       |
//! | 0x6E   | 2    | NTSC play period in microseconds                |
//! | 0x70   | 8    | bankswitch init (all zero: no bankswitching)    |
//! | 0x78   | 2    | PAL play period in microseconds                 |
//! | 0x7A   | 1    | PAL/NTSC flags (bit 0 = PAL)                    |
//! | 0x7B   | 1    | extra sound chips (bit 2 = FDS)                 |
//! | 0x7C   | 4    | song duration in source samples                 |
//!
//! The last four bytes are reserved in NSF v1; they carry the largest
//! timestamp of the trace so tools can recover the song length.
use crate::binutil::{Endian, write_ascii_field, write_slice, write_u8, write_u16, write_u32};
use crate::chip::{ChipType, mapper};
use crate::driver::mos6502;
use crate::format::{ExportFormat, FormatDescriptor, has_chip, loop_tick};
use crate::log::{RegisterWrite, max_timestamp};
use crate::loops::{DriverGrammar, resolve_loop};
use crate::options::EncodeOptions;
use crate::stream::encode_stream;

pub const CHIPS: &[ChipType] = &[ChipType::Nes, ChipType::Fds];

pub const DESCRIPTOR: FormatDescriptor = FormatDescriptor {
    format: ExportFormat::Nsf,
    name: "NSF (NES Sound Format)",
    extension: "nsf",
    mime_type: "audio/x-nsf",
    chips: CHIPS,
};

pub const NSF_HEADER_SIZE: usize = 0x80;
const NSF_VERSION: u8 = 1;
const NTSC_PERIOD_US: u16 = 16_639;
const PAL_PERIOD_US: u16 = 19_997;
const EXTRA_CHIP_FDS: u8 = 0x04;
/// Offset of the song-duration field.
pub const DURATION_OFFSET: usize = 0x7C;

/// `$4023 = $83`: enable FDS sound registers before the first FDS write.
const FDS_ENABLE: [u8; 2] = [0x23, 0x83];

/// Play period in microseconds for a frame rate.
fn play_period(frame_rate: u32) -> u16 {
    match frame_rate {
        60 => NTSC_PERIOD_US,
        50 => PAL_PERIOD_US,
        rate => u16::try_from(1_000_000 / rate.max(1)).unwrap_or(u16::MAX),
    }
}

pub fn can_export(writes: &[RegisterWrite]) -> bool {
    has_chip(writes, CHIPS)
}

pub fn encode(writes: &[RegisterWrite], options: &EncodeOptions) -> Vec<u8> {
    let driver = &mos6502::DRIVER;
    let spec = driver.stream_spec(options.frame_rate, mapper::nes);
    let loop_tick = loop_tick(options, &options.quantizer(spec.tick_rate));
    let stream = encode_stream(&spec, writes, options.source_sample_rate, loop_tick);

    let uses_fds = writes
        .iter()
        .any(|w| w.chip == ChipType::Fds && mapper::nes(w).is_some());
    let prefix: &[u8] = if uses_fds { &FDS_ENABLE } else { &[] };

    let mut data = prefix.to_vec();
    data.extend_from_slice(&stream.bytes);
    let loop_offset = loop_tick
        .and_then(|tick| resolve_loop(&stream.bytes, &DriverGrammar, tick))
        .map(|resolved| prefix.len() + resolved.offset);
    let linked = driver.link(&data, loop_offset, None);

    let meta = &options.metadata;
    let period = play_period(options.frame_rate);
    let mut out = vec![0u8; NSF_HEADER_SIZE];
    write_slice(&mut out, 0x00, b"NESM\x1A");
    write_u8(&mut out, 0x05, NSF_VERSION);
    write_u8(&mut out, 0x06, 1);
    write_u8(&mut out, 0x07, 1);
    write_u16(&mut out, 0x08, driver.load_address, Endian::Little);
    write_u16(&mut out, 0x0A, driver.init_address(), Endian::Little);
    write_u16(&mut out, 0x0C, driver.play_address(), Endian::Little);
    write_ascii_field(&mut out, 0x0E, 32, &meta.title);
    write_ascii_field(&mut out, 0x2E, 32, &meta.author);
    write_ascii_field(&mut out, 0x4E, 32, &meta.copyright);
    write_u16(&mut out, 0x6E, period, Endian::Little);
    write_u16(&mut out, 0x78, period, Endian::Little);
    write_u8(&mut out, 0x7A, u8::from(options.frame_rate == 50));
    write_u8(&mut out, 0x7B, if uses_fds { EXTRA_CHIP_FDS } else { 0 });
    write_u32(
        &mut out,
        DURATION_OFFSET,
        max_timestamp(writes),
        Endian::Little,
    );
    out.extend_from_slice(&linked.image);

    tracing::debug!(
        frames = stream.total_ticks,
        writes = stream.writes,
        skipped = stream.skipped,
        fds = uses_fds,
        bytes = out.len(),
        "encoded NSF"
    );
    out
}
