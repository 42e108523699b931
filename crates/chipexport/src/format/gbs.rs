//! GBS (Game Boy Sound System) encoder.
//!
//! A 0x70-byte header followed by the SM83 driver image loaded at `$0400`.
//! At 60 Hz PLAY runs from the VBlank interrupt; any other frame rate uses
//! the timer interrupt at `4096 / (256 - TMA)` Hz.
//!
//! | offset | size | field                               |
//! |--------|------|-------------------------------------|
//! | 0x00   | 3    | `"GBS"`                             |
//! | 0x03   | 1    | version (1)                         |
//! | 0x04   | 1    | number of songs                     |
//! | 0x05   | 1    | first song (1-based)                |
//! | 0x06   | 2    | load address                        |
//! | 0x08   | 2    | init address                        |
//! | 0x0A   | 2    | play address                        |
//! | 0x0C   | 2    | stack pointer                       |
//! | 0x0E   | 1    | timer modulo (TMA)                  |
//! | 0x0F   | 1    | timer control (TAC)                 |
//! | 0x10   | 32   | title                               |
//! | 0x30   | 32   | author                              |
//! | 0x50   | 32   | copyright                           |
use crate::binutil::{Endian, write_ascii_field, write_slice, write_u8, write_u16};
use crate::chip::{ChipType, mapper};
use crate::driver::sm83;
use crate::format::{ExportFormat, FormatDescriptor, has_chip, loop_tick};
use crate::log::RegisterWrite;
use crate::loops::{DriverGrammar, resolve_loop};
use crate::options::EncodeOptions;
use crate::stream::encode_stream;

pub const CHIPS: &[ChipType] = &[ChipType::Gb];

pub const DESCRIPTOR: FormatDescriptor = FormatDescriptor {
    format: ExportFormat::Gbs,
    name: "GBS (Game Boy Sound System)",
    extension: "gbs",
    mime_type: "audio/x-gbs",
    chips: CHIPS,
};

pub const GBS_HEADER_SIZE: usize = 0x70;
const GBS_VERSION: u8 = 1;
const STACK_POINTER: u16 = 0xFFFE;
/// Timer enabled, 4096 Hz input clock.
const TAC_TIMER_4096HZ: u8 = 0x04;
const TIMER_CLOCK: u32 = 4_096;

/// `(TMA, TAC)` for a frame rate. 60 Hz uses VBlank (`TAC = 0`).
pub fn timer_registers(frame_rate: u32) -> (u8, u8) {
    if frame_rate == 60 {
        return (0, 0);
    }
    let rate = frame_rate.max(1);
    let divider = ((TIMER_CLOCK + rate / 2) / rate).clamp(1, 256);
    ((256 - divider) as u8, TAC_TIMER_4096HZ)
}

pub fn can_export(writes: &[RegisterWrite]) -> bool {
    has_chip(writes, CHIPS)
}

pub fn encode(writes: &[RegisterWrite], options: &EncodeOptions) -> Vec<u8> {
    let driver = &sm83::DRIVER;
    let spec = driver.stream_spec(options.frame_rate, mapper::game_boy);
    let loop_tick = loop_tick(options, &options.quantizer(spec.tick_rate));
    let stream = encode_stream(&spec, writes, options.source_sample_rate, loop_tick);
    let loop_offset = loop_tick
        .and_then(|tick| resolve_loop(&stream.bytes, &DriverGrammar, tick))
        .map(|resolved| resolved.offset);
    let linked = driver.link(&stream.bytes, loop_offset, None);

    let meta = &options.metadata;
    let (tma, tac) = timer_registers(options.frame_rate);
    let mut out = vec![0u8; GBS_HEADER_SIZE];
    write_slice(&mut out, 0x00, b"GBS");
    write_u8(&mut out, 0x03, GBS_VERSION);
    write_u8(&mut out, 0x04, 1);
    write_u8(&mut out, 0x05, 1);
    write_u16(&mut out, 0x06, driver.load_address, Endian::Little);
    write_u16(&mut out, 0x08, driver.init_address(), Endian::Little);
    write_u16(&mut out, 0x0A, driver.play_address(), Endian::Little);
    write_u16(&mut out, 0x0C, STACK_POINTER, Endian::Little);
    write_u8(&mut out, 0x0E, tma);
    write_u8(&mut out, 0x0F, tac);
    write_ascii_field(&mut out, 0x10, 32, &meta.title);
    write_ascii_field(&mut out, 0x30, 32, &meta.author);
    write_ascii_field(&mut out, 0x50, 32, &meta.copyright);
    out.extend_from_slice(&linked.image);

    tracing::debug!(
        frames = stream.total_ticks,
        writes = stream.writes,
        skipped = stream.skipped,
        bytes = out.len(),
        "encoded GBS"
    );
    out
}
