//! SPC (SNES SPC700 snapshot) encoder.
//!
//! An SPC file is a frozen sound-CPU state: registers, the full 64 KiB of
//! audio RAM and the 128 S-DSP registers. Playback resumes at PC, which
//! points at the SPC700 driver placed at `$0200`.
//!
//! | offset   | size    | field                                          |
//! |----------|---------|------------------------------------------------|
//! | 0x00000  | 33      | `"SNES-SPC700 Sound File Data v0.30"`          |
//! | 0x00021  | 2       | `1A 1A`                                        |
//! | 0x00023  | 1       | `1A` = header has an ID666 tag                 |
//! | 0x00024  | 1       | minor version (30)                             |
//! | 0x00025  | 2       | PC                                             |
//! | 0x00027  | 5       | A, X, Y, PSW, SP                               |
//! | 0x0002E  | 32      | song title                                     |
//! | 0x0004E  | 32      | game title                                     |
//! | 0x0006E  | 16      | dumper                                         |
//! | 0x0007E  | 32      | comments                                       |
//! | 0x0009E  | 11      | dump date                                      |
//! | 0x000A9  | 3       | seconds to play before fading (ASCII)          |
//! | 0x000AC  | 5       | fade length in milliseconds (ASCII)            |
//! | 0x000B1  | 32      | artist                                         |
//! | 0x000D1  | 1       | default channel disables                       |
//! | 0x000D2  | 1       | emulator used                                  |
//! | 0x00100  | 65536   | audio RAM                                      |
//! | 0x10100  | 128     | DSP registers                                  |
//! | 0x10180  | 128     | unused / IPL ROM area (zero)                   |
use crate::binutil::{Endian, write_ascii_field, write_slice, write_u8, write_u16};
use crate::chip::{ChipType, mapper};
use crate::driver::spc700;
use crate::format::{ExportFormat, FormatDescriptor, has_chip, loop_tick};
use crate::log::{RegisterWrite, max_timestamp};
use crate::loops::{DriverGrammar, resolve_loop};
use crate::options::EncodeOptions;
use crate::stream::encode_stream;

pub const CHIPS: &[ChipType] = &[ChipType::Snes];

pub const DESCRIPTOR: FormatDescriptor = FormatDescriptor {
    format: ExportFormat::Spc,
    name: "SPC (SNES SPC700)",
    extension: "spc",
    mime_type: "audio/x-spc",
    chips: CHIPS,
};

pub const SPC_FILE_SIZE: usize = 0x10200;
pub const RAM_OFFSET: usize = 0x100;
pub const DSP_OFFSET: usize = 0x10100;

const SIGNATURE: &[u8; 33] = b"SNES-SPC700 Sound File Data v0.30";
const STACK_POINTER: u8 = 0xEF;
const DSP_FLG: usize = 0x6C;
/// FLG: echo buffer writes disabled, not muted, not in reset.
const FLG_ECHO_WRITE_OFF: u8 = 0x20;
const FADE_MS: &[u8; 5] = b"10000";
const DUMPER: &str = "chipexport";

pub fn can_export(writes: &[RegisterWrite]) -> bool {
    has_chip(writes, CHIPS)
}

/// Play length in whole seconds (rounded up, at most 999).
fn play_seconds(writes: &[RegisterWrite], source_rate: u32) -> u32 {
    let rate = source_rate.max(1);
    max_timestamp(writes).div_ceil(rate).min(999)
}

pub fn encode(writes: &[RegisterWrite], options: &EncodeOptions) -> Vec<u8> {
    let driver = &spc700::DRIVER;
    let spec = driver.stream_spec(options.frame_rate, mapper::snes_dsp);
    let loop_tick = loop_tick(options, &options.quantizer(spec.tick_rate));
    let stream = encode_stream(&spec, writes, options.source_sample_rate, loop_tick);
    let loop_offset = loop_tick
        .and_then(|tick| resolve_loop(&stream.bytes, &DriverGrammar, tick))
        .map(|resolved| resolved.offset);
    let timer = spc700::timer_target(options.frame_rate);
    let linked = driver.link(&stream.bytes, loop_offset, Some(timer));

    let meta = &options.metadata;
    let mut out = vec![0u8; SPC_FILE_SIZE];
    write_slice(&mut out, 0x00, SIGNATURE);
    write_slice(&mut out, 0x21, &[0x1A, 0x1A]);
    write_u8(&mut out, 0x23, 0x1A);
    write_u8(&mut out, 0x24, 30);
    write_u16(&mut out, 0x25, driver.init_address(), Endian::Little);
    write_u8(&mut out, 0x2B, STACK_POINTER);

    write_ascii_field(&mut out, 0x2E, 32, &meta.title);
    write_ascii_field(&mut out, 0x4E, 32, &meta.game);
    write_ascii_field(&mut out, 0x6E, 16, DUMPER);
    write_ascii_field(&mut out, 0x7E, 32, &meta.comment);
    write_ascii_field(&mut out, 0x9E, 11, &meta.date);
    let seconds = play_seconds(writes, options.source_sample_rate).to_string();
    write_slice(&mut out, 0xA9, seconds.as_bytes());
    write_slice(&mut out, 0xAC, FADE_MS);
    write_ascii_field(&mut out, 0xB1, 32, &meta.author);

    let ram = RAM_OFFSET + driver.load_address as usize;
    write_slice(&mut out, ram, &linked.image);
    write_u8(&mut out, DSP_OFFSET + DSP_FLG, FLG_ECHO_WRITE_OFF);

    tracing::debug!(
        frames = stream.total_ticks,
        writes = stream.writes,
        skipped = stream.skipped,
        timer,
        "encoded SPC"
    );
    out
}
