//! GYM (Genesis YM2612 log) encoder.
//!
//! A GYM stream is a plain sequence of 1/60 s frames:
//!
//! - `0x00`: end of frame
//! - `0x01 rr dd`: YM2612 port 0 write
//! - `0x02 rr dd`: YM2612 port 1 write
//! - `0x03 dd`: SN76489 write
//!
//! There is no terminator. When enabled, a 428-byte `GYMX` header precedes
//! the stream:
//!
//! | offset | size | field                                  |
//! |--------|------|----------------------------------------|
//! | 0x000  | 4    | `"GYMX"`                               |
//! | 0x004  | 32   | song title                             |
//! | 0x024  | 32   | game name                              |
//! | 0x044  | 32   | publisher                              |
//! | 0x064  | 32   | emulator                               |
//! | 0x084  | 32   | dumper                                 |
//! | 0x0A4  | 256  | comment                                |
//! | 0x1A4  | 4    | loop start frame (1-based, 0 = none)   |
//! | 0x1A8  | 4    | packed size (0 = uncompressed)         |
use crate::binutil::{Endian, write_ascii_field, write_slice, write_u32};
use crate::chip::{ChipType, mapper};
use crate::format::{ExportFormat, FormatDescriptor, has_chip, loop_tick};
use crate::log::RegisterWrite;
use crate::loops::{GymGrammar, resolve_loop};
use crate::options::EncodeOptions;
use crate::stream::{StreamSpec, encode_stream};
use crate::timing::Quantizer;
use crate::wait;

pub const CHIPS: &[ChipType] = &[ChipType::Opn2, ChipType::Psg];

pub const DESCRIPTOR: FormatDescriptor = FormatDescriptor {
    format: ExportFormat::Gym,
    name: "GYM (Genesis YM2612 log)",
    extension: "gym",
    mime_type: "audio/x-gym",
    chips: CHIPS,
};

/// GYM playback runs at a fixed 60 Hz.
pub const GYM_FRAME_RATE: u32 = 60;

pub const GYMX_HEADER_SIZE: usize = 428;
const GYMX_LOOP_START: usize = 0x1A4;
const GYMX_PACKED_SIZE: usize = 0x1A8;

const EMULATOR: &str = "chipexport";

/// One GYM register write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GymCommand {
    Ym2612 { port: u8, register: u8, value: u8 },
    Psg(u8),
}

impl GymCommand {
    pub fn push(&self, out: &mut Vec<u8>) {
        match *self {
            GymCommand::Ym2612 {
                port,
                register,
                value,
            } => out.extend_from_slice(&[0x01 + (port & 1), register, value]),
            GymCommand::Psg(value) => out.extend_from_slice(&[0x03, value]),
        }
    }
}

const STREAM: StreamSpec<GymCommand> = StreamSpec {
    tick_rate: GYM_FRAME_RATE,
    map: mapper::gym,
    push: GymCommand::push,
    wait: wait::gym,
    end: &[],
};

pub fn can_export(writes: &[RegisterWrite]) -> bool {
    has_chip(writes, CHIPS)
}

pub fn encode(writes: &[RegisterWrite], options: &EncodeOptions) -> Vec<u8> {
    let quantizer = Quantizer::new(options.source_sample_rate, GYM_FRAME_RATE);
    let loop_tick = loop_tick(options, &quantizer);
    let stream = encode_stream(&STREAM, writes, options.source_sample_rate, loop_tick);

    if !options.gym_header {
        return stream.bytes;
    }

    let loop_frame = loop_tick
        .and_then(|tick| resolve_loop(&stream.bytes, &GymGrammar, tick))
        .map_or(0, |resolved| resolved.tick as u32 + 1);

    let meta = &options.metadata;
    let mut out = vec![0u8; GYMX_HEADER_SIZE];
    write_slice(&mut out, 0x000, b"GYMX");
    write_ascii_field(&mut out, 0x004, 32, &meta.title);
    write_ascii_field(&mut out, 0x024, 32, &meta.game);
    write_ascii_field(&mut out, 0x044, 32, &meta.copyright);
    write_ascii_field(&mut out, 0x064, 32, EMULATOR);
    write_ascii_field(&mut out, 0x084, 32, &meta.author);
    write_ascii_field(&mut out, 0x0A4, 256, &meta.comment);
    write_u32(&mut out, GYMX_LOOP_START, loop_frame, Endian::Little);
    write_u32(&mut out, GYMX_PACKED_SIZE, 0, Endian::Little);
    out.extend_from_slice(&stream.bytes);
    out
}
