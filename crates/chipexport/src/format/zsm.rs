//! ZSM (Commander X16 ZSound) encoder.
//!
//! Header, 16 bytes little-endian:
//!
//! | offset | size | field                                         |
//! |--------|------|-----------------------------------------------|
//! | 0x00   | 2    | `"zm"`                                        |
//! | 0x02   | 1    | version (1)                                   |
//! | 0x03   | 3    | loop point, file offset (0 = no loop)         |
//! | 0x06   | 3    | PCM header offset (0 = none)                  |
//! | 0x09   | 1    | YM2151 channel mask                           |
//! | 0x0A   | 2    | VERA PSG channel mask                         |
//! | 0x0C   | 2    | tick rate in Hz                               |
//! | 0x0E   | 2    | reserved                                      |
//!
//! Music data: `0x00-0x3F vv` VERA PSG register write, `0x41 rr vv` one
//! YM2151 write, `0x81-0xFF` delay of `n & 0x7F` ticks, `0x80` end.
use crate::binutil::{Endian, write_slice, write_u8, write_u16, write_u24_le};
use crate::chip::{ChipType, mapper};
use crate::format::{ExportFormat, FormatDescriptor, has_chip, loop_tick};
use crate::log::RegisterWrite;
use crate::loops::{ZsmGrammar, resolve_loop};
use crate::options::EncodeOptions;
use crate::stream::{StreamSpec, encode_stream};
use crate::wait;

pub const CHIPS: &[ChipType] = &[ChipType::Opm, ChipType::Vera];

pub const DESCRIPTOR: FormatDescriptor = FormatDescriptor {
    format: ExportFormat::Zsm,
    name: "ZSM (Commander X16)",
    extension: "zsm",
    mime_type: "application/octet-stream",
    chips: CHIPS,
};

pub const ZSM_HEADER_SIZE: usize = 0x10;
const ZSM_VERSION: u8 = 1;
const END_OF_DATA: u8 = 0x80;
const FM_WRITE_ONE: u8 = 0x41;
/// YM2151 key-on register; the channel is in the low three bits of the value.
const OPM_KEY_ON: u8 = 0x08;

/// One ZSM register write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZsmCommand {
    Psg { register: u8, value: u8 },
    Fm { register: u8, value: u8 },
}

impl ZsmCommand {
    pub fn push(&self, out: &mut Vec<u8>) {
        match *self {
            ZsmCommand::Psg { register, value } => out.extend_from_slice(&[register & 0x3F, value]),
            ZsmCommand::Fm { register, value } => {
                out.extend_from_slice(&[FM_WRITE_ONE, register, value])
            }
        }
    }

    /// Channel bit this write touches in the header masks.
    fn channel_mask(&self) -> (u8, u16) {
        match *self {
            ZsmCommand::Fm {
                register: OPM_KEY_ON,
                value,
            } => (1 << (value & 7), 0),
            ZsmCommand::Fm { register, .. } if register >= 0x20 => (1 << (register & 7), 0),
            ZsmCommand::Fm { .. } => (0, 0),
            ZsmCommand::Psg { register, .. } => (0, 1 << ((register & 0x3F) / 4)),
        }
    }
}

pub fn can_export(writes: &[RegisterWrite]) -> bool {
    has_chip(writes, CHIPS)
}

pub fn encode(writes: &[RegisterWrite], options: &EncodeOptions) -> Vec<u8> {
    let spec = StreamSpec {
        tick_rate: options.frame_rate,
        map: mapper::zsm,
        push: ZsmCommand::push,
        wait: wait::zsm,
        end: &[END_OF_DATA],
    };
    let loop_tick = loop_tick(options, &options.quantizer(spec.tick_rate));
    let stream = encode_stream(&spec, writes, options.source_sample_rate, loop_tick);
    let resolved = loop_tick.and_then(|tick| resolve_loop(&stream.bytes, &ZsmGrammar, tick));

    let (fm_mask, psg_mask) = writes
        .iter()
        .filter_map(mapper::zsm)
        .map(|command| command.channel_mask())
        .fold((0u8, 0u16), |(fm, psg), (f, p)| (fm | f, psg | p));

    let mut out = vec![0u8; ZSM_HEADER_SIZE];
    write_slice(&mut out, 0x00, b"zm");
    write_u8(&mut out, 0x02, ZSM_VERSION);
    let loop_point = resolved.map_or(0, |r| (ZSM_HEADER_SIZE + r.offset) as u32);
    write_u24_le(&mut out, 0x03, loop_point);
    write_u24_le(&mut out, 0x06, 0);
    write_u8(&mut out, 0x09, fm_mask);
    write_u16(&mut out, 0x0A, psg_mask, Endian::Little);
    let tick_rate = u16::try_from(options.frame_rate).unwrap_or(u16::MAX);
    write_u16(&mut out, 0x0C, tick_rate, Endian::Little);
    out.extend_from_slice(&stream.bytes);
    out
}
