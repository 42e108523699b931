//! TIunA (Atari 2600 TIA) encoder.
//!
//! A compact frame stream for the six TIA audio registers, sized for a
//! 2600 replay routine. Header (big-endian, 46 bytes):
//!
//! | offset | size | field                                    |
//! |--------|------|------------------------------------------|
//! | 0x00   | 5    | `"TIunA"`                                |
//! | 0x05   | 1    | version (1)                              |
//! | 0x06   | 1    | frame rate in Hz                         |
//! | 0x07   | 1    | flags (bit 0 = loops)                    |
//! | 0x08   | 2    | frame count                              |
//! | 0x0A   | 2    | loop offset into the data (`0xFFFF` = none) |
//! | 0x0C   | 2    | data length                              |
//! | 0x0E   | 32   | title                                    |
//!
//! Stream tokens, one per frame unless noted:
//!
//! - `0x01-0x3F`: change mask over AUDC0, AUDC1, AUDF0, AUDF1, AUDV0, AUDV1
//!   (bit 0 first), followed by one value per set bit
//! - `0x80-0xFF`: hold the current registers for `(n & 0x7F) + 1` frames
//! - `0x00`: end
//!
//! The first frame always sets every register.
use crate::binutil::{Endian, write_ascii_field, write_slice, write_u8, write_u16};
use crate::chip::{ChipType, mapper};
use crate::format::{ExportFormat, FormatDescriptor, has_chip, loop_tick};
use crate::log::{RegisterWrite, sorted_by_time};
use crate::loops::{TiunaGrammar, resolve_loop};
use crate::options::EncodeOptions;
use crate::wait;

pub const CHIPS: &[ChipType] = &[ChipType::Tia];

pub const DESCRIPTOR: FormatDescriptor = FormatDescriptor {
    format: ExportFormat::Tiuna,
    name: "TIunA (Atari 2600 TIA)",
    extension: "tiuna",
    mime_type: "application/octet-stream",
    chips: CHIPS,
};

pub const TIUNA_HEADER_SIZE: usize = 0x2E;
const TIUNA_VERSION: u8 = 1;
const FLAG_LOOP: u8 = 0x01;
const NO_LOOP: u16 = 0xFFFF;
const END_OF_DATA: u8 = 0x00;
const TIA_AUDIO_REGISTERS: usize = 6;
const FULL_MASK: u8 = 0x3F;

/// One TIA audio register write; `index` follows the stream mask order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiaWrite {
    pub index: usize,
    pub value: u8,
}

pub fn can_export(writes: &[RegisterWrite]) -> bool {
    has_chip(writes, CHIPS)
}

fn saturate_u16(what: &'static str, value: usize) -> u16 {
    u16::try_from(value).unwrap_or_else(|_| {
        tracing::warn!(field = what, value, "TIunA header field saturated");
        u16::MAX
    })
}

pub fn encode(writes: &[RegisterWrite], options: &EncodeOptions) -> Vec<u8> {
    let quantizer = options.quantizer(options.frame_rate);
    let loop_frame = loop_tick(options, &quantizer);
    let sorted = sorted_by_time(writes);
    let last = sorted.last().map_or(0, |w| quantizer.tick(w.timestamp as u64));
    let frames = last + 1;

    let mut pending = quantizer.frames(&sorted).into_iter().peekable();
    let mut data = Vec::new();
    let mut state = [0u8; TIA_AUDIO_REGISTERS];
    let mut hold = 0u64;
    for frame in 0..frames {
        let mut next = state;
        if let Some(due) = pending.next_if(|f| f.tick == frame) {
            for write in due.writes.into_iter().filter_map(mapper::tia) {
                next[write.index] = write.value;
            }
        }
        let mask = if frame == 0 {
            FULL_MASK
        } else {
            (0..TIA_AUDIO_REGISTERS)
                .filter(|&i| next[i] != state[i])
                .fold(0u8, |mask, i| mask | (1 << i))
        };
        if loop_frame == Some(frame) || mask != 0 {
            wait::tiuna_hold(hold, &mut data);
            hold = 0;
        }
        if mask == 0 {
            hold += 1;
        } else {
            data.push(mask);
            data.extend(
                (0..TIA_AUDIO_REGISTERS)
                    .filter(|&i| mask & (1 << i) != 0)
                    .map(|i| next[i]),
            );
        }
        state = next;
    }
    wait::tiuna_hold(hold, &mut data);
    data.push(END_OF_DATA);

    let resolved = loop_frame.and_then(|frame| resolve_loop(&data, &TiunaGrammar, frame));

    let mut out = vec![0u8; TIUNA_HEADER_SIZE];
    write_slice(&mut out, 0x00, b"TIunA");
    write_u8(&mut out, 0x05, TIUNA_VERSION);
    write_u8(&mut out, 0x06, options.frame_rate.min(u8::MAX as u32) as u8);
    write_u8(&mut out, 0x07, if resolved.is_some() { FLAG_LOOP } else { 0 });
    write_u16(&mut out, 0x08, saturate_u16("frames", frames as usize), Endian::Big);
    let loop_offset = resolved.map_or(NO_LOOP, |r| saturate_u16("loop", r.offset));
    write_u16(&mut out, 0x0A, loop_offset, Endian::Big);
    write_u16(&mut out, 0x0C, saturate_u16("length", data.len()), Endian::Big);
    write_ascii_field(&mut out, 0x0E, 32, &options.metadata.title);
    out.extend_from_slice(&data);

    tracing::debug!(frames, bytes = out.len(), "encoded TIunA");
    out
}
