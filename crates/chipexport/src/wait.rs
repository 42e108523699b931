//! Wait/delta encoders.
//!
//! Each function appends the tokens that advance a format's playback clock
//! by exactly `gap` ticks. They are greedy and left-to-right, never emit a
//! zero-length token, and a `gap` of zero appends nothing.

/// VGM: wait n samples, followed by a little-endian u16.
pub const VGM_WAIT_N: u8 = 0x61;
/// VGM: wait 735 samples (1/60 s).
pub const VGM_WAIT_735: u8 = 0x62;
/// VGM: wait 882 samples (1/50 s).
pub const VGM_WAIT_882: u8 = 0x63;
/// VGM: wait (low nibble + 1) samples.
pub const VGM_WAIT_SHORT: u8 = 0x70;

/// GYM: wait one 1/60 s frame.
pub const GYM_WAIT_FRAME: u8 = 0x00;

/// ZSM: delay base; the low seven bits hold the tick count.
pub const ZSM_DELAY: u8 = 0x80;
const ZSM_MAX_DELAY: u64 = 0x7F;

/// Embedded driver streams: end of the current frame.
pub const FRAME_END: u8 = 0xFF;

/// TIunA: hold the current register state for (low seven bits + 1) frames.
pub const TIUNA_HOLD: u8 = 0x80;
const TIUNA_MAX_HOLD: u64 = 0x80;

/// Append VGM wait commands covering `gap` samples.
///
/// Exact 1/60 s and 1/50 s gaps use their single-byte opcodes, gaps of
/// 1..=16 samples the packed `0x7n` form, anything else `0x61 nnnn` with at
/// most 65535 samples per token.
pub fn vgm(gap: u64, out: &mut Vec<u8>) {
    let mut remaining = gap;
    while remaining > 0 {
        match remaining {
            735 => {
                out.push(VGM_WAIT_735);
                remaining = 0;
            }
            882 => {
                out.push(VGM_WAIT_882);
                remaining = 0;
            }
            1..=16 => {
                out.push(VGM_WAIT_SHORT | (remaining - 1) as u8);
                remaining = 0;
            }
            _ => {
                let n = remaining.min(u16::MAX as u64);
                out.push(VGM_WAIT_N);
                out.extend_from_slice(&(n as u16).to_le_bytes());
                remaining -= n;
            }
        }
    }
}

/// Append one GYM frame wait per tick.
pub fn gym(gap: u64, out: &mut Vec<u8>) {
    out.extend(std::iter::repeat_n(GYM_WAIT_FRAME, gap as usize));
}

/// Append ZSM delay tokens of at most 127 ticks each.
pub fn zsm(gap: u64, out: &mut Vec<u8>) {
    let mut remaining = gap;
    while remaining > 0 {
        let n = remaining.min(ZSM_MAX_DELAY);
        out.push(ZSM_DELAY | n as u8);
        remaining -= n;
    }
}

/// Append one frame-end sentinel per tick for the embedded drivers.
pub fn frame_sentinel(gap: u64, out: &mut Vec<u8>) {
    out.extend(std::iter::repeat_n(FRAME_END, gap as usize));
}

/// Append TIunA hold tokens of at most 128 frames each.
pub fn tiuna_hold(gap: u64, out: &mut Vec<u8>) {
    let mut remaining = gap;
    while remaining > 0 {
        let n = remaining.min(TIUNA_MAX_HOLD);
        out.push(TIUNA_HOLD | (n - 1) as u8);
        remaining -= n;
    }
}
