//! Loop resolver.
//!
//! Loop points are requested on the source sample clock, but headers want a
//! byte offset into the encoded stream. [`resolve_loop`] replays a finished
//! stream with a [`StreamGrammar`] (how long each token is and how many
//! ticks it advances) and reports the first token boundary at or past the
//! requested tick.
//!
//! A request at or beyond the end of the stream resolves to `None`, which
//! every format writes as its "no loop" header value. A request for tick 0
//! resolves to the start of the stream.

/// One decoded token of a command stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Token length in bytes.
    pub len: usize,
    /// Ticks the token advances playback by.
    pub ticks: u64,
    /// The token terminates the stream.
    pub end: bool,
}

impl Step {
    const fn command(len: usize) -> Self {
        Step {
            len,
            ticks: 0,
            end: false,
        }
    }

    const fn wait(len: usize, ticks: u64) -> Self {
        Step {
            len,
            ticks,
            end: false,
        }
    }

    const fn end() -> Self {
        Step {
            len: 1,
            ticks: 0,
            end: true,
        }
    }
}

/// Token grammar of one command language.
pub trait StreamGrammar {
    /// Decode the token at `offset`. `None` when the stream is truncated or
    /// the opcode is not part of the language.
    fn step(&self, stream: &[u8], offset: usize) -> Option<Step>;
}

/// Loop position inside an encoded stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedLoop {
    /// Byte offset of the first token played after looping.
    pub offset: usize,
    /// Tick the loop starts at.
    pub tick: u64,
    /// Ticks from the loop start to the end of the stream.
    pub length: u64,
}

/// Total duration of `stream` in ticks.
pub fn stream_ticks(stream: &[u8], grammar: &dyn StreamGrammar) -> u64 {
    let mut offset = 0;
    let mut ticks = 0;
    while let Some(step) = grammar.step(stream, offset) {
        ticks += step.ticks;
        offset += step.len;
        if step.end {
            break;
        }
    }
    ticks
}

/// Find the byte offset where playback reaches `target_tick`.
pub fn resolve_loop(
    stream: &[u8],
    grammar: &dyn StreamGrammar,
    target_tick: u64,
) -> Option<ResolvedLoop> {
    let mut offset = 0;
    let mut ticks = 0;
    let mut found = None;
    loop {
        if found.is_none() && ticks >= target_tick {
            found = Some(offset);
        }
        let Some(step) = grammar.step(stream, offset) else {
            break;
        };
        ticks += step.ticks;
        offset += step.len;
        if step.end {
            break;
        }
    }

    if target_tick >= ticks {
        return None;
    }
    found.map(|offset| ResolvedLoop {
        offset,
        tick: target_tick,
        length: ticks - target_tick,
    })
}

fn need(stream: &[u8], offset: usize, step: Step) -> Option<Step> {
    (offset + step.len <= stream.len()).then_some(step)
}

/// VGM 1.72 command grammar on the 44.1 kHz sample clock.
pub struct VgmGrammar;

impl StreamGrammar for VgmGrammar {
    fn step(&self, stream: &[u8], offset: usize) -> Option<Step> {
        let opcode = *stream.get(offset)?;
        let step = match opcode {
            0x30..=0x3F | 0x4F | 0x50 | 0x94 => Step::command(2),
            0x40..=0x4E | 0x51..=0x5F | 0xA0..=0xBF => Step::command(3),
            0x61 => {
                let lo = *stream.get(offset + 1)?;
                let hi = *stream.get(offset + 2)?;
                Step::wait(3, u16::from_le_bytes([lo, hi]) as u64)
            }
            0x62 => Step::wait(1, 735),
            0x63 => Step::wait(1, 882),
            0x66 => Step::end(),
            0x67 => {
                let size = crate::binutil::read_u32_le_at(stream, offset + 3)?;
                Step::command(7 + size as usize)
            }
            0x68 => Step::command(12),
            0x70..=0x7F => Step::wait(1, (opcode & 0x0F) as u64 + 1),
            0x80..=0x8F => Step::wait(1, (opcode & 0x0F) as u64),
            0x90 | 0x91 | 0x95 => Step::command(5),
            0x92 => Step::command(6),
            0x93 => Step::command(11),
            0xC0..=0xDF => Step::command(4),
            0xE0..=0xFF => Step::command(5),
            _ => return None,
        };
        need(stream, offset, step)
    }
}

/// GYM frame grammar (one tick per 1/60 s frame).
pub struct GymGrammar;

impl StreamGrammar for GymGrammar {
    fn step(&self, stream: &[u8], offset: usize) -> Option<Step> {
        let step = match *stream.get(offset)? {
            0x00 => Step::wait(1, 1),
            0x01 | 0x02 => Step::command(3),
            0x03 => Step::command(2),
            _ => return None,
        };
        need(stream, offset, step)
    }
}

/// ZSM music-data grammar.
pub struct ZsmGrammar;

impl StreamGrammar for ZsmGrammar {
    fn step(&self, stream: &[u8], offset: usize) -> Option<Step> {
        let opcode = *stream.get(offset)?;
        let step = match opcode {
            0x00..=0x3F => Step::command(2),
            0x40 => {
                let ext = *stream.get(offset + 1)?;
                Step::command(2 + (ext & 0x3F) as usize)
            }
            0x41..=0x7F => Step::command(1 + 2 * (opcode & 0x3F) as usize),
            0x80 => Step::end(),
            _ => Step::wait(1, (opcode & 0x7F) as u64),
        };
        need(stream, offset, step)
    }
}

/// Embedded-driver data grammar: register pairs, `0xFF` frame end and
/// `0xFE` song end.
pub struct DriverGrammar;

impl StreamGrammar for DriverGrammar {
    fn step(&self, stream: &[u8], offset: usize) -> Option<Step> {
        let step = match *stream.get(offset)? {
            0xFF => Step::wait(1, 1),
            0xFE => Step::end(),
            _ => Step::command(2),
        };
        need(stream, offset, step)
    }
}

/// TIunA grammar: change-mask frames advance one tick, hold runs
/// `(low seven bits + 1)` ticks.
pub struct TiunaGrammar;

impl StreamGrammar for TiunaGrammar {
    fn step(&self, stream: &[u8], offset: usize) -> Option<Step> {
        let opcode = *stream.get(offset)?;
        let step = match opcode {
            0x00 => Step::end(),
            0x01..=0x3F => Step::wait(1 + opcode.count_ones() as usize, 1),
            0x80..=0xFF => Step::wait(1, (opcode & 0x7F) as u64 + 1),
            _ => return None,
        };
        need(stream, offset, step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gym_loop_inside_stream() {
        // write, wait, write, wait, wait
        let stream = [0x03, 0x9F, 0x00, 0x03, 0x8F, 0x00, 0x00];
        let resolved = resolve_loop(&stream, &GymGrammar, 1).unwrap();
        assert_eq!(resolved.offset, 3);
        assert_eq!(resolved.length, 2);
        assert_eq!(stream_ticks(&stream, &GymGrammar), 3);
    }

    #[test]
    fn test_loop_at_or_past_end_is_none() {
        let stream = [0x03, 0x9F, 0x00, 0x00];
        assert_eq!(resolve_loop(&stream, &GymGrammar, 2), None);
        assert_eq!(resolve_loop(&stream, &GymGrammar, 100), None);
    }

    #[test]
    fn test_loop_zero_is_stream_start() {
        let stream = [0x50, 0x9F, 0x62, 0x66];
        let resolved = resolve_loop(&stream, &VgmGrammar, 0).unwrap();
        assert_eq!(resolved.offset, 0);
        assert_eq!(resolved.length, 735);
    }

    #[test]
    fn test_driver_stream_stops_at_song_end() {
        let stream = [0x00, 0x30, 0xFF, 0xFF, 0x15, 0x0F, 0xFE, 0xFF];
        assert_eq!(stream_ticks(&stream, &DriverGrammar), 2);
        assert_eq!(resolve_loop(&stream, &DriverGrammar, 2), None);
        assert_eq!(resolve_loop(&stream, &DriverGrammar, 1).unwrap().offset, 3);
    }

    #[test]
    fn test_truncated_vgm_wait_is_rejected() {
        assert_eq!(VgmGrammar.step(&[0x61, 0x10], 0), None);
    }
}
