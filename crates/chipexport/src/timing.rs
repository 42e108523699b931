//! Timing quantizer.
//!
//! Maps absolute sample timestamps onto a target format's tick grid. The
//! mapping is `floor(timestamp * tick_rate / source_rate)`, computed in
//! 128-bit integer arithmetic so long traces do not drift.
use crate::log::RegisterWrite;

/// Sample rate the capture engine records timestamps at unless told otherwise.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Tick rate of the VGM sample clock.
pub const VGM_SAMPLE_RATE: u32 = 44_100;

/// Converts source timestamps to target ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantizer {
    source_rate: u32,
    tick_rate: u32,
}

/// Writes that fall on the same tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<'a> {
    pub tick: u64,
    pub writes: Vec<&'a RegisterWrite>,
}

impl Quantizer {
    /// Create a quantizer from a source sample rate and a target tick rate,
    /// both in Hz. Zero rates are treated as 1 Hz.
    pub fn new(source_rate: u32, tick_rate: u32) -> Self {
        Quantizer {
            source_rate: source_rate.max(1),
            tick_rate: tick_rate.max(1),
        }
    }

    /// Tick index of an absolute sample timestamp.
    pub fn tick(&self, timestamp: u64) -> u64 {
        let scaled = timestamp as u128 * self.tick_rate as u128 / self.source_rate as u128;
        scaled.min(u64::MAX as u128) as u64
    }

    /// Group time-sorted writes into frames, one per distinct tick.
    ///
    /// `writes` must already be sorted by timestamp; frames come out in
    /// ascending tick order with the writes in input order.
    pub fn frames<'a>(&self, writes: &'a [RegisterWrite]) -> Vec<Frame<'a>> {
        let mut frames: Vec<Frame<'a>> = Vec::new();
        for write in writes {
            let tick = self.tick(write.timestamp as u64);
            match frames.last_mut() {
                Some(frame) if frame.tick == tick => frame.writes.push(write),
                _ => frames.push(Frame {
                    tick,
                    writes: vec![write],
                }),
            }
        }
        frames
    }
}
