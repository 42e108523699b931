//! Generic command-stream encoder.
//!
//! VGM, GYM, ZSM and the embedded-driver data streams all follow the same
//! shape: time-sorted register writes mapped into a target command, with
//! wait tokens between commands that land on different ticks and a
//! terminator at the end. A [`StreamSpec`] value describes one such target
//! and [`encode_stream`] does the rest.
use crate::log::{RegisterWrite, max_timestamp, sorted_by_time};
use crate::timing::Quantizer;

/// Description of one target command language.
pub struct StreamSpec<C> {
    /// Ticks per second of the target clock.
    pub tick_rate: u32,
    /// Translate a write into a target command; `None` skips it.
    pub map: fn(&RegisterWrite) -> Option<C>,
    /// Append the bytes of one command.
    pub push: fn(&C, &mut Vec<u8>),
    /// Append wait tokens covering a tick gap.
    pub wait: fn(u64, &mut Vec<u8>),
    /// Terminator appended after the final wait.
    pub end: &'static [u8],
}

/// Result of [`encode_stream`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedStream {
    pub bytes: Vec<u8>,
    /// Duration of the stream in target ticks.
    pub total_ticks: u64,
    /// Number of writes the mapper accepted.
    pub writes: usize,
    /// Number of writes the mapper rejected.
    pub skipped: usize,
}

/// Encode `writes` with `spec`.
///
/// The stream lasts until the tick of the latest timestamp in the whole
/// trace, even when that write is skipped by the mapper, so every format
/// exported from one trace has the same length. Time only advances in front
/// of an emitted command. When `loop_tick` falls inside the stream the wait
/// crossing it is split there, so a replay of the stream reaches the loop
/// tick exactly on a token boundary.
pub fn encode_stream<C>(
    spec: &StreamSpec<C>,
    writes: &[RegisterWrite],
    source_rate: u32,
    loop_tick: Option<u64>,
) -> EncodedStream {
    let quantizer = Quantizer::new(source_rate, spec.tick_rate);
    let total_ticks = quantizer.tick(max_timestamp(writes) as u64);
    let loop_tick = loop_tick.filter(|&t| t > 0 && t < total_ticks);

    let mut out = EncodedStream {
        total_ticks,
        ..EncodedStream::default()
    };
    let mut cursor = 0u64;
    let advance = |to: u64, bytes: &mut Vec<u8>, cursor: &mut u64| {
        if let Some(split) = loop_tick.filter(|&split| *cursor < split && split < to) {
            (spec.wait)(split - *cursor, bytes);
            *cursor = split;
        }
        (spec.wait)(to - *cursor, bytes);
        *cursor = to;
    };

    for write in sorted_by_time(writes) {
        let Some(command) = (spec.map)(&write) else {
            out.skipped += 1;
            continue;
        };
        let tick = quantizer.tick(write.timestamp as u64);
        advance(tick, &mut out.bytes, &mut cursor);
        (spec.push)(&command, &mut out.bytes);
        out.writes += 1;
    }
    advance(total_ticks, &mut out.bytes, &mut cursor);
    out.bytes.extend_from_slice(spec.end);

    tracing::debug!(
        ticks = out.total_ticks,
        writes = out.writes,
        skipped = out.skipped,
        bytes = out.bytes.len(),
        "encoded command stream"
    );
    out
}
