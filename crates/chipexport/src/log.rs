//! Register-write trace codec.
//!
//! A trace is a flat sequence of fixed 16-byte records as laid out by the
//! capture engine's in-memory struct:
//!
//! | offset | size | field                      |
//! |--------|------|----------------------------|
//! | 0x00   | 4    | timestamp (LE, in samples) |
//! | 0x04   | 1    | chip tag                   |
//! | 0x05   | 3    | padding                    |
//! | 0x08   | 4    | port (LE)                  |
//! | 0x0C   | 1    | data                       |
//! | 0x0D   | 3    | padding                    |
//!
//! There is no header and no checksum. Decoding is a pure structural unpack:
//! any buffer decodes, trailing bytes that do not form a whole record are
//! ignored.
use crate::chip::ChipType;

/// Size in bytes of one trace record.
pub const RECORD_SIZE: usize = 16;

/// One observed write to a chip register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegisterWrite {
    /// Sample-clock position of the write.
    pub timestamp: u32,
    /// Chip that received the write.
    pub chip: ChipType,
    /// Chip-specific register address.
    pub port: u32,
    /// Value written.
    pub data: u8,
}

impl RegisterWrite {
    pub fn new(timestamp: u32, chip: ChipType, port: u32, data: u8) -> Self {
        RegisterWrite {
            timestamp,
            chip,
            port,
            data,
        }
    }

    fn from_record(record: &[u8]) -> Self {
        let timestamp = u32::from_le_bytes([record[0], record[1], record[2], record[3]]);
        let port = u32::from_le_bytes([record[8], record[9], record[10], record[11]]);
        RegisterWrite {
            timestamp,
            chip: ChipType::from(record[4]),
            port,
            data: record[12],
        }
    }

    fn to_record(self) -> [u8; RECORD_SIZE] {
        let mut record = [0u8; RECORD_SIZE];
        record[0..4].copy_from_slice(&self.timestamp.to_le_bytes());
        record[4] = u8::from(self.chip);
        record[8..12].copy_from_slice(&self.port.to_le_bytes());
        record[12] = self.data;
        record
    }
}

/// Decode a raw trace buffer into register writes, in trace order.
pub fn decode_log(bytes: &[u8]) -> Vec<RegisterWrite> {
    let writes: Vec<RegisterWrite> = bytes
        .chunks_exact(RECORD_SIZE)
        .map(RegisterWrite::from_record)
        .collect();

    let trailing = bytes.len() % RECORD_SIZE;
    if trailing != 0 {
        tracing::debug!(trailing, "ignoring partial trailing trace record");
    }
    writes
}

/// Encode register writes into the trace record layout (padding zeroed).
pub fn encode_log(writes: &[RegisterWrite]) -> Vec<u8> {
    let mut out = Vec::with_capacity(writes.len() * RECORD_SIZE);
    for write in writes {
        out.extend_from_slice(&write.to_record());
    }
    out
}

/// Return a copy of `writes` ordered by timestamp.
///
/// The sort is stable so writes sharing a timestamp keep their trace order,
/// which preserves "last write wins" for the same register.
pub(crate) fn sorted_by_time(writes: &[RegisterWrite]) -> Vec<RegisterWrite> {
    let mut sorted = writes.to_vec();
    sorted.sort_by_key(|w| w.timestamp);
    sorted
}

/// Largest timestamp in the trace, or 0 for an empty trace.
pub(crate) fn max_timestamp(writes: &[RegisterWrite]) -> u32 {
    writes.iter().map(|w| w.timestamp).max().unwrap_or(0)
}
