//! Format registry and export dispatcher.
//!
//! The front door of the crate: which formats can carry a trace, what a
//! trace contains, and the one-call [`export`] that turns raw trace bytes
//! into a finished file.
use std::collections::BTreeMap;

use crate::chip::ChipType;
use crate::error::{ExportError, Result};
use crate::format::{ExportFormat, FormatDescriptor};
use crate::log::{RegisterWrite, decode_log, max_timestamp};
use crate::options::ExportOptions;

/// A finished export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResult {
    pub bytes: Vec<u8>,
    /// Suggested file name, derived from the title.
    pub filename: String,
    pub mime_type: &'static str,
    pub format: ExportFormat,
}

/// Per-chip write count in [`TraceStats`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipStats {
    pub chip: ChipType,
    pub name: &'static str,
    pub writes: usize,
}

/// Summary of a decoded trace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceStats {
    pub total_writes: usize,
    /// Chips in tag order.
    pub chips: Vec<ChipStats>,
    /// Largest timestamp, in source samples.
    pub duration_samples: u32,
}

/// Descriptors of every format able to carry `writes`, VGM first.
pub fn available_formats(writes: &[RegisterWrite]) -> Vec<&'static FormatDescriptor> {
    ExportFormat::ALL
        .into_iter()
        .filter(|format| format.can_export(writes))
        .map(ExportFormat::descriptor)
        .collect()
}

/// Count writes per chip and measure the trace length.
pub fn statistics(writes: &[RegisterWrite]) -> TraceStats {
    let mut counts: BTreeMap<ChipType, usize> = BTreeMap::new();
    for write in writes {
        *counts.entry(write.chip).or_default() += 1;
    }
    let mut chips: Vec<ChipStats> = counts
        .into_iter()
        .map(|(chip, writes)| ChipStats {
            chip,
            name: chip.name(),
            writes,
        })
        .collect();
    chips.sort_by_key(|stats| u8::from(stats.chip));

    TraceStats {
        total_writes: writes.len(),
        chips,
        duration_samples: max_timestamp(writes),
    }
}

/// Decode `log`, encode it as `format` and package the result.
///
/// `format` is a case-insensitive tag (`"vgm"`, `"nsf"`, ...). Fails on an
/// empty trace, an unknown tag or an invalid option override.
pub fn export(log: &[u8], format: &str, overrides: &ExportOptions) -> Result<ExportResult> {
    let writes = decode_log(log);
    if writes.is_empty() {
        return Err(ExportError::EmptyTrace);
    }
    let format: ExportFormat = format.parse()?;
    let options = overrides.merge(format)?;

    let bytes = format.encode(&writes, &options);
    let descriptor = format.descriptor();
    let filename = format!(
        "{}.{}",
        sanitize_filename(&options.metadata.title),
        descriptor.extension
    );
    tracing::info!(
        format = descriptor.extension,
        writes = writes.len(),
        bytes = bytes.len(),
        %filename,
        "export finished"
    );
    Ok(ExportResult {
        bytes,
        filename,
        mime_type: descriptor.mime_type,
        format,
    })
}

/// File stem from a title: path separators, reserved and control
/// characters become `_`, surrounding dots and blanks are dropped, and an
/// empty result falls back to `export`.
pub fn sanitize_filename(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let trimmed = cleaned.trim_matches(|c: char| c == '.' || c.is_whitespace());
    if trimmed.is_empty() {
        "export".to_string()
    } else {
        trimmed.to_string()
    }
}
