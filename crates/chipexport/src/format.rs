//! Export formats.
//!
//! Every format lives in its own submodule exposing the same two pure
//! functions:
//!
//! - `can_export(writes)`: true iff at least one write targets a chip the
//!   format can carry.
//! - `encode(writes, options)`: the complete file image. Encoders work on a
//!   timestamp-sorted copy of the trace and never fail; a trace without a
//!   single compatible write still produces a minimal, silent file.
//!
//! [`ExportFormat`] ties the submodules together for dispatch and carries
//! each format's static [`FormatDescriptor`].
pub mod gbs;
pub mod gym;
pub mod nsf;
pub mod sap;
pub mod spc;
pub mod tiuna;
pub mod vgm;
pub mod zsm;

use std::fmt;
use std::str::FromStr;

use crate::chip::ChipType;
use crate::error::ExportError;
use crate::log::RegisterWrite;
use crate::options::EncodeOptions;
use crate::timing::Quantizer;

/// Supported export targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExportFormat {
    Vgm,
    Gym,
    Nsf,
    Gbs,
    Spc,
    Zsm,
    Sap,
    Tiuna,
}

/// Static per-format metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatDescriptor {
    pub format: ExportFormat,
    pub name: &'static str,
    pub extension: &'static str,
    pub mime_type: &'static str,
    pub chips: &'static [ChipType],
}

impl ExportFormat {
    /// All formats, VGM first.
    pub const ALL: [ExportFormat; 8] = [
        ExportFormat::Vgm,
        ExportFormat::Gym,
        ExportFormat::Nsf,
        ExportFormat::Gbs,
        ExportFormat::Spc,
        ExportFormat::Zsm,
        ExportFormat::Sap,
        ExportFormat::Tiuna,
    ];

    pub fn descriptor(self) -> &'static FormatDescriptor {
        match self {
            ExportFormat::Vgm => &vgm::DESCRIPTOR,
            ExportFormat::Gym => &gym::DESCRIPTOR,
            ExportFormat::Nsf => &nsf::DESCRIPTOR,
            ExportFormat::Gbs => &gbs::DESCRIPTOR,
            ExportFormat::Spc => &spc::DESCRIPTOR,
            ExportFormat::Zsm => &zsm::DESCRIPTOR,
            ExportFormat::Sap => &sap::DESCRIPTOR,
            ExportFormat::Tiuna => &tiuna::DESCRIPTOR,
        }
    }

    /// Short lowercase tag, also used as the file extension.
    pub fn tag(self) -> &'static str {
        self.descriptor().extension
    }

    pub fn can_export(self, writes: &[RegisterWrite]) -> bool {
        match self {
            ExportFormat::Vgm => vgm::can_export(writes),
            ExportFormat::Gym => gym::can_export(writes),
            ExportFormat::Nsf => nsf::can_export(writes),
            ExportFormat::Gbs => gbs::can_export(writes),
            ExportFormat::Spc => spc::can_export(writes),
            ExportFormat::Zsm => zsm::can_export(writes),
            ExportFormat::Sap => sap::can_export(writes),
            ExportFormat::Tiuna => tiuna::can_export(writes),
        }
    }

    pub fn encode(self, writes: &[RegisterWrite], options: &EncodeOptions) -> Vec<u8> {
        match self {
            ExportFormat::Vgm => vgm::encode(writes, options),
            ExportFormat::Gym => gym::encode(writes, options),
            ExportFormat::Nsf => nsf::encode(writes, options),
            ExportFormat::Gbs => gbs::encode(writes, options),
            ExportFormat::Spc => spc::encode(writes, options),
            ExportFormat::Zsm => zsm::encode(writes, options),
            ExportFormat::Sap => sap::encode(writes, options),
            ExportFormat::Tiuna => tiuna::encode(writes, options),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    /// Parse a case-insensitive format tag (`"vgm"`, `"NSF"`, `"tiuna"`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExportFormat::ALL
            .into_iter()
            .find(|format| format.tag().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ExportError::UnsupportedFormat(s.to_string()))
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.descriptor().name)
    }
}

/// True iff some write targets one of `chips`.
pub(crate) fn has_chip(writes: &[RegisterWrite], chips: &[ChipType]) -> bool {
    writes.iter().any(|w| chips.contains(&w.chip))
}

/// Loop position quantized onto `quantizer`'s tick grid.
pub(crate) fn loop_tick(options: &EncodeOptions, quantizer: &Quantizer) -> Option<u64> {
    options.loop_sample().map(|sample| quantizer.tick(sample))
}
