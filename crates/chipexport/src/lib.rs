#![doc = include_str!("../README.md")]
//! chipexport: converts retro sound-chip register-write traces into chip
//! music files
//!
//! A trace is what a tracker's audio engine records while it plays: every
//! byte written to every emulated sound chip, stamped with its position on
//! the sample clock. `chipexport` turns such a trace into files that real
//! players and real hardware understand.
//!
//! Supported targets:
//! - VGM 1.72 with GD3 tags (any chip VGM knows)
//! - GYM, with optional GYMX header (Mega Drive YM2612 + PSG)
//! - NSF (NES APU + FDS), embedding a 6502 driver
//! - GBS (Game Boy APU), embedding an SM83 driver
//! - SPC (SNES S-DSP), embedding an SPC700 driver in a full RAM snapshot
//! - ZSM (Commander X16 YM2151 + VERA PSG)
//! - SAP type R (Atari 8-bit POKEY, mono or stereo)
//! - TIunA (Atari 2600 TIA)
//!
//! Pipeline
//!
//! Raw trace bytes are decoded by [`decode_log`] into [`RegisterWrite`]s.
//! Each format maps the writes it can carry with a per-chip mapper
//! ([`chip::mapper`]), quantizes timestamps onto its own tick grid
//! ([`timing::Quantizer`]), run-length encodes the gaps ([`wait`]) and
//! assembles header and data. Loop points are located by replaying the
//! finished stream ([`loops::resolve_loop`]). CPU-hosted formats link an
//! embedded driver ([`driver`]) in front of the data.
//!
//! Example: one-call export
//!
//! ```rust
//! use chipexport::{ChipType, ExportOptions, RegisterWrite, encode_log, export};
//!
//! let trace = encode_log(&[
//!     RegisterWrite::new(0, ChipType::Nes, 0x4015, 0x0F),
//!     RegisterWrite::new(0, ChipType::Nes, 0x4000, 0xBF),
//!     RegisterWrite::new(735, ChipType::Nes, 0x4002, 0xFD),
//! ]);
//! let options = ExportOptions {
//!     title: Some("Demo".to_string()),
//!     ..Default::default()
//! };
//! let result = export(&trace, "nsf", &options).unwrap();
//! assert_eq!(result.filename, "Demo.nsf");
//! assert_eq!(&result.bytes[..5], b"NESM\x1A");
//! ```
//!
//! Example: choosing a format
//!
//! ```rust
//! use chipexport::{ChipType, ExportFormat, RegisterWrite, available_formats};
//!
//! let writes = [RegisterWrite::new(0, ChipType::Gb, 0xFF26, 0x80)];
//! let formats: Vec<ExportFormat> = available_formats(&writes)
//!     .iter()
//!     .map(|d| d.format)
//!     .collect();
//! assert_eq!(formats, vec![ExportFormat::Vgm, ExportFormat::Gbs]);
//! ```
mod binutil;
pub mod chip;
pub mod driver;
pub mod error;
pub mod format;
pub mod log;
pub mod loops;
pub mod meta;
pub mod options;
pub mod registry;
pub mod stream;
pub mod timing;
pub mod wait;

pub use chip::ChipType;
pub use error::{ExportError, Result};
pub use format::{ExportFormat, FormatDescriptor};
pub use log::{RegisterWrite, decode_log, encode_log};
pub use meta::Metadata;
pub use options::{EncodeOptions, ExportOptions, LoopPoint};
pub use registry::{ChipStats, ExportResult, TraceStats, available_formats, export, statistics};
