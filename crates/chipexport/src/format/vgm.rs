//! VGM (Video Game Music) 1.72 encoder.
//!
//! The universal target: every chip with a VGM write command is carried in
//! one file. The layout is:
//!
//! | range                 | content                                  |
//! |-----------------------|------------------------------------------|
//! | `0x000..0x100`        | header (see [`header`])                  |
//! | `0x100..`             | command stream at 44 100 Hz, `0x66` end  |
//! | after the stream      | GD3 1.00 metadata chunk                  |
//!
//! The header declares a clock for every chip that produced at least one
//! emitted command, with the variant flags (FDS, YM2610B, T6W28, AY8930)
//! its decoders need.
pub mod command;
pub mod header;

use std::collections::BTreeSet;

use crate::chip::{ChipType, mapper};
use crate::format::{ExportFormat, FormatDescriptor, has_chip, loop_tick};
use crate::log::RegisterWrite;
use crate::loops::{VgmGrammar, resolve_loop};
use crate::meta::Gd3;
use crate::options::EncodeOptions;
use crate::stream::{StreamSpec, encode_stream};
use crate::timing::{Quantizer, VGM_SAMPLE_RATE};
use crate::wait;

use self::command::{END_OF_SOUND_DATA, VgmCommand};
use self::header::{VGM_HEADER_SIZE, VgmHeader};

/// Chips with a VGM write command.
pub const CHIPS: &[ChipType] = &[
    ChipType::Psg,
    ChipType::T6w28,
    ChipType::Opll,
    ChipType::Opn2,
    ChipType::Opm,
    ChipType::Opn,
    ChipType::Opna,
    ChipType::Opnb,
    ChipType::OpnbB,
    ChipType::Y8950,
    ChipType::Ymz280b,
    ChipType::Opl3,
    ChipType::Opl4,
    ChipType::Lynx,
    ChipType::Ay,
    ChipType::Ay8930,
    ChipType::Rf5c68,
    ChipType::Gb,
    ChipType::Nes,
    ChipType::Fds,
    ChipType::MultiPcm,
    ChipType::Msm6258,
    ChipType::Oki,
    ChipType::Pce,
    ChipType::K053260,
    ChipType::Pokey,
    ChipType::Swan,
    ChipType::Saa,
    ChipType::Es5506,
    ChipType::Ga20,
    ChipType::SegaPcm,
    ChipType::Vb,
    ChipType::X1010,
    ChipType::Scc,
    ChipType::C140,
];

pub const DESCRIPTOR: FormatDescriptor = FormatDescriptor {
    format: ExportFormat::Vgm,
    name: "VGM (Video Game Music)",
    extension: "vgm",
    mime_type: "audio/x-vgm",
    chips: CHIPS,
};

/// Value of the GD3 "creator" field.
const CREATOR: &str = "chipexport";

const STREAM: StreamSpec<VgmCommand> = StreamSpec {
    tick_rate: VGM_SAMPLE_RATE,
    map: mapper::vgm,
    push: VgmCommand::push,
    wait: wait::vgm,
    end: &[END_OF_SOUND_DATA],
};

pub fn can_export(writes: &[RegisterWrite]) -> bool {
    has_chip(writes, CHIPS)
}

pub fn encode(writes: &[RegisterWrite], options: &EncodeOptions) -> Vec<u8> {
    let quantizer = Quantizer::new(options.source_sample_rate, VGM_SAMPLE_RATE);
    let loop_tick = loop_tick(options, &quantizer);
    let stream = encode_stream(&STREAM, writes, options.source_sample_rate, loop_tick);
    let resolved = loop_tick.and_then(|tick| resolve_loop(&stream.bytes, &VgmGrammar, tick));

    let chips: BTreeSet<ChipType> = writes
        .iter()
        .filter(|w| mapper::vgm(w).is_some())
        .map(|w| w.chip)
        .collect();
    let mut header = VgmHeader::default();
    for &chip in &chips {
        header.set_chip_clock(chip);
    }
    header.total_samples = clamp_u32(stream.total_ticks);
    header.loop_samples = resolved.map_or(0, |r| clamp_u32(r.length));

    let system = chips
        .iter()
        .map(|chip| chip.name())
        .collect::<Vec<_>>()
        .join(" + ");
    let gd3 = Gd3::from_metadata(&options.metadata, &system, CREATOR).to_bytes();

    let gd3_pos = VGM_HEADER_SIZE + stream.bytes.len();
    let file_len = gd3_pos + gd3.len();
    let loop_pos = resolved.map(|r| VGM_HEADER_SIZE + r.offset);

    let mut out = header.to_bytes(file_len, gd3_pos, loop_pos);
    out.extend_from_slice(&stream.bytes);
    out.extend_from_slice(&gd3);
    tracing::debug!(
        chips = chips.len(),
        samples = stream.total_ticks,
        looped = loop_pos.is_some(),
        bytes = out.len(),
        "encoded VGM"
    );
    out
}

fn clamp_u32(v: u64) -> u32 {
    u32::try_from(v).unwrap_or(u32::MAX)
}
