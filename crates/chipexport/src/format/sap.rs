//! SAP (Slight Atari Player) type R encoder.
//!
//! Type R files carry no 6502 code: after the text header, each frame is a
//! raw dump of the nine POKEY registers AUDF1, AUDC1 .. AUDF4, AUDC4,
//! AUDCTL, which the player writes verbatim once per frame. Stereo files
//! store the second POKEY's nine bytes right after the first's.
//!
//! ```text
//! SAP
//! AUTHOR "..."
//! NAME "..."
//! DATE "..."
//! TYPE R
//! NTSC                 ; 60 Hz frames
//! FASTPLAY 312         ; scanlines per frame, non-standard rates only
//! STEREO               ; dual POKEY
//! TIME 01:23.456 LOOP
//! ```
//!
//! Lines end in CRLF.
use crate::chip::{ChipType, mapper};
use crate::format::{ExportFormat, FormatDescriptor, has_chip};
use crate::log::{RegisterWrite, sorted_by_time};
use crate::options::EncodeOptions;

pub const CHIPS: &[ChipType] = &[ChipType::Pokey];

pub const DESCRIPTOR: FormatDescriptor = FormatDescriptor {
    format: ExportFormat::Sap,
    name: "SAP (Atari 8-bit POKEY)",
    extension: "sap",
    mime_type: "audio/x-sap",
    chips: CHIPS,
};

/// AUDF1..AUDCTL.
pub const POKEY_FRAME_REGISTERS: usize = 9;
/// PAL scanlines per second; FASTPLAY is expressed in scanlines.
const PAL_SCANLINES_PER_SECOND: u32 = 15_600;
const UNKNOWN: &str = "<?>";

/// One POKEY register write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PokeyWrite {
    /// 0 = left (or only) POKEY, 1 = right.
    pub chip: u8,
    pub register: u8,
    pub value: u8,
}

pub fn can_export(writes: &[RegisterWrite]) -> bool {
    has_chip(writes, CHIPS)
}

fn quoted(value: &str) -> String {
    let value: String = value
        .chars()
        .map(|c| if c == '"' || !c.is_ascii() || c.is_ascii_control() { '?' } else { c })
        .collect();
    if value.trim().is_empty() {
        UNKNOWN.to_string()
    } else {
        value
    }
}

/// `mm:ss.xxx` as used by the TIME tag.
fn format_time(millis: u64) -> String {
    format!(
        "{:02}:{:02}.{:03}",
        millis / 60_000,
        (millis / 1000) % 60,
        millis % 1000
    )
}

/// Text header for `frames` frames at `frame_rate`.
fn header(options: &EncodeOptions, frames: u64, stereo: bool, looped: bool) -> String {
    let meta = &options.metadata;
    let rate = options.frame_rate.max(1);
    let mut text = String::new();
    let mut line = |s: &str| {
        text.push_str(s);
        text.push_str("\r\n");
    };
    line("SAP");
    line(&format!("AUTHOR \"{}\"", quoted(&meta.author)));
    line(&format!("NAME \"{}\"", quoted(&meta.title)));
    line(&format!("DATE \"{}\"", quoted(&meta.date)));
    line("TYPE R");
    match rate {
        50 => {}
        60 => line("NTSC"),
        _ => {
            let scanlines = (PAL_SCANLINES_PER_SECOND + rate / 2) / rate;
            line(&format!("FASTPLAY {}", scanlines.max(1)));
        }
    }
    if stereo {
        line("STEREO");
    }
    let millis = frames * 1000 / rate as u64;
    let mut time = format!("TIME {}", format_time(millis));
    if looped {
        time.push_str(" LOOP");
    }
    line(&time);
    text
}

pub fn encode(writes: &[RegisterWrite], options: &EncodeOptions) -> Vec<u8> {
    let quantizer = options.quantizer(options.frame_rate);
    let sorted = sorted_by_time(writes);
    let stereo = sorted.iter().filter_map(mapper::pokey).any(|p| p.chip == 1);
    let chips = if stereo { 2 } else { 1 };

    let last = sorted.last().map_or(0, |w| quantizer.tick(w.timestamp as u64));
    let frames = last + 1;
    let looped = options
        .loop_sample()
        .is_some_and(|sample| quantizer.tick(sample) < last);

    let mut out = header(options, frames, stereo, looped).into_bytes();
    let mut state = [[0u8; POKEY_FRAME_REGISTERS]; 2];
    let mut written = 0usize;
    let mut pending = quantizer.frames(&sorted).into_iter().peekable();
    for frame in 0..frames {
        if let Some(due) = pending.next_if(|f| f.tick == frame) {
            for write in due.writes.into_iter().filter_map(mapper::pokey) {
                state[write.chip as usize][write.register as usize] = write.value;
                written += 1;
            }
        }
        for registers in &state[..chips] {
            out.extend_from_slice(registers);
        }
    }

    tracing::debug!(frames, stereo, writes = written, "encoded SAP");
    out
}
