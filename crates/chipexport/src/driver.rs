//! Embedded playback drivers.
//!
//! NSF, GBS and SPC files are programs: the player loads an image into the
//! target CPU's address space and calls an INIT routine once and a PLAY
//! routine once per frame. Each supported CPU has a small hand-assembled
//! driver made of two immutable templates plus a list of [`PatchSite`]s.
//! Linking copies the templates, writes the absolute data and loop
//! addresses (and on SPC700 the timer divider) into the patch sites and
//! appends the register stream.
//!
//! The data stream the drivers walk is the same on every CPU:
//!
//! - `rr vv`: write `vv` to register `rr` (relative to the CPU's sound
//!   register base)
//! - `0xFF`: end of frame, PLAY returns
//! - `0xFE`: end of song, the data pointer is reloaded from the loop word
//!
//! Mappers keep every register offset below `0xFE`.
pub mod mos6502;
pub mod sm83;
pub mod spc700;

use crate::log::RegisterWrite;
use crate::loops::{DriverGrammar, StreamGrammar};
use crate::stream::StreamSpec;
use crate::wait;

/// End-of-song sentinel in a driver data stream.
pub const SONG_END: u8 = 0xFE;

/// CPU a driver is assembled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cpu {
    /// MOS 6502 / Ricoh 2A03 (NES)
    Mos6502,
    /// Sharp SM83 / LR35902 (Game Boy)
    Sm83,
    /// Sony SPC700 (SNES sound CPU)
    Spc700,
}

impl Cpu {
    pub fn name(self) -> &'static str {
        match self {
            Cpu::Mos6502 => "MOS 6502",
            Cpu::Sm83 => "Sharp SM83",
            Cpu::Spc700 => "Sony SPC700",
        }
    }
}

/// Driver routine a patch site lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routine {
    Init,
    Play,
}

/// Value a patch site receives at link time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchMeaning {
    /// Absolute address of the first data byte (16-bit LE).
    DataStart,
    /// Absolute address playback resumes at after `SONG_END` (16-bit LE).
    LoopStart,
    /// Timer divider selecting the frame rate (8-bit).
    TimerTarget,
}

/// Fixed template offset overwritten before the image is finalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchSite {
    pub routine: Routine,
    pub offset: usize,
    pub width: usize,
    pub meaning: PatchMeaning,
}

/// One `(register, value)` pair of a driver data stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterPair {
    pub register: u8,
    pub value: u8,
}

impl RegisterPair {
    pub fn push(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&[self.register, self.value]);
    }
}

/// A hand-assembled driver for one CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbeddedDriver {
    pub cpu: Cpu,
    pub load_address: u16,
    pub init: &'static [u8],
    pub play: &'static [u8],
    pub patch_sites: &'static [PatchSite],
    /// First address past the region the data stream may occupy.
    pub data_limit: u32,
}

/// Output of [`EmbeddedDriver::link`]: the image loaded at `load_address`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedDriver {
    pub image: Vec<u8>,
    pub data_start: u16,
    pub loop_start: u16,
    /// The data stream did not fit and was cut at a frame boundary.
    pub truncated: bool,
}

impl EmbeddedDriver {
    pub const fn code_len(&self) -> usize {
        self.init.len() + self.play.len()
    }

    pub const fn init_address(&self) -> u16 {
        self.load_address
    }

    pub const fn play_address(&self) -> u16 {
        self.load_address.wrapping_add(self.init.len() as u16)
    }

    /// First data byte: `(load address + INIT length + PLAY length) mod 0x10000`.
    pub const fn data_start(&self) -> u16 {
        ((self.load_address as usize + self.code_len()) % 0x1_0000) as u16
    }

    /// Bytes available to the data stream.
    pub fn data_capacity(&self) -> usize {
        (self.data_limit as usize).saturating_sub(self.data_start() as usize)
    }

    /// Stream description for this driver's data language at `tick_rate`.
    pub fn stream_spec(
        &self,
        tick_rate: u32,
        map: fn(&RegisterWrite) -> Option<RegisterPair>,
    ) -> StreamSpec<RegisterPair> {
        StreamSpec {
            tick_rate,
            map,
            push: RegisterPair::push,
            wait: wait::frame_sentinel,
            end: &[SONG_END],
        }
    }

    /// Patch the templates and append `data`.
    ///
    /// `loop_offset` is a byte offset into `data`; `None` loops to the data
    /// start. `timer_target` fills any [`PatchMeaning::TimerTarget`] site;
    /// `None` keeps the template's value.
    pub fn link(
        &self,
        data: &[u8],
        loop_offset: Option<usize>,
        timer_target: Option<u8>,
    ) -> LinkedDriver {
        let (data, truncated) = fit_stream(data, self.data_capacity());
        if truncated {
            tracing::warn!(
                cpu = self.cpu.name(),
                capacity = self.data_capacity(),
                kept = data.len(),
                "driver data exceeds the address window, truncated at a frame boundary"
            );
        }
        let loop_offset = loop_offset.filter(|&offset| offset < data.len()).unwrap_or(0);
        let data_start = self.data_start();
        let loop_start = data_start.wrapping_add(loop_offset as u16);

        let mut init = self.init.to_vec();
        let mut play = self.play.to_vec();
        for site in self.patch_sites {
            let routine = match site.routine {
                Routine::Init => &mut init,
                Routine::Play => &mut play,
            };
            let bytes = match site.meaning {
                PatchMeaning::DataStart => data_start.to_le_bytes(),
                PatchMeaning::LoopStart => loop_start.to_le_bytes(),
                PatchMeaning::TimerTarget => match timer_target {
                    Some(target) => [target, 0],
                    None => continue,
                },
            };
            routine[site.offset..site.offset + site.width].copy_from_slice(&bytes[..site.width]);
        }

        let mut image = Vec::with_capacity(self.code_len() + data.len());
        image.extend_from_slice(&init);
        image.extend_from_slice(&play);
        image.extend_from_slice(&data);
        LinkedDriver {
            image,
            data_start,
            loop_start,
            truncated,
        }
    }
}

/// Cut `stream` to at most `capacity` bytes at a frame boundary and
/// terminate it with `SONG_END`.
fn fit_stream(stream: &[u8], capacity: usize) -> (Vec<u8>, bool) {
    if stream.len() <= capacity {
        return (stream.to_vec(), false);
    }
    let mut cut = 0;
    let mut offset = 0;
    while let Some(step) = DriverGrammar.step(stream, offset) {
        offset += step.len;
        if offset + 1 > capacity {
            break;
        }
        if step.ticks > 0 {
            cut = offset;
        }
    }
    let mut out = stream[..cut].to_vec();
    out.push(SONG_END);
    (out, true)
}

/// The three drivers, in listing order.
pub fn all() -> [&'static EmbeddedDriver; 3] {
    [&mos6502::DRIVER, &sm83::DRIVER, &spc700::DRIVER]
}
