//! VGM 1.72 header.
//!
//! The header occupies the first 0x100 bytes of the file (the relative data
//! offset at 0x34 is 0xCC). Offsets stored in the header (EOF, GD3, loop,
//! data) are relative to their own field position as the format requires;
//! [`VgmHeader::to_bytes`] takes absolute positions and converts them.
use crate::binutil::{Endian, write_slice, write_u8, write_u16, write_u32};
use crate::chip::ChipType;

/// Size of the serialized header; command data starts right after it.
pub const VGM_HEADER_SIZE: usize = 0x100;

/// Version written to new files (1.72, BCD).
pub const VGM_VERSION: u32 = 0x0000_0172;

/// Bit 31 of a clock field: chip-variant flag (FDS on the NES APU, YM2610B,
/// T6W28 together with [`DUAL_CHIP`]).
const CLOCK_FLAG: u32 = 0x8000_0000;

/// Bit 30 of a clock field: a second chip of the same type is present.
const DUAL_CHIP: u32 = 0x4000_0000;

/// Header fields and their on-disk offsets.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VgmHeaderField {
    Ident,
    EofOffset,
    Version,
    Sn76489Clock,
    Ym2413Clock,
    Gd3Offset,
    TotalSamples,
    LoopOffset,
    LoopSamples,
    SnFb,
    Snw,
    Ym2612Clock,
    Ym2151Clock,
    DataOffset,
    SegaPcmClock,
    SpcmInterface,
    Rf5c68Clock,
    Ym2203Clock,
    Ym2608Clock,
    Ym2610bClock,
    Y8950Clock,
    Ymf262Clock,
    Ymf278bClock,
    Ymz280bClock,
    Ay8910Clock,
    AyType,
    GbDmgClock,
    NesApuClock,
    MultipcmClock,
    Okim6258Clock,
    Okim6295Clock,
    K051649Clock,
    Huc6280Clock,
    C140Clock,
    K053260Clock,
    PokeyClock,
    WonderSwanClock,
    VsuClock,
    Saa1099Clock,
    Es5506Clock,
    X1010Clock,
    Ga20Clock,
    MikeyClock,
}

impl VgmHeaderField {
    pub fn offset(self) -> usize {
        match self {
            VgmHeaderField::Ident => 0x00,
            VgmHeaderField::EofOffset => 0x04,
            VgmHeaderField::Version => 0x08,
            VgmHeaderField::Sn76489Clock => 0x0C,
            VgmHeaderField::Ym2413Clock => 0x10,
            VgmHeaderField::Gd3Offset => 0x14,
            VgmHeaderField::TotalSamples => 0x18,
            VgmHeaderField::LoopOffset => 0x1C,
            VgmHeaderField::LoopSamples => 0x20,
            VgmHeaderField::SnFb => 0x28,
            VgmHeaderField::Snw => 0x2A,
            VgmHeaderField::Ym2612Clock => 0x2C,
            VgmHeaderField::Ym2151Clock => 0x30,
            VgmHeaderField::DataOffset => 0x34,
            VgmHeaderField::SegaPcmClock => 0x38,
            VgmHeaderField::SpcmInterface => 0x3C,
            VgmHeaderField::Rf5c68Clock => 0x40,
            VgmHeaderField::Ym2203Clock => 0x44,
            VgmHeaderField::Ym2608Clock => 0x48,
            VgmHeaderField::Ym2610bClock => 0x4C,
            VgmHeaderField::Y8950Clock => 0x58,
            VgmHeaderField::Ymf262Clock => 0x5C,
            VgmHeaderField::Ymf278bClock => 0x60,
            VgmHeaderField::Ymz280bClock => 0x68,
            VgmHeaderField::Ay8910Clock => 0x74,
            VgmHeaderField::AyType => 0x78,
            VgmHeaderField::GbDmgClock => 0x80,
            VgmHeaderField::NesApuClock => 0x84,
            VgmHeaderField::MultipcmClock => 0x88,
            VgmHeaderField::Okim6258Clock => 0x90,
            VgmHeaderField::Okim6295Clock => 0x98,
            VgmHeaderField::K051649Clock => 0x9C,
            VgmHeaderField::Huc6280Clock => 0xA4,
            VgmHeaderField::C140Clock => 0xA8,
            VgmHeaderField::K053260Clock => 0xAC,
            VgmHeaderField::PokeyClock => 0xB0,
            VgmHeaderField::WonderSwanClock => 0xC0,
            VgmHeaderField::VsuClock => 0xC4,
            VgmHeaderField::Saa1099Clock => 0xC8,
            VgmHeaderField::Es5506Clock => 0xD0,
            VgmHeaderField::X1010Clock => 0xD8,
            VgmHeaderField::Ga20Clock => 0xE0,
            VgmHeaderField::MikeyClock => 0xE4,
        }
    }

    /// Clock field that declares `chip`, if VGM can carry it.
    pub fn clock_for(chip: ChipType) -> Option<VgmHeaderField> {
        let field = match chip {
            ChipType::Psg | ChipType::T6w28 => VgmHeaderField::Sn76489Clock,
            ChipType::Opll => VgmHeaderField::Ym2413Clock,
            ChipType::Opn2 => VgmHeaderField::Ym2612Clock,
            ChipType::Opm => VgmHeaderField::Ym2151Clock,
            ChipType::SegaPcm => VgmHeaderField::SegaPcmClock,
            ChipType::Rf5c68 => VgmHeaderField::Rf5c68Clock,
            ChipType::Opn => VgmHeaderField::Ym2203Clock,
            ChipType::Opna => VgmHeaderField::Ym2608Clock,
            ChipType::Opnb | ChipType::OpnbB => VgmHeaderField::Ym2610bClock,
            ChipType::Y8950 => VgmHeaderField::Y8950Clock,
            ChipType::Opl3 => VgmHeaderField::Ymf262Clock,
            ChipType::Opl4 => VgmHeaderField::Ymf278bClock,
            ChipType::Ymz280b => VgmHeaderField::Ymz280bClock,
            ChipType::Ay | ChipType::Ay8930 => VgmHeaderField::Ay8910Clock,
            ChipType::Gb => VgmHeaderField::GbDmgClock,
            ChipType::Nes | ChipType::Fds => VgmHeaderField::NesApuClock,
            ChipType::MultiPcm => VgmHeaderField::MultipcmClock,
            ChipType::Msm6258 => VgmHeaderField::Okim6258Clock,
            ChipType::Oki => VgmHeaderField::Okim6295Clock,
            ChipType::Scc => VgmHeaderField::K051649Clock,
            ChipType::Pce => VgmHeaderField::Huc6280Clock,
            ChipType::C140 => VgmHeaderField::C140Clock,
            ChipType::K053260 => VgmHeaderField::K053260Clock,
            ChipType::Pokey => VgmHeaderField::PokeyClock,
            ChipType::Swan => VgmHeaderField::WonderSwanClock,
            ChipType::Vb => VgmHeaderField::VsuClock,
            ChipType::Saa => VgmHeaderField::Saa1099Clock,
            ChipType::Es5506 => VgmHeaderField::Es5506Clock,
            ChipType::X1010 => VgmHeaderField::X1010Clock,
            ChipType::Ga20 => VgmHeaderField::Ga20Clock,
            ChipType::Lynx => VgmHeaderField::MikeyClock,
            _ => return None,
        };
        Some(field)
    }
}

/// Header values that depend on the chips present in the stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VgmHeader {
    pub total_samples: u32,
    pub loop_samples: u32,
    clocks: Vec<(VgmHeaderField, ChipType, u32)>,
    sn_fb: u16,
    snw: u8,
    ay_type: u8,
    spcm_interface: u32,
}

impl VgmHeader {
    /// Declare `chip` in the header with its hardware clock.
    ///
    /// Variant chips set the flags their decoders look for: FDS and
    /// YM2610B raise bit 31 of the shared clock. T6W28 raises bits 31 and
    /// 30 (a dual SN76489 pair) and gets its own noise feedback pattern.
    /// AY8930 sets the AY chip type.
    ///
    /// A clock field holds one chip. When a second, unrelated chip claims
    /// the same field the first chip's clock is kept.
    pub fn set_chip_clock(&mut self, chip: ChipType) {
        let (Some(field), Some(clock)) = (VgmHeaderField::clock_for(chip), chip.clock()) else {
            return;
        };
        let flag = match chip {
            ChipType::Fds | ChipType::OpnbB => CLOCK_FLAG,
            ChipType::T6w28 => CLOCK_FLAG | DUAL_CHIP,
            _ => 0,
        };
        match self.clocks.iter_mut().find(|(f, _, _)| *f == field) {
            Some((_, owner, value)) => {
                if !shares_clock(*owner, chip) {
                    tracing::warn!(
                        field = ?field,
                        kept = owner.name(),
                        dropped = chip.name(),
                        "two chips share one VGM clock field"
                    );
                }
                *value |= flag;
            }
            None => self.clocks.push((field, chip, clock | flag)),
        }

        match chip {
            ChipType::Psg if self.sn_fb == 0 => {
                self.sn_fb = 0x0009;
                self.snw = 16;
            }
            ChipType::T6w28 => {
                self.sn_fb = 0x0003;
                self.snw = 15;
            }
            ChipType::Ay8930 => self.ay_type = 0x03,
            ChipType::SegaPcm => self.spcm_interface = 0x000F_0000,
            _ => {}
        }
    }

    /// Stored clock value for `field`, 0 when the chip is absent.
    pub fn clock(&self, field: VgmHeaderField) -> u32 {
        self.clocks
            .iter()
            .find(|(f, _, _)| *f == field)
            .map_or(0, |(_, _, clock)| *clock)
    }

    /// Serialize the header.
    ///
    /// `file_len`, `gd3_pos` and `loop_pos` are absolute byte positions; a
    /// `loop_pos` of `None` writes the "no loop" zero offset.
    pub fn to_bytes(&self, file_len: usize, gd3_pos: usize, loop_pos: Option<usize>) -> Vec<u8> {
        let mut buf = vec![0u8; VGM_HEADER_SIZE];
        let le = Endian::Little;
        let rel = |pos: usize, field: VgmHeaderField| (pos - field.offset()) as u32;

        write_slice(&mut buf, VgmHeaderField::Ident.offset(), b"Vgm ");
        write_u32(
            &mut buf,
            VgmHeaderField::EofOffset.offset(),
            rel(file_len, VgmHeaderField::EofOffset),
            le,
        );
        write_u32(&mut buf, VgmHeaderField::Version.offset(), VGM_VERSION, le);
        write_u32(
            &mut buf,
            VgmHeaderField::Gd3Offset.offset(),
            rel(gd3_pos, VgmHeaderField::Gd3Offset),
            le,
        );
        write_u32(
            &mut buf,
            VgmHeaderField::TotalSamples.offset(),
            self.total_samples,
            le,
        );
        if let Some(pos) = loop_pos {
            write_u32(
                &mut buf,
                VgmHeaderField::LoopOffset.offset(),
                rel(pos, VgmHeaderField::LoopOffset),
                le,
            );
            write_u32(
                &mut buf,
                VgmHeaderField::LoopSamples.offset(),
                self.loop_samples,
                le,
            );
        }
        write_u32(
            &mut buf,
            VgmHeaderField::DataOffset.offset(),
            rel(VGM_HEADER_SIZE, VgmHeaderField::DataOffset),
            le,
        );

        for &(field, _, clock) in &self.clocks {
            write_u32(&mut buf, field.offset(), clock, le);
        }
        write_u16(&mut buf, VgmHeaderField::SnFb.offset(), self.sn_fb, le);
        write_u8(&mut buf, VgmHeaderField::Snw.offset(), self.snw);
        write_u8(&mut buf, VgmHeaderField::AyType.offset(), self.ay_type);
        write_u32(
            &mut buf,
            VgmHeaderField::SpcmInterface.offset(),
            self.spcm_interface,
            le,
        );
        buf
    }
}

/// Chips that can be declared in one clock field together.
fn shares_clock(a: ChipType, b: ChipType) -> bool {
    a == b || matches!((a, b), (ChipType::Nes, ChipType::Fds) | (ChipType::Fds, ChipType::Nes))
}
