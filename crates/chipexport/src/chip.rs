//! Chip tags carried by register-write traces.
//!
//! `ChipType` mirrors the numeric tags the capture engine stores in each
//! trace record. Tags the engine may add later decode to
//! [`ChipType::Unknown`] so that a trace never fails to decode. The
//! [`mapper`] submodule translates writes for each export target.
pub mod mapper;

use std::fmt;

/// Emulated sound chip that produced a register write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChipType {
    /// Yamaha YM2612 (OPN2)
    Opn2,
    /// Yamaha YM2151 (OPM)
    Opm,
    /// Yamaha YMF262 (OPL3)
    Opl3,
    /// TI SN76489 / Sega PSG
    Psg,
    /// Ricoh 2A03 APU
    Nes,
    /// Game Boy DMG APU
    Gb,
    /// Hudson HuC6280
    Pce,
    /// Konami SCC (K051649)
    Scc,
    /// Namco 163
    N163,
    /// Konami VRC6
    Vrc6,
    /// SID3 (Furnace extended SID)
    Sid,
    /// Yamaha YM2413 (OPLL)
    Opll,
    /// General Instrument AY-3-8910
    Ay,
    /// Yamaha YM2608 (OPNA)
    Opna,
    /// Yamaha YM2610 (OPNB)
    Opnb,
    /// Atari 2600 TIA
    Tia,
    /// Famicom Disk System audio
    Fds,
    /// Nintendo MMC5
    Mmc5,
    /// Philips SAA1099
    Saa,
    /// Bandai WonderSwan
    Swan,
    /// OKI MSM6295
    Oki,
    /// Ensoniq ES5506
    Es5506,
    /// Yamaha YM2414 (OPZ)
    Opz,
    /// Yamaha Y8950
    Y8950,
    /// Sony S-DSP (SNES)
    Snes,
    /// Atari Lynx Mikey
    Lynx,
    /// Yamaha YMF278B (OPL4)
    Opl4,
    /// Sega PCM
    SegaPcm,
    /// Yamaha YMZ280B
    Ymz280b,
    /// Ricoh RF5C68
    Rf5c68,
    /// Irem GA20
    Ga20,
    /// Namco C140
    C140,
    /// Capcom QSound
    Qsound,
    /// Commodore VIC-20
    Vic,
    /// Commodore TED
    Ted,
    /// Watara Supervision
    Supervision,
    /// Commander X16 VERA PSG
    Vera,
    /// Sharp SM8521
    Sm8521,
    /// Konami Bubble System
    Bubble,
    /// Konami K007232
    K007232,
    /// Konami K053260
    K053260,
    /// Seta X1-010
    X1010,
    /// NEC uPD1771
    Upd1771,
    /// Toshiba T6W28 (Neo Geo Pocket)
    T6w28,
    /// Virtual Boy VSU
    Vb,
    /// MOS 6581 SID
    Sid6581,
    /// MOS 8580 SID
    Sid8580,
    /// Yamaha YM2203 (OPN)
    Opn,
    /// Yamaha YM2610B
    OpnbB,
    /// ESS ESFM
    Esfm,
    /// Microchip AY8930
    Ay8930,
    /// Nintendo DS sound
    Nds,
    /// Game Boy Advance DMA sound
    GbaDma,
    /// Game Boy Advance MinMod
    GbaMinmod,
    /// Pokémon mini
    Pokemini,
    /// Namco WSG
    Namco,
    /// Commodore PET
    Pet,
    /// Atari POKEY
    Pokey,
    /// OKI MSM6258
    Msm6258,
    /// OKI MSM5232
    Msm5232,
    /// Sega MultiPCM
    MultiPcm,
    /// Amiga Paula
    Amiga,
    /// PC speaker
    PcSpeaker,
    /// Pong
    Pong,
    /// Casio PV-1000
    Pv1000,
    /// A tag this crate does not know about
    Unknown(u8),
}

impl From<u8> for ChipType {
    fn from(value: u8) -> Self {
        match value {
            0 => ChipType::Opn2,
            1 => ChipType::Opm,
            2 => ChipType::Opl3,
            3 => ChipType::Psg,
            4 => ChipType::Nes,
            5 => ChipType::Gb,
            6 => ChipType::Pce,
            7 => ChipType::Scc,
            8 => ChipType::N163,
            9 => ChipType::Vrc6,
            10 => ChipType::Sid,
            11 => ChipType::Opll,
            12 => ChipType::Ay,
            13 => ChipType::Opna,
            14 => ChipType::Opnb,
            15 => ChipType::Tia,
            16 => ChipType::Fds,
            17 => ChipType::Mmc5,
            18 => ChipType::Saa,
            19 => ChipType::Swan,
            20 => ChipType::Oki,
            21 => ChipType::Es5506,
            22 => ChipType::Opz,
            23 => ChipType::Y8950,
            24 => ChipType::Snes,
            25 => ChipType::Lynx,
            26 => ChipType::Opl4,
            27 => ChipType::SegaPcm,
            28 => ChipType::Ymz280b,
            29 => ChipType::Rf5c68,
            30 => ChipType::Ga20,
            31 => ChipType::C140,
            32 => ChipType::Qsound,
            33 => ChipType::Vic,
            34 => ChipType::Ted,
            35 => ChipType::Supervision,
            36 => ChipType::Vera,
            37 => ChipType::Sm8521,
            38 => ChipType::Bubble,
            39 => ChipType::K007232,
            40 => ChipType::K053260,
            41 => ChipType::X1010,
            42 => ChipType::Upd1771,
            43 => ChipType::T6w28,
            44 => ChipType::Vb,
            45 => ChipType::Sid6581,
            46 => ChipType::Sid8580,
            47 => ChipType::Opn,
            48 => ChipType::OpnbB,
            49 => ChipType::Esfm,
            50 => ChipType::Ay8930,
            51 => ChipType::Nds,
            52 => ChipType::GbaDma,
            53 => ChipType::GbaMinmod,
            54 => ChipType::Pokemini,
            55 => ChipType::Namco,
            56 => ChipType::Pet,
            57 => ChipType::Pokey,
            58 => ChipType::Msm6258,
            59 => ChipType::Msm5232,
            60 => ChipType::MultiPcm,
            61 => ChipType::Amiga,
            62 => ChipType::PcSpeaker,
            63 => ChipType::Pong,
            64 => ChipType::Pv1000,
            other => ChipType::Unknown(other),
        }
    }
}

impl From<ChipType> for u8 {
    fn from(chip: ChipType) -> u8 {
        match chip {
            ChipType::Opn2 => 0,
            ChipType::Opm => 1,
            ChipType::Opl3 => 2,
            ChipType::Psg => 3,
            ChipType::Nes => 4,
            ChipType::Gb => 5,
            ChipType::Pce => 6,
            ChipType::Scc => 7,
            ChipType::N163 => 8,
            ChipType::Vrc6 => 9,
            ChipType::Sid => 10,
            ChipType::Opll => 11,
            ChipType::Ay => 12,
            ChipType::Opna => 13,
            ChipType::Opnb => 14,
            ChipType::Tia => 15,
            ChipType::Fds => 16,
            ChipType::Mmc5 => 17,
            ChipType::Saa => 18,
            ChipType::Swan => 19,
            ChipType::Oki => 20,
            ChipType::Es5506 => 21,
            ChipType::Opz => 22,
            ChipType::Y8950 => 23,
            ChipType::Snes => 24,
            ChipType::Lynx => 25,
            ChipType::Opl4 => 26,
            ChipType::SegaPcm => 27,
            ChipType::Ymz280b => 28,
            ChipType::Rf5c68 => 29,
            ChipType::Ga20 => 30,
            ChipType::C140 => 31,
            ChipType::Qsound => 32,
            ChipType::Vic => 33,
            ChipType::Ted => 34,
            ChipType::Supervision => 35,
            ChipType::Vera => 36,
            ChipType::Sm8521 => 37,
            ChipType::Bubble => 38,
            ChipType::K007232 => 39,
            ChipType::K053260 => 40,
            ChipType::X1010 => 41,
            ChipType::Upd1771 => 42,
            ChipType::T6w28 => 43,
            ChipType::Vb => 44,
            ChipType::Sid6581 => 45,
            ChipType::Sid8580 => 46,
            ChipType::Opn => 47,
            ChipType::OpnbB => 48,
            ChipType::Esfm => 49,
            ChipType::Ay8930 => 50,
            ChipType::Nds => 51,
            ChipType::GbaDma => 52,
            ChipType::GbaMinmod => 53,
            ChipType::Pokemini => 54,
            ChipType::Namco => 55,
            ChipType::Pet => 56,
            ChipType::Pokey => 57,
            ChipType::Msm6258 => 58,
            ChipType::Msm5232 => 59,
            ChipType::MultiPcm => 60,
            ChipType::Amiga => 61,
            ChipType::PcSpeaker => 62,
            ChipType::Pong => 63,
            ChipType::Pv1000 => 64,
            ChipType::Unknown(tag) => tag,
        }
    }
}

impl ChipType {
    /// Human readable chip name used in statistics and metadata.
    pub fn name(self) -> &'static str {
        match self {
            ChipType::Opn2 => "YM2612 (OPN2)",
            ChipType::Opm => "YM2151 (OPM)",
            ChipType::Opl3 => "YMF262 (OPL3)",
            ChipType::Psg => "SN76489 (PSG)",
            ChipType::Nes => "NES APU",
            ChipType::Gb => "Game Boy APU",
            ChipType::Pce => "HuC6280",
            ChipType::Scc => "Konami SCC",
            ChipType::N163 => "Namco 163",
            ChipType::Vrc6 => "Konami VRC6",
            ChipType::Sid => "SID3",
            ChipType::Opll => "YM2413 (OPLL)",
            ChipType::Ay => "AY-3-8910",
            ChipType::Opna => "YM2608 (OPNA)",
            ChipType::Opnb => "YM2610 (OPNB)",
            ChipType::Tia => "Atari TIA",
            ChipType::Fds => "Famicom Disk System",
            ChipType::Mmc5 => "MMC5",
            ChipType::Saa => "SAA1099",
            ChipType::Swan => "WonderSwan",
            ChipType::Oki => "MSM6295",
            ChipType::Es5506 => "ES5506",
            ChipType::Opz => "YM2414 (OPZ)",
            ChipType::Y8950 => "Y8950",
            ChipType::Snes => "SNES S-DSP",
            ChipType::Lynx => "Lynx Mikey",
            ChipType::Opl4 => "YMF278B (OPL4)",
            ChipType::SegaPcm => "Sega PCM",
            ChipType::Ymz280b => "YMZ280B",
            ChipType::Rf5c68 => "RF5C68",
            ChipType::Ga20 => "Irem GA20",
            ChipType::C140 => "Namco C140",
            ChipType::Qsound => "QSound",
            ChipType::Vic => "VIC-20",
            ChipType::Ted => "TED",
            ChipType::Supervision => "Supervision",
            ChipType::Vera => "VERA PSG",
            ChipType::Sm8521 => "SM8521",
            ChipType::Bubble => "Bubble System",
            ChipType::K007232 => "K007232",
            ChipType::K053260 => "K053260",
            ChipType::X1010 => "X1-010",
            ChipType::Upd1771 => "uPD1771",
            ChipType::T6w28 => "T6W28",
            ChipType::Vb => "Virtual Boy VSU",
            ChipType::Sid6581 => "SID 6581",
            ChipType::Sid8580 => "SID 8580",
            ChipType::Opn => "YM2203 (OPN)",
            ChipType::OpnbB => "YM2610B (OPNB-B)",
            ChipType::Esfm => "ESFM",
            ChipType::Ay8930 => "AY8930",
            ChipType::Nds => "Nintendo DS",
            ChipType::GbaDma => "GBA DMA",
            ChipType::GbaMinmod => "GBA MinMod",
            ChipType::Pokemini => "Pokémon mini",
            ChipType::Namco => "Namco WSG",
            ChipType::Pet => "Commodore PET",
            ChipType::Pokey => "POKEY",
            ChipType::Msm6258 => "MSM6258",
            ChipType::Msm5232 => "MSM5232",
            ChipType::MultiPcm => "MultiPCM",
            ChipType::Amiga => "Amiga Paula",
            ChipType::PcSpeaker => "PC Speaker",
            ChipType::Pong => "Pong",
            ChipType::Pv1000 => "PV-1000",
            ChipType::Unknown(_) => "Unknown",
        }
    }

    /// Real hardware oscillator frequency in Hz, when one is meaningful.
    ///
    /// Formats that declare per-chip clocks in their header (VGM) read this
    /// table; it is never modified at runtime.
    pub const fn clock(self) -> Option<u32> {
        match self {
            ChipType::Opn2 => Some(7_670_453),
            ChipType::Opm => Some(3_579_545),
            ChipType::Opl3 => Some(14_318_180),
            ChipType::Psg => Some(3_579_545),
            ChipType::Nes | ChipType::Fds | ChipType::Mmc5 => Some(1_789_773),
            ChipType::N163 | ChipType::Vrc6 => Some(1_789_773),
            ChipType::Gb => Some(4_194_304),
            ChipType::Pce => Some(3_579_545),
            ChipType::Scc => Some(1_789_773),
            ChipType::Opll => Some(3_579_545),
            ChipType::Ay | ChipType::Ay8930 => Some(1_789_773),
            ChipType::Opna => Some(7_987_200),
            ChipType::Opnb | ChipType::OpnbB => Some(8_000_000),
            ChipType::Opn => Some(3_993_600),
            ChipType::Tia => Some(3_579_545),
            ChipType::Saa => Some(8_000_000),
            ChipType::Swan => Some(3_072_000),
            ChipType::Oki => Some(1_000_000),
            ChipType::Es5506 => Some(16_000_000),
            ChipType::Opz => Some(3_579_545),
            ChipType::Y8950 => Some(3_579_545),
            ChipType::Snes => Some(1_024_000),
            ChipType::Lynx => Some(16_000_000),
            ChipType::Opl4 => Some(33_868_800),
            ChipType::SegaPcm => Some(4_000_000),
            ChipType::Ymz280b => Some(16_934_400),
            ChipType::Rf5c68 => Some(12_500_000),
            ChipType::Ga20 => Some(3_579_545),
            ChipType::C140 => Some(21_390),
            ChipType::Qsound => Some(4_000_000),
            ChipType::Vic => Some(1_022_727),
            ChipType::Ted => Some(886_724),
            ChipType::Vera => Some(25_000_000),
            ChipType::K007232 => Some(3_579_545),
            ChipType::K053260 => Some(3_579_545),
            ChipType::X1010 => Some(16_000_000),
            ChipType::T6w28 => Some(3_072_000),
            ChipType::Vb => Some(5_000_000),
            ChipType::Sid | ChipType::Sid6581 | ChipType::Sid8580 => Some(985_248),
            ChipType::Esfm => Some(14_318_180),
            ChipType::Pokey => Some(1_789_773),
            ChipType::Msm6258 => Some(4_000_000),
            ChipType::Msm5232 => Some(2_119_040),
            ChipType::MultiPcm => Some(8_053_975),
            _ => None,
        }
    }
}

impl fmt::Display for ChipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChipType::Unknown(tag) => write!(f, "Unknown ({})", tag),
            other => f.write_str(other.name()),
        }
    }
}
