//! Chip register mappers.
//!
//! One pure function per export target translating a trace write into the
//! target's addressing scheme. `None` means the target cannot carry the
//! write (wrong chip, or a port outside the target's register window) and
//! the caller skips it.
use crate::chip::ChipType;
use crate::driver::RegisterPair;
use crate::format::gym::GymCommand;
use crate::format::sap::PokeyWrite;
use crate::format::tiuna::TiaWrite;
use crate::format::vgm::command::VgmCommand;
use crate::format::zsm::ZsmCommand;
use crate::log::RegisterWrite;

/// Dual-port chips select their second register bank with bit 8 of the port.
fn bank(port: u32) -> u8 {
    ((port >> 8) & 1) as u8
}

fn low(port: u32) -> u8 {
    (port & 0xFF) as u8
}

/// Fold a NES/FDS CPU address into the VGM NES APU register space.
///
/// - `$4000-$401F` → `0x00-0x1F`
/// - `$4080-$409E` → `0x20-0x3E`
/// - `$4023`       → `0x3F`
/// - `$4040-$407F` → `0x40-0x7F`
///
/// Bare offsets below `0x20` are accepted as already folded APU registers.
fn vgm_nes_register(port: u32) -> Option<u8> {
    match port {
        0x00..=0x1F => Some(port as u8),
        0x4023 => Some(0x3F),
        0x4000..=0x401F => Some((port - 0x4000) as u8),
        0x4040..=0x407F => Some((port - 0x4000) as u8),
        0x4080..=0x409E => Some((port - 0x4080 + 0x20) as u8),
        _ => None,
    }
}

/// Game Boy sound registers live at `$FF10-$FF3F`; traces may carry either
/// the full address or the `$FF00`-relative offset.
fn game_boy_offset(port: u32) -> Option<u8> {
    match port {
        0xFF10..=0xFF3F => Some((port & 0xFF) as u8),
        0x10..=0x3F => Some(port as u8),
        _ => None,
    }
}

/// Konami SCC register window (`$9800-$98FF` low byte) to VGM `pp aa`.
fn scc_port_register(port: u32) -> Option<(u8, u8)> {
    match low(port) {
        off @ 0x00..=0x7F => Some((0, off)),
        off @ 0x80..=0x89 => Some((1, off - 0x80)),
        off @ 0x8A..=0x8E => Some((2, off - 0x8A)),
        0x8F => Some((3, 0)),
        _ => None,
    }
}

/// Map a write onto a VGM command.
pub fn vgm(write: &RegisterWrite) -> Option<VgmCommand> {
    let port = write.port;
    let value = write.data;
    let reg8 = |opcode: u8| VgmCommand::Reg8 {
        opcode,
        register: low(port),
        value,
    };
    let command = match write.chip {
        ChipType::Psg => VgmCommand::Psg {
            second: false,
            value,
        },
        ChipType::T6w28 => VgmCommand::Psg {
            second: port != 0,
            value,
        },
        ChipType::Opll => reg8(0x51),
        ChipType::Opn2 => reg8(0x52 + bank(port)),
        ChipType::Opm => reg8(0x54),
        ChipType::Opn => reg8(0x55),
        ChipType::Opna => reg8(0x56 + bank(port)),
        ChipType::Opnb | ChipType::OpnbB => reg8(0x58 + bank(port)),
        ChipType::Y8950 => reg8(0x5C),
        ChipType::Ymz280b => reg8(0x5D),
        ChipType::Opl3 => reg8(0x5E + bank(port)),
        ChipType::Lynx => reg8(0x40),
        ChipType::Ay | ChipType::Ay8930 => reg8(0xA0),
        ChipType::Rf5c68 => reg8(0xB0),
        ChipType::Gb => VgmCommand::Reg8 {
            opcode: 0xB3,
            register: game_boy_offset(port)? - 0x10,
            value,
        },
        ChipType::Nes | ChipType::Fds => VgmCommand::Reg8 {
            opcode: 0xB4,
            register: vgm_nes_register(port)?,
            value,
        },
        ChipType::MultiPcm => reg8(0xB5),
        ChipType::Msm6258 => VgmCommand::Reg8 {
            opcode: 0xB7,
            register: u8::from(port != 0),
            value,
        },
        ChipType::Oki => VgmCommand::Reg8 {
            opcode: 0xB8,
            register: 0,
            value,
        },
        ChipType::Pce => reg8(0xB9),
        ChipType::K053260 => reg8(0xBA),
        ChipType::Pokey => VgmCommand::Reg8 {
            opcode: 0xBB,
            register: (low(port) & 0x0F) | if port & 0x10 != 0 { 0x80 } else { 0 },
            value,
        },
        ChipType::Swan => VgmCommand::Reg8 {
            opcode: 0xBC,
            register: low(port).wrapping_sub(if low(port) >= 0x80 { 0x80 } else { 0 }),
            value,
        },
        ChipType::Saa => reg8(0xBD),
        ChipType::Es5506 => reg8(0xBE),
        ChipType::Ga20 => reg8(0xBF),
        ChipType::SegaPcm => VgmCommand::Offset16Le {
            opcode: 0xC0,
            offset: (port & 0xFFFF) as u16,
            value,
        },
        ChipType::Vb => VgmCommand::Register16Be {
            opcode: 0xC7,
            register: ((port >> 2) & 0xFFFF) as u16,
            value,
        },
        ChipType::X1010 => VgmCommand::Register16Be {
            opcode: 0xC8,
            register: (port & 0xFFFF) as u16,
            value,
        },
        ChipType::Opl4 => VgmCommand::Port {
            opcode: 0xD0,
            port: bank(port),
            register: low(port),
            value,
        },
        ChipType::Scc => {
            let (scc_port, register) = scc_port_register(port)?;
            VgmCommand::Port {
                opcode: 0xD2,
                port: scc_port,
                register,
                value,
            }
        }
        ChipType::C140 => VgmCommand::Register16Be {
            opcode: 0xD4,
            register: (port & 0xFFFF) as u16,
            value,
        },
        _ => return None,
    };
    Some(command)
}

/// Map a write onto a GYM command (YM2612 and PSG only).
pub fn gym(write: &RegisterWrite) -> Option<GymCommand> {
    match write.chip {
        ChipType::Opn2 => Some(GymCommand::Ym2612 {
            port: bank(write.port),
            register: low(write.port),
            value: write.data,
        }),
        ChipType::Psg => Some(GymCommand::Psg(write.data)),
        _ => None,
    }
}

/// Map a write onto the NSF driver's `$4000`-relative register offsets.
///
/// Covers the 2A03 APU (`$4000-$4017`) and the FDS expansion
/// (`$4040-$408A`). The driver stores with `STA $4000,X`, so every offset
/// must stay below the frame sentinels.
pub fn nes(write: &RegisterWrite) -> Option<RegisterPair> {
    let register = match (write.chip, write.port) {
        (ChipType::Nes, port @ 0x00..=0x17) => port as u8,
        (ChipType::Nes, port @ 0x4000..=0x4017) => (port - 0x4000) as u8,
        (ChipType::Fds, 0x4023) => 0x23,
        (ChipType::Fds, port @ 0x4040..=0x408A) => (port - 0x4000) as u8,
        _ => return None,
    };
    Some(RegisterPair {
        register,
        value: write.data,
    })
}

/// Map a write onto the GBS driver's `$FF00`-relative register offsets.
pub fn game_boy(write: &RegisterWrite) -> Option<RegisterPair> {
    if write.chip != ChipType::Gb {
        return None;
    }
    Some(RegisterPair {
        register: game_boy_offset(write.port)?,
        value: write.data,
    })
}

/// Map a write onto an S-DSP register for the SPC driver.
pub fn snes_dsp(write: &RegisterWrite) -> Option<RegisterPair> {
    match (write.chip, write.port) {
        (ChipType::Snes, port @ 0x00..=0x7F) => Some(RegisterPair {
            register: port as u8,
            value: write.data,
        }),
        _ => None,
    }
}

/// Map a write onto a ZSM command (YM2151 and VERA PSG).
pub fn zsm(write: &RegisterWrite) -> Option<ZsmCommand> {
    match write.chip {
        ChipType::Opm => Some(ZsmCommand::Fm {
            register: low(write.port),
            value: write.data,
        }),
        ChipType::Vera => Some(ZsmCommand::Psg {
            register: (write.port & 0x3F) as u8,
            value: write.data,
        }),
        _ => None,
    }
}

/// Map a write onto a POKEY register for SAP.
///
/// Bit 4 of the port selects the second POKEY of a stereo pair. Only
/// AUDF1..AUDCTL (`0x00-0x08`) are part of a SAP frame.
pub fn pokey(write: &RegisterWrite) -> Option<PokeyWrite> {
    if write.chip != ChipType::Pokey {
        return None;
    }
    let register = (write.port & 0x0F) as u8;
    if register > 0x08 {
        return None;
    }
    Some(PokeyWrite {
        chip: ((write.port >> 4) & 1) as u8,
        register,
        value: write.data,
    })
}

/// Map a write onto one of the six TIA audio registers.
pub fn tia(write: &RegisterWrite) -> Option<TiaWrite> {
    if write.chip != ChipType::Tia {
        return None;
    }
    match write.port & 0x3F {
        reg @ 0x15..=0x1A => Some(TiaWrite {
            index: (reg - 0x15) as usize,
            value: write.data,
        }),
        _ => None,
    }
}
