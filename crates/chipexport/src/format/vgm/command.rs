//! VGM register-write commands.
//!
//! Only the write commands the mappers produce are modelled; waits come
//! from [`crate::wait::vgm`] and the stream terminator is
//! [`END_OF_SOUND_DATA`].

/// Terminates the command stream.
pub const END_OF_SOUND_DATA: u8 = 0x66;

/// SN76489 write, chip 1.
const PSG_WRITE: u8 = 0x50;
/// SN76489 write, chip 2 (T6W28 right channel).
const PSG_WRITE_SECOND: u8 = 0x30;

/// One register write in VGM encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VgmCommand {
    /// `0x50 dd` / `0x30 dd`
    Psg { second: bool, value: u8 },
    /// `op aa dd`
    Reg8 { opcode: u8, register: u8, value: u8 },
    /// `op pp aa dd`
    Port {
        opcode: u8,
        port: u8,
        register: u8,
        value: u8,
    },
    /// `op aaaa dd`, little-endian offset (SegaPCM)
    Offset16Le { opcode: u8, offset: u16, value: u8 },
    /// `op mmll dd`, big-endian register (VSU, X1-010, C140)
    Register16Be { opcode: u8, register: u16, value: u8 },
}

impl VgmCommand {
    pub fn opcode(&self) -> u8 {
        match *self {
            VgmCommand::Psg { second: false, .. } => PSG_WRITE,
            VgmCommand::Psg { second: true, .. } => PSG_WRITE_SECOND,
            VgmCommand::Reg8 { opcode, .. }
            | VgmCommand::Port { opcode, .. }
            | VgmCommand::Offset16Le { opcode, .. }
            | VgmCommand::Register16Be { opcode, .. } => opcode,
        }
    }

    /// Append the encoded command to `out`.
    pub fn push(&self, out: &mut Vec<u8>) {
        out.push(self.opcode());
        match *self {
            VgmCommand::Psg { value, .. } => out.push(value),
            VgmCommand::Reg8 {
                register, value, ..
            } => out.extend_from_slice(&[register, value]),
            VgmCommand::Port {
                port,
                register,
                value,
                ..
            } => out.extend_from_slice(&[port, register, value]),
            VgmCommand::Offset16Le { offset, value, .. } => {
                out.extend_from_slice(&offset.to_le_bytes());
                out.push(value);
            }
            VgmCommand::Register16Be {
                register, value, ..
            } => {
                out.extend_from_slice(&register.to_be_bytes());
                out.push(value);
            }
        }
    }
}
