//! Sharp SM83 driver for GBS.
//!
//! Loaded at `$0400`; the data pointer is kept in work RAM at
//! `$C000/$C001`. Register offsets are written with `LD ($FF00+C),A`, so
//! the stream addresses `$FF10-$FF3F` directly. The player calls PLAY from
//! the VBlank interrupt or, for other frame rates, from the timer interrupt
//! configured by the GBS header.
//!
//! ```text
//! INIT  $0400  LD A,(data_lo) / LD ($C000),A / LD A,(data_hi) / LD ($C001),A
//!              LD A,$80 / LDH ($26),A      ; NR52: sound on
//!              LD A,$77 / LDH ($24),A      ; NR50: full volume
//!              LD A,$FF / LDH ($25),A      ; NR51: all channels both sides
//!              RET
//! PLAY  $0419  LD A,($C000) / LD L,A / LD A,($C001) / LD H,A
//! pair         LD A,(HL+) / CP $FE / JR NC,ctl
//!              LD C,A / LD A,(HL+) / LD ($FF00+C),A / JR pair
//! ctl          JR Z,song_end
//!              LD A,L / LD ($C000),A / LD A,H / LD ($C001),A / RET
//! song_end     LD A,(loop_lo) / LD ($C000),A / LD A,(loop_hi) / LD ($C001),A / RET
//! data  $0443  .word data_start
//! loop  $0445  .word loop_start
//! ```
use crate::driver::{Cpu, EmbeddedDriver, PatchMeaning, PatchSite, Routine};

pub const LOAD_ADDRESS: u16 = 0x0400;

/// End of the fixed ROM banks.
pub const DATA_LIMIT: u32 = 0x8000;

#[rustfmt::skip]
pub const INIT: [u8; 0x19] = [
    0xFA, 0x43, 0x04,   // LD A,($0443)
    0xEA, 0x00, 0xC0,   // LD ($C000),A
    0xFA, 0x44, 0x04,   // LD A,($0444)
    0xEA, 0x01, 0xC0,   // LD ($C001),A
    0x3E, 0x80,         // LD A,$80
    0xE0, 0x26,         // LDH ($26),A
    0x3E, 0x77,         // LD A,$77
    0xE0, 0x24,         // LDH ($24),A
    0x3E, 0xFF,         // LD A,$FF
    0xE0, 0x25,         // LDH ($25),A
    0xC9,               // RET
];

const PLAY_DATA_WORD: usize = 0x2A;
const PLAY_LOOP_WORD: usize = 0x2C;

#[rustfmt::skip]
pub const PLAY: [u8; 0x2E] = [
    0xFA, 0x00, 0xC0,   // LD A,($C000)
    0x6F,               // LD L,A
    0xFA, 0x01, 0xC0,   // LD A,($C001)
    0x67,               // LD H,A
    0x2A,               // pair: LD A,(HL+)
    0xFE, 0xFE,         // CP $FE
    0x30, 0x05,         // JR NC,ctl
    0x4F,               // LD C,A
    0x2A,               // LD A,(HL+)
    0xE2,               // LD ($FF00+C),A
    0x18, 0xF6,         // JR pair
    0x28, 0x09,         // ctl: JR Z,song_end
    0x7D,               // LD A,L
    0xEA, 0x00, 0xC0,   // LD ($C000),A
    0x7C,               // LD A,H
    0xEA, 0x01, 0xC0,   // LD ($C001),A
    0xC9,               // RET
    0xFA, 0x45, 0x04,   // song_end: LD A,($0445)
    0xEA, 0x00, 0xC0,   // LD ($C000),A
    0xFA, 0x46, 0x04,   // LD A,($0446)
    0xEA, 0x01, 0xC0,   // LD ($C001),A
    0xC9,               // RET
    0x00, 0x00,         // data word
    0x00, 0x00,         // loop word
];

const _: () = assert!(LOAD_ADDRESS as usize + INIT.len() == 0x0419);
const _: () = assert!(PLAY_LOOP_WORD + 2 == PLAY.len());

pub const PATCH_SITES: [PatchSite; 2] = [
    PatchSite {
        routine: Routine::Play,
        offset: PLAY_DATA_WORD,
        width: 2,
        meaning: PatchMeaning::DataStart,
    },
    PatchSite {
        routine: Routine::Play,
        offset: PLAY_LOOP_WORD,
        width: 2,
        meaning: PatchMeaning::LoopStart,
    },
];

pub const DRIVER: EmbeddedDriver = EmbeddedDriver {
    cpu: Cpu::Sm83,
    load_address: LOAD_ADDRESS,
    init: &INIT,
    play: &PLAY,
    patch_sites: &PATCH_SITES,
    data_limit: DATA_LIMIT,
};

const _: () = assert!(DRIVER.data_start() == 0x0447);
