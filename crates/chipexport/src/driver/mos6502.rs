//! MOS 6502 driver for NSF.
//!
//! Loaded at `$8000`. The data pointer lives in zero page `$F0/$F1` and
//! register offsets are stored through `STA $4000,X`, which covers both
//! the 2A03 APU (`$4000-$4017`) and the FDS expansion (`$4040-$408A`).
//!
//! ```text
//! INIT  $8000  LDA data_lo / STA $F0 / LDA data_hi / STA $F1
//!              LDA #$0F / STA $4015        ; enable square, triangle, noise
//!              LDA #$40 / STA $4017        ; 4-step sequencer, IRQ off
//!              RTS
//! PLAY  $8015  JSR next / CMP #$FE / BCS ctl
//!              TAX / JSR next / STA $4000,X / JMP PLAY
//! ctl          BEQ song_end / RTS
//! song_end     LDA loop_lo / STA $F0 / LDA loop_hi / STA $F1 / RTS
//! next  $8034  LDY #0 / LDA ($F0),Y / INC $F0 / BNE + / INC $F1 / + RTS
//! data  $803F  .word data_start
//! loop  $8041  .word loop_start
//! ```
use crate::driver::{Cpu, EmbeddedDriver, PatchMeaning, PatchSite, Routine};

pub const LOAD_ADDRESS: u16 = 0x8000;

/// Highest address + 1 the data may reach; `$FFFA` holds the CPU vectors.
pub const DATA_LIMIT: u32 = 0xFFFA;

#[rustfmt::skip]
pub const INIT: [u8; 0x15] = [
    0xAD, 0x3F, 0x80,   // LDA $803F
    0x85, 0xF0,         // STA $F0
    0xAD, 0x40, 0x80,   // LDA $8040
    0x85, 0xF1,         // STA $F1
    0xA9, 0x0F,         // LDA #$0F
    0x8D, 0x15, 0x40,   // STA $4015
    0xA9, 0x40,         // LDA #$40
    0x8D, 0x17, 0x40,   // STA $4017
    0x60,               // RTS
];

const PLAY_DATA_WORD: usize = 0x2A;
const PLAY_LOOP_WORD: usize = 0x2C;

#[rustfmt::skip]
pub const PLAY: [u8; 0x2E] = [
    0x20, 0x34, 0x80,   // JSR next
    0xC9, 0xFE,         // CMP #$FE
    0xB0, 0x0A,         // BCS ctl
    0xAA,               // TAX
    0x20, 0x34, 0x80,   // JSR next
    0x9D, 0x00, 0x40,   // STA $4000,X
    0x4C, 0x15, 0x80,   // JMP PLAY
    0xF0, 0x01,         // ctl: BEQ song_end
    0x60,               // RTS
    0xAD, 0x41, 0x80,   // song_end: LDA $8041
    0x85, 0xF0,         // STA $F0
    0xAD, 0x42, 0x80,   // LDA $8042
    0x85, 0xF1,         // STA $F1
    0x60,               // RTS
    0xA0, 0x00,         // next: LDY #0
    0xB1, 0xF0,         // LDA ($F0),Y
    0xE6, 0xF0,         // INC $F0
    0xD0, 0x02,         // BNE +2
    0xE6, 0xF1,         // INC $F1
    0x60,               // RTS
    0x00, 0x00,         // data word
    0x00, 0x00,         // loop word
];

const _: () = assert!(LOAD_ADDRESS as usize + INIT.len() == 0x8015);
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
    cpu: Cpu::Mos6502,
    load_address: LOAD_ADDRESS,
    init: &INIT,
    play: &PLAY,
    patch_sites: &PATCH_SITES,
    data_limit: DATA_LIMIT,
};

const _: () = assert!(DRIVER.data_start() == 0x8043);
