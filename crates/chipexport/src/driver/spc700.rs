//! Sony SPC700 driver for SPC.
//!
//! Loaded at `$0200` with the data pointer in direct page `$00/$01`. INIT
//! never returns: it starts timer 0 and calls PLAY each time the timer
//! counter ticks. Stream registers are S-DSP addresses written through the
//! `$F2/$F3` address/data ports.
//!
//! ```text
//! INIT  $0200  MOV A,!data_lo / MOV $00,A / MOV A,!data_hi / MOV $01,A
//!              MOV $F2,#$6C / MOV $F3,#$20 ; FLG: unmute, echo writes off
//!              MOV $FA,#target             ; timer 0 divider (8 kHz / target)
//!              MOV $F1,#$81                ; start timer 0
//! wait         MOV A,$FD / BEQ wait
//!              CALL PLAY / BRA wait
//! PLAY  $021F  MOV Y,#0
//! pair         MOV A,[$00]+Y / INCW $00 / CMP A,#$FE / BCS ctl
//!              MOV $F2,A / MOV A,[$00]+Y / INCW $00 / MOV $F3,A / BRA pair
//! ctl          BEQ song_end / RET
//! song_end     MOV A,!loop_lo / MOV $00,A / MOV A,!loop_hi / MOV $01,A / RET
//! data  $0241  .word data_start
//! loop  $0243  .word loop_start
//! ```
use crate::driver::{Cpu, EmbeddedDriver, PatchMeaning, PatchSite, Routine};

pub const LOAD_ADDRESS: u16 = 0x0200;

/// Start of the IPL ROM shadow.
pub const DATA_LIMIT: u32 = 0xFFC0;

/// Timer 0 input clock in Hz.
pub const TIMER0_CLOCK: u32 = 8_000;

const INIT_TIMER_TARGET: usize = 0x11;

#[rustfmt::skip]
pub const INIT: [u8; 0x1F] = [
    0xE5, 0x41, 0x02,   // MOV A,!$0241
    0xC4, 0x00,         // MOV $00,A
    0xE5, 0x42, 0x02,   // MOV A,!$0242
    0xC4, 0x01,         // MOV $01,A
    0x8F, 0x6C, 0xF2,   // MOV $F2,#$6C
    0x8F, 0x20, 0xF3,   // MOV $F3,#$20
    0x8F, 0x85, 0xFA,   // MOV $FA,#$85
    0x8F, 0x81, 0xF1,   // MOV $F1,#$81
    0xE4, 0xFD,         // wait: MOV A,$FD
    0xF0, 0xFC,         // BEQ wait
    0x3F, 0x1F, 0x02,   // CALL $021F
    0x2F, 0xF7,         // BRA wait
];

const PLAY_DATA_WORD: usize = 0x22;
const PLAY_LOOP_WORD: usize = 0x24;

#[rustfmt::skip]
pub const PLAY: [u8; 0x26] = [
    0x8D, 0x00,         // MOV Y,#0
    0xF7, 0x00,         // pair: MOV A,[$00]+Y
    0x3A, 0x00,         // INCW $00
    0x68, 0xFE,         // CMP A,#$FE
    0xB0, 0x0A,         // BCS ctl
    0xC4, 0xF2,         // MOV $F2,A
    0xF7, 0x00,         // MOV A,[$00]+Y
    0x3A, 0x00,         // INCW $00
    0xC4, 0xF3,         // MOV $F3,A
    0x2F, 0xEE,         // BRA pair
    0xF0, 0x01,         // ctl: BEQ song_end
    0x6F,               // RET
    0xE5, 0x43, 0x02,   // song_end: MOV A,!$0243
    0xC4, 0x00,         // MOV $00,A
    0xE5, 0x44, 0x02,   // MOV A,!$0244
    0xC4, 0x01,         // MOV $01,A
    0x6F,               // RET
    0x00, 0x00,         // data word
    0x00, 0x00,         // loop word
];

const _: () = assert!(LOAD_ADDRESS as usize + INIT.len() == 0x021F);
const _: () = assert!(PLAY_LOOP_WORD + 2 == PLAY.len());
const _: () = assert!(INIT[INIT_TIMER_TARGET + 1] == 0xFA);

pub const PATCH_SITES: [PatchSite; 3] = [
    PatchSite {
        routine: Routine::Init,
        offset: INIT_TIMER_TARGET,
        width: 1,
        meaning: PatchMeaning::TimerTarget,
    },
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
    cpu: Cpu::Spc700,
    load_address: LOAD_ADDRESS,
    init: &INIT,
    play: &PLAY,
    patch_sites: &PATCH_SITES,
    data_limit: DATA_LIMIT,
};

const _: () = assert!(DRIVER.data_start() == 0x0245);

/// Timer 0 divider for a frame rate: `round(8000 / rate)`, where a
/// divider of 0 means 256.
pub fn timer_target(frame_rate: u32) -> u8 {
    let rate = frame_rate.max(1);
    let divider = ((TIMER0_CLOCK + rate / 2) / rate).clamp(1, 256);
    (divider & 0xFF) as u8
}
