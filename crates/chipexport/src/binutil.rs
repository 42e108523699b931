//! Byte writers and readers shared by the format encoders.
//!
//! Header layouts differ in byte order between formats, so the multi-byte
//! writers take an explicit [`Endian`]. None of the writers perform bounds
//! checking; callers size their header buffers up front.

/// Byte order of a multi-byte header field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

/// Write a single byte `v` into `buf` at `off`.
pub fn write_u8(buf: &mut [u8], off: usize, v: u8) {
    buf[off] = v;
}

/// Write a 16-bit unsigned integer `v` into `buf[off..off+2]` using `endian`.
pub fn write_u16(buf: &mut [u8], off: usize, v: u16, endian: Endian) {
    let bytes = match endian {
        Endian::Little => v.to_le_bytes(),
        Endian::Big => v.to_be_bytes(),
    };
    buf[off..off + 2].copy_from_slice(&bytes);
}

/// Write the low 24 bits of `v` into `buf[off..off+3]`, little-endian.
pub fn write_u24_le(buf: &mut [u8], off: usize, v: u32) {
    let bytes = v.to_le_bytes();
    buf[off..off + 3].copy_from_slice(&bytes[..3]);
}

/// Write a 32-bit unsigned integer `v` into `buf[off..off+4]` using `endian`.
pub fn write_u32(buf: &mut [u8], off: usize, v: u32, endian: Endian) {
    let bytes = match endian {
        Endian::Little => v.to_le_bytes(),
        Endian::Big => v.to_be_bytes(),
    };
    buf[off..off + 4].copy_from_slice(&bytes);
}

/// Copy the contents of `s` into `buf` starting at `off`.
pub fn write_slice(buf: &mut [u8], off: usize, s: &[u8]) {
    buf[off..off + s.len()].copy_from_slice(s);
}

/// Write `s` as a fixed-width, nul-padded ASCII field of `len` bytes.
///
/// Non-ASCII and control characters are replaced with `?`. The text is
/// truncated to `len - 1` bytes so the field always keeps a terminating
/// nul, which is what the NSF/GBS players expect; SPC readers accept the
/// same shape.
pub fn write_ascii_field(buf: &mut [u8], off: usize, len: usize, s: &str) {
    let field = &mut buf[off..off + len];
    field.fill(0);
    for (dst, ch) in field.iter_mut().zip(s.chars().take(len.saturating_sub(1))) {
        *dst = if ch.is_ascii() && !ch.is_ascii_control() {
            ch as u8
        } else {
            b'?'
        };
    }
}

/// Read a 32-bit little-endian unsigned integer from `bytes` at `off`.
pub fn read_u32_le_at(bytes: &[u8], off: usize) -> Option<u32> {
    let slice = bytes.get(off..off.checked_add(4)?)?;
    let mut tmp = [0u8; 4];
    tmp.copy_from_slice(slice);
    Some(u32::from_le_bytes(tmp))
}
