//! Little-endian word access and small-integer packing.

/// Read a little-endian word of `width` bytes (1..=8) at `offset`.
pub fn read_le(buf: &[u8], offset: usize, width: usize) -> u64 {
    let mut word = [0u8; 8];
    word[..width].copy_from_slice(&buf[offset..offset + width]);
    u64::from_le_bytes(word)
}

/// Write the low `width` bytes of `value` little-endian at `offset`.
pub fn write_le(buf: &mut [u8], offset: usize, width: usize, value: u64) {
    buf[offset..offset + width].copy_from_slice(&value.to_le_bytes()[..width]);
}

/// Mask covering the low `bits` bits.
pub const fn mask(bits: u32) -> u64 {
    if bits >= 64 { u64::MAX } else { (1u64 << bits) - 1 }
}

/// Interpret the low `bits` bits of `raw` as two's complement.
pub const fn sign_extend(raw: u64, bits: u32) -> i64 {
    let shift = 64 - bits;
    ((raw << shift) as i64) >> shift
}

/// Signed range representable in `bits` bits.
pub const fn signed_range(bits: u32) -> (i64, i64) {
    let half = 1i64 << (bits - 1);
    (-half, half - 1)
}
