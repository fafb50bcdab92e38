use core::fmt;

use crate::error::LayoutError;
use crate::layout::Generation;

/// A generation-sized battle buffer with 8-byte alignment.
///
/// Backed by `u64` words so the start address satisfies the native engine's
/// alignment requirement regardless of allocator.
#[derive(Clone, PartialEq, Eq)]
pub struct BattleBuffer {
    generation: Generation,
    words: Box<[u64]>,
    len: usize,
}

impl BattleBuffer {
    pub const ALIGN: usize = core::mem::align_of::<u64>();

    pub fn zeroed(generation: Generation) -> Self {
        let len = generation.buffer_len();
        Self {
            generation,
            words: vec![0u64; len.div_ceil(8)].into_boxed_slice(),
            len,
        }
    }

    pub fn from_bytes(generation: Generation, bytes: &[u8]) -> Result<Self, LayoutError> {
        let mut buffer = Self::zeroed(generation);
        if bytes.len() != buffer.len {
            return Err(LayoutError::BufferLength {
                expected: buffer.len,
                actual: bytes.len(),
            });
        }
        buffer.as_mut_bytes().copy_from_slice(bytes);
        Ok(buffer)
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: `words` owns at least `len` initialized bytes, u8 has no
        // alignment requirement and every bit pattern is a valid u8.
        unsafe { core::slice::from_raw_parts(self.words.as_ptr().cast::<u8>(), self.len) }
    }

    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        // SAFETY: as in `as_bytes`; the unique borrow of `self` makes the
        // returned slice the only live view of the words.
        unsafe { core::slice::from_raw_parts_mut(self.words.as_mut_ptr().cast::<u8>(), self.len) }
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

impl AsRef<[u8]> for BattleBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl AsMut<[u8]> for BattleBuffer {
    fn as_mut(&mut self) -> &mut [u8] {
        self.as_mut_bytes()
    }
}

impl fmt::Debug for BattleBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BattleBuffer")
            .field("generation", &self.generation)
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aligned_and_sized() {
        let mut buf = BattleBuffer::zeroed(Generation::One);
        assert_eq!(buf.len(), 384);
        assert_eq!(buf.as_bytes().as_ptr() as usize % BattleBuffer::ALIGN, 0);
        buf.as_mut_bytes()[383] = 7;
        assert_eq!(buf.to_vec()[383], 7);
    }

    #[test]
    fn test_from_bytes_checks_length() {
        assert_eq!(
            BattleBuffer::from_bytes(Generation::One, &[0; 383]),
            Err(LayoutError::BufferLength {
                expected: 384,
                actual: 383
            })
        );
        assert!(BattleBuffer::from_bytes(Generation::One, &[1; 384]).is_ok());
    }
}
