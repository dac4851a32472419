// Mon Oct 12 2026 - Alex

//! Fixtures shared by the unit tests.

use crate::pattern::{AlignmentPolicy, Pattern};

pub const ALIGNED_BUFFER_SIZE: usize = 512;

/// Zeroed storage that starts on a 64-byte boundary, so tests can place a
/// haystack at a known distance from an aligned address.
#[repr(C, align(64))]
pub struct AlignedBuffer {
    bytes: [u8; ALIGNED_BUFFER_SIZE],
}

impl AlignedBuffer {
    pub fn new() -> Self {
        Self { bytes: [0; ALIGNED_BUFFER_SIZE] }
    }

    pub fn with_contents(shift: usize, data: &[u8]) -> Self {
        let mut buf = Self::new();
        buf.slice_mut(shift, data.len()).copy_from_slice(data);
        buf
    }

    pub fn slice(&self, shift: usize, len: usize) -> &[u8] {
        &self.bytes[shift..shift + len]
    }

    pub fn slice_mut(&mut self, shift: usize, len: usize) -> &mut [u8] {
        &mut self.bytes[shift..shift + len]
    }
}

impl Default for AlignedBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Reference answer: try every position, no shortcuts.
pub fn oracle_find(haystack: &[u8], pattern: &Pattern, alignment: AlignmentPolicy) -> Option<usize> {
    let base = haystack.as_ptr() as usize;
    (0..haystack.len())
        .filter(|&pos| (base + pos) % alignment.stride() == 0)
        .find(|&pos| {
            pos + pattern.len() <= haystack.len()
                && pattern
                    .elements()
                    .iter()
                    .enumerate()
                    .all(|(i, e)| e.matches(haystack[pos + i]))
        })
}

#[test]
fn test_aligned_buffer_alignment() {
    let buf = AlignedBuffer::new();
    assert_eq!(buf.slice(0, 1).as_ptr() as usize % 64, 0);
    assert_eq!(buf.slice(16, 1).as_ptr() as usize % 16, 0);
}
