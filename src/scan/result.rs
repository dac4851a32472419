// Mon Oct 12 2026 - Alex

use crate::address::Address;

/// Outcome of one scan: the first matching offset in the haystack, or nothing.
#[derive(Debug, Clone, Copy)]
pub struct ScanResult<'h> {
    haystack: &'h [u8],
    offset: Option<usize>,
}

impl<'h> ScanResult<'h> {
    pub(crate) fn new(haystack: &'h [u8], offset: Option<usize>) -> Self {
        Self { haystack, offset }
    }

    pub fn offset(&self) -> Option<usize> {
        self.offset
    }

    pub fn has_result(&self) -> bool {
        self.offset.is_some()
    }

    /// Absolute address of the match.
    pub fn address(&self) -> Option<Address> {
        self.offset
            .map(|offset| Address::from_ptr(self.haystack.as_ptr()) + offset as u64)
    }

    /// The haystack from the match to its end.
    pub fn bytes(&self) -> Option<&'h [u8]> {
        self.offset.map(|offset| &self.haystack[offset..])
    }

    pub fn read_i32(&self, at: usize) -> Option<i32> {
        let start = self.offset?.checked_add(at)?;
        let raw = self.haystack.get(start..start.checked_add(4)?)?;
        Some(i32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]))
    }

    /// Resolves a rel32 operand located `disp_offset` bytes into the match,
    /// e.g. the target of `E8 xx xx xx xx` with `disp_offset = 1`. The target
    /// is relative to the end of the displacement and may lie outside the haystack.
    pub fn rel32(&self, disp_offset: usize) -> Option<Address> {
        let disp = self.read_i32(disp_offset)?;
        let end_of_disp = self.address()? + disp_offset as u64 + 4;
        Some(end_of_disp.offset(disp as i64))
    }

    /// `rel32`, expressed as an offset into the haystack when the target lands inside it.
    pub fn rel32_offset(&self, disp_offset: usize) -> Option<usize> {
        let target = self.rel32(disp_offset)?;
        let distance = target - Address::from_ptr(self.haystack.as_ptr());
        usize::try_from(distance)
            .ok()
            .filter(|&offset| offset < self.haystack.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found() {
        let data = [0u8; 4];
        let result = ScanResult::new(&data, None);
        assert!(!result.has_result());
        assert_eq!(result.address(), None);
        assert_eq!(result.rel32(0), None);
    }

    #[test]
    fn test_address_is_absolute() {
        let data = [0u8; 8];
        let result = ScanResult::new(&data, Some(3));
        assert_eq!(result.address(), Some(Address::from_ptr(data.as_ptr()) + 3));
        assert_eq!(result.bytes().map(<[u8]>::len), Some(5));
    }

    #[test]
    fn test_rel32_forward_call() {
        // call +0x10 at offset 2
        let mut data = [0x90u8; 32];
        data[2..7].copy_from_slice(&[0xE8, 0x10, 0x00, 0x00, 0x00]);
        let result = ScanResult::new(&data, Some(2));
        assert_eq!(result.read_i32(1), Some(0x10));
        assert_eq!(result.rel32_offset(1), Some(2 + 5 + 0x10));
    }

    #[test]
    fn test_rel32_backward_jump() {
        let mut data = [0x90u8; 16];
        data[8..13].copy_from_slice(&[0xE9, 0xF6, 0xFF, 0xFF, 0xFF]);
        let result = ScanResult::new(&data, Some(8));
        assert_eq!(result.rel32_offset(1), Some(3));
    }

    #[test]
    fn test_rel32_truncated_displacement() {
        let data = [0xE8u8, 0x01, 0x02];
        let result = ScanResult::new(&data, Some(0));
        assert_eq!(result.read_i32(1), None);
        assert_eq!(result.rel32(1), None);
    }

    #[test]
    fn test_rel32_outside_haystack() {
        let data = [0xE8u8, 0x00, 0x01, 0x00, 0x00];
        let result = ScanResult::new(&data, Some(0));
        assert!(result.rel32(1).is_some());
        assert_eq!(result.rel32_offset(1), None);
    }
}
