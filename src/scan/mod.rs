// Mon Oct 12 2026 - Alex

pub mod backend;
pub mod context;
pub mod error;
pub mod result;
pub mod scalar;
mod specializer;
mod vector;

pub use backend::BackendFamily;
pub use context::ScanContext;
pub use error::ScanError;
pub use result::ScanResult;
pub use specializer::Routine;

use crate::pattern::{AlignmentPolicy, Pattern};

/// One-shot scan on the detected backend. Build a [`ScanContext`] instead when
/// the same pattern is scanned more than once.
pub fn find_pattern<'h>(
    haystack: &'h [u8],
    pattern: &Pattern,
    alignment: AlignmentPolicy,
) -> Result<ScanResult<'h>, ScanError> {
    Ok(ScanContext::new(pattern, alignment)?.scan(haystack))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_pattern() {
        let pattern: Pattern = "AA ?? CC".parse().unwrap();
        let data = [0x00, 0xAA, 0xBB, 0xCC];
        let result = find_pattern(&data, &pattern, AlignmentPolicy::Any).unwrap();
        assert_eq!(result.offset(), Some(1));
        assert!(find_pattern(&data, &pattern, AlignmentPolicy::Aligned(3)).is_err());
    }
}
