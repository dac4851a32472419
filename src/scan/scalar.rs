// Mon Oct 12 2026 - Alex

//! Byte-at-a-time matcher. Handles the tail the vector routines leave behind
//! and is the whole implementation for the scalar family.

use crate::pattern::{AlignmentPolicy, Pattern, PatternElement};
use crate::scan::ScanContext;

/// First position at or after `from` where `pattern` matches and the
/// policy allows the start address.
pub fn find(
    haystack: &[u8],
    from: usize,
    pattern: &Pattern,
    alignment: AlignmentPolicy,
) -> Option<usize> {
    let last = haystack.len().checked_sub(pattern.len())?;
    let stride = alignment.stride();
    let first = pattern.first_byte();
    let tail = pattern.tail();

    let addr = (haystack.as_ptr() as usize).wrapping_add(from);
    let mut pos = from.checked_add(alignment.padding(addr))?;
    while pos <= last {
        if haystack[pos] == first && verify(&haystack[pos + 1..pos + pattern.len()], tail) {
            return Some(pos);
        }
        pos += stride;
    }

    None
}

/// Positional comparison, wildcards accept anything.
#[inline]
pub fn verify(window: &[u8], elements: &[PatternElement]) -> bool {
    window.len() >= elements.len() && elements.iter().zip(window).all(|(e, &b)| e.matches(b))
}

pub(crate) fn find_in_context(haystack: &[u8], ctx: &ScanContext<'_>) -> Option<usize> {
    find(haystack, 0, ctx.pattern(), ctx.alignment())
}
