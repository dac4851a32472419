// Mon Oct 12 2026 - Alex

//! Vectorized first-match search, written once against [`Vector`] and
//! instantiated per instruction set.
//!
//! Each backend implements `Vector` for its register type with
//! `#[inline(always)]` methods, then wraps [`find`] in a
//! `#[target_feature]` function so the whole loop is compiled for that
//! instruction set. The const parameters select the refinement and
//! verification strategy at compile time:
//!
//! - `ALIGNED`: AND the first-byte mask with the policy's lane mask.
//! - `FILTER`: AND it with the second-byte mask shifted down one lane. The
//!   last lane has no neighbour inside the chunk and is kept as a candidate.
//! - `VERIFY`: compare the bytes after the first with one vector load instead
//!   of a byte loop.

macro_rules! routine_table {
    ($entry:ident) => {
        crate::scan::specializer::RoutineTable {
            any_filter_verify: $entry::<false, true, true>,
            any_filter: $entry::<false, true, false>,
            any_verify: $entry::<false, false, true>,
            any: $entry::<false, false, false>,
            aligned_verify: $entry::<true, false, true>,
            aligned: $entry::<true, false, false>,
        }
    };
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub(crate) mod avx2;
#[cfg(target_arch = "aarch64")]
pub(crate) mod neon;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub(crate) mod sse2;

use crate::scan::{scalar, ScanContext};

/// The handful of register operations the search needs.
///
/// All methods are unsafe: callers must run on a CPU with the backing
/// instruction set, and `load_unaligned` needs `LANES` readable bytes.
pub(crate) trait Vector: Copy {
    const LANES: usize;

    unsafe fn splat(byte: u8) -> Self;

    unsafe fn load_unaligned(ptr: *const u8) -> Self;

    unsafe fn cmpeq(self, other: Self) -> Self;

    /// One bit per lane, lane 0 in bit 0, set where the lane is all ones.
    unsafe fn movemask(self) -> u64;
}

/// # Safety
///
/// `V`'s instruction set must be available, and `ctx` must have been built
/// for a shape compatible with the const parameters (`VERIFY` implies the
/// pattern tail fits in `V::LANES` bytes, `ALIGNED` implies a stride no wider
/// than `V::LANES`).
#[inline(always)]
pub(crate) unsafe fn find<V: Vector, const ALIGNED: bool, const FILTER: bool, const VERIFY: bool>(
    haystack: &[u8],
    ctx: &ScanContext<'_>,
) -> Option<usize> {
    let pattern = ctx.pattern();
    let alignment = ctx.alignment();
    let len = pattern.len();

    let start = alignment.padding(haystack.as_ptr() as usize);
    if start >= haystack.len() || haystack.len() - start < len {
        return None;
    }

    let first = V::splat(pattern.first_byte());
    let second = V::splat(ctx.second_byte());
    let expected = V::load_unaligned(ctx.signature().as_ptr());
    let care = ctx.care_mask();
    let lane_mask = ctx.lane_mask();
    let last_lane = 1u64 << (V::LANES - 1);

    // The verify load at candidate + 1 reads a full vector, so it needs at
    // least LANES bytes of room past the chunk.
    let reserve = if VERIFY { len.max(V::LANES) } else { len };
    let chunks = (haystack.len() - start).saturating_sub(reserve) / V::LANES;
    let end = start + chunks * V::LANES;

    let base = haystack.as_ptr();
    let mut offset = start;
    while offset < end {
        let chunk = V::load_unaligned(base.add(offset));
        let mut mask = chunk.cmpeq(first).movemask();

        if ALIGNED {
            mask &= lane_mask;
        } else if FILTER {
            let next = chunk.cmpeq(second).movemask();
            mask &= (next >> 1) | last_lane;
        }

        while mask != 0 {
            let candidate = offset + mask.trailing_zeros() as usize;
            let verified = if VERIFY {
                let data = V::load_unaligned(base.add(candidate + 1));
                (data.cmpeq(expected).movemask() & care) == care
            } else {
                scalar::verify(&haystack[candidate + 1..candidate + len], pattern.tail())
            };
            if verified {
                return Some(candidate);
            }
            mask &= mask - 1;
        }

        offset += V::LANES;
    }

    scalar::find(haystack, offset, pattern, alignment)
}
