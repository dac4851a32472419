// Mon Oct 12 2026 - Alex

use core::arch::aarch64::*;

use crate::scan::specializer::RoutineTable;
use crate::scan::vector::{self, Vector};
use crate::scan::ScanContext;

/// Lane weights for the movemask emulation; each half sums to at most 0xFF.
const LANE_BITS: [u8; 16] = [1, 2, 4, 8, 16, 32, 64, 128, 1, 2, 4, 8, 16, 32, 64, 128];

impl Vector for uint8x16_t {
    const LANES: usize = 16;

    #[inline(always)]
    unsafe fn splat(byte: u8) -> Self {
        vdupq_n_u8(byte)
    }

    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const u8) -> Self {
        vld1q_u8(ptr)
    }

    #[inline(always)]
    unsafe fn cmpeq(self, other: Self) -> Self {
        vceqq_u8(self, other)
    }

    // NEON has no movemask, so weight each lane by its bit and sum each half.
    #[inline(always)]
    unsafe fn movemask(self) -> u64 {
        let weighted = vandq_u8(self, vld1q_u8(LANE_BITS.as_ptr()));
        let low = vaddv_u8(vget_low_u8(weighted)) as u64;
        let high = vaddv_u8(vget_high_u8(weighted)) as u64;
        low | (high << 8)
    }
}

#[target_feature(enable = "neon")]
unsafe fn find_neon<const ALIGNED: bool, const FILTER: bool, const VERIFY: bool>(
    haystack: &[u8],
    ctx: &ScanContext<'_>,
) -> Option<usize> {
    vector::find::<uint8x16_t, ALIGNED, FILTER, VERIFY>(haystack, ctx)
}

fn entry<const ALIGNED: bool, const FILTER: bool, const VERIFY: bool>(
    haystack: &[u8],
    ctx: &ScanContext<'_>,
) -> Option<usize> {
    // SAFETY: only reachable through a context whose backend passed
    // `BackendFamily::is_supported`.
    unsafe { find_neon::<ALIGNED, FILTER, VERIFY>(haystack, ctx) }
}

pub(crate) static ROUTINES: RoutineTable = routine_table!(entry);
