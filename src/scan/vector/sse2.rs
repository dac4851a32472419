// Mon Oct 12 2026 - Alex

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use crate::scan::specializer::RoutineTable;
use crate::scan::vector::{self, Vector};
use crate::scan::ScanContext;

impl Vector for __m128i {
    const LANES: usize = 16;

    #[inline(always)]
    unsafe fn splat(byte: u8) -> Self {
        _mm_set1_epi8(byte as i8)
    }

    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const u8) -> Self {
        _mm_loadu_si128(ptr as *const __m128i)
    }

    #[inline(always)]
    unsafe fn cmpeq(self, other: Self) -> Self {
        _mm_cmpeq_epi8(self, other)
    }

    #[inline(always)]
    unsafe fn movemask(self) -> u64 {
        _mm_movemask_epi8(self) as u32 as u64
    }
}

#[target_feature(enable = "sse2")]
unsafe fn find_sse2<const ALIGNED: bool, const FILTER: bool, const VERIFY: bool>(
    haystack: &[u8],
    ctx: &ScanContext<'_>,
) -> Option<usize> {
    vector::find::<__m128i, ALIGNED, FILTER, VERIFY>(haystack, ctx)
}

fn entry<const ALIGNED: bool, const FILTER: bool, const VERIFY: bool>(
    haystack: &[u8],
    ctx: &ScanContext<'_>,
) -> Option<usize> {
    // SAFETY: only reachable through a context whose backend passed
    // `BackendFamily::is_supported`.
    unsafe { find_sse2::<ALIGNED, FILTER, VERIFY>(haystack, ctx) }
}

pub(crate) static ROUTINES: RoutineTable = routine_table!(entry);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movemask_lane_order() {
        if !is_x86_feature_detected!("sse2") {
            return;
        }
        let mut bytes = [0u8; 16];
        bytes[1] = 0xAA;
        bytes[15] = 0xAA;
        let mask = unsafe {
            let data = <__m128i as Vector>::load_unaligned(bytes.as_ptr());
            data.cmpeq(<__m128i as Vector>::splat(0xAA)).movemask()
        };
        assert_eq!(mask, (1 << 1) | (1 << 15));
    }
}
