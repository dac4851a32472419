// Mon Oct 12 2026 - Alex

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use crate::scan::specializer::RoutineTable;
use crate::scan::vector::{self, Vector};
use crate::scan::ScanContext;

impl Vector for __m256i {
    const LANES: usize = 32;

    #[inline(always)]
    unsafe fn splat(byte: u8) -> Self {
        _mm256_set1_epi8(byte as i8)
    }

    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const u8) -> Self {
        _mm256_loadu_si256(ptr as *const __m256i)
    }

    #[inline(always)]
    unsafe fn cmpeq(self, other: Self) -> Self {
        _mm256_cmpeq_epi8(self, other)
    }

    #[inline(always)]
    unsafe fn movemask(self) -> u64 {
        _mm256_movemask_epi8(self) as u32 as u64
    }
}

#[target_feature(enable = "avx2")]
unsafe fn find_avx2<const ALIGNED: bool, const FILTER: bool, const VERIFY: bool>(
    haystack: &[u8],
    ctx: &ScanContext<'_>,
) -> Option<usize> {
    vector::find::<__m256i, ALIGNED, FILTER, VERIFY>(haystack, ctx)
}

fn entry<const ALIGNED: bool, const FILTER: bool, const VERIFY: bool>(
    haystack: &[u8],
    ctx: &ScanContext<'_>,
) -> Option<usize> {
    // SAFETY: this table is only handed to contexts whose backend passed
    // `BackendFamily::is_supported`, and the specializer matched the shape.
    unsafe { find_avx2::<ALIGNED, FILTER, VERIFY>(haystack, ctx) }
}

pub(crate) static ROUTINES: RoutineTable = routine_table!(entry);
