// Mon Oct 12 2026 - Alex

use crate::config::ScanConfig;
use crate::pattern::{AlignmentPolicy, Pattern, PatternElement};
use crate::scan::specializer::{self, PatternShape, Routine, ScanFn};
use crate::scan::{BackendFamily, ScanError, ScanResult};
use std::fmt;

/// Widest vector any backend loads.
pub(crate) const MAX_LANES: usize = 32;

/// A pattern compiled for one alignment policy and instruction set.
///
/// Building it picks the scan routine and precomputes the vector constants;
/// after that it is read-only and can be shared across threads and reused for
/// any number of haystacks.
#[derive(Clone)]
pub struct ScanContext<'p> {
    pattern: &'p Pattern,
    alignment: AlignmentPolicy,
    backend: BackendFamily,
    routine: Routine,
    scan_fn: ScanFn,
    second_byte: u8,
    signature: [u8; MAX_LANES],
    care_mask: u64,
    lane_mask: u64,
}

impl<'p> ScanContext<'p> {
    /// Uses the fastest backend the host supports.
    pub fn new(pattern: &'p Pattern, alignment: AlignmentPolicy) -> Result<Self, ScanError> {
        Self::build(pattern, alignment, BackendFamily::detect(), None)
    }

    pub fn with_backend(
        pattern: &'p Pattern,
        alignment: AlignmentPolicy,
        backend: BackendFamily,
    ) -> Result<Self, ScanError> {
        Self::build(pattern, alignment, backend, None)
    }

    pub fn from_config(pattern: &'p Pattern, config: &ScanConfig) -> Result<Self, ScanError> {
        let alignment = AlignmentPolicy::aligned(config.alignment)?;
        let backend = config.backend.unwrap_or_else(BackendFamily::detect);
        Self::build(pattern, alignment, backend, config.vector_verify_limit)
    }

    pub(crate) fn build(
        pattern: &'p Pattern,
        alignment: AlignmentPolicy,
        backend: BackendFamily,
        verify_limit: Option<usize>,
    ) -> Result<Self, ScanError> {
        let alignment = alignment.normalized()?;
        if !backend.is_supported() {
            return Err(ScanError::UnsupportedBackend(backend));
        }

        let shape = PatternShape::new(pattern, alignment, backend, verify_limit);
        let (routine, scan_fn) = specializer::select(backend, shape);

        let mut signature = [0u8; MAX_LANES];
        let mut care_mask = 0u64;
        for (i, element) in pattern.tail().iter().take(MAX_LANES).enumerate() {
            if let PatternElement::Byte(b) = *element {
                signature[i] = b;
                care_mask |= 1 << i;
            }
        }

        let second_byte = pattern.get(1).and_then(|e| e.to_byte()).unwrap_or(0);
        let lane_mask = alignment.lane_mask(backend.lanes().min(64));

        log::debug!(
            "Compiled pattern [{}] for {} alignment using {}",
            pattern,
            alignment,
            routine
        );

        Ok(Self {
            pattern,
            alignment,
            backend,
            routine,
            scan_fn,
            second_byte,
            signature,
            care_mask,
            lane_mask,
        })
    }

    /// Finds the first legal position in `haystack` where the pattern matches.
    #[inline]
    pub fn scan<'h>(&self, haystack: &'h [u8]) -> ScanResult<'h> {
        ScanResult::new(haystack, (self.scan_fn)(haystack, self))
    }

    pub fn pattern(&self) -> &'p Pattern {
        self.pattern
    }

    pub fn alignment(&self) -> AlignmentPolicy {
        self.alignment
    }

    pub fn backend(&self) -> BackendFamily {
        self.backend
    }

    pub fn routine(&self) -> Routine {
        self.routine
    }

    pub(crate) fn second_byte(&self) -> u8 {
        self.second_byte
    }

    /// Pattern bytes after the first, wildcards zeroed.
    pub(crate) fn signature(&self) -> &[u8; MAX_LANES] {
        &self.signature
    }

    /// Bit `i` set when element `i + 1` is concrete.
    pub(crate) fn care_mask(&self) -> u64 {
        self.care_mask
    }

    pub(crate) fn lane_mask(&self) -> u64 {
        self.lane_mask
    }
}

impl fmt::Debug for ScanContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanContext")
            .field("pattern", &self.pattern)
            .field("alignment", &self.alignment)
            .field("backend", &self.backend)
            .field("routine", &self.routine)
            .finish_non_exhaustive()
    }
}
