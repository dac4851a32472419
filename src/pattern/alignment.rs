// Mon Oct 12 2026 - Alex

use crate::pattern::PatternError;
use std::fmt;

/// Which start addresses count as match candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlignmentPolicy {
    #[default]
    Any,
    /// Start address must be a multiple of the stride, which is a power of two.
    Aligned(usize),
}

impl AlignmentPolicy {
    /// Checked constructor. A stride of 1 is the same as `Any`.
    pub fn aligned(stride: usize) -> Result<Self, PatternError> {
        Self::Aligned(stride).normalized()
    }

    pub fn validate(&self) -> Result<(), PatternError> {
        match *self {
            Self::Aligned(n) if !n.is_power_of_two() => Err(PatternError::InvalidAlignment(n)),
            _ => Ok(()),
        }
    }

    pub fn normalized(self) -> Result<Self, PatternError> {
        self.validate()?;
        Ok(match self {
            Self::Aligned(1) => Self::Any,
            other => other,
        })
    }

    pub fn stride(&self) -> usize {
        match *self {
            Self::Any => 1,
            Self::Aligned(n) => n,
        }
    }

    pub fn is_aligned(&self) -> bool {
        matches!(self, Self::Aligned(_))
    }

    pub fn allows(&self, addr: usize) -> bool {
        addr & (self.stride() - 1) == 0
    }

    /// Distance from `addr` to the next address this policy allows.
    pub fn padding(&self, addr: usize) -> usize {
        addr.wrapping_neg() & (self.stride() - 1)
    }

    /// One bit per lane of a `lanes`-byte chunk that starts on a stride boundary,
    /// set where the lane is a legal start.
    pub fn lane_mask(&self, lanes: usize) -> u64 {
        debug_assert!(lanes <= 64);
        (0..lanes)
            .step_by(self.stride())
            .fold(0u64, |mask, lane| mask | (1u64 << lane))
    }
}

impl fmt::Display for AlignmentPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "any"),
            Self::Aligned(n) => write!(f, "x{}", n),
        }
    }
}
