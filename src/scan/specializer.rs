// Mon Oct 12 2026 - Alex

//! Picks one precompiled routine per (family, alignment, pattern shape) so the
//! scan loop itself never branches on any of them.

use crate::pattern::{AlignmentPolicy, Pattern};
use crate::scan::{scalar, BackendFamily, ScanContext};
use std::fmt;

pub(crate) type ScanFn = fn(&[u8], &ScanContext<'_>) -> Option<usize>;

/// The six monomorphized routines one vector family provides.
pub(crate) struct RoutineTable {
    pub any_filter_verify: ScanFn,
    pub any_filter: ScanFn,
    pub any_verify: ScanFn,
    pub any: ScanFn,
    pub aligned_verify: ScanFn,
    pub aligned: ScanFn,
}

/// Identifies the routine a context ended up with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Routine {
    Scalar,
    Vector {
        family: BackendFamily,
        aligned: bool,
        second_byte_filter: bool,
        vector_verify: bool,
    },
}

impl fmt::Display for Routine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Routine::Scalar => write!(f, "scalar"),
            Routine::Vector {
                family,
                aligned,
                second_byte_filter,
                vector_verify,
            } => {
                write!(f, "{}", family)?;
                if *aligned {
                    write!(f, "+aligned")?;
                }
                if *second_byte_filter {
                    write!(f, "+cmpeq2")?;
                }
                if *vector_verify {
                    write!(f, "+veccmp")?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PatternShape {
    pub aligned: bool,
    pub second_byte_filter: bool,
    pub vector_verify: bool,
    /// False when the stride is wider than a vector, so a fixed lane mask can't express it.
    pub vectorizable: bool,
}

impl PatternShape {
    pub fn new(
        pattern: &Pattern,
        alignment: AlignmentPolicy,
        family: BackendFamily,
        verify_limit: Option<usize>,
    ) -> Self {
        let lanes = family.lanes();
        let limit = verify_limit
            .unwrap_or_else(|| family.verify_limit())
            .min(family.verify_limit());
        let aligned = alignment.is_aligned();

        Self {
            aligned,
            second_byte_filter: !aligned && pattern.has_concrete_second(),
            vector_verify: pattern.fits_vector_verify(lanes) && pattern.len() <= limit,
            vectorizable: family != BackendFamily::Scalar && alignment.stride() <= lanes,
        }
    }
}

fn table(family: BackendFamily) -> Option<&'static RoutineTable> {
    use crate::scan::vector;

    match family {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        BackendFamily::Sse2 => Some(&vector::sse2::ROUTINES),
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        BackendFamily::Avx2 => Some(&vector::avx2::ROUTINES),
        #[cfg(target_arch = "aarch64")]
        BackendFamily::Neon => Some(&vector::neon::ROUTINES),
        _ => None,
    }
}

pub(crate) fn select(family: BackendFamily, shape: PatternShape) -> (Routine, ScanFn) {
    let table = match table(family) {
        Some(table) if shape.vectorizable => table,
        _ => return (Routine::Scalar, scalar::find_in_context),
    };

    let scan_fn = match (shape.aligned, shape.second_byte_filter, shape.vector_verify) {
        (false, true, true) => table.any_filter_verify,
        (false, true, false) => table.any_filter,
        (false, false, true) => table.any_verify,
        (false, false, false) => table.any,
        (true, _, true) => table.aligned_verify,
        (true, _, false) => table.aligned,
    };

    let routine = Routine::Vector {
        family,
        aligned: shape.aligned,
        second_byte_filter: shape.second_byte_filter && !shape.aligned,
        vector_verify: shape.vector_verify,
    };
    (routine, scan_fn)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape_of(text: &str, alignment: AlignmentPolicy, family: BackendFamily) -> PatternShape {
        PatternShape::new(&text.parse().unwrap(), alignment, family, None)
    }

    #[test]
    fn test_shape_axes() {
        let shape = shape_of("48 8B ?? 05", AlignmentPolicy::Any, BackendFamily::Avx2);
        assert!(!shape.aligned);
        assert!(shape.second_byte_filter);
        assert!(shape.vector_verify);
        assert!(shape.vectorizable);

        let shape = shape_of("48 8B ?? 05", AlignmentPolicy::Aligned(16), BackendFamily::Avx2);
        assert!(shape.aligned);
        assert!(!shape.second_byte_filter);

        let shape = shape_of("48 ?? 05", AlignmentPolicy::Any, BackendFamily::Sse2);
        assert!(!shape.second_byte_filter);

        let shape = shape_of("48", AlignmentPolicy::Any, BackendFamily::Sse2);
        assert!(!shape.second_byte_filter);
        assert!(shape.vector_verify);
    }

    #[test]
    fn test_verify_threshold_tracks_lanes() {
        let seventeen = Pattern::from_bytes(&[0x90; 17]).unwrap();
        let eighteen = Pattern::from_bytes(&[0x90; 18]).unwrap();
        let thirty_three = Pattern::from_bytes(&[0x90; 33]).unwrap();
        let thirty_four = Pattern::from_bytes(&[0x90; 34]).unwrap();
        let any = AlignmentPolicy::Any;

        assert!(PatternShape::new(&seventeen, any, BackendFamily::Sse2, None).vector_verify);
        assert!(!PatternShape::new(&eighteen, any, BackendFamily::Sse2, None).vector_verify);
        assert!(PatternShape::new(&thirty_three, any, BackendFamily::Avx2, None).vector_verify);
        assert!(!PatternShape::new(&thirty_four, any, BackendFamily::Avx2, None).vector_verify);
    }

    #[test]
    fn test_verify_limit_lowers_but_never_raises() {
        let pattern = Pattern::from_bytes(&[0x90; 8]).unwrap();
        let any = AlignmentPolicy::Any;
        assert!(!PatternShape::new(&pattern, any, BackendFamily::Avx2, Some(4)).vector_verify);
        assert!(PatternShape::new(&pattern, any, BackendFamily::Avx2, Some(8)).vector_verify);

        let long = Pattern::from_bytes(&[0x90; 40]).unwrap();
        assert!(!PatternShape::new(&long, any, BackendFamily::Avx2, Some(64)).vector_verify);
    }

    #[test]
    fn test_wide_stride_is_not_vectorizable() {
        let shape = shape_of("FF", AlignmentPolicy::Aligned(32), BackendFamily::Sse2);
        assert!(!shape.vectorizable);
        let shape = shape_of("FF", AlignmentPolicy::Aligned(32), BackendFamily::Avx2);
        assert!(shape.vectorizable);
        let shape = shape_of("FF", AlignmentPolicy::Any, BackendFamily::Scalar);
        assert!(!shape.vectorizable);
    }

    #[test]
    fn test_scalar_family_always_routes_to_scalar() {
        for aligned in [false, true] {
            for second_byte_filter in [false, true] {
                for vector_verify in [false, true] {
                    let shape = PatternShape {
                        aligned,
                        second_byte_filter,
                        vector_verify,
                        vectorizable: false,
                    };
                    assert_eq!(select(BackendFamily::Scalar, shape).0, Routine::Scalar);
                }
            }
        }
    }

    #[test]
    fn test_every_shape_maps_to_one_routine() {
        for family in BackendFamily::supported() {
            for aligned in [false, true] {
                for second_byte_filter in [false, true] {
                    for vector_verify in [false, true] {
                        let shape = PatternShape {
                            aligned,
                            second_byte_filter: second_byte_filter && !aligned,
                            vector_verify,
                            vectorizable: family != BackendFamily::Scalar,
                        };
                        let (routine, _) = select(family, shape);
                        match routine {
                            Routine::Scalar => assert_eq!(family, BackendFamily::Scalar),
                            Routine::Vector {
                                family: selected,
                                aligned: a,
                                second_byte_filter: f,
                                vector_verify: v,
                            } => {
                                assert_eq!(selected, family);
                                assert_eq!(a, aligned);
                                assert_eq!(f, second_byte_filter && !aligned);
                                assert_eq!(v, vector_verify);
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_routine_display() {
        let routine = Routine::Vector {
            family: BackendFamily::Avx2,
            aligned: false,
            second_byte_filter: true,
            vector_verify: true,
        };
        assert_eq!(routine.to_string(), "avx2+cmpeq2+veccmp");
        assert_eq!(Routine::Scalar.to_string(), "scalar");
    }
}
