// Mon Oct 12 2026 - Alex

use crate::scan::ScanError;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

static DETECTED: Lazy<BackendFamily> = Lazy::new(BackendFamily::probe);

/// Instruction-set family a scan routine is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendFamily {
    Scalar,
    Sse2,
    Avx2,
    Neon,
}

impl BackendFamily {
    pub const ALL: [BackendFamily; 4] = [Self::Scalar, Self::Sse2, Self::Avx2, Self::Neon];

    /// Fastest family the host supports. Probed once per process.
    pub fn detect() -> Self {
        *DETECTED
    }

    fn probe() -> Self {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        {
            if is_x86_feature_detected!("avx2") {
                return Self::Avx2;
            }
            if is_x86_feature_detected!("sse2") {
                return Self::Sse2;
            }
        }
        #[cfg(target_arch = "aarch64")]
        {
            if std::arch::is_aarch64_feature_detected!("neon") {
                return Self::Neon;
            }
        }
        Self::Scalar
    }

    pub fn is_supported(&self) -> bool {
        match self {
            Self::Scalar => true,
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Self::Sse2 => is_x86_feature_detected!("sse2"),
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Self::Avx2 => is_x86_feature_detected!("avx2"),
            #[cfg(target_arch = "aarch64")]
            Self::Neon => std::arch::is_aarch64_feature_detected!("neon"),
            #[allow(unreachable_patterns)]
            _ => false,
        }
    }

    /// Every family usable on this host, scalar first.
    pub fn supported() -> Vec<Self> {
        Self::ALL.into_iter().filter(|f| f.is_supported()).collect()
    }

    /// Bytes per vector register; 1 for the scalar family.
    pub fn lanes(&self) -> usize {
        match self {
            Self::Scalar => 1,
            Self::Sse2 | Self::Neon => 16,
            Self::Avx2 => 32,
        }
    }

    /// Longest pattern whose bytes after the first fit in one vector load.
    pub fn verify_limit(&self) -> usize {
        self.lanes() + 1
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Sse2 => "sse2",
            Self::Avx2 => "avx2",
            Self::Neon => "neon",
        }
    }
}

impl fmt::Display for BackendFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BackendFamily {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scalar" => Ok(Self::Scalar),
            "sse2" | "sse" => Ok(Self::Sse2),
            "avx2" => Ok(Self::Avx2),
            "neon" => Ok(Self::Neon),
            _ => Err(ScanError::UnknownBackend(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detected_family_is_supported() {
        let family = BackendFamily::detect();
        assert!(family.is_supported());
        assert_eq!(family, BackendFamily::detect());
    }

    #[test]
    fn test_scalar_always_supported() {
        assert!(BackendFamily::Scalar.is_supported());
        assert_eq!(BackendFamily::supported()[0], BackendFamily::Scalar);
    }

    #[test]
    fn test_parse_roundtrip_names() {
        for family in BackendFamily::ALL {
            assert_eq!(family.name().parse::<BackendFamily>(), Ok(family));
        }
        assert_eq!("AVX2".parse::<BackendFamily>(), Ok(BackendFamily::Avx2));
        assert!(matches!(
            "avx512".parse::<BackendFamily>(),
            Err(ScanError::UnknownBackend(_))
        ));
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&BackendFamily::Sse2).unwrap();
        assert_eq!(json, "\"sse2\"");
        let family: BackendFamily = serde_json::from_str("\"neon\"").unwrap();
        assert_eq!(family, BackendFamily::Neon);
    }
}
