// Mon Oct 12 2026 - Alex

use crate::pattern::PatternError;
use crate::scan::BackendFamily;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error("Backend {0} is not supported on this host")]
    UnsupportedBackend(BackendFamily),
    #[error("Unknown backend: {0}")]
    UnknownBackend(String),
}
