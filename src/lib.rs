// Mon Oct 12 2026 - Alex

pub mod address;
pub mod config;
pub mod mapped;
pub mod pattern;
pub mod report;
pub mod scan;
pub mod utils;

pub use address::Address;
pub use config::ScanConfig;
pub use pattern::{AlignmentPolicy, Pattern, PatternBuilder, PatternElement, PatternError};
pub use scan::{find_pattern, BackendFamily, Routine, ScanContext, ScanError, ScanResult};
