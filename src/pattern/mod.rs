// Mon Oct 12 2026 - Alex

pub mod alignment;
pub mod element;
pub mod error;
pub mod pattern;

pub use alignment::AlignmentPolicy;
pub use element::PatternElement;
pub use error::PatternError;
pub use pattern::{Pattern, PatternBuilder};
