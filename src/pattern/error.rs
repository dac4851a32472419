// Mon Oct 12 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
    #[error("Invalid token '{token}' at position {position}")]
    InvalidToken { token: String, position: usize },
    #[error("Invalid alignment: {0} is not a power of two")]
    InvalidAlignment(usize),
}
