// Mon Oct 12 2026 - Alex

use std::fmt;

/// One position of a signature: a byte that must match, or a byte we don't care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternElement {
    Byte(u8),
    Wildcard,
}

impl PatternElement {
    #[inline]
    pub fn matches(&self, byte: u8) -> bool {
        match self {
            Self::Byte(b) => *b == byte,
            Self::Wildcard => true,
        }
    }

    #[inline]
    pub fn is_concrete(&self) -> bool {
        matches!(self, Self::Byte(_))
    }

    #[inline]
    pub fn to_byte(&self) -> Option<u8> {
        match self {
            Self::Byte(b) => Some(*b),
            Self::Wildcard => None,
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "?" | "??" => Some(Self::Wildcard),
            _ if token.len() <= 2 && token.bytes().all(|c| c.is_ascii_hexdigit()) => {
                u8::from_str_radix(token, 16).ok().map(Self::Byte)
            }
            _ => None,
        }
    }
}

impl From<u8> for PatternElement {
    fn from(byte: u8) -> Self {
        Self::Byte(byte)
    }
}

impl From<Option<u8>> for PatternElement {
    fn from(byte: Option<u8>) -> Self {
        byte.map_or(Self::Wildcard, Self::Byte)
    }
}

impl fmt::Display for PatternElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Byte(b) => write!(f, "{:02X}", b),
            Self::Wildcard => write!(f, "??"),
        }
    }
}
