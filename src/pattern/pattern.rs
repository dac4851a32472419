// Mon Oct 12 2026 - Alex

use crate::pattern::{PatternElement, PatternError};
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

/// An immutable signature. The first element is always a concrete byte, which
/// lets the vector routines broadcast it without checking.
#[derive(Debug, Clone)]
pub struct Pattern {
    elements: Vec<PatternElement>,
    first: u8,
    name: Option<String>,
}

impl Pattern {
    pub fn new(elements: Vec<PatternElement>) -> Result<Self, PatternError> {
        match elements.first() {
            None => Err(PatternError::InvalidPattern("pattern is empty".to_string())),
            Some(PatternElement::Wildcard) => Err(PatternError::InvalidPattern(
                "first element must be a concrete byte".to_string(),
            )),
            Some(&PatternElement::Byte(first)) => Ok(Self {
                elements,
                first,
                name: None,
            }),
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PatternError> {
        Self::new(bytes.iter().copied().map(PatternElement::Byte).collect())
    }

    /// Parses the IDA-style text form, e.g. `48 8B ?? ?? 89`.
    pub fn from_ida_pattern(text: &str) -> Result<Self, PatternError> {
        let elements = text
            .split_whitespace()
            .enumerate()
            .map(|(position, token)| {
                PatternElement::from_token(token).ok_or_else(|| PatternError::InvalidToken {
                    token: token.to_string(),
                    position,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(elements)
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Never true for a constructed pattern.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[PatternElement] {
        &self.elements
    }

    pub fn get(&self, index: usize) -> Option<PatternElement> {
        self.elements.get(index).copied()
    }

    pub fn first_byte(&self) -> u8 {
        self.first
    }

    /// Everything after the first element.
    pub fn tail(&self) -> &[PatternElement] {
        &self.elements[1..]
    }

    pub fn has_concrete_second(&self) -> bool {
        matches!(self.elements.get(1), Some(PatternElement::Byte(_)))
    }

    /// True when the elements after the first fit in a single `lanes`-wide load.
    pub fn fits_vector_verify(&self, lanes: usize) -> bool {
        self.elements.len() - 1 <= lanes
    }

    /// Checks the pattern against the start of `data`.
    pub fn matches(&self, data: &[u8]) -> bool {
        data.len() >= self.elements.len()
            && self.elements.iter().zip(data).all(|(e, &b)| e.matches(b))
    }

    pub fn significant_byte_count(&self) -> usize {
        self.elements.iter().filter(|e| e.is_concrete()).count()
    }

    pub fn wildcard_byte_count(&self) -> usize {
        self.elements.len() - self.significant_byte_count()
    }

    pub fn to_hex_string(&self) -> String {
        self.elements
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Index<usize> for Pattern {
    type Output = PatternElement;

    fn index(&self, index: usize) -> &PatternElement {
        &self.elements[index]
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_ida_pattern(s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref name) = self.name {
            write!(f, "{}: ", name)?;
        }
        write!(f, "{}", self.to_hex_string())
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl Eq for Pattern {}

#[derive(Debug, Default)]
pub struct PatternBuilder {
    elements: Vec<PatternElement>,
    name: Option<String>,
}

impl PatternBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn byte(mut self, b: u8) -> Self {
        self.elements.push(PatternElement::Byte(b));
        self
    }

    pub fn bytes(mut self, bs: &[u8]) -> Self {
        self.elements.extend(bs.iter().copied().map(PatternElement::Byte));
        self
    }

    pub fn wildcard(mut self) -> Self {
        self.elements.push(PatternElement::Wildcard);
        self
    }

    pub fn wildcards(mut self, count: usize) -> Self {
        self.elements
            .extend(std::iter::repeat(PatternElement::Wildcard).take(count));
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn build(self) -> Result<Pattern, PatternError> {
        let pattern = Pattern::new(self.elements)?;
        Ok(match self.name {
            Some(name) => pattern.with_name(&name),
            None => pattern,
        })
    }
}
