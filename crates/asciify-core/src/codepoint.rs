//! Code points, code point ranges and the character property oracle.

use std::fmt;
use std::ops::RangeInclusive;

use serde::Deserialize;

/// A single Unicode scalar value.
///
/// Ordering is by scalar value, which is the order tables are written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CodePoint(char);

impl CodePoint {
    pub const fn from_char(c: char) -> Self {
        Self(c)
    }

    /// Returns `None` for surrogates and values above U+10FFFF.
    pub fn from_u32(value: u32) -> Option<Self> {
        char::from_u32(value).map(Self)
    }

    pub const fn as_char(self) -> char {
        self.0
    }

    pub const fn value(self) -> u32 {
        self.0 as u32
    }

    /// The decoded single-character string form.
    pub fn decoded(self) -> String {
        self.0.to_string()
    }

    pub fn is_printable_ascii(self) -> bool {
        is_printable_ascii(self.0)
    }
}

impl From<char> for CodePoint {
    fn from(c: char) -> Self {
        Self(c)
    }
}

impl fmt::Display for CodePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U+{:04X}", self.value())
    }
}

/// Printable ASCII is U+0020..U+007E; finished tables contain nothing else.
pub fn is_printable_ascii(c: char) -> bool {
    matches!(c, ' '..='~')
}

pub fn is_printable_ascii_str(s: &str) -> bool {
    s.chars().all(is_printable_ascii)
}

/// An inclusive range of scalar values, written `"00C0..024F"` or `"00C0"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct CodePointRange {
    start: u32,
    end: u32,
}

impl CodePointRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn bounds(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }

    /// Iterate the range, skipping values that are not scalar values.
    pub fn code_points(&self) -> impl Iterator<Item = CodePoint> {
        self.bounds().filter_map(CodePoint::from_u32)
    }
}

impl TryFrom<String> for CodePointRange {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        let (start, end) = match s.split_once("..") {
            Some((a, b)) => (parse_hex(a)?, parse_hex(b)?),
            None => {
                let v = parse_hex(&s)?;
                (v, v)
            }
        };
        if start > end {
            return Err(format!("range {s} is reversed"));
        }
        if end > 0x10FFFF {
            return Err(format!("range {s} exceeds U+10FFFF"));
        }
        Ok(Self { start, end })
    }
}

fn parse_hex(s: &str) -> Result<u32, String> {
    let digits = s.trim();
    let digits = digits
        .strip_prefix("U+")
        .or_else(|| digits.strip_prefix("u+"))
        .unwrap_or(digits);
    u32::from_str_radix(digits, 16).map_err(|_| format!("invalid code point '{s}'"))
}

/// Read-only access to per-character Unicode properties.
///
/// Case accessors return the code point itself when no single-character
/// mapping exists.
pub trait CharProperties {
    fn name(&self, cp: CodePoint) -> Option<&str>;
    fn upper(&self, cp: CodePoint) -> CodePoint;
    fn lower(&self, cp: CodePoint) -> CodePoint;
    fn title(&self, cp: CodePoint) -> CodePoint;
    fn numeric_value(&self, cp: CodePoint) -> Option<f64>;
    fn lookup_by_name(&self, name: &str) -> Option<CodePoint>;

    /// Every code point the oracle knows about, ascending.
    fn assigned(&self) -> Vec<CodePoint>;
}
