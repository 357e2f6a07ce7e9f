//! Character properties read from `UnicodeData.txt`.
//!
//! Only the fields the builders need are kept: the character name, the
//! numeric value, and the simple upper/lower/title case mappings. Range
//! markers such as `<CJK Ideograph, First>` carry no name.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, debug_span};

use crate::codepoint::{CharProperties, CodePoint};

const FIELD_COUNT: usize = 15;

#[derive(Debug, thiserror::Error)]
pub enum UcdError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("UnicodeData line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

#[derive(Debug, Clone, Default)]
struct Record {
    name: Option<String>,
    numeric: Option<f64>,
    upper: Option<CodePoint>,
    lower: Option<CodePoint>,
    title: Option<CodePoint>,
}

#[derive(Debug, Clone, Default)]
pub struct UnicodeData {
    records: HashMap<CodePoint, Record>,
    by_name: HashMap<String, CodePoint>,
}

impl UnicodeData {
    pub fn load(path: &Path) -> Result<Self, UcdError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, UcdError> {
        let _span = debug_span!("parse_ucd", bytes = text.len()).entered();
        let mut data = UnicodeData::default();

        for (idx, line) in text.lines().enumerate() {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let malformed = |reason: String| UcdError::Malformed {
                line: idx + 1,
                reason,
            };

            let fields: Vec<&str> = line.split(';').collect();
            if fields.len() != FIELD_COUNT {
                return Err(malformed(format!(
                    "expected {FIELD_COUNT} fields, found {}",
                    fields.len()
                )));
            }

            let cp = parse_code_point(fields[0]).map_err(&malformed)?;
            let name = (!fields[1].starts_with('<')).then(|| fields[1].to_string());
            let numeric = parse_numeric(fields[8]).map_err(&malformed)?;
            let upper = parse_optional(fields[12]).map_err(&malformed)?;
            let lower = parse_optional(fields[13]).map_err(&malformed)?;
            // An empty titlecase field means "same as uppercase".
            let title = parse_optional(fields[14]).map_err(&malformed)?.or(upper);

            if let Some(name) = &name {
                data.by_name.insert(name.clone(), cp);
            }
            data.records.insert(
                cp,
                Record {
                    name,
                    numeric,
                    upper,
                    lower,
                    title,
                },
            );
        }

        debug!(records = data.records.len(), named = data.by_name.len());
        Ok(data)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn record(&self, cp: CodePoint) -> Option<&Record> {
        self.records.get(&cp)
    }
}

impl CharProperties for UnicodeData {
    fn name(&self, cp: CodePoint) -> Option<&str> {
        self.record(cp)?.name.as_deref()
    }

    fn upper(&self, cp: CodePoint) -> CodePoint {
        self.record(cp).and_then(|r| r.upper).unwrap_or(cp)
    }

    fn lower(&self, cp: CodePoint) -> CodePoint {
        self.record(cp).and_then(|r| r.lower).unwrap_or(cp)
    }

    fn title(&self, cp: CodePoint) -> CodePoint {
        self.record(cp).and_then(|r| r.title).unwrap_or(cp)
    }

    fn numeric_value(&self, cp: CodePoint) -> Option<f64> {
        self.record(cp)?.numeric
    }

    fn lookup_by_name(&self, name: &str) -> Option<CodePoint> {
        self.by_name.get(name).copied()
    }

    fn assigned(&self) -> Vec<CodePoint> {
        let mut cps: Vec<CodePoint> = self.records.keys().copied().collect();
        cps.sort_unstable();
        cps
    }
}

fn parse_code_point(field: &str) -> Result<CodePoint, String> {
    u32::from_str_radix(field, 16)
        .ok()
        .and_then(CodePoint::from_u32)
        .ok_or_else(|| format!("invalid code point '{field}'"))
}

fn parse_optional(field: &str) -> Result<Option<CodePoint>, String> {
    if field.is_empty() {
        return Ok(None);
    }
    parse_code_point(field).map(Some)
}

/// Numeric values are integers or fractions such as `1/2` and `-1/2`.
fn parse_numeric(field: &str) -> Result<Option<f64>, String> {
    if field.is_empty() {
        return Ok(None);
    }
    let invalid = || format!("invalid numeric value '{field}'");
    let value = match field.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.parse().map_err(|_| invalid())?;
            let den: f64 = den.parse().map_err(|_| invalid())?;
            if den == 0.0 {
                return Err(invalid());
            }
            num / den
        }
        None => field.parse().map_err(|_| invalid())?,
    };
    Ok(Some(value))
}
