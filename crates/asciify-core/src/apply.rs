//! Applying a table to text.

use crate::codepoint::CodePoint;
use crate::table::Table;

/// Replace every character of `s` by its entry.
///
/// Returns `None` as soon as one character has no entry; there is no
/// partial result.
pub fn transliterate(table: &Table, s: &str) -> Option<String> {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        out.push_str(table.get(CodePoint::from(c))?);
    }
    Some(out)
}

/// Like [`transliterate`], but characters without an entry pass through.
pub fn transliterate_any(table: &Table, s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match table.get(CodePoint::from(c)) {
            Some(r) => out.push_str(r),
            None => out.push(c),
        }
    }
    out
}
