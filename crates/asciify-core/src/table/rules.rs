use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, debug_span};

use super::{Table, TableError};
use crate::codepoint::CodePoint;

/// Parse a rule list: `<char>\t<replacement>` per line.
///
/// Empty lines and lines starting with `#` are skipped.
pub fn parse_rules(text: &str) -> Result<Table, TableError> {
    let _span = debug_span!("parse_rules", bytes = text.len()).entered();
    parse_lines(text, |line| line.starts_with('#'))
}

/// Parse a finished table as written by [`write_table`].
///
/// Same line format as [`parse_rules`] but without comments, so the entry
/// for `#` reads back.
pub fn parse_table(text: &str) -> Result<Table, TableError> {
    let _span = debug_span!("parse_table", bytes = text.len()).entered();
    parse_lines(text, |_| false)
}

fn parse_lines(text: &str, is_comment: impl Fn(&str) -> bool) -> Result<Table, TableError> {
    let mut table = Table::new();

    for (idx, line) in text.lines().enumerate() {
        if line.is_empty() || is_comment(line) {
            continue;
        }

        let mut chars = line.chars();
        let Some(first) = chars.next() else {
            continue;
        };
        let cp = CodePoint::from(first);
        let Some(replacement) = chars.as_str().strip_prefix('\t') else {
            return Err(TableError::Malformed {
                line: idx + 1,
                reason: format!("expected TAB after {cp}"),
            });
        };

        if !table.insert(cp, replacement) {
            debug!(line = idx + 1, %cp, "duplicate rule ignored");
        }
    }

    debug!(entries = table.len());
    Ok(table)
}

/// Write `table` in ascending code point order.
///
/// Every value is checked before the first byte is written, so a table that
/// is not fully printable ASCII produces no output at all.
pub fn write_table<W: Write>(table: &Table, mut out: W) -> Result<(), TableError> {
    table.verify_printable()?;
    for (cp, value) in table.sorted() {
        writeln!(out, "{}\t{value}", cp.as_char())?;
    }
    out.flush()?;
    Ok(())
}

pub fn save_table(table: &Table, path: &Path) -> Result<(), TableError> {
    table.verify_printable()?;
    let file = File::create(path)?;
    write_table(table, BufWriter::new(file))
}

pub fn load_table(path: &Path) -> Result<Table, TableError> {
    let text = fs::read_to_string(path)?;
    parse_table(&text)
}
