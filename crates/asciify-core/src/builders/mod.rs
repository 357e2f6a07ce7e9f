//! Table builders, one per rule source.
//!
//! Builders that return a [`Table`] produce a partial table for the caller to
//! merge. Builders that take `&mut Table` read the table under construction,
//! so the order in which they run changes the result.

mod alias;
mod cased;

pub use alias::{alias, NameRewrite};
pub use cased::{cased, lowercase, titlecase};

use tracing::{debug, debug_span};

use crate::apply::transliterate;
use crate::codepoint::{CharProperties, CodePoint};
use crate::table::Table;

/// Every printable ASCII character mapped to itself.
pub fn ascii_identity() -> Table {
    (' '..='~')
        .map(|c| (CodePoint::from(c), c.to_string()))
        .collect()
}

/// Associate each code point with `f(cp)`.
pub fn map_table(
    code_points: impl IntoIterator<Item = CodePoint>,
    f: impl Fn(CodePoint) -> String,
) -> Table {
    code_points.into_iter().map(|cp| (cp, f(cp))).collect()
}

/// Map each code point to `normalizer(cp)` wherever that differs from the
/// code point itself. Values are left unresolved for the closure engine.
pub fn decomposed(
    code_points: impl IntoIterator<Item = CodePoint>,
    normalizer: impl Fn(CodePoint) -> String,
) -> Table {
    let _span = debug_span!("decomposed").entered();
    let mut table = Table::new();
    for cp in code_points {
        let normalized = normalizer(cp);
        if normalized != cp.decoded() {
            table.insert(cp, normalized);
        }
    }
    debug!(entries = table.len());
    table
}

/// Add entries for code points whose normalized form already resolves
/// through `table`.
///
/// Printable ASCII and code points that already have an entry are skipped.
/// A candidate with any character missing from `table` leaves the code point
/// unmapped. Returns the number of entries added.
pub fn normalize(
    table: &mut Table,
    code_points: impl IntoIterator<Item = CodePoint>,
    normalizer: impl Fn(CodePoint) -> String,
) -> usize {
    let _span = debug_span!("normalize", entries = table.len()).entered();
    let mut added = 0;
    let mut unresolved = 0;
    for cp in code_points {
        if cp.is_printable_ascii() || table.contains(cp) {
            continue;
        }
        let candidate = normalizer(cp);
        match transliterate(table, &candidate) {
            Some(resolved) => {
                table.insert(cp, resolved);
                added += 1;
            }
            None => unresolved += 1,
        }
    }
    debug!(added, unresolved);
    added
}

/// Numeric code points mapped to their value, truncated toward zero.
pub fn numeric<P: CharProperties + ?Sized>(
    props: &P,
    code_points: impl IntoIterator<Item = CodePoint>,
) -> Table {
    let _span = debug_span!("numeric").entered();
    let mut table = Table::new();
    for cp in code_points {
        let Some(value) = props.numeric_value(cp) else {
            continue;
        };
        table.insert(cp, (value.trunc() as i64).to_string());
    }
    debug!(entries = table.len());
    table
}
