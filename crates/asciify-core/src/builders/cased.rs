use tracing::{debug, debug_span};

use crate::codepoint::{CharProperties, CodePoint};
use crate::table::Table;

/// Fill in case variants from entries that already exist.
///
/// A lowercase code point inherits its uppercase partner's entry, lowercased.
/// An uppercase code point inherits its lowercase partner's entry,
/// title-cased. Existing entries are never replaced. Returns the number of
/// entries added.
pub fn cased<P: CharProperties + ?Sized>(
    table: &mut Table,
    props: &P,
    code_points: impl IntoIterator<Item = CodePoint>,
) -> usize {
    let _span = debug_span!("cased", entries = table.len()).entered();
    let mut added = 0;
    for cp in code_points {
        if table.contains(cp) {
            continue;
        }

        let upper = props.upper(cp);
        if upper != cp {
            if let Some(value) = table.get(upper) {
                let derived = lowercase(value);
                table.insert(cp, derived);
                added += 1;
            }
            continue;
        }

        let lower = props.lower(cp);
        if lower == cp {
            continue;
        }
        if let Some(value) = table.get(lower) {
            let derived = titlecase(value);
            table.insert(cp, derived);
            added += 1;
        }
    }
    debug!(added);
    added
}

pub fn lowercase(s: &str) -> String {
    s.to_lowercase()
}

/// First character uppercased, the rest lowercased (`"DZ"` → `"Dz"`).
pub fn titlecase(s: &str) -> String {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out: String = first.to_uppercase().collect();
    out.push_str(&chars.as_str().to_lowercase());
    out
}
