use tracing::{debug, debug_span};

use super::{Table, TableError};
use crate::codepoint::CodePoint;

/// Marks where the consonant goes inside a vowel pattern (`-i` → `ki`).
pub const PLACEHOLDER: char = '-';

/// Expand a consonant × vowel grid.
///
/// The first non-comment line holds the vowel patterns; column 0 of every
/// row is the consonant and each remaining cell names the code point for
/// that consonant + vowel pair. Empty cells produce no entry.
pub fn parse_syllables(text: &str) -> Result<Table, TableError> {
    let _span = debug_span!("parse_syllables", bytes = text.len()).entered();
    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

    let Some((_, header)) = lines.next() else {
        return Err(TableError::Malformed {
            line: 1,
            reason: "missing vowel header row".to_string(),
        });
    };
    let vowels: Vec<&str> = header.split(',').collect();

    let mut table = Table::new();
    for (idx, row) in lines {
        let cells: Vec<&str> = row.split(',').collect();
        if cells.len() > vowels.len() {
            return Err(TableError::Malformed {
                line: idx + 1,
                reason: format!(
                    "row has {} columns but the header has {}",
                    cells.len(),
                    vowels.len()
                ),
            });
        }
        let consonant = cells[0];

        for (col, cell) in cells.iter().enumerate().skip(1) {
            if cell.is_empty() {
                continue;
            }
            let cp = single_code_point(cell).ok_or_else(|| TableError::Malformed {
                line: idx + 1,
                reason: format!("cell {col} ({cell:?}) is not a single character"),
            })?;
            let vowel = vowels[col];
            let value = if vowel.contains(PLACEHOLDER) {
                vowel.replace(PLACEHOLDER, consonant)
            } else {
                format!("{consonant}{vowel}")
            };
            table.insert(cp, value);
        }
    }

    debug!(entries = table.len(), columns = vowels.len());
    Ok(table)
}

fn single_code_point(cell: &str) -> Option<CodePoint> {
    let mut chars = cell.chars();
    let c = chars.next()?;
    chars.next().is_none().then_some(CodePoint::from(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cp(c: char) -> CodePoint {
        CodePoint::from(c)
    }

    #[test]
    fn suffix_and_placeholder_forms() {
        let t = parse_syllables(",a,-i\nk,カ,キ\n").unwrap();
        assert_eq!(t.get(cp('カ')), Some("ka"));
        assert_eq!(t.get(cp('キ')), Some("ki"));
    }

    #[test]
    fn placeholder_in_the_middle() {
        let t = parse_syllables(",w-a\nk,ㄱ\n").unwrap();
        assert_eq!(t.get(cp('ㄱ')), Some("wka"));
    }

    #[test]
    fn empty_cells_are_skipped() {
        let text = "# cree-style grid\n,e,i,o,a\np,ᐯ,,ᐳ,\nt,,ᑎ,,ᑕ\n";
        let t = parse_syllables(text).unwrap();
        assert_eq!(t.len(), 4);
        assert_eq!(t.get(cp('ᐯ')), Some("pe"));
        assert_eq!(t.get(cp('ᐳ')), Some("po"));
        assert_eq!(t.get(cp('ᑎ')), Some("ti"));
        assert_eq!(t.get(cp('ᑕ')), Some("ta"));
    }

    #[test]
    fn empty_consonant_column() {
        let t = parse_syllables(",a,i\n,ア,イ\n").unwrap();
        assert_eq!(t.get(cp('ア')), Some("a"));
        assert_eq!(t.get(cp('イ')), Some("i"));
    }

    #[test]
    fn too_many_cells_is_fatal() {
        let err = parse_syllables(",a\nk,カ,キ\n").unwrap_err();
        assert!(matches!(err, TableError::Malformed { line: 2, .. }));
    }

    #[test]
    fn multi_character_cell_is_fatal() {
        let err = parse_syllables(",a\nk,カキ\n").unwrap_err();
        assert!(matches!(err, TableError::Malformed { line: 2, .. }));
    }

    #[test]
    fn missing_header_is_fatal() {
        assert!(parse_syllables("# only a comment\n").is_err());
    }
}
