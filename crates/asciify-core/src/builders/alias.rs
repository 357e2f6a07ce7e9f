use serde::Deserialize;
use tracing::{debug, debug_span};

use crate::codepoint::{CharProperties, CodePoint};
use crate::table::Table;

/// One substring substitution applied to a character name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NameRewrite {
    pub find: String,
    pub replace: String,
}

impl NameRewrite {
    /// Apply `rewrites` in order.
    pub fn apply_all(rewrites: &[NameRewrite], name: &str) -> String {
        rewrites
            .iter()
            .fold(name.to_string(), |acc, r| acc.replace(&r.find, &r.replace))
    }
}

/// Map each code point to the character whose name is `name_map(name)`.
///
/// When no character carries the mapped name, or the code point has no
/// name at all, the code point maps to itself. That entry only survives
/// closure if the code point is printable ASCII; otherwise closure reports it.
pub fn alias<P: CharProperties + ?Sized>(
    props: &P,
    code_points: impl IntoIterator<Item = CodePoint>,
    name_map: impl Fn(&str) -> String,
) -> Table {
    let _span = debug_span!("alias").entered();
    let mut table = Table::new();
    let mut unmatched = 0;
    for cp in code_points {
        let target = match props.name(cp) {
            Some(name) => props.lookup_by_name(&name_map(name)),
            None => None,
        };
        let target = match target {
            Some(target) => target,
            None => {
                unmatched += 1;
                cp
            }
        };
        table.insert(cp, target.decoded());
    }
    debug!(entries = table.len(), unmatched);
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::closure::{close, ClosureError};
    use crate::tests::sample_ucd;

    fn cp(c: char) -> CodePoint {
        CodePoint::from(c)
    }

    fn strip_bold(name: &str) -> String {
        name.replace("MATHEMATICAL BOLD ", "LATIN ")
            .replace("CAPITAL ", "CAPITAL LETTER ")
            .replace("SMALL ", "SMALL LETTER ")
    }

    #[test]
    fn alias_to_named_character() {
        let ucd = sample_ucd();
        let t = alias(&ucd, [cp('𝐀'), cp('𝐚')], strip_bold);
        assert_eq!(t.get(cp('𝐀')), Some("A"));
        assert_eq!(t.get(cp('𝐚')), Some("a"));
    }

    #[test]
    fn unmatched_name_maps_to_itself() {
        let ucd = sample_ucd();
        // "LATIN CAPITAL LETTER OMEGA" does not exist.
        let t = alias(&ucd, [cp('𝛀')], strip_bold);
        assert_eq!(t.get(cp('𝛀')), Some("𝛀"));
    }

    #[test]
    fn unmatched_ascii_self_reference_closes() {
        let ucd = sample_ucd();
        let mut t = alias(&ucd, [cp('A')], |name| format!("{name} WITH NOTHING"));
        assert_eq!(t.get(cp('A')), Some("A"));
        close(&mut t).unwrap();
    }

    #[test]
    fn unmatched_non_ascii_self_reference_fails_at_closure() {
        let ucd = sample_ucd();
        let mut t = alias(&ucd, [cp('𝛀')], strip_bold);
        let err = close(&mut t).unwrap_err();
        assert!(matches!(err, ClosureError::Cycle { code_point, .. } if code_point == cp('𝛀')));
    }

    #[test]
    fn unnamed_code_point_maps_to_itself() {
        let ucd = sample_ucd();
        let t = alias(&ucd, [cp('一')], |name| name.to_string());
        assert_eq!(t.get(cp('一')), Some("一"));
    }

    #[test]
    fn rewrites_apply_in_order() {
        let rewrites = vec![
            NameRewrite {
                find: "MATHEMATICAL BOLD ".into(),
                replace: "LATIN ".into(),
            },
            NameRewrite {
                find: "CAPITAL ".into(),
                replace: "CAPITAL LETTER ".into(),
            },
        ];
        assert_eq!(
            NameRewrite::apply_all(&rewrites, "MATHEMATICAL BOLD CAPITAL A"),
            "LATIN CAPITAL LETTER A"
        );
    }
}
