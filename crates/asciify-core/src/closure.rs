//! Fixpoint resolution of a table down to printable ASCII.
//!
//! Each pass walks the keys in ascending order and rewrites every value that
//! still contains a non-printable-ASCII character by concatenating the
//! entries of its characters. An acyclic table of `n` entries settles within
//! `n` passes, so a rewrite in pass `n + 1` proves a cycle. A value that
//! comes to contain its own key is reported as a cycle right away.

use std::collections::{HashMap, VecDeque};
use std::fmt;

use tracing::{debug, debug_span, info};

use crate::codepoint::{is_printable_ascii, is_printable_ascii_str, CodePoint};
use crate::table::Table;

#[derive(Debug, thiserror::Error)]
pub enum ClosureError {
    #[error("{entry} references {missing}, which has no entry: {chain}")]
    Unresolved {
        entry: CodePoint,
        missing: CodePoint,
        chain: Chain,
    },

    #[error("{code_point} still not ASCII after {passes} passes, cycle: {chain}")]
    Cycle {
        code_point: CodePoint,
        chain: Chain,
        passes: usize,
    },
}

/// Reference path from an entry to the code point that stopped it: a
/// repeated code point for cycles, the missing one otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain(pub Vec<CodePoint>);

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cp) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{cp}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClosureReport {
    /// Passes run, including the final pass that changed nothing.
    pub passes: usize,
    /// Total value rewrites over all passes.
    pub rewritten: usize,
}

/// Rewrite `table` in place until every value is printable ASCII.
pub fn close(table: &mut Table) -> Result<ClosureReport, ClosureError> {
    let _span = debug_span!("close", entries = table.len()).entered();
    let keys = table.keys_sorted();
    let pending: HashMap<CodePoint, String> = table
        .iter()
        .filter(|(_, value)| !is_printable_ascii_str(value))
        .map(|(cp, value)| (cp, value.to_string()))
        .collect();
    let limit = keys.len() + 1;
    let mut report = ClosureReport::default();

    while report.passes < limit {
        report.passes += 1;
        let mut changed = false;

        for &cp in &keys {
            let Some(value) = table.get(cp) else {
                continue;
            };
            if is_printable_ascii_str(value) {
                continue;
            }
            let resolved = resolve_once(table, value).map_err(|missing| {
                ClosureError::Unresolved {
                    entry: cp,
                    missing,
                    chain: missing_chain(cp, missing, &pending),
                }
            })?;
            // Once a non-ASCII value contains its own key, every later pass
            // contains it again.
            if !is_printable_ascii_str(&resolved) && resolved.contains(cp.as_char()) {
                return Err(cycle_error(table, cp, &keys, &pending, report.passes));
            }
            table.set(cp, resolved);
            report.rewritten += 1;
            changed = true;
        }

        debug!(pass = report.passes, changed);
        if !changed {
            info!(passes = report.passes, rewritten = report.rewritten, "table closed");
            return Ok(report);
        }
    }

    let unresolved = |cp: &CodePoint| table.get(*cp).is_some_and(|v| !is_printable_ascii_str(v));
    let start = keys.iter().copied().find(unresolved).unwrap_or(keys[0]);
    Err(cycle_error(table, start, &keys, &pending, report.passes))
}

/// One substitution step: every character of `value` replaced by its entry.
/// Fails with the first character that has no entry.
fn resolve_once(table: &Table, value: &str) -> Result<String, CodePoint> {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        let cp = CodePoint::from(c);
        let Some(r) = table.get(cp) else {
            return Err(cp);
        };
        out.push_str(r);
    }
    Ok(out)
}

/// Chain ending in `entry -> missing`, starting from the lowest code point
/// whose original value leads to `entry`.
fn missing_chain(
    entry: CodePoint,
    missing: CodePoint,
    pending: &HashMap<CodePoint, String>,
) -> Chain {
    let mut referrers: HashMap<CodePoint, Vec<CodePoint>> = HashMap::new();
    for (&key, value) in pending {
        for c in value.chars() {
            referrers.entry(CodePoint::from(c)).or_default().push(key);
        }
    }
    for keys in referrers.values_mut() {
        keys.sort_unstable();
        keys.dedup();
    }

    // Next hop towards `entry` for everything that reaches it.
    let mut toward: HashMap<CodePoint, CodePoint> = HashMap::new();
    let mut queue = VecDeque::from([entry]);
    while let Some(cp) = queue.pop_front() {
        for &r in referrers.get(&cp).into_iter().flatten() {
            if r != entry && !toward.contains_key(&r) {
                toward.insert(r, cp);
                queue.push_back(r);
            }
        }
    }

    let mut current = toward.keys().copied().min().unwrap_or(entry);
    let mut chain = vec![current];
    while let Some(&next) = toward.get(&current) {
        chain.push(next);
        current = next;
    }
    chain.push(missing);
    Chain(chain)
}

/// Walk the original references of `start` until a code point repeats.
fn cycle_error(
    table: &Table,
    start: CodePoint,
    keys: &[CodePoint],
    pending: &HashMap<CodePoint, String>,
    passes: usize,
) -> ClosureError {
    let unresolved = |cp: CodePoint| table.get(cp).is_some_and(|v| !is_printable_ascii_str(v));

    let mut chain = vec![start];
    let mut current = start;
    while chain.len() <= keys.len() {
        let next = pending.get(&current).and_then(|value| {
            value
                .chars()
                .filter(|&c| !is_printable_ascii(c))
                .map(CodePoint::from)
                .find(|&cp| unresolved(cp))
        });
        let Some(next) = next else {
            break;
        };
        let repeated = chain.contains(&next);
        chain.push(next);
        if repeated {
            break;
        }
        current = next;
    }

    ClosureError::Cycle {
        code_point: start,
        chain: Chain(chain),
        passes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(char, &str)]) -> Table {
        entries
            .iter()
            .map(|&(c, r)| (CodePoint::from(c), r.to_string()))
            .collect()
    }

    fn cp(c: char) -> CodePoint {
        CodePoint::from(c)
    }

    #[test]
    fn resolves_nested_references() {
        let mut t = table(&[('a', "a"), ('e', "e"), ('æ', "ae"), ('ǣ', "æ"), ('ǽ', "ǣ")]);
        let report = close(&mut t).unwrap();
        assert_eq!(t.get(cp('ǣ')), Some("ae"));
        assert_eq!(t.get(cp('ǽ')), Some("ae"));
        assert!(report.passes >= 2);
    }

    #[test]
    fn ascii_characters_resolve_through_their_entries() {
        let mut t = table(&[('a', "a"), ('\u{301}', ""), ('á', "a\u{301}")]);
        close(&mut t).unwrap();
        assert_eq!(t.get(cp('á')), Some("a"));
    }

    #[test]
    fn closed_table_needs_one_pass() {
        let mut t = table(&[('ß', "ss"), ('æ', "ae")]);
        let report = close(&mut t).unwrap();
        assert_eq!(report, ClosureReport { passes: 1, rewritten: 0 });
    }

    #[test]
    fn empty_table_is_closed() {
        let mut t = Table::new();
        assert_eq!(close(&mut t).unwrap().rewritten, 0);
    }

    #[test]
    fn missing_entry_is_unresolved() {
        let mut t = table(&[('ǣ', "æ")]);
        match close(&mut t).unwrap_err() {
            ClosureError::Unresolved {
                entry,
                missing,
                chain,
            } => {
                assert_eq!(entry, cp('ǣ'));
                assert_eq!(missing, cp('æ'));
                assert_eq!(chain, Chain(vec![cp('ǣ'), cp('æ')]));
            }
            other => panic!("expected Unresolved, got {other:?}"),
        }
    }

    #[test]
    fn unresolved_chain_starts_at_the_lowest_dependent() {
        let mut t = table(&[('a', "a"), ('ǖ', "ǘ"), ('ǘ', "aǚ"), ('ǚ', "aǜ")]);
        let err = close(&mut t).unwrap_err();
        match &err {
            ClosureError::Unresolved {
                entry,
                missing,
                chain,
            } => {
                assert_eq!(*entry, cp('ǚ'));
                assert_eq!(*missing, cp('ǜ'));
                assert_eq!(*chain, Chain(vec![cp('ǖ'), cp('ǘ'), cp('ǚ'), cp('ǜ')]));
            }
            other => panic!("expected Unresolved, got {other:?}"),
        }
        assert!(err.to_string().ends_with("U+01D6 -> U+01D8 -> U+01DA -> U+01DC"), "{err}");
    }

    #[test]
    fn ascii_key_with_an_ascii_way_out_is_not_a_cycle() {
        let mut t = table(&[('a', "á"), ('á', "a")]);
        close(&mut t).unwrap();
        assert_eq!(t.get(cp('a')), Some("a"));
        assert_eq!(t.get(cp('á')), Some("a"));
    }

    #[test]
    fn ascii_key_containing_itself_unresolved_is_a_cycle() {
        let mut t = table(&[('a', "aá"), ('á', "a")]);
        assert!(matches!(close(&mut t), Err(ClosureError::Cycle { .. })));
    }

    #[test]
    fn two_element_cycle_is_detected() {
        let mut t = table(&[('α', "β"), ('β', "α")]);
        match close(&mut t).unwrap_err() {
            ClosureError::Cycle {
                code_point, chain, ..
            } => {
                assert_eq!(code_point, cp('α'));
                assert_eq!(chain, Chain(vec![cp('α'), cp('β'), cp('α')]));
            }
            other => panic!("expected Cycle, got {other:?}"),
        }
    }

    #[test]
    fn self_doubling_value_stops_in_first_pass() {
        let mut t = table(&[('ꙮ', "ꙮꙮ")]);
        match close(&mut t).unwrap_err() {
            ClosureError::Cycle { passes, .. } => assert_eq!(passes, 1),
            other => panic!("expected Cycle, got {other:?}"),
        }
    }

    #[test]
    fn self_reference_is_a_cycle() {
        let mut t = table(&[('a', "a"), ('ᚠ', "ᚠ")]);
        let err = close(&mut t).unwrap_err();
        assert!(matches!(err, ClosureError::Cycle { code_point, .. } if code_point == cp('ᚠ')));
        assert!(err.to_string().contains("U+16A0 -> U+16A0"), "{err}");
    }

    #[test]
    fn cycle_behind_a_resolvable_prefix() {
        let mut t = table(&[('a', "a"), ('ж', "aщ"), ('щ', "ш"), ('ш', "щ")]);
        match close(&mut t).unwrap_err() {
            ClosureError::Cycle { code_point, chain, .. } => {
                assert_eq!(code_point, cp('ш'));
                assert_eq!(chain, Chain(vec![cp('ш'), cp('щ'), cp('ш')]));
            }
            other => panic!("expected Cycle, got {other:?}"),
        }
    }
}
