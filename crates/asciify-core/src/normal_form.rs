use serde::Deserialize;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::codepoint::CodePoint;

/// Normalization callbacks usable from a build plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NormalForm {
    Nfd,
    Nfkd,
    /// NFKD with combining marks removed (`é` → `e`, `ﬁ` → `fi`).
    NfkdStripMarks,
}

impl NormalForm {
    pub fn apply(self, cp: CodePoint) -> String {
        let c = cp.as_char();
        match self {
            NormalForm::Nfd => std::iter::once(c).nfd().collect(),
            NormalForm::Nfkd => std::iter::once(c).nfkd().collect(),
            NormalForm::NfkdStripMarks => std::iter::once(c)
                .nfkd()
                .filter(|&m| !is_combining_mark(m))
                .collect(),
        }
    }
}
