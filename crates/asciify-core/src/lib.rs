//! Builds code point → printable-ASCII transliteration tables.
//!
//! Rule sources feed partial tables into a [`pipeline::BuildContext`]; the
//! [`closure`] engine then rewrites every entry down to printable ASCII, and
//! [`apply`] uses the finished table on text.

pub mod apply;
pub mod builders;
pub mod closure;
pub mod codepoint;
pub mod normal_form;
pub mod pipeline;
pub mod plan;
pub mod table;
pub mod ucd;

#[cfg(test)]
mod tests;

pub use apply::{transliterate, transliterate_any};
pub use closure::{close, ClosureError, ClosureReport};
pub use codepoint::{CharProperties, CodePoint};
pub use table::{Table, TableError};
