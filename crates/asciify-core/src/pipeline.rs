//! Running a build plan against one table.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, info_span};

use crate::builders;
use crate::closure::{close, ClosureError, ClosureReport};
use crate::codepoint::CharProperties;
use crate::plan::{BuildPlan, Step};
use crate::table::{parse_rules, parse_syllables, Table, TableError};

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("reading {file}: {source}")]
    Io { file: String, source: io::Error },

    #[error("{file}: {source}")]
    Source { file: String, source: TableError },

    #[error(transparent)]
    Closure(#[from] ClosureError),
}

/// Supplies the text of rule sources named in a plan.
pub trait SourceLoader {
    fn load(&self, file: &str) -> io::Result<String>;
}

/// Resolves plan file names relative to a directory.
pub struct DirLoader {
    root: PathBuf,
}

impl DirLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl SourceLoader for DirLoader {
    fn load(&self, file: &str) -> io::Result<String> {
        fs::read_to_string(self.root.join(file))
    }
}

/// The table under construction plus the oracle every builder reads from.
pub struct BuildContext<'p, P: CharProperties + ?Sized> {
    table: Table,
    props: &'p P,
}

impl<'p, P: CharProperties + ?Sized> BuildContext<'p, P> {
    pub fn new(props: &'p P) -> Self {
        Self {
            table: Table::new(),
            props,
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Merge a partial table; entries already present win.
    pub fn merge(&mut self, partial: Table) -> usize {
        let offered = partial.len();
        let added = self.table.merge(partial);
        debug!(offered, added, total = self.table.len(), "merged");
        added
    }

    pub fn apply_step(&mut self, step: &Step, loader: &dyn SourceLoader) -> Result<usize, BuildError> {
        let _span = info_span!("step", kind = step.name()).entered();
        let added = match step {
            Step::Ascii => self.merge(builders::ascii_identity()),
            Step::Rules { file } => {
                let text = load(loader, file)?;
                let partial = parse_rules(&text).map_err(|source| BuildError::Source {
                    file: file.clone(),
                    source,
                })?;
                self.merge(partial)
            }
            Step::Syllables { file } => {
                let text = load(loader, file)?;
                let partial = parse_syllables(&text).map_err(|source| BuildError::Source {
                    file: file.clone(),
                    source,
                })?;
                self.merge(partial)
            }
            Step::Decompose { form, .. } => {
                let partial = builders::decomposed(step.code_points(self.props), |cp| form.apply(cp));
                self.merge(partial)
            }
            Step::Normalize { form, .. } => {
                let cps = step.code_points(self.props);
                builders::normalize(&mut self.table, cps, |cp| form.apply(cp))
            }
            Step::Cased { .. } => {
                let cps = step.code_points(self.props);
                builders::cased(&mut self.table, self.props, cps)
            }
            Step::Numeric { .. } => {
                let partial = builders::numeric(self.props, step.code_points(self.props));
                self.merge(partial)
            }
            Step::Alias { rewrite, .. } => {
                let partial = builders::alias(self.props, step.code_points(self.props), |name| {
                    builders::NameRewrite::apply_all(rewrite, name)
                });
                self.merge(partial)
            }
        };
        info!(added, total = self.table.len(), "step done");
        Ok(added)
    }

    /// Close the table and hand it over.
    pub fn finish(mut self) -> Result<(Table, ClosureReport), BuildError> {
        let report = close(&mut self.table)?;
        Ok((self.table, report))
    }
}

/// Run every step of `plan` in order, then close the table.
pub fn run_plan<P: CharProperties + ?Sized>(
    plan: &BuildPlan,
    props: &P,
    loader: &dyn SourceLoader,
) -> Result<(Table, ClosureReport), BuildError> {
    let _span = info_span!("run_plan", steps = plan.steps.len()).entered();
    let mut ctx = BuildContext::new(props);
    for step in &plan.steps {
        ctx.apply_step(step, loader)?;
    }
    ctx.finish()
}

fn load(loader: &dyn SourceLoader, file: &str) -> Result<String, BuildError> {
    loader.load(file).map_err(|source| BuildError::Io {
        file: file.to_string(),
        source,
    })
}
