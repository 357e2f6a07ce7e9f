//! Build plans loaded from TOML.
//!
//! A plan is an ordered list of `[[step]]` tables. Steps run in file order
//! against one table, so a plan fully determines the build.

use serde::Deserialize;

use crate::builders::NameRewrite;
use crate::codepoint::{CharProperties, CodePoint, CodePointRange};
use crate::normal_form::NormalForm;

pub const DEFAULT_PLAN_TOML: &str = include_str!("default_plan.toml");

/// Returns the embedded default plan.
pub fn default_toml() -> &'static str {
    DEFAULT_PLAN_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("plan has no steps")]
    Empty,
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuildPlan {
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

impl BuildPlan {
    /// Whether any step consults character properties.
    pub fn needs_properties(&self) -> bool {
        self.steps.iter().any(Step::needs_properties)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Step {
    /// Printable ASCII mapped to itself.
    Ascii,
    /// A `<char>\t<replacement>` rule list.
    Rules { file: String },
    /// A consonant × vowel grid.
    Syllables { file: String },
    /// Raw normalized forms, resolved later by closure.
    Decompose {
        form: NormalForm,
        #[serde(default)]
        ranges: Vec<CodePointRange>,
    },
    /// Normalized forms that already resolve through the table.
    Normalize {
        form: NormalForm,
        #[serde(default)]
        ranges: Vec<CodePointRange>,
    },
    Cased {
        #[serde(default)]
        ranges: Vec<CodePointRange>,
    },
    Numeric {
        #[serde(default)]
        ranges: Vec<CodePointRange>,
    },
    Alias {
        #[serde(default)]
        ranges: Vec<CodePointRange>,
        #[serde(default)]
        rewrite: Vec<NameRewrite>,
    },
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::Ascii => "ascii",
            Step::Rules { .. } => "rules",
            Step::Syllables { .. } => "syllables",
            Step::Decompose { .. } => "decompose",
            Step::Normalize { .. } => "normalize",
            Step::Cased { .. } => "cased",
            Step::Numeric { .. } => "numeric",
            Step::Alias { .. } => "alias",
        }
    }

    /// Steps without ranges cover every code point the oracle knows, so they
    /// need one even when the builder itself does not.
    pub fn needs_properties(&self) -> bool {
        match self {
            Step::Ascii | Step::Rules { .. } | Step::Syllables { .. } => false,
            Step::Decompose { ranges, .. } | Step::Normalize { ranges, .. } => ranges.is_empty(),
            Step::Cased { .. } | Step::Numeric { .. } | Step::Alias { .. } => true,
        }
    }

    fn ranges(&self) -> &[CodePointRange] {
        match self {
            Step::Ascii | Step::Rules { .. } | Step::Syllables { .. } => &[],
            Step::Decompose { ranges, .. }
            | Step::Normalize { ranges, .. }
            | Step::Cased { ranges }
            | Step::Numeric { ranges }
            | Step::Alias { ranges, .. } => ranges.as_slice(),
        }
    }

    /// The code points this step covers: its ranges in ascending order, or
    /// everything `props` knows when no range is given.
    pub fn code_points<P: CharProperties + ?Sized>(&self, props: &P) -> Vec<CodePoint> {
        let ranges = self.ranges();
        if ranges.is_empty() {
            return props.assigned();
        }
        let mut cps: Vec<CodePoint> = ranges.iter().flat_map(|r| r.code_points()).collect();
        cps.sort_unstable();
        cps.dedup();
        cps
    }
}

pub fn parse_plan_toml(toml_str: &str) -> Result<BuildPlan, PlanError> {
    let plan: BuildPlan =
        toml::from_str(toml_str).map_err(|e| PlanError::Parse(e.to_string()))?;
    validate(&plan)?;
    Ok(plan)
}

fn validate(plan: &BuildPlan) -> Result<(), PlanError> {
    if plan.steps.is_empty() {
        return Err(PlanError::Empty);
    }

    for (i, step) in plan.steps.iter().enumerate() {
        let field = |name: &str| format!("step[{i}].{name}");
        match step {
            Step::Rules { file } | Step::Syllables { file } if file.trim().is_empty() => {
                return Err(PlanError::InvalidValue {
                    field: field("file"),
                    reason: "must not be empty".to_string(),
                });
            }
            Step::Alias { rewrite, .. } => {
                if let Some(j) = rewrite.iter().position(|r| r.find.is_empty()) {
                    return Err(PlanError::InvalidValue {
                        field: field(&format!("rewrite[{j}].find")),
                        reason: "must not be empty".to_string(),
                    });
                }
            }
            _ => {}
        }
    }

    Ok(())
}
