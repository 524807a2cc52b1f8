// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! The recipe abstraction and run reports.

use std::fmt;

use tugjava_ast::CompilationUnit;
use tugjava_core::output::{SkippedCallInfo, UnitResult};

use crate::template::TemplateError;

/// A transformation applied to one compilation unit at a time.
///
/// Recipes are configured once and then run against any number of units.
/// A run owns its unit and returns the rewritten unit; recipes keep no state
/// between runs.
pub trait Recipe {
    /// Stable kebab-case identifier (`replace-method-call-with-ternary`).
    fn name(&self) -> &'static str;

    /// Human-readable name.
    fn display_name(&self) -> &'static str;

    /// One-sentence description.
    fn description(&self) -> &'static str;

    /// Transform `unit`.
    fn run(&self, unit: CompilationUnit) -> RecipeRun;
}

/// Result of running a recipe on one unit.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeRun {
    /// The (possibly) rewritten unit.
    pub unit: CompilationUnit,
    /// What happened.
    pub report: RecipeReport,
}

impl RecipeRun {
    /// Whether the unit was modified.
    pub fn changed(&self) -> bool {
        self.report.rewritten > 0 || !self.report.imports_added.is_empty()
    }
}

/// Per-unit counts and skipped call sites.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeReport {
    /// Number of calls replaced.
    pub rewritten: usize,
    /// Matching calls left unchanged, in traversal order.
    pub skipped: Vec<SkippedCall>,
    /// Imports added, in insertion order.
    pub imports_added: Vec<String>,
}

/// A matching call that was left unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedCall {
    /// Enclosing `Class.method`.
    pub scope: String,
    /// The call as rendered source.
    pub call: String,
    pub reason: SkipReason,
}

/// Why a matching call was not rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The declaring type is not the target type.
    TypeMismatch { declaring_type: String },
    /// The call text already names the target type.
    AlreadyRewritten,
    /// The receiver is absent or has an unsupported shape.
    UnsupportedReceiver,
    /// The replacement could not be built.
    Template(TemplateError),
}

impl SkipReason {
    /// Machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            SkipReason::TypeMismatch { .. } => "type_mismatch",
            SkipReason::AlreadyRewritten => "already_rewritten",
            SkipReason::UnsupportedReceiver => "unsupported_receiver",
            SkipReason::Template(_) => "template_failure",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::TypeMismatch { declaring_type } => {
                write!(f, "declared on {}, not the target type", declaring_type)
            }
            SkipReason::AlreadyRewritten => write!(f, "call already names the target type"),
            SkipReason::UnsupportedReceiver => {
                write!(f, "receiver is not a variable, field or call chain")
            }
            SkipReason::Template(e) => write!(f, "{}", e),
        }
    }
}

impl From<&SkippedCall> for SkippedCallInfo {
    fn from(skipped: &SkippedCall) -> Self {
        SkippedCallInfo {
            scope: skipped.scope.clone(),
            call: skipped.call.clone(),
            reason: skipped.reason.code().to_string(),
            message: skipped.reason.to_string(),
        }
    }
}

impl RecipeRun {
    /// Convert to the CLI output shape. `unit` is the serialized tree to
    /// embed, if any.
    pub fn to_unit_result(&self, file: impl Into<String>, unit: Option<serde_json::Value>) -> UnitResult {
        UnitResult {
            file: file.into(),
            changed: self.changed(),
            rewritten: self.report.rewritten as u32,
            imports_added: self.report.imports_added.clone(),
            skipped: self.report.skipped.iter().map(SkippedCallInfo::from).collect(),
            unit,
        }
    }
}

/// Run `recipe` over each unit in order. Units are independent.
pub fn run_all(recipe: &dyn Recipe, units: Vec<CompilationUnit>) -> Vec<RecipeRun> {
    units.into_iter().map(|unit| recipe.run(unit)).collect()
}
