//! CLI front door helpers.
//!
//! Provides the command implementations behind `tugj`:
//! - `run replace-method-call-with-ternary` - rewrite calls, report per unit
//! - `search` - list calls matching a method pattern
//!
//! ## Input
//!
//! Input is a JSON-serialized, type-attributed [`CompilationUnit`], or an
//! array of them, read from a file or from stdin (`-`). Parsing Java source
//! and resolving types happen upstream.
//!
//! ## Error Handling
//!
//! All functions return `Result<T, TugError>`. Recipe option errors convert
//! to `TugError` through `From`, so they carry stable error codes.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use clap::ValueEnum;
use serde::Deserialize;
use tugjava_ast::{Codegen, CompilationUnit};
use tugjava_core::error::TugError;
use tugjava_core::output::{CallSiteInfo, RunResponse, SearchResponse};
use tugjava_recipes::{run_all, MethodMatcher, Recipe, RecipeError};

use crate::config::RecipeConfig;

/// Input path meaning stdin.
pub const STDIN: &str = "-";

/// Output format for `run`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON report including the rewritten trees (default).
    #[default]
    Json,
    /// The rewritten units rendered as Java source.
    Source,
}

/// Output of `run`.
#[derive(Debug, Clone)]
pub enum RunOutput {
    Json(RunResponse),
    Source(String),
}

/// Compilation units read from one input.
#[derive(Debug, Clone, PartialEq)]
pub struct InputUnits {
    /// File path, or `-` for stdin.
    pub label: String,
    pub units: Vec<CompilationUnit>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum UnitsDocument {
    Many(Vec<CompilationUnit>),
    One(CompilationUnit),
}

impl InputUnits {
    /// Read units from a file path or `-`.
    pub fn load(input: &str) -> Result<Self, TugError> {
        let text = if input == STDIN {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| TugError::internal(format!("failed to read stdin: {}", e)))?;
            text
        } else {
            fs::read_to_string(Path::new(input)).map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => TugError::file_not_found(input),
                _ => TugError::internal(format!("failed to read {}: {}", input, e)),
            })?
        };
        Self::parse(input, &text)
    }

    /// Decode units from JSON text.
    pub fn parse(label: impl Into<String>, json: &str) -> Result<Self, TugError> {
        let label = label.into();
        let document: UnitsDocument =
            serde_json::from_str(json).map_err(|e| TugError::MalformedInput {
                path: label.clone(),
                message: e.to_string(),
            })?;
        let units = match document {
            UnitsDocument::Many(units) => units,
            UnitsDocument::One(unit) => vec![unit],
        };
        Ok(InputUnits { label, units })
    }

    /// Label of the unit at `index`: the input label, indexed when the input
    /// held more than one unit.
    pub fn unit_label(&self, index: usize) -> String {
        if self.units.len() == 1 {
            self.label.clone()
        } else {
            format!("{}[{}]", self.label, index)
        }
    }
}

/// Run `replace-method-call-with-ternary` over every input unit.
pub fn run_ternary(
    config: &RecipeConfig,
    input: InputUnits,
    format: OutputFormat,
) -> Result<RunOutput, TugError> {
    let recipe = config.build()?;
    let labels: Vec<String> = (0..input.units.len()).map(|i| input.unit_label(i)).collect();
    let runs = run_all(&recipe, input.units);

    match format {
        OutputFormat::Json => {
            let units = runs
                .iter()
                .zip(labels)
                .map(|(run, label)| {
                    let tree = serde_json::to_value(&run.unit)?;
                    Ok(run.to_unit_result(label, Some(tree)))
                })
                .collect::<Result<Vec<_>, TugError>>()?;
            Ok(RunOutput::Json(RunResponse::new(recipe.name(), units)))
        }
        OutputFormat::Source => {
            let sources: Vec<String> = runs.iter().map(|run| run.unit.to_source()).collect();
            Ok(RunOutput::Source(sources.join("\n")))
        }
    }
}

/// List calls matching `method_pattern` in every input unit.
pub fn run_search(method_pattern: &str, input: &InputUnits) -> Result<SearchResponse, TugError> {
    let matcher =
        MethodMatcher::parse(method_pattern).map_err(|e| TugError::from(RecipeError::from(e)))?;
    let mut matches = Vec::new();
    for (index, unit) in input.units.iter().enumerate() {
        for site in matcher.find_calls(unit) {
            matches.push(CallSiteInfo {
                file: input.unit_label(index),
                scope: site.scope,
                call: site.call.to_source(),
                declaring_type: site.call.declaring_type().unwrap_or_default().to_string(),
            });
        }
    }
    Ok(SearchResponse::new(matcher.pattern(), matches))
}
