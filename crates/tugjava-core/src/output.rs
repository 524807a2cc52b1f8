//! JSON output types and serialization for CLI responses.
//!
//! These types form the contract between `tugj` and whatever drives it
//! (a batch harness, an editor integration, an agent).
//!
//! ## Design Principles
//!
//! 1. **Structured JSON:** All structured CLI output is valid JSON
//! 2. **Status first:** Every response has `status` as first field
//! 3. **Deterministic:** Same input -> same output (field order, array ordering)
//! 4. **Nullable vs absent:** absent field means "not applicable"
//! 5. **Versioned:** Schema version in response enables forward compatibility

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::error::{OutputErrorCode, TugError};

/// Current schema version for all responses.
pub const SCHEMA_VERSION: &str = "1";

// ============================================================================
// Call Site Types
// ============================================================================

/// A call site that matched a recipe's pattern but was left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkippedCallInfo {
    /// Enclosing `Class.method` of the call.
    pub scope: String,
    /// The call as rendered source text.
    pub call: String,
    /// Machine-readable reason (`type_mismatch`, `already_rewritten`, ...).
    pub reason: String,
    /// Human-readable explanation.
    pub message: String,
}

/// A call site matching a method pattern (search output).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CallSiteInfo {
    /// Input the call was found in.
    pub file: String,
    /// Enclosing `Class.method` of the call.
    pub scope: String,
    /// The call as rendered source text.
    pub call: String,
    /// Fully-qualified declaring type of the invoked method.
    pub declaring_type: String,
}

// ============================================================================
// Run Output Types
// ============================================================================

/// Per-unit result of running a recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitResult {
    /// Input the unit was read from (`-` for stdin).
    pub file: String,
    /// Whether the unit was changed.
    pub changed: bool,
    /// Number of call sites rewritten.
    pub rewritten: u32,
    /// Imports added to the unit, in insertion order.
    pub imports_added: Vec<String>,
    /// Matching call sites that were left unchanged.
    pub skipped: Vec<SkippedCallInfo>,
    /// The rewritten tree (only with `--format json`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<serde_json::Value>,
}

/// Summary counts across all units of a run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Summary {
    /// Number of units processed.
    pub units_processed: u32,
    /// Number of units changed.
    pub units_changed: u32,
    /// Number of call sites rewritten.
    pub calls_rewritten: u32,
    /// Number of matching call sites left unchanged.
    pub calls_skipped: u32,
}

impl Summary {
    /// Compute the summary for a list of unit results.
    pub fn from_units(units: &[UnitResult]) -> Self {
        units.iter().fold(Summary::default(), |mut acc, unit| {
            acc.units_processed += 1;
            if unit.changed {
                acc.units_changed += 1;
            }
            acc.calls_rewritten += unit.rewritten;
            acc.calls_skipped += unit.skipped.len() as u32;
            acc
        })
    }
}

/// Response for `tugj run`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResponse {
    /// Status: "ok".
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    /// Recipe name.
    pub recipe: String,
    /// Summary counts.
    pub summary: Summary,
    /// Per-unit results, in input order.
    pub units: Vec<UnitResult>,
}

impl RunResponse {
    /// Create a new run response.
    pub fn new(recipe: impl Into<String>, units: Vec<UnitResult>) -> Self {
        RunResponse {
            status: "ok".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            recipe: recipe.into(),
            summary: Summary::from_units(&units),
            units,
        }
    }
}

/// Response for `tugj search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Status: "ok".
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    /// The method pattern searched for.
    pub pattern: String,
    /// Matching call sites, in input then source order.
    pub matches: Vec<CallSiteInfo>,
}

impl SearchResponse {
    /// Create a new search response.
    pub fn new(pattern: impl Into<String>, matches: Vec<CallSiteInfo>) -> Self {
        SearchResponse {
            status: "ok".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            pattern: pattern.into(),
            matches,
        }
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Error information for error responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Numeric error code.
    pub code: u8,
    /// Human-readable message.
    pub message: String,
    /// Error-specific structured data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorInfo {
    /// Create from a TugError.
    pub fn from_error(err: &TugError) -> Self {
        let code = OutputErrorCode::from(err).code();
        let message = err.to_string();

        let details = match err {
            TugError::InvalidArguments { details, .. } => details.clone(),
            TugError::InvalidConfiguration { option, .. } => {
                Some(serde_json::json!({ "option": option }))
            }
            TugError::FileNotFound { path } | TugError::MalformedInput { path, .. } => {
                Some(serde_json::json!({ "path": path }))
            }
            TugError::ApplyError { file, .. } => {
                file.as_ref().map(|f| serde_json::json!({ "file": f }))
            }
            TugError::InternalError { .. } => None,
        };

        ErrorInfo {
            code,
            message,
            details,
        }
    }
}

/// Error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Status: "error".
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    /// Error information.
    pub error: ErrorInfo,
}

impl ErrorResponse {
    /// Create an error response from a TugError.
    pub fn from_error(err: &TugError) -> Self {
        ErrorResponse {
            status: "error".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            error: ErrorInfo::from_error(err),
        }
    }
}

// ============================================================================
// Emitters
// ============================================================================

/// Emit a response as pretty-printed JSON to a writer.
pub fn emit_response<T: Serialize>(response: &T, writer: &mut impl Write) -> io::Result<()> {
    let json = serde_json::to_string_pretty(response)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{}", json)
}

/// Emit a response as compact JSON (single line) to a writer.
pub fn emit_response_compact<T: Serialize>(
    response: &T,
    writer: &mut impl Write,
) -> io::Result<()> {
    let json = serde_json::to_string(response)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{}", json)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(changed: bool, rewritten: u32, skipped: usize) -> UnitResult {
        UnitResult {
            file: "Sample.json".to_string(),
            changed,
            rewritten,
            imports_added: vec![],
            skipped: (0..skipped)
                .map(|i| SkippedCallInfo {
                    scope: "Sample.run".to_string(),
                    call: format!("s{}.getReasonPhrase()", i),
                    reason: "type_mismatch".to_string(),
                    message: "declared on other.Type".to_string(),
                })
                .collect(),
            unit: None,
        }
    }

    mod summary_tests {
        use super::*;

        #[test]
        fn summary_counts_units_and_calls() {
            let units = vec![unit(true, 2, 1), unit(false, 0, 0), unit(true, 1, 2)];
            let summary = Summary::from_units(&units);
            assert_eq!(summary.units_processed, 3);
            assert_eq!(summary.units_changed, 2);
            assert_eq!(summary.calls_rewritten, 3);
            assert_eq!(summary.calls_skipped, 3);
        }

        #[test]
        fn summary_of_nothing_is_zero() {
            assert_eq!(Summary::from_units(&[]), Summary::default());
        }
    }

    mod response_tests {
        use super::*;

        #[test]
        fn run_response_status_is_first_field() {
            let response = RunResponse::new("replace-method-call-with-ternary", vec![]);
            let json = serde_json::to_string(&response).unwrap();
            assert!(json.starts_with("{\"status\":\"ok\""));
            assert!(json.contains("\"schema_version\":\"1\""));
        }

        #[test]
        fn unit_tree_is_omitted_when_absent() {
            let json = serde_json::to_string(&unit(false, 0, 0)).unwrap();
            assert!(!json.contains("\"unit\""));
        }

        #[test]
        fn error_response_carries_code_and_details() {
            let err = TugError::invalid_config("methodPattern", "missing parentheses");
            let response = ErrorResponse::from_error(&err);
            let value = serde_json::to_value(&response).unwrap();
            assert_eq!(value["status"], "error");
            assert_eq!(value["error"]["code"], 2);
            assert_eq!(value["error"]["details"]["option"], "methodPattern");
        }

        #[test]
        fn emit_response_is_deterministic() {
            let response = SearchResponse::new(
                "*..* getReasonPhrase()",
                vec![CallSiteInfo {
                    file: "a.json".to_string(),
                    scope: "A.run".to_string(),
                    call: "status.getReasonPhrase()".to_string(),
                    declaring_type: "org.springframework.http.HttpStatus".to_string(),
                }],
            );

            let mut output1 = Vec::new();
            let mut output2 = Vec::new();
            emit_response(&response, &mut output1).unwrap();
            emit_response(&response, &mut output2).unwrap();
            assert_eq!(output1, output2);

            let parsed: serde_json::Value =
                serde_json::from_slice(&output1).expect("valid JSON");
            assert_eq!(parsed["matches"][0]["scope"], "A.run");
        }

        #[test]
        fn emit_response_compact_is_single_line() {
            let response = RunResponse::new("r", vec![unit(true, 1, 0)]);
            let mut output = Vec::new();
            emit_response_compact(&response, &mut output).unwrap();
            let text = String::from_utf8(output).unwrap();
            assert_eq!(text.lines().count(), 1);
        }
    }
}
