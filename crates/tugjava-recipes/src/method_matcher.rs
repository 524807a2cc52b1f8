// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Method signature patterns.
//!
//! A pattern has the form `<owner> <method>(<arguments>)`, or equivalently
//! `<owner>#<method>(<arguments>)`:
//!
//! - **owner**: a dotted type pattern. `*` matches exactly one segment, `..`
//!   matches zero or more segments, and `*` inside a segment matches any run
//!   of characters within that segment (`Http*`).
//! - **method**: an exact method name, or `*` for any name.
//! - **arguments**: a comma-separated list where `..` matches zero or more
//!   parameters, `*` matches exactly one parameter, and anything else is a
//!   type pattern matched against the erased parameter type (`int`,
//!   `java.lang.String`, `byte[]`). An unqualified capitalized name also
//!   matches its `java.lang` type, so `String` matches `java.lang.String`.
//!
//! Patterns are compiled once; matching is a pure predicate and never fails.
//! A call whose signature was not resolved never matches.
//!
//! ```
//! use tugjava_ast::{Expression, JavaType, MethodInvocation, MethodType};
//! use tugjava_recipes::MethodMatcher;
//!
//! let matcher = MethodMatcher::parse("org.springframework..* getReasonPhrase()").unwrap();
//! let call = MethodInvocation::new(Some(Expression::ident("status", None)), "getReasonPhrase")
//!     .with_method_type(MethodType::new(
//!         "org.springframework.http.HttpStatus",
//!         "getReasonPhrase",
//!         JavaType::string(),
//!     ));
//! assert!(matcher.matches(&call));
//! ```

use std::fmt;

use regex::Regex;
use thiserror::Error;
use tugjava_ast::visitor::{walk_compilation_unit, VisitResult, Visitor};
use tugjava_ast::{ClassDecl, CompilationUnit, MethodDecl, MethodInvocation, MethodType};

use crate::scope::ScopeTracker;

// ============================================================================
// Error Types
// ============================================================================

/// Errors from compiling a method pattern.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PatternError {
    /// The pattern is empty.
    #[error("method pattern is empty")]
    Empty,

    /// The owner or the method name is missing.
    #[error("method pattern '{pattern}' must name an owner type and a method")]
    MissingMethodName { pattern: String },

    /// No argument list.
    #[error("method pattern '{pattern}' has no argument list")]
    MissingParentheses { pattern: String },

    /// Parentheses are nested, unbalanced, or followed by more text.
    #[error("method pattern '{pattern}' has unbalanced parentheses")]
    UnbalancedParentheses { pattern: String },

    /// The method name is not an identifier or `*`.
    #[error("method pattern '{pattern}' has invalid method name '{name}'")]
    InvalidMethodName { pattern: String, name: String },

    /// A type pattern has an empty dot-separated segment.
    #[error("method pattern '{pattern}' has an empty type segment")]
    EmptySegment { pattern: String },

    /// A type pattern segment contains characters that are not allowed.
    #[error("method pattern '{pattern}' has invalid type segment '{segment}'")]
    InvalidSegment { pattern: String, segment: String },

    /// Two `..` in a row.
    #[error("method pattern '{pattern}' has consecutive '..' wildcards")]
    ConsecutiveAnyRun { pattern: String },

    /// An empty item in the argument list (`(int,)`).
    #[error("method pattern '{pattern}' has an empty argument")]
    EmptyArgument { pattern: String },

    /// The compiled expression was rejected by the regex engine.
    #[error("method pattern '{pattern}' could not be compiled: {message}")]
    Regex { pattern: String, message: String },
}

// ============================================================================
// Compiled Pattern
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum MethodName {
    Any,
    Exact(String),
}

#[derive(Debug, Clone)]
enum ArgPattern {
    /// `..`
    AnyRun,
    /// `*`
    AnyOne,
    Type(Regex),
}

/// A compiled method signature pattern.
#[derive(Debug, Clone)]
pub struct MethodMatcher {
    pattern: String,
    owner: Regex,
    method: MethodName,
    arguments: Vec<ArgPattern>,
}

impl MethodMatcher {
    /// Compile a pattern such as `org.springframework..* getReasonPhrase()`.
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Err(PatternError::Empty);
        }

        let opens = pattern.matches('(').count();
        let closes = pattern.matches(')').count();
        if opens == 0 && closes == 0 {
            return Err(PatternError::MissingParentheses {
                pattern: pattern.to_string(),
            });
        }
        if opens != 1 || closes != 1 || !pattern.ends_with(')') {
            return Err(PatternError::UnbalancedParentheses {
                pattern: pattern.to_string(),
            });
        }
        let open = pattern.find('(').ok_or_else(|| PatternError::MissingParentheses {
            pattern: pattern.to_string(),
        })?;
        let head = pattern[..open].trim();
        let args = &pattern[open + 1..pattern.len() - 1];

        let (owner, method) = match head.split_once('#') {
            Some(parts) => parts,
            None => head.rsplit_once(char::is_whitespace).unwrap_or(("", head)),
        };
        let (owner, method) = (owner.trim(), method.trim());
        if owner.is_empty() || method.is_empty() {
            return Err(PatternError::MissingMethodName {
                pattern: pattern.to_string(),
            });
        }

        let method = if method == "*" {
            MethodName::Any
        } else if crate::type_name::is_java_identifier(method) {
            MethodName::Exact(method.to_string())
        } else {
            return Err(PatternError::InvalidMethodName {
                pattern: pattern.to_string(),
                name: method.to_string(),
            });
        };

        let owner = anchored(&type_pattern_regex(owner, pattern)?, pattern)?;
        let arguments = parse_arguments(args, pattern)?;

        Ok(MethodMatcher {
            pattern: pattern.to_string(),
            owner,
            method,
            arguments,
        })
    }

    /// The pattern text this matcher was compiled from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether `call` invokes a method matching this pattern. Unresolved
    /// calls never match.
    pub fn matches(&self, call: &MethodInvocation) -> bool {
        call.method_type
            .as_ref()
            .is_some_and(|method_type| self.matches_method_type(method_type))
    }

    /// Whether a resolved signature matches this pattern.
    pub fn matches_method_type(&self, method_type: &MethodType) -> bool {
        if let MethodName::Exact(name) = &self.method {
            if *name != method_type.name {
                return false;
            }
        }
        if !self.owner.is_match(&method_type.declaring_type) {
            return false;
        }
        let erased: Vec<String> = method_type
            .parameter_types
            .iter()
            .map(|ty| ty.erased_name())
            .collect();
        match_arguments(&self.arguments, &erased)
    }

    /// Whether any call in `unit` matches. Stops at the first match.
    pub fn uses_method(&self, unit: &CompilationUnit) -> bool {
        let mut finder = UsesMethod {
            matcher: self,
            found: false,
        };
        walk_compilation_unit(&mut finder, unit);
        finder.found
    }

    /// Every matching call in `unit`, in source order, with its enclosing
    /// declaration.
    pub fn find_calls(&self, unit: &CompilationUnit) -> Vec<CallSite> {
        let mut collector = CallSiteCollector {
            matcher: self,
            scope: ScopeTracker::default(),
            sites: Vec::new(),
        };
        walk_compilation_unit(&mut collector, unit);
        collector.sites
    }
}

impl fmt::Display for MethodMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

// ============================================================================
// Pattern Compilation
// ============================================================================

const ANY_SEGMENT: &str = r"[^.]+";

fn anchored(body: &str, pattern: &str) -> Result<Regex, PatternError> {
    Regex::new(&format!("^(?:{})$", body)).map_err(|e| PatternError::Regex {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

/// Translate a dotted type pattern into an unanchored regex body.
fn type_pattern_regex(text: &str, pattern: &str) -> Result<String, PatternError> {
    if text.is_empty() {
        return Err(PatternError::EmptySegment {
            pattern: pattern.to_string(),
        });
    }
    if text == ".." {
        return Ok(format!(r"{0}(?:\.{0})*", ANY_SEGMENT));
    }

    let parts: Vec<&str> = text.split("..").collect();
    let last = parts.len() - 1;
    let mut out = String::new();
    for (i, part) in parts.iter().enumerate() {
        if part.is_empty() {
            if i == 0 {
                out.push_str(&format!(r"(?:{}\.)*", ANY_SEGMENT));
            } else if i == last {
                out.push_str(&format!(r"(?:\.{})*", ANY_SEGMENT));
            } else {
                return Err(PatternError::ConsecutiveAnyRun {
                    pattern: pattern.to_string(),
                });
            }
            continue;
        }
        if i > 0 && !parts[i - 1].is_empty() {
            out.push_str(&format!(r"(?:\.{})*\.", ANY_SEGMENT));
        }
        out.push_str(&dotted_regex(part, pattern)?);
    }
    Ok(out)
}

fn dotted_regex(part: &str, pattern: &str) -> Result<String, PatternError> {
    let mut segments = Vec::new();
    for segment in part.split('.') {
        if segment.is_empty() {
            return Err(PatternError::EmptySegment {
                pattern: pattern.to_string(),
            });
        }
        let valid_chars = segment
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '$' || c == '*');
        let starts_with_digit = segment.chars().next().is_some_and(|c| c.is_ascii_digit());
        if !valid_chars || starts_with_digit {
            return Err(PatternError::InvalidSegment {
                pattern: pattern.to_string(),
                segment: segment.to_string(),
            });
        }
        segments.push(segment_regex(segment));
    }
    Ok(segments.join(r"\."))
}

fn segment_regex(segment: &str) -> String {
    if segment == "*" {
        return ANY_SEGMENT.to_string();
    }
    segment
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("[^.]*")
}

fn parse_arguments(args: &str, pattern: &str) -> Result<Vec<ArgPattern>, PatternError> {
    let args = args.trim();
    if args.is_empty() {
        return Ok(Vec::new());
    }
    let mut out: Vec<ArgPattern> = Vec::new();
    for item in args.split(',') {
        let item = item.trim();
        let arg = match item {
            "" => {
                return Err(PatternError::EmptyArgument {
                    pattern: pattern.to_string(),
                })
            }
            ".." => {
                if matches!(out.last(), Some(ArgPattern::AnyRun)) {
                    return Err(PatternError::ConsecutiveAnyRun {
                        pattern: pattern.to_string(),
                    });
                }
                ArgPattern::AnyRun
            }
            "*" => ArgPattern::AnyOne,
            _ => ArgPattern::Type(anchored(&argument_regex(item, pattern)?, pattern)?),
        };
        out.push(arg);
    }
    Ok(out)
}

fn argument_regex(item: &str, pattern: &str) -> Result<String, PatternError> {
    let mut base = item;
    let mut dims = 0;
    while let Some(stripped) = base.strip_suffix("[]") {
        base = stripped.trim_end();
        dims += 1;
    }
    let implicit_java_lang = !base.contains('.')
        && !base.contains('*')
        && base.chars().next().is_some_and(|c| c.is_uppercase());
    let mut regex = type_pattern_regex(base, pattern)?;
    if implicit_java_lang {
        regex = format!(r"(?:java\.lang\.)?{}", regex);
    }
    for _ in 0..dims {
        regex.push_str(r"\[\]");
    }
    Ok(regex)
}

fn match_arguments(patterns: &[ArgPattern], types: &[String]) -> bool {
    match patterns.split_first() {
        None => types.is_empty(),
        Some((ArgPattern::AnyRun, rest)) => {
            (0..=types.len()).any(|skip| match_arguments(rest, &types[skip..]))
        }
        Some((ArgPattern::AnyOne, rest)) => {
            !types.is_empty() && match_arguments(rest, &types[1..])
        }
        Some((ArgPattern::Type(regex), rest)) => match types.split_first() {
            Some((first, remaining)) => regex.is_match(first) && match_arguments(rest, remaining),
            None => false,
        },
    }
}

// ============================================================================
// Collectors
// ============================================================================

/// A matching call found in a unit.
#[derive(Debug, Clone, PartialEq)]
pub struct CallSite {
    /// Enclosing `Class.method`.
    pub scope: String,
    /// The matching call.
    pub call: MethodInvocation,
}

struct UsesMethod<'a> {
    matcher: &'a MethodMatcher,
    found: bool,
}

impl Visitor for UsesMethod<'_> {
    fn visit_method_invocation(&mut self, node: &MethodInvocation) -> VisitResult {
        if self.matcher.matches(node) {
            self.found = true;
            return VisitResult::Stop;
        }
        VisitResult::Continue
    }
}

struct CallSiteCollector<'a> {
    matcher: &'a MethodMatcher,
    scope: ScopeTracker,
    sites: Vec<CallSite>,
}

impl Visitor for CallSiteCollector<'_> {
    fn visit_class_decl(&mut self, node: &ClassDecl) -> VisitResult {
        self.scope.enter_class(&node.name);
        VisitResult::Continue
    }

    fn leave_class_decl(&mut self, _node: &ClassDecl) {
        self.scope.leave_class();
    }

    fn visit_method_decl(&mut self, node: &MethodDecl) -> VisitResult {
        self.scope.enter_method(&node.name);
        VisitResult::Continue
    }

    fn leave_method_decl(&mut self, _node: &MethodDecl) {
        self.scope.leave_method();
    }

    fn visit_method_invocation(&mut self, node: &MethodInvocation) -> VisitResult {
        if self.matcher.matches(node) {
            self.sites.push(CallSite {
                scope: self.scope.current(),
                call: node.clone(),
            });
        }
        VisitResult::Continue
    }
}
