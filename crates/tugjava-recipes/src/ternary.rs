// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Replace method calls with a type-guarded conditional.
//!
//! Each call matching the method pattern and declared on the target type is
//! rewritten from
//!
//! ```text
//! response.getStatusCode().getReasonPhrase()
//! ```
//!
//! to
//!
//! ```text
//! response instanceof HttpStatus ? ((HttpStatus) response).getReasonPhrase() : "not provided"
//! ```
//!
//! and the target type is imported once per unit. When the unit already
//! imports another type with the same simple name, the target is written
//! fully qualified instead and no import is added.
//!
//! A call is considered in this order:
//!
//! 1. The method pattern must match its resolved signature.
//! 2. Its declaring type must equal the target type exactly.
//! 3. Its source text must not already contain the target's simple name.
//! 4. It must have a supported receiver (see [`extract_receiver`]).
//! 5. The template must instantiate on the classpath.
//!
//! A call failing any step is left as it was. Steps 2 through 5 are recorded
//! in the run report.

use tracing::{debug, info, warn};
use tugjava_ast::visitor::{fold_compilation_unit, Transformer};
use tugjava_ast::{ClassDecl, Codegen, CompilationUnit, Expression, MethodDecl, MethodInvocation};

use crate::classpath::Classpath;
use crate::error::RecipeError;
use crate::imports::{conflicting_import, ensure_imported, ImportOutcome};
use crate::method_matcher::MethodMatcher;
use crate::recipe::{Recipe, RecipeReport, RecipeRun, SkipReason, SkippedCall};
use crate::scope::ScopeTracker;
use crate::template::{TemplateError, TernaryTemplate};
use crate::type_name::QualifiedTypeName;

/// Outcome of checking one call against the recipe.
#[derive(Debug, Clone, PartialEq)]
pub enum Eligibility {
    /// The method pattern does not match; not reported.
    NoMatch,
    /// The pattern matches but the call must be left unchanged.
    Skip(SkipReason),
    /// The call can be rewritten around this receiver.
    Eligible(Expression),
}

/// The `replace-method-call-with-ternary` recipe.
#[derive(Debug, Clone)]
pub struct ReplaceMethodCallWithTernary {
    matcher: MethodMatcher,
    target: QualifiedTypeName,
    classpath: Classpath,
}

impl ReplaceMethodCallWithTernary {
    /// Recipe identifier.
    pub const NAME: &'static str = "replace-method-call-with-ternary";

    /// Build the recipe from its two options. Both are validated here.
    pub fn new(method_pattern: &str, fully_qualified_type_name: &str) -> Result<Self, RecipeError> {
        let matcher = MethodMatcher::parse(method_pattern)?;
        let target = QualifiedTypeName::parse(fully_qualified_type_name)?;
        Ok(ReplaceMethodCallWithTernary {
            matcher,
            target,
            classpath: Classpath::unrestricted(),
        })
    }

    /// Restrict the types templates may reference.
    pub fn with_classpath(mut self, classpath: Classpath) -> Self {
        self.classpath = classpath;
        self
    }

    /// The compiled method pattern.
    pub fn matcher(&self) -> &MethodMatcher {
        &self.matcher
    }

    /// The target type.
    pub fn target(&self) -> &QualifiedTypeName {
        &self.target
    }

    /// Decide what to do with `call`.
    pub fn check(&self, call: &MethodInvocation) -> Eligibility {
        if !self.matcher.matches(call) {
            return Eligibility::NoMatch;
        }
        let Some(declaring_type) = call.declaring_type() else {
            return Eligibility::NoMatch;
        };
        if declaring_type != self.target.as_str() {
            return Eligibility::Skip(SkipReason::TypeMismatch {
                declaring_type: declaring_type.to_string(),
            });
        }
        if call.to_source().contains(self.target.simple_name()) {
            return Eligibility::Skip(SkipReason::AlreadyRewritten);
        }
        match extract_receiver(call) {
            Some(receiver) => Eligibility::Eligible(receiver),
            None => Eligibility::Skip(SkipReason::UnsupportedReceiver),
        }
    }

    /// Build the replacement for an eligible `call` around `receiver`.
    pub fn rewrite(
        &self,
        call: &MethodInvocation,
        receiver: &Expression,
    ) -> Result<Expression, TemplateError> {
        self.template(call, false).apply(receiver, &self.classpath)
    }

    fn template(&self, call: &MethodInvocation, qualified: bool) -> TernaryTemplate {
        let template = TernaryTemplate::for_call(self.target.clone(), call);
        if qualified {
            template.qualified()
        } else {
            template
        }
    }
}

/// The expression to test and cast.
///
/// - `x.inner().m()`: the receiver of the inner call, `x`.
/// - `x.m()` or `a.x.m()` with a variable or field receiver: that receiver.
///
/// Anything else (no receiver, an inner call without a receiver, or any
/// other receiver expression) yields `None`.
pub fn extract_receiver(call: &MethodInvocation) -> Option<Expression> {
    match call.receiver.as_deref()? {
        Expression::MethodInvocation(inner) => inner.receiver.as_deref().cloned(),
        receiver @ (Expression::Identifier(_) | Expression::FieldAccess(_)) => {
            Some(receiver.clone())
        }
        _ => None,
    }
}

impl Recipe for ReplaceMethodCallWithTernary {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn display_name(&self) -> &'static str {
        "Replace method call with ternary"
    }

    fn description(&self) -> &'static str {
        "Replace calls declared on a type with an instanceof check, a cast, and a \"not provided\" fallback."
    }

    fn run(&self, unit: CompilationUnit) -> RecipeRun {
        let package = unit.package.clone().unwrap_or_default();
        if !self.matcher.uses_method(&unit) {
            debug!("{}: no calls match '{}'", package, self.matcher);
            return RecipeRun {
                unit,
                report: RecipeReport::default(),
            };
        }

        let mut rewriter = TernaryRewriter::new(self);
        if let Some(import) = conflicting_import(&unit, &self.target) {
            debug!(
                "{}: '{}' is taken by {}; writing {} in full",
                package,
                self.target.simple_name(),
                import.path,
                self.target
            );
            rewriter.qualified = true;
        }
        let unit = fold_compilation_unit(&mut rewriter, unit);
        let report = rewriter.report;
        info!(
            "{}: rewrote {} call(s), skipped {}, imports added {}",
            package,
            report.rewritten,
            report.skipped.len(),
            report.imports_added.len()
        );
        RecipeRun { unit, report }
    }
}

/// Folds a unit, replacing eligible calls.
struct TernaryRewriter<'a> {
    recipe: &'a ReplaceMethodCallWithTernary,
    /// Spell the target fully qualified.
    qualified: bool,
    scope: ScopeTracker,
    report: RecipeReport,
}

impl<'a> TernaryRewriter<'a> {
    fn new(recipe: &'a ReplaceMethodCallWithTernary) -> Self {
        TernaryRewriter {
            recipe,
            qualified: false,
            scope: ScopeTracker::default(),
            report: RecipeReport::default(),
        }
    }

    fn skip(&mut self, call: &MethodInvocation, reason: SkipReason) {
        let scope = self.scope.current();
        let rendered = call.to_source();
        match &reason {
            SkipReason::Template(e) => warn!("{}: cannot rewrite `{}`: {}", scope, rendered, e),
            other => debug!("{}: skipping `{}`: {}", scope, rendered, other),
        }
        self.report.skipped.push(SkippedCall {
            scope,
            call: rendered,
            reason,
        });
    }
}

impl Transformer for TernaryRewriter<'_> {
    fn enter_class_decl(&mut self, node: &ClassDecl) {
        self.scope.enter_class(&node.name);
    }

    fn transform_class_decl(&mut self, node: ClassDecl) -> ClassDecl {
        self.scope.leave_class();
        node
    }

    fn enter_method_decl(&mut self, node: &MethodDecl) {
        self.scope.enter_method(&node.name);
    }

    fn transform_method_decl(&mut self, node: MethodDecl) -> MethodDecl {
        self.scope.leave_method();
        node
    }

    fn transform_method_invocation(&mut self, node: MethodInvocation) -> Expression {
        match self.recipe.check(&node) {
            Eligibility::NoMatch => node.into(),
            Eligibility::Skip(reason) => {
                self.skip(&node, reason);
                node.into()
            }
            Eligibility::Eligible(receiver) => match self
                .recipe
                .template(&node, self.qualified)
                .apply(&receiver, &self.recipe.classpath)
            {
                Ok(replacement) => {
                    self.report.rewritten += 1;
                    replacement
                }
                Err(e) => {
                    self.skip(&node, SkipReason::Template(e));
                    node.into()
                }
            },
        }
    }

    fn transform_compilation_unit(&mut self, mut node: CompilationUnit) -> CompilationUnit {
        if self.report.rewritten == 0 {
            return node;
        }
        let target = &self.recipe.target;
        match ensure_imported(&mut node, target) {
            ImportOutcome::Added => self.report.imports_added.push(target.to_string()),
            outcome => debug!("import of {} not added: {:?}", target, outcome),
        }
        node
    }
}
