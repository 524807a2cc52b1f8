// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Rewrite recipes over the typed Java tree.
//!
//! # Overview
//!
//! - **Matching**: [`MethodMatcher`] compiles method signature patterns such
//!   as `org.springframework..* getReasonPhrase()`.
//! - **Imports**: [`ensure_imported`] adds an import at most once.
//! - **Templates**: [`TernaryTemplate`] builds the guarded-cast conditional.
//! - **Recipes**: [`ReplaceMethodCallWithTernary`] ties them together behind
//!   the [`Recipe`] trait.
//!
//! # Quick Start
//!
//! ```
//! use tugjava_ast::{
//!     ClassDecl, CompilationUnit, Expression, JavaType, MethodDecl, MethodInvocation,
//!     MethodType, Statement, TypeTree,
//! };
//! use tugjava_recipes::{Recipe, ReplaceMethodCallWithTernary};
//!
//! let call = MethodInvocation::new(Some(Expression::ident("status", None)), "getReasonPhrase")
//!     .with_method_type(MethodType::new(
//!         "org.springframework.http.HttpStatus",
//!         "getReasonPhrase",
//!         JavaType::string(),
//!     ));
//! let unit = CompilationUnit::new(Some("com.example")).with_type(
//!     ClassDecl::new("Sample").with_method(
//!         MethodDecl::new(TypeTree::new("String"), "reason")
//!             .with_statement(Statement::Return { value: Some(call.into()) }),
//!     ),
//! );
//!
//! let recipe = ReplaceMethodCallWithTernary::new(
//!     "org.springframework..* getReasonPhrase()",
//!     "org.springframework.http.HttpStatus",
//! )
//! .unwrap();
//! let run = recipe.run(unit);
//! assert_eq!(run.report.rewritten, 1);
//! assert_eq!(run.unit.imports[0].path, "org.springframework.http.HttpStatus");
//! ```

pub mod classpath;
pub mod error;
pub mod imports;
pub mod method_matcher;
pub mod recipe;
mod scope;
pub mod template;
pub mod ternary;
pub mod type_name;

pub use classpath::Classpath;
pub use error::RecipeError;
pub use imports::{conflicting_import, ensure_imported, is_imported, ImportOutcome};
pub use method_matcher::{CallSite, MethodMatcher, PatternError};
pub use recipe::{run_all, Recipe, RecipeReport, RecipeRun, SkipReason, SkippedCall};
pub use template::{TemplateError, TernaryTemplate, FALLBACK};
pub use ternary::{extract_receiver, Eligibility, ReplaceMethodCallWithTernary};
pub use type_name::{QualifiedTypeName, TypeNameError};
