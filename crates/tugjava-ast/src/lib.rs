// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! A typed Java syntax tree.
//!
//! This crate provides the tree that recipes operate on. Trees arrive already
//! parsed and type-attributed (usually as JSON); this crate does not parse
//! Java source.
//!
//! # Overview
//!
//! - **Nodes**: [`CompilationUnit`] down to [`Expression`], each carrying the
//!   resolved [`JavaType`] or [`MethodType`] where upstream attribution
//!   produced one.
//! - **Traversal**: read-only walks with [`Visitor`] and rebuilding folds with
//!   [`Transformer`].
//! - **Code Generation**: render any node as Java source with [`Codegen`].
//!
//! # Quick Start
//!
//! ```
//! use tugjava_ast::{Codegen, Expression, MethodInvocation};
//!
//! let call = MethodInvocation::new(Some(Expression::ident("status", None)), "getReasonPhrase");
//! assert_eq!(call.to_source(), "status.getReasonPhrase()");
//! ```

// ============================================================================
// Public modules and re-exports
// ============================================================================

/// Tree node types.
pub mod nodes;
pub use nodes::*;

/// Visitor and transformer infrastructure for tree traversal.
pub mod visitor;
pub use visitor::{
    fold_compilation_unit, fold_expression, walk_compilation_unit, walk_expression, Transformer,
    VisitResult, Visitor,
};

/// Source rendering.
pub mod codegen;
pub use codegen::{Codegen, CodegenState};
