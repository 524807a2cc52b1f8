// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Visitor and transformer infrastructure for tree traversal.
//!
//! # Traversal Order
//!
//! - **Depth-first, pre-order** for `visit_*` methods
//! - **Post-order** for `leave_*` and `transform_*` methods
//! - Children are visited in source order (left-to-right, top-to-bottom)
//!
//! # Visitor Pattern
//!
//! The [`Visitor`] trait provides read-only traversal:
//!
//! ```
//! use tugjava_ast::visitor::{walk_compilation_unit, VisitResult, Visitor};
//! use tugjava_ast::{CompilationUnit, MethodInvocation};
//!
//! struct CallCounter {
//!     count: usize,
//! }
//!
//! impl Visitor for CallCounter {
//!     fn visit_method_invocation(&mut self, _node: &MethodInvocation) -> VisitResult {
//!         self.count += 1;
//!         VisitResult::Continue
//!     }
//! }
//!
//! let mut counter = CallCounter { count: 0 };
//! walk_compilation_unit(&mut counter, &CompilationUnit::default());
//! assert_eq!(counter.count, 0);
//! ```
//!
//! # Transformer Pattern
//!
//! The [`Transformer`] trait rebuilds the tree. Returning a different
//! expression from `transform_method_invocation` replaces the call at its
//! exact position; the rest of the tree is moved through untouched.

mod dispatch;
mod traits;

pub use dispatch::*;
pub use traits::{Transformer, VisitResult, Visitor};
