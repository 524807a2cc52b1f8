// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Visitor and transformer trait definitions for tree traversal.

use crate::nodes::{
    ClassDecl, CompilationUnit, Expression, Import, MethodDecl, MethodInvocation, Statement,
};

/// Result of visiting a node - controls traversal behavior.
///
/// When a visitor method returns a `VisitResult`, it controls how the walker
/// proceeds with traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VisitResult {
    /// Continue traversal into children.
    ///
    /// After visiting children, `leave_*` will be called for this node.
    #[default]
    Continue,

    /// Skip children, continue with siblings.
    ///
    /// The walker will not descend into this node's children, but `leave_*`
    /// will still be called for this node.
    SkipChildren,

    /// Stop traversal entirely.
    ///
    /// No further `visit_*` or `leave_*` methods will be called. The walk
    /// function will return immediately.
    Stop,
}

/// Macro to generate visitor trait method signatures.
///
/// This macro generates pairs of `visit_*` and `leave_*` methods with default
/// implementations that return `VisitResult::Continue` and do nothing, respectively.
macro_rules! visitor_methods {
    (
        $(
            $(#[$meta:meta])*
            $base_name:ident : $node_type:ty
        ),* $(,)?
    ) => {
        paste::paste! {
            $(
                $(#[$meta])*
                #[doc = concat!("Visit a [`", stringify!($node_type), "`] node.")]
                #[doc = ""]
                #[doc = "Called before descending into children. Return `VisitResult` to control traversal."]
                #[allow(unused_variables)]
                fn [<visit_ $base_name>](&mut self, node: &$node_type) -> VisitResult {
                    VisitResult::Continue
                }

                $(#[$meta])*
                #[doc = concat!("Leave a [`", stringify!($node_type), "`] node.")]
                #[doc = ""]
                #[doc = "Called after all children have been visited. Called even if `SkipChildren` was returned."]
                #[allow(unused_variables)]
                fn [<leave_ $base_name>](&mut self, node: &$node_type) {}
            )*
        }
    };
}

/// Macro to generate transformer trait method signatures.
///
/// This macro generates `enter_*` hooks (called before children are folded)
/// and `transform_*` methods (called after) with default implementations
/// that do nothing and return the node unchanged.
macro_rules! transformer_methods {
    (
        $(
            $(#[$meta:meta])*
            $base_name:ident : $node_type:ty
        ),* $(,)?
    ) => {
        paste::paste! {
            $(
                $(#[$meta])*
                #[doc = concat!("Enter a [`", stringify!($node_type), "`] node before its children are folded.")]
                #[allow(unused_variables)]
                fn [<enter_ $base_name>](&mut self, node: &$node_type) {}

                $(#[$meta])*
                #[doc = concat!("Transform a [`", stringify!($node_type), "`] node.")]
                #[doc = ""]
                #[doc = "Called after its children were folded. Return the modified node."]
                #[allow(unused_variables)]
                fn [<transform_ $base_name>](&mut self, node: $node_type) -> $node_type {
                    node
                }
            )*
        }
    };
}

/// Read-only traversal of a [`CompilationUnit`].
///
/// Every method has a default implementation; implement only what you need.
pub trait Visitor {
    visitor_methods! {
        compilation_unit: CompilationUnit,
        import: Import,
        class_decl: ClassDecl,
        method_decl: MethodDecl,
        statement: Statement,
        expression: Expression,
        method_invocation: MethodInvocation,
    }
}

/// Owning, rebuilding traversal of a [`CompilationUnit`].
///
/// Expressions are folded post-order: a node's children are transformed
/// before the node itself, and the value returned for a node is never
/// folded again in the same pass.
pub trait Transformer {
    transformer_methods! {
        compilation_unit: CompilationUnit,
        class_decl: ClassDecl,
        method_decl: MethodDecl,
    }

    /// Transform a method invocation after its receiver and arguments were
    /// folded. May return any expression to replace the call.
    fn transform_method_invocation(&mut self, node: MethodInvocation) -> Expression {
        Expression::MethodInvocation(node)
    }

    /// Transform any expression after its children were folded. Runs after
    /// the kind-specific hook.
    fn transform_expression(&mut self, node: Expression) -> Expression {
        node
    }
}
