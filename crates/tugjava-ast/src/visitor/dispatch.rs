// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Walk and fold functions for tree traversal.
//!
//! # Walks (read-only)
//!
//! - **Pre-order**: `visit_*` is called before descending into children
//! - **Post-order**: `leave_*` is called after all children have been visited
//! - **Source order**: Children are visited left-to-right, top-to-bottom
//!
//! `VisitResult::Stop` halts the walk immediately (no `leave_*` called);
//! `VisitResult::SkipChildren` skips children but still calls `leave_*`.
//!
//! # Folds (owning)
//!
//! Each `fold_*` consumes a node and returns its replacement. Children are
//! folded first, in source order, then the node's `transform_*` hook runs.
//!
//! A child in operand position (a call receiver, a field access target, a
//! conditional's test, or the operand of `instanceof`, a cast or a binary
//! operator) that folds into a conditional, binary, `instanceof` or cast
//! expression is wrapped in parentheses, so the rebuilt tree renders with
//! the meaning it has.

use super::traits::{Transformer, VisitResult, Visitor};
use crate::nodes::{
    ClassDecl, CompilationUnit, Expression, MethodDecl, MethodInvocation, Statement,
};

// ============================================================================
// Walks
// ============================================================================

/// Walk a [`CompilationUnit`]: imports, then type declarations.
pub fn walk_compilation_unit<V: Visitor + ?Sized>(
    visitor: &mut V,
    node: &CompilationUnit,
) -> VisitResult {
    match visitor.visit_compilation_unit(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            for import in &node.imports {
                if visitor.visit_import(import) == VisitResult::Stop {
                    return VisitResult::Stop;
                }
                visitor.leave_import(import);
            }
            for class in &node.types {
                if walk_class_decl(visitor, class) == VisitResult::Stop {
                    return VisitResult::Stop;
                }
            }
        }
    }
    visitor.leave_compilation_unit(node);
    VisitResult::Continue
}

/// Walk a [`ClassDecl`] and its methods.
pub fn walk_class_decl<V: Visitor + ?Sized>(visitor: &mut V, node: &ClassDecl) -> VisitResult {
    match visitor.visit_class_decl(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            for method in &node.methods {
                if walk_method_decl(visitor, method) == VisitResult::Stop {
                    return VisitResult::Stop;
                }
            }
        }
    }
    visitor.leave_class_decl(node);
    VisitResult::Continue
}

/// Walk a [`MethodDecl`] and its body.
pub fn walk_method_decl<V: Visitor + ?Sized>(visitor: &mut V, node: &MethodDecl) -> VisitResult {
    match visitor.visit_method_decl(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            for statement in &node.body {
                if walk_statement(visitor, statement) == VisitResult::Stop {
                    return VisitResult::Stop;
                }
            }
        }
    }
    visitor.leave_method_decl(node);
    VisitResult::Continue
}

/// Walk a [`Statement`] and its expressions.
pub fn walk_statement<V: Visitor + ?Sized>(visitor: &mut V, node: &Statement) -> VisitResult {
    match visitor.visit_statement(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            let child = match node {
                Statement::LocalVar { init, .. } => init.as_ref(),
                Statement::Expr { expression } => Some(expression),
                Statement::Return { value } => value.as_ref(),
                Statement::Throw { exception } => Some(exception),
            };
            if let Some(expression) = child {
                if walk_expression(visitor, expression) == VisitResult::Stop {
                    return VisitResult::Stop;
                }
            }
        }
    }
    visitor.leave_statement(node);
    VisitResult::Continue
}

/// Walk an [`Expression`].
///
/// `visit_expression` runs first; for method invocations `visit_method_invocation`
/// runs next, and its result controls descent into receiver and arguments.
pub fn walk_expression<V: Visitor + ?Sized>(visitor: &mut V, node: &Expression) -> VisitResult {
    match visitor.visit_expression(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            let result = match node {
                Expression::MethodInvocation(call) => walk_method_invocation(visitor, call),
                other => walk_children(visitor, &children(other)),
            };
            if result == VisitResult::Stop {
                return VisitResult::Stop;
            }
        }
    }
    visitor.leave_expression(node);
    VisitResult::Continue
}

/// Walk a [`MethodInvocation`]: receiver, then arguments.
pub fn walk_method_invocation<V: Visitor + ?Sized>(
    visitor: &mut V,
    node: &MethodInvocation,
) -> VisitResult {
    match visitor.visit_method_invocation(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            if let Some(receiver) = &node.receiver {
                if walk_expression(visitor, receiver) == VisitResult::Stop {
                    return VisitResult::Stop;
                }
            }
            if walk_children(visitor, &node.arguments.iter().collect::<Vec<_>>())
                == VisitResult::Stop
            {
                return VisitResult::Stop;
            }
        }
    }
    visitor.leave_method_invocation(node);
    VisitResult::Continue
}

fn walk_children<V: Visitor + ?Sized>(visitor: &mut V, nodes: &[&Expression]) -> VisitResult {
    for node in nodes {
        if walk_expression(visitor, node) == VisitResult::Stop {
            return VisitResult::Stop;
        }
    }
    VisitResult::Continue
}

/// Direct children of a non-invocation expression, in source order.
fn children(node: &Expression) -> Vec<&Expression> {
    match node {
        Expression::Identifier(_) | Expression::Literal(_) => Vec::new(),
        Expression::FieldAccess(n) => vec![n.target.as_ref()],
        Expression::MethodInvocation(n) => n
            .receiver
            .as_deref()
            .into_iter()
            .chain(n.arguments.iter())
            .collect(),
        Expression::InstanceOf(n) => vec![n.expression.as_ref()],
        Expression::TypeCast(n) => vec![n.expression.as_ref()],
        Expression::Parenthesized(n) => vec![n.expression.as_ref()],
        Expression::Ternary(n) => vec![
            n.condition.as_ref(),
            n.then_part.as_ref(),
            n.else_part.as_ref(),
        ],
        Expression::NewClass(n) => n.arguments.iter().collect(),
        Expression::Binary(n) => vec![n.left.as_ref(), n.right.as_ref()],
    }
}

// ============================================================================
// Folds
// ============================================================================

/// Fold a [`CompilationUnit`], returning the rebuilt unit.
pub fn fold_compilation_unit<T: Transformer + ?Sized>(
    transformer: &mut T,
    mut node: CompilationUnit,
) -> CompilationUnit {
    transformer.enter_compilation_unit(&node);
    node.types = std::mem::take(&mut node.types)
        .into_iter()
        .map(|class| fold_class_decl(transformer, class))
        .collect();
    transformer.transform_compilation_unit(node)
}

/// Fold a [`ClassDecl`].
pub fn fold_class_decl<T: Transformer + ?Sized>(
    transformer: &mut T,
    mut node: ClassDecl,
) -> ClassDecl {
    transformer.enter_class_decl(&node);
    node.methods = std::mem::take(&mut node.methods)
        .into_iter()
        .map(|method| fold_method_decl(transformer, method))
        .collect();
    transformer.transform_class_decl(node)
}

/// Fold a [`MethodDecl`].
pub fn fold_method_decl<T: Transformer + ?Sized>(
    transformer: &mut T,
    mut node: MethodDecl,
) -> MethodDecl {
    transformer.enter_method_decl(&node);
    node.body = fold_block(transformer, std::mem::take(&mut node.body));
    transformer.transform_method_decl(node)
}

/// Fold a list of statements in order.
pub fn fold_block<T: Transformer + ?Sized>(
    transformer: &mut T,
    statements: Vec<Statement>,
) -> Vec<Statement> {
    statements
        .into_iter()
        .map(|statement| fold_statement(transformer, statement))
        .collect()
}

/// Fold the expressions of a single [`Statement`].
pub fn fold_statement<T: Transformer + ?Sized>(
    transformer: &mut T,
    node: Statement,
) -> Statement {
    match node {
        Statement::LocalVar { ty, name, init } => Statement::LocalVar {
            ty,
            name,
            init: init.map(|e| fold_expression(transformer, e)),
        },
        Statement::Expr { expression } => Statement::Expr {
            expression: fold_expression(transformer, expression),
        },
        Statement::Return { value } => Statement::Return {
            value: value.map(|e| fold_expression(transformer, e)),
        },
        Statement::Throw { exception } => Statement::Throw {
            exception: fold_expression(transformer, exception),
        },
    }
}

/// Fold an [`Expression`] post-order.
pub fn fold_expression<T: Transformer + ?Sized>(
    transformer: &mut T,
    node: Expression,
) -> Expression {
    let rebuilt = match node {
        Expression::MethodInvocation(mut call) => {
            call.receiver = call.receiver.map(|r| fold_operand(transformer, r));
            call.arguments = fold_expressions(transformer, call.arguments);
            transformer.transform_method_invocation(call)
        }
        Expression::FieldAccess(mut n) => {
            n.target = fold_operand(transformer, n.target);
            Expression::FieldAccess(n)
        }
        Expression::InstanceOf(mut n) => {
            n.expression = fold_operand(transformer, n.expression);
            Expression::InstanceOf(n)
        }
        Expression::TypeCast(mut n) => {
            n.expression = fold_operand(transformer, n.expression);
            Expression::TypeCast(n)
        }
        Expression::Parenthesized(mut n) => {
            n.expression = fold_boxed(transformer, n.expression);
            Expression::Parenthesized(n)
        }
        Expression::Ternary(mut n) => {
            n.condition = fold_operand(transformer, n.condition);
            n.then_part = fold_boxed(transformer, n.then_part);
            n.else_part = fold_boxed(transformer, n.else_part);
            Expression::Ternary(n)
        }
        Expression::NewClass(mut n) => {
            n.arguments = fold_expressions(transformer, n.arguments);
            Expression::NewClass(n)
        }
        Expression::Binary(mut n) => {
            n.left = fold_operand(transformer, n.left);
            n.right = fold_operand(transformer, n.right);
            Expression::Binary(n)
        }
        leaf @ (Expression::Identifier(_) | Expression::Literal(_)) => leaf,
    };
    transformer.transform_expression(rebuilt)
}

fn fold_boxed<T: Transformer + ?Sized>(transformer: &mut T, node: Box<Expression>) -> Box<Expression> {
    Box::new(fold_expression(transformer, *node))
}

/// Fold a child in operand position, parenthesizing a replacement that
/// binds more loosely than the position allows.
fn fold_operand<T: Transformer + ?Sized>(transformer: &mut T, node: Box<Expression>) -> Box<Expression> {
    let was_loose = binds_loosely(&node);
    let folded = fold_expression(transformer, *node);
    if !was_loose && binds_loosely(&folded) {
        Box::new(folded.parenthesized())
    } else {
        Box::new(folded)
    }
}

fn binds_loosely(node: &Expression) -> bool {
    matches!(
        node,
        Expression::Ternary(_)
            | Expression::Binary(_)
            | Expression::InstanceOf(_)
            | Expression::TypeCast(_)
    )
}

fn fold_expressions<T: Transformer + ?Sized>(
    transformer: &mut T,
    nodes: Vec<Expression>,
) -> Vec<Expression> {
    nodes
        .into_iter()
        .map(|e| fold_expression(transformer, e))
        .collect()
}
