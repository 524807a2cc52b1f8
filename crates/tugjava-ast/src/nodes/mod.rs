// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Node types for the typed Java tree.

mod expression;
mod types;
mod unit;

pub use expression::{
    Binary, BinaryOp, Expression, FieldAccess, Identifier, InstanceOf, Literal, MethodInvocation,
    NewClass, Parenthesized, Ternary, TypeCast,
};
pub use types::{JavaType, MethodType, Primitive, TypeTree, JAVA_LANG_STRING};
pub use unit::{ClassDecl, CompilationUnit, Import, MethodDecl, Param, Statement};
