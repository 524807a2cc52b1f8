// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Expression nodes.
//!
//! Every node owns its children. Duplicating a sub-expression (for example to
//! place it in two positions of a conditional) is a `clone()`, never an alias.

use serde::{Deserialize, Serialize};

use super::types::{JavaType, MethodType, TypeTree};

/// A Java expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expression {
    Identifier(Identifier),
    FieldAccess(FieldAccess),
    MethodInvocation(MethodInvocation),
    Literal(Literal),
    InstanceOf(InstanceOf),
    TypeCast(TypeCast),
    Parenthesized(Parenthesized),
    Ternary(Ternary),
    NewClass(NewClass),
    Binary(Binary),
}

impl Expression {
    /// The static type of this expression, when attribution is available.
    pub fn ty(&self) -> Option<JavaType> {
        match self {
            Expression::Identifier(node) => node.ty.clone(),
            Expression::FieldAccess(node) => node.ty.clone(),
            Expression::MethodInvocation(node) => {
                node.method_type.as_ref().map(|m| m.return_type.clone())
            }
            Expression::Literal(node) => node.ty(),
            Expression::InstanceOf(_) => Some(JavaType::primitive(
                super::types::Primitive::Boolean,
            )),
            Expression::TypeCast(node) => node.class.ty.clone(),
            Expression::Parenthesized(node) => node.expression.ty(),
            Expression::Ternary(node) => node.ty.clone(),
            Expression::NewClass(node) => node.class.ty.clone(),
            Expression::Binary(node) => node.ty.clone(),
        }
    }

    /// Borrow as a method invocation.
    pub fn as_method_invocation(&self) -> Option<&MethodInvocation> {
        match self {
            Expression::MethodInvocation(node) => Some(node),
            _ => None,
        }
    }

    /// Create an identifier expression.
    pub fn ident(name: impl Into<String>, ty: Option<JavaType>) -> Self {
        Expression::Identifier(Identifier {
            name: name.into(),
            ty,
        })
    }

    /// Create a string literal expression.
    pub fn string(value: impl Into<String>) -> Self {
        Expression::Literal(Literal::String(value.into()))
    }

    /// Wrap in parentheses.
    pub fn parenthesized(self) -> Self {
        Expression::Parenthesized(Parenthesized {
            expression: Box::new(self),
        })
    }
}

impl From<MethodInvocation> for Expression {
    fn from(node: MethodInvocation) -> Self {
        Expression::MethodInvocation(node)
    }
}

/// A variable or parameter reference: `status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identifier {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<JavaType>,
}

/// A field access: `this.status`, `response.body`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldAccess {
    pub target: Box<Expression>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<JavaType>,
}

/// A method invocation: `receiver.name(arguments)`.
///
/// `receiver` is absent for unqualified calls (`foo()`), including calls to
/// static methods imported into scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodInvocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<Box<Expression>>,
    pub name: String,
    #[serde(default)]
    pub arguments: Vec<Expression>,
    /// Resolved signature; absent when resolution failed upstream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_type: Option<MethodType>,
}

impl MethodInvocation {
    /// Create an unattributed zero-argument invocation.
    pub fn new(receiver: Option<Expression>, name: impl Into<String>) -> Self {
        MethodInvocation {
            receiver: receiver.map(Box::new),
            name: name.into(),
            arguments: Vec::new(),
            method_type: None,
        }
    }

    /// Set the arguments.
    pub fn with_arguments(mut self, arguments: Vec<Expression>) -> Self {
        self.arguments = arguments;
        self
    }

    /// Attach a resolved signature.
    pub fn with_method_type(mut self, method_type: MethodType) -> Self {
        self.method_type = Some(method_type);
        self
    }

    /// Fully-qualified declaring type, when resolved.
    pub fn declaring_type(&self) -> Option<&str> {
        self.method_type.as_ref().map(|m| m.declaring_type.as_str())
    }
}

/// A literal value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Literal {
    String(String),
    Int(i64),
    Bool(bool),
    Char(char),
    Null,
}

impl Literal {
    fn ty(&self) -> Option<JavaType> {
        use super::types::Primitive;
        match self {
            Literal::String(_) => Some(JavaType::string()),
            Literal::Int(_) => Some(JavaType::primitive(Primitive::Int)),
            Literal::Bool(_) => Some(JavaType::primitive(Primitive::Boolean)),
            Literal::Char(_) => Some(JavaType::primitive(Primitive::Char)),
            Literal::Null => None,
        }
    }
}

/// A type test: `expression instanceof Class`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceOf {
    pub expression: Box<Expression>,
    pub class: TypeTree,
}

/// A cast: `(Class) expression`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeCast {
    pub class: TypeTree,
    pub expression: Box<Expression>,
}

/// A parenthesized expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parenthesized {
    pub expression: Box<Expression>,
}

/// A conditional expression: `condition ? then_part : else_part`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ternary {
    pub condition: Box<Expression>,
    pub then_part: Box<Expression>,
    pub else_part: Box<Expression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<JavaType>,
}

/// An instance creation: `new Class<>(arguments)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewClass {
    pub class: TypeTree,
    #[serde(default)]
    pub arguments: Vec<Expression>,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    Add,
    Sub,
    Equal,
    NotEqual,
    And,
    Or,
}

impl BinaryOp {
    /// Source spelling of the operator.
    pub fn token(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}

/// A binary operation: `left op right`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Binary {
    pub left: Box<Expression>,
    pub op: BinaryOp,
    pub right: Box<Expression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<JavaType>,
}
