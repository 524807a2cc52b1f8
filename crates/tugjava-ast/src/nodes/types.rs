// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Type attribution attached to tree nodes.
//!
//! These types are produced by upstream type resolution and only read here.
//! A node whose attribution is absent (`None`) was not resolved.

use serde::{Deserialize, Serialize};

/// Fully-qualified name of `java.lang.String`.
pub const JAVA_LANG_STRING: &str = "java.lang.String";

/// A Java primitive type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Void,
}

impl Primitive {
    /// The keyword spelling of this primitive.
    pub fn keyword(&self) -> &'static str {
        match self {
            Primitive::Boolean => "boolean",
            Primitive::Byte => "byte",
            Primitive::Char => "char",
            Primitive::Short => "short",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
            Primitive::Void => "void",
        }
    }
}

/// A resolved (erased) Java type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JavaType {
    /// A class, interface, enum or record, by fully-qualified name.
    Class { fqn: String },
    /// A primitive type.
    Primitive { primitive: Primitive },
    /// An array of `element`.
    Array { element: Box<JavaType> },
    /// Resolution failed.
    Unknown,
}

impl JavaType {
    /// Create a class type.
    pub fn class(fqn: impl Into<String>) -> Self {
        JavaType::Class { fqn: fqn.into() }
    }

    /// Create a primitive type.
    pub fn primitive(primitive: Primitive) -> Self {
        JavaType::Primitive { primitive }
    }

    /// Create an array type.
    pub fn array(element: JavaType) -> Self {
        JavaType::Array {
            element: Box::new(element),
        }
    }

    /// `java.lang.String`.
    pub fn string() -> Self {
        JavaType::class(JAVA_LANG_STRING)
    }

    /// The fully-qualified name if this is a class type.
    pub fn fully_qualified_name(&self) -> Option<&str> {
        match self {
            JavaType::Class { fqn } => Some(fqn),
            _ => None,
        }
    }

    /// The erased name used for signature matching: `java.lang.String`,
    /// `int`, `byte[]`. Unknown types render as `?`, which no pattern accepts.
    pub fn erased_name(&self) -> String {
        match self {
            JavaType::Class { fqn } => fqn.clone(),
            JavaType::Primitive { primitive } => primitive.keyword().to_string(),
            JavaType::Array { element } => format!("{}[]", element.erased_name()),
            JavaType::Unknown => "?".to_string(),
        }
    }
}

/// Resolved signature of an invoked method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodType {
    /// Fully-qualified name of the type declaring the method.
    pub declaring_type: String,
    /// Simple method name.
    pub name: String,
    /// Erased parameter types, in declaration order.
    #[serde(default)]
    pub parameter_types: Vec<JavaType>,
    /// Return type.
    pub return_type: JavaType,
}

impl MethodType {
    /// Create a method type with no parameters.
    pub fn new(
        declaring_type: impl Into<String>,
        name: impl Into<String>,
        return_type: JavaType,
    ) -> Self {
        MethodType {
            declaring_type: declaring_type.into(),
            name: name.into(),
            parameter_types: Vec::new(),
            return_type,
        }
    }

    /// Set the parameter types.
    pub fn with_parameters(mut self, parameter_types: Vec<JavaType>) -> Self {
        self.parameter_types = parameter_types;
        self
    }
}

/// A type as written in source (`HttpStatus`, `Map<String, Object>`),
/// with optional attribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeTree {
    /// Source spelling.
    pub name: String,
    /// Resolved type, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<JavaType>,
}

impl TypeTree {
    /// Create an unattributed type tree.
    pub fn new(name: impl Into<String>) -> Self {
        TypeTree {
            name: name.into(),
            ty: None,
        }
    }

    /// Attach a resolved type.
    pub fn with_type(mut self, ty: JavaType) -> Self {
        self.ty = Some(ty);
        self
    }
}
