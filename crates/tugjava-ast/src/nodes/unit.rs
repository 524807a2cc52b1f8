// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Compilation unit, declarations and statements.

use serde::{Deserialize, Serialize};

use super::expression::Expression;
use super::types::TypeTree;

/// A Java source file.
///
/// The unit owns its import list; recipes that introduce new type references
/// add imports here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompilationUnit {
    /// Package declaration, absent for the default package.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    #[serde(default)]
    pub imports: Vec<Import>,
    #[serde(default)]
    pub types: Vec<ClassDecl>,
}

impl CompilationUnit {
    /// Create an empty unit in `package`.
    pub fn new(package: Option<&str>) -> Self {
        CompilationUnit {
            package: package.map(str::to_string),
            imports: Vec::new(),
            types: Vec::new(),
        }
    }

    /// Add an import (builder style).
    pub fn with_import(mut self, import: Import) -> Self {
        self.imports.push(import);
        self
    }

    /// Add a type declaration (builder style).
    pub fn with_type(mut self, class: ClassDecl) -> Self {
        self.types.push(class);
        self
    }
}

/// An import declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    /// Imported path without the trailing `.*` of wildcard imports.
    pub path: String,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_wildcard: bool,
}

impl Import {
    /// `import path;`
    pub fn single(path: impl Into<String>) -> Self {
        Import {
            path: path.into(),
            is_static: false,
            is_wildcard: false,
        }
    }

    /// `import path.*;`
    pub fn wildcard(package: impl Into<String>) -> Self {
        Import {
            path: package.into(),
            is_static: false,
            is_wildcard: true,
        }
    }

    /// `import static path;`
    pub fn static_member(path: impl Into<String>) -> Self {
        Import {
            path: path.into(),
            is_static: true,
            is_wildcard: false,
        }
    }
}

/// A class declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDecl {
    #[serde(default)]
    pub modifiers: Vec<String>,
    pub name: String,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
}

impl ClassDecl {
    /// Create a `public class`.
    pub fn new(name: impl Into<String>) -> Self {
        ClassDecl {
            modifiers: vec!["public".to_string()],
            name: name.into(),
            methods: Vec::new(),
        }
    }

    /// Add a method (builder style).
    pub fn with_method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }
}

/// A method declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDecl {
    #[serde(default)]
    pub modifiers: Vec<String>,
    pub return_type: TypeTree,
    pub name: String,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default)]
    pub body: Vec<Statement>,
}

impl MethodDecl {
    /// Create a method with no modifiers, parameters or body.
    pub fn new(return_type: TypeTree, name: impl Into<String>) -> Self {
        MethodDecl {
            modifiers: Vec::new(),
            return_type,
            name: name.into(),
            params: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Set the modifiers.
    pub fn with_modifiers(mut self, modifiers: &[&str]) -> Self {
        self.modifiers = modifiers.iter().map(|m| m.to_string()).collect();
        self
    }

    /// Add a parameter.
    pub fn with_param(mut self, ty: TypeTree, name: impl Into<String>) -> Self {
        self.params.push(Param {
            ty,
            name: name.into(),
        });
        self
    }

    /// Append a statement to the body.
    pub fn with_statement(mut self, statement: Statement) -> Self {
        self.body.push(statement);
        self
    }
}

/// A formal parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub ty: TypeTree,
    pub name: String,
}

/// A statement in a method body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statement {
    /// `Type name = init;`
    LocalVar {
        ty: TypeTree,
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        init: Option<Expression>,
    },
    /// `expression;`
    Expr { expression: Expression },
    /// `return value;`
    Return {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<Expression>,
    },
    /// `throw exception;`
    Throw { exception: Expression },
}

impl Statement {
    /// An expression statement.
    pub fn expr(expression: impl Into<Expression>) -> Self {
        Statement::Expr {
            expression: expression.into(),
        }
    }
}
