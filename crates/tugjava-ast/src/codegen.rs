// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Source rendering for tree nodes.
//!
//! Rendering is deterministic and canonical: four-space indentation, one
//! statement per line, no comments. It does not reproduce original
//! formatting; it gives every node a stable textual form that callers can
//! inspect and print.

use std::fmt;

use crate::nodes::{
    ClassDecl, CompilationUnit, Expression, Import, Literal, MethodDecl, MethodInvocation, Param,
    Statement,
};

/// Accumulates rendered tokens.
#[derive(Debug, Default)]
pub struct CodegenState {
    tokens: String,
    indent_level: usize,
}

impl CodegenState {
    const INDENT: &'static str = "    ";

    /// Append a token.
    pub fn add_token(&mut self, token: &str) {
        self.tokens.push_str(token);
    }

    /// Append the current indentation.
    pub fn add_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.tokens.push_str(Self::INDENT);
        }
    }

    /// Append a newline.
    pub fn add_newline(&mut self) {
        self.tokens.push('\n');
    }

    /// Increase indentation by one level.
    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    /// Decrease indentation by one level.
    pub fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }
}

impl fmt::Display for CodegenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens)
    }
}

/// Render a node as Java source.
pub trait Codegen {
    /// Append this node's source to `state`.
    fn codegen(&self, state: &mut CodegenState);

    /// Render this node on its own.
    fn to_source(&self) -> String {
        let mut state = CodegenState::default();
        self.codegen(&mut state);
        state.to_string()
    }
}

fn codegen_list<T: Codegen>(items: &[T], state: &mut CodegenState) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            state.add_token(", ");
        }
        item.codegen(state);
    }
}

impl Codegen for CompilationUnit {
    fn codegen(&self, state: &mut CodegenState) {
        if let Some(package) = &self.package {
            state.add_token("package ");
            state.add_token(package);
            state.add_token(";");
            state.add_newline();
            state.add_newline();
        }
        for import in &self.imports {
            import.codegen(state);
            state.add_newline();
        }
        if !self.imports.is_empty() {
            state.add_newline();
        }
        for (i, class) in self.types.iter().enumerate() {
            if i > 0 {
                state.add_newline();
            }
            class.codegen(state);
        }
    }
}

impl Codegen for Import {
    fn codegen(&self, state: &mut CodegenState) {
        state.add_token("import ");
        if self.is_static {
            state.add_token("static ");
        }
        state.add_token(&self.path);
        if self.is_wildcard {
            state.add_token(".*");
        }
        state.add_token(";");
    }
}

impl Codegen for ClassDecl {
    fn codegen(&self, state: &mut CodegenState) {
        state.add_indent();
        for modifier in &self.modifiers {
            state.add_token(modifier);
            state.add_token(" ");
        }
        state.add_token("class ");
        state.add_token(&self.name);
        state.add_token(" {");
        state.add_newline();
        state.indent();
        for method in &self.methods {
            state.add_newline();
            method.codegen(state);
        }
        state.dedent();
        state.add_indent();
        state.add_token("}");
        state.add_newline();
    }
}

impl Codegen for MethodDecl {
    fn codegen(&self, state: &mut CodegenState) {
        state.add_indent();
        for modifier in &self.modifiers {
            state.add_token(modifier);
            state.add_token(" ");
        }
        state.add_token(&self.return_type.name);
        state.add_token(" ");
        state.add_token(&self.name);
        state.add_token("(");
        codegen_list(&self.params, state);
        state.add_token(") {");
        state.add_newline();
        state.indent();
        for statement in &self.body {
            statement.codegen(state);
        }
        state.dedent();
        state.add_indent();
        state.add_token("}");
        state.add_newline();
    }
}

impl Codegen for Param {
    fn codegen(&self, state: &mut CodegenState) {
        state.add_token(&self.ty.name);
        state.add_token(" ");
        state.add_token(&self.name);
    }
}

impl Codegen for Statement {
    fn codegen(&self, state: &mut CodegenState) {
        state.add_indent();
        match self {
            Statement::LocalVar { ty, name, init } => {
                state.add_token(&ty.name);
                state.add_token(" ");
                state.add_token(name);
                if let Some(init) = init {
                    state.add_token(" = ");
                    init.codegen(state);
                }
            }
            Statement::Expr { expression } => expression.codegen(state),
            Statement::Return { value } => {
                state.add_token("return");
                if let Some(value) = value {
                    state.add_token(" ");
                    value.codegen(state);
                }
            }
            Statement::Throw { exception } => {
                state.add_token("throw ");
                exception.codegen(state);
            }
        }
        state.add_token(";");
        state.add_newline();
    }
}

impl Codegen for Expression {
    fn codegen(&self, state: &mut CodegenState) {
        match self {
            Expression::Identifier(n) => state.add_token(&n.name),
            Expression::FieldAccess(n) => {
                n.target.codegen(state);
                state.add_token(".");
                state.add_token(&n.name);
            }
            Expression::MethodInvocation(n) => n.codegen(state),
            Expression::Literal(n) => n.codegen(state),
            Expression::InstanceOf(n) => {
                n.expression.codegen(state);
                state.add_token(" instanceof ");
                state.add_token(&n.class.name);
            }
            Expression::TypeCast(n) => {
                state.add_token("(");
                state.add_token(&n.class.name);
                state.add_token(") ");
                n.expression.codegen(state);
            }
            Expression::Parenthesized(n) => {
                state.add_token("(");
                n.expression.codegen(state);
                state.add_token(")");
            }
            Expression::Ternary(n) => {
                n.condition.codegen(state);
                state.add_token(" ? ");
                n.then_part.codegen(state);
                state.add_token(" : ");
                n.else_part.codegen(state);
            }
            Expression::NewClass(n) => {
                state.add_token("new ");
                state.add_token(&n.class.name);
                state.add_token("(");
                codegen_list(&n.arguments, state);
                state.add_token(")");
            }
            Expression::Binary(n) => {
                n.left.codegen(state);
                state.add_token(" ");
                state.add_token(n.op.token());
                state.add_token(" ");
                n.right.codegen(state);
            }
        }
    }
}

impl Codegen for MethodInvocation {
    fn codegen(&self, state: &mut CodegenState) {
        if let Some(receiver) = &self.receiver {
            receiver.codegen(state);
            state.add_token(".");
        }
        state.add_token(&self.name);
        state.add_token("(");
        codegen_list(&self.arguments, state);
        state.add_token(")");
    }
}

impl Codegen for Literal {
    fn codegen(&self, state: &mut CodegenState) {
        match self {
            Literal::String(value) => {
                state.add_token("\"");
                state.add_token(&escape(value, '"'));
                state.add_token("\"");
            }
            Literal::Int(value) => state.add_token(&value.to_string()),
            Literal::Bool(value) => state.add_token(if *value { "true" } else { "false" }),
            Literal::Char(value) => {
                state.add_token("'");
                state.add_token(&escape(&value.to_string(), '\''));
                state.add_token("'");
            }
            Literal::Null => state.add_token("null"),
        }
    }
}

fn escape(value: &str, quote: char) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}
