// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! The guarded-cast template.
//!
//! A [`TernaryTemplate`] builds
//!
//! ```text
//! <slot 1> instanceof T ? ((T) <slot 2>).m(<args>) : "not provided"
//! ```
//!
//! directly as tree nodes. Both slots are normally bound to the same
//! receiver; each binding is cloned into its position so the two
//! occurrences never share structure.

use thiserror::Error;
use tugjava_ast::{
    Expression, InstanceOf, JavaType, MethodInvocation, MethodType, Ternary, TypeCast, TypeTree,
};

use crate::classpath::Classpath;
use crate::type_name::QualifiedTypeName;

/// Fallback literal used when the type test fails.
pub const FALLBACK: &str = "not provided";

/// Errors from instantiating a template. These are per-call failures; the
/// call they were raised for is left unchanged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TemplateError {
    /// The target type does not resolve on the classpath.
    #[error("type '{name}' cannot be resolved on the classpath")]
    UnresolvedType { name: String },

    /// Wrong number of slot bindings.
    #[error("template expects {expected} bindings, got {actual}")]
    SlotArity { expected: usize, actual: usize },
}

/// A parameterized `instanceof`/cast/fallback conditional.
#[derive(Debug, Clone, PartialEq)]
pub struct TernaryTemplate {
    target: QualifiedTypeName,
    method_name: String,
    arguments: Vec<Expression>,
    method_type: Option<MethodType>,
    qualified: bool,
}

impl TernaryTemplate {
    /// Number of slots.
    pub const SLOTS: usize = 2;

    /// A template re-issuing `call` (name, arguments and resolved signature)
    /// on the cast.
    pub fn for_call(target: QualifiedTypeName, call: &MethodInvocation) -> Self {
        TernaryTemplate {
            target,
            method_name: call.name.clone(),
            arguments: call.arguments.clone(),
            method_type: call.method_type.clone(),
            qualified: false,
        }
    }

    /// Spell the target by its fully-qualified name, for units where its
    /// simple name already refers to another imported type.
    pub fn qualified(mut self) -> Self {
        self.qualified = true;
        self
    }

    /// The name written in the type test and the cast.
    pub fn type_name(&self) -> &str {
        if self.qualified {
            self.target.as_str()
        } else {
            self.target.simple_name()
        }
    }

    /// Check that the target type resolves on `classpath`.
    pub fn resolve(&self, classpath: &Classpath) -> Result<(), TemplateError> {
        if classpath.contains(&self.target) {
            Ok(())
        } else {
            Err(TemplateError::UnresolvedType {
                name: self.target.to_string(),
            })
        }
    }

    /// Build the conditional from exactly [`Self::SLOTS`] bindings.
    pub fn instantiate(&self, bindings: &[Expression]) -> Result<Expression, TemplateError> {
        let [test, cast] = bindings else {
            return Err(TemplateError::SlotArity {
                expected: Self::SLOTS,
                actual: bindings.len(),
            });
        };

        let class = TypeTree::new(self.type_name()).with_type(JavaType::class(self.target.as_str()));
        let condition = Expression::InstanceOf(InstanceOf {
            expression: Box::new(operand(test)),
            class: class.clone(),
        });
        let cast = Expression::TypeCast(TypeCast {
            class,
            expression: Box::new(operand(cast)),
        })
        .parenthesized();
        let consequent = MethodInvocation {
            receiver: Some(Box::new(cast)),
            name: self.method_name.clone(),
            arguments: self.arguments.clone(),
            method_type: self.method_type.clone(),
        };

        Ok(Expression::Ternary(Ternary {
            condition: Box::new(condition),
            then_part: Box::new(consequent.into()),
            else_part: Box::new(Expression::string(FALLBACK)),
            ty: Some(JavaType::string()),
        }))
    }

    /// Resolve against `classpath`, then bind `receiver` to both slots.
    pub fn apply(
        &self,
        receiver: &Expression,
        classpath: &Classpath,
    ) -> Result<Expression, TemplateError> {
        self.resolve(classpath)?;
        self.instantiate(&[receiver.clone(), receiver.clone()])
    }
}

/// Parenthesize bindings that would not bind tighter than `instanceof` or a
/// cast.
fn operand(binding: &Expression) -> Expression {
    match binding {
        Expression::Ternary(_)
        | Expression::Binary(_)
        | Expression::InstanceOf(_)
        | Expression::TypeCast(_) => binding.clone().parenthesized(),
        _ => binding.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tugjava_ast::{BinaryOp, Binary, Codegen};

    const HTTP_STATUS: &str = "org.springframework.http.HttpStatus";

    fn status() -> Expression {
        Expression::ident("status", Some(JavaType::class(HTTP_STATUS)))
    }

    fn call_on(target: &str, name: &str) -> MethodInvocation {
        MethodInvocation::new(Some(status()), name)
            .with_method_type(MethodType::new(target, name, JavaType::string()))
    }

    fn template() -> TernaryTemplate {
        TernaryTemplate::for_call(
            QualifiedTypeName::parse(HTTP_STATUS).unwrap(),
            &call_on(HTTP_STATUS, "getReasonPhrase"),
        )
    }

    mod instantiate {
        use super::*;

        #[test]
        fn renders_guarded_cast() {
            let expr = template().instantiate(&[status(), status()]).unwrap();
            assert_eq!(
                expr.to_source(),
                r#"status instanceof HttpStatus ? ((HttpStatus) status).getReasonPhrase() : "not provided""#
            );
            assert_eq!(expr.ty(), Some(JavaType::string()));
        }

        #[test]
        fn slots_are_independent_copies() {
            let expr = template().instantiate(&[status(), status()]).unwrap();
            let Expression::Ternary(mut ternary) = expr else {
                panic!("expected a ternary");
            };
            if let Expression::InstanceOf(test) = ternary.condition.as_mut() {
                *test.expression = Expression::ident("other", None);
            }
            assert!(ternary.then_part.to_source().contains("(HttpStatus) status"));
        }

        #[test]
        fn cast_type_is_attributed() {
            let expr = template().instantiate(&[status(), status()]).unwrap();
            let Expression::Ternary(ternary) = expr else {
                panic!("expected a ternary");
            };
            let Expression::InstanceOf(test) = *ternary.condition else {
                panic!("expected instanceof");
            };
            assert_eq!(test.class.name, "HttpStatus");
            assert_eq!(test.class.ty, Some(JavaType::class(HTTP_STATUS)));
        }

        #[test]
        fn complex_bindings_are_parenthesized() {
            let sum = Expression::Binary(Binary {
                left: Box::new(Expression::ident("a", None)),
                op: BinaryOp::Add,
                right: Box::new(Expression::ident("b", None)),
                ty: None,
            });
            let expr = template().instantiate(&[sum.clone(), sum]).unwrap();
            assert_eq!(
                expr.to_source(),
                r#"(a + b) instanceof HttpStatus ? ((HttpStatus) (a + b)).getReasonPhrase() : "not provided""#
            );
        }

        #[test]
        fn qualified_spelling() {
            let template = template().qualified();
            assert_eq!(template.type_name(), HTTP_STATUS);
            let expr = template.instantiate(&[status(), status()]).unwrap();
            assert_eq!(
                expr.to_source(),
                r#"status instanceof org.springframework.http.HttpStatus ? ((org.springframework.http.HttpStatus) status).getReasonPhrase() : "not provided""#
            );
        }

        #[test]
        fn default_package_target() {
            let template = TernaryTemplate::for_call(
                QualifiedTypeName::parse("HttpStatus").unwrap(),
                &call_on("HttpStatus", "value"),
            );
            assert_eq!(template.type_name(), "HttpStatus");
            let expr = template.instantiate(&[status(), status()]).unwrap();
            assert!(expr.to_source().starts_with("status instanceof HttpStatus ? ((HttpStatus) status).value()"));
        }
    }

    mod failures {
        use super::*;

        #[test]
        fn slot_arity() {
            assert_eq!(
                template().instantiate(&[status()]),
                Err(TemplateError::SlotArity {
                    expected: 2,
                    actual: 1
                })
            );
            assert_eq!(
                template().instantiate(&[status(), status(), status()]),
                Err(TemplateError::SlotArity {
                    expected: 2,
                    actual: 3
                })
            );
        }

        #[test]
        fn unresolved_type() {
            let classpath = Classpath::from_types(["org.springframework.http.HttpMethod"]);
            assert_eq!(
                template().apply(&status(), &classpath),
                Err(TemplateError::UnresolvedType {
                    name: HTTP_STATUS.to_string()
                })
            );
        }

        #[test]
        fn resolved_type() {
            let classpath = Classpath::from_types([HTTP_STATUS]);
            assert!(template().apply(&status(), &classpath).is_ok());
        }
    }

    #[test]
    fn for_call_carries_signature_and_arguments() {
        let method_type = MethodType::new(HTTP_STATUS, "format", JavaType::string())
            .with_parameters(vec![JavaType::string()]);
        let call = MethodInvocation::new(Some(status()), "format")
            .with_arguments(vec![Expression::string("x")])
            .with_method_type(method_type.clone());
        let template = TernaryTemplate::for_call(QualifiedTypeName::parse(HTTP_STATUS).unwrap(), &call);
        let Expression::Ternary(ternary) = template.apply(&status(), &Classpath::default()).unwrap() else {
            panic!("expected a ternary");
        };
        let then_call = ternary.then_part.as_method_invocation().unwrap();
        assert_eq!(then_call.method_type.as_ref(), Some(&method_type));
        assert_eq!(ternary.then_part.to_source(), r#"((HttpStatus) status).format("x")"#);
    }
}
