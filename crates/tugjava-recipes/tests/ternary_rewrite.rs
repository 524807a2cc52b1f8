// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! End-to-end tests for `replace-method-call-with-ternary`.
//!
//! Each test builds an attributed tree the way an upstream parser would hand
//! it over, runs the recipe, and compares the rendered source.

use tugjava_ast::{
    Binary, BinaryOp, ClassDecl, Codegen, CompilationUnit, Expression, FieldAccess, Import,
    JavaType, Literal, MethodDecl, MethodInvocation, MethodType, NewClass, Primitive, Statement,
    TypeTree,
};
use tugjava_recipes::{
    run_all, Classpath, Recipe, RecipeRun, ReplaceMethodCallWithTernary, SkipReason,
};

const HTTP_STATUS: &str = "org.springframework.http.HttpStatus";
const RESPONSE_ENTITY: &str = "org.springframework.http.ResponseEntity";
const PATTERN: &str = "org.springframework..* getReasonPhrase()";

// ============================================================================
// Tree builders
// ============================================================================

fn recipe() -> ReplaceMethodCallWithTernary {
    ReplaceMethodCallWithTernary::new(PATTERN, HTTP_STATUS).unwrap()
}

fn status() -> Expression {
    Expression::ident("status", Some(JavaType::class(HTTP_STATUS)))
}

fn response() -> Expression {
    Expression::ident("response", Some(JavaType::class(RESPONSE_ENTITY)))
}

fn call_on(
    receiver: Option<Expression>,
    declaring: &str,
    name: &str,
    return_type: JavaType,
) -> MethodInvocation {
    MethodInvocation::new(receiver, name).with_method_type(MethodType::new(declaring, name, return_type))
}

fn reason_phrase(receiver: Option<Expression>) -> MethodInvocation {
    call_on(receiver, HTTP_STATUS, "getReasonPhrase", JavaType::string())
}

fn map_put(key: &str, value: Expression) -> Statement {
    let put = MethodInvocation::new(Some(Expression::ident("body", None)), "put")
        .with_arguments(vec![Expression::string(key), value])
        .with_method_type(
            MethodType::new("java.util.Map", "put", JavaType::class("java.lang.Object"))
                .with_parameters(vec![
                    JavaType::class("java.lang.Object"),
                    JavaType::class("java.lang.Object"),
                ]),
        );
    Statement::expr(put)
}

fn unit_with(imports: &[&str], method: MethodDecl) -> CompilationUnit {
    let mut unit = CompilationUnit::new(Some("com.example"));
    for path in imports {
        unit = unit.with_import(Import::single(*path));
    }
    unit.with_type(ClassDecl::new("TestSample").with_method(method))
}

fn returning(value: Expression) -> MethodDecl {
    MethodDecl::new(TypeTree::new("String"), "reason")
        .with_modifiers(&["private"])
        .with_param(TypeTree::new("HttpStatus"), "status")
        .with_statement(Statement::Return { value: Some(value) })
}

/// `buildErrorResponse` from the Spring sample.
fn error_response_unit() -> CompilationUnit {
    let value = call_on(
        Some(status()),
        HTTP_STATUS,
        "value",
        JavaType::primitive(Primitive::Int),
    );
    let method = MethodDecl::new(TypeTree::new("ResponseEntity<Object>"), "buildErrorResponse")
        .with_modifiers(&["private"])
        .with_param(TypeTree::new("HttpStatus"), "status")
        .with_statement(Statement::LocalVar {
            ty: TypeTree::new("Map<String, Object>"),
            name: "body".to_string(),
            init: Some(Expression::NewClass(NewClass {
                class: TypeTree::new("LinkedHashMap<>"),
                arguments: vec![],
            })),
        })
        .with_statement(map_put("status", value.into()))
        .with_statement(map_put("error", reason_phrase(Some(status())).into()))
        .with_statement(Statement::Return {
            value: Some(Expression::NewClass(NewClass {
                class: TypeTree::new("ResponseEntity<>"),
                arguments: vec![Expression::ident("body", None), status()],
            })),
        });
    unit_with(
        &[HTTP_STATUS, RESPONSE_ENTITY, "java.util.LinkedHashMap", "java.util.Map"],
        method,
    )
}

/// `validate` from the Spring sample.
fn validate_unit() -> CompilationUnit {
    let get_status = call_on(
        Some(response()),
        RESPONSE_ENTITY,
        "getStatusCode",
        JavaType::class(HTTP_STATUS),
    );
    let get_headers = call_on(
        Some(response()),
        RESPONSE_ENTITY,
        "getHeaders",
        JavaType::class("org.springframework.http.HttpHeaders"),
    );
    let create = MethodInvocation::new(Some(Expression::ident("HttpClientErrorException", None)), "create")
        .with_arguments(vec![
            status(),
            reason_phrase(Some(status())).into(),
            get_headers.into(),
            Expression::Literal(Literal::Null),
            Expression::Literal(Literal::Null),
        ])
        .with_method_type(MethodType::new(
            "org.springframework.web.client.HttpClientErrorException",
            "create",
            JavaType::class("org.springframework.web.client.HttpClientErrorException"),
        ));
    let method = MethodDecl::new(TypeTree::new("void"), "validate")
        .with_modifiers(&["private"])
        .with_param(TypeTree::new("ResponseEntity<Object>"), "response")
        .with_statement(Statement::LocalVar {
            ty: TypeTree::new("HttpStatus"),
            name: "status".to_string(),
            init: Some(get_status.into()),
        })
        .with_statement(Statement::Throw {
            exception: create.into(),
        });
    unit_with(
        &[
            HTTP_STATUS,
            RESPONSE_ENTITY,
            "org.springframework.web.client.HttpClientErrorException",
        ],
        method,
    )
}

/// Rendered value of the first `return` in the unit's only method.
fn returned_source(run: &RecipeRun) -> String {
    let Statement::Return { value: Some(value) } = &run.unit.types[0].methods[0].body[0] else {
        panic!("expected a return statement");
    };
    value.to_source()
}

fn concat(left: Expression, right: Expression) -> Expression {
    Expression::Binary(Binary {
        left: Box::new(left),
        op: BinaryOp::Add,
        right: Box::new(right),
        ty: Some(JavaType::string()),
    })
}

fn skip_codes(run: &RecipeRun) -> Vec<&'static str> {
    run.report.skipped.iter().map(|s| s.reason.code()).collect()
}

// ============================================================================
// Rewrites
// ============================================================================

mod rewrites {
    use super::*;

    #[test]
    fn error_response_sample() {
        let run = recipe().run(error_response_unit());
        let expected = r#"package com.example;

import org.springframework.http.HttpStatus;
import org.springframework.http.ResponseEntity;
import java.util.LinkedHashMap;
import java.util.Map;

public class TestSample {

    private ResponseEntity<Object> buildErrorResponse(HttpStatus status) {
        Map<String, Object> body = new LinkedHashMap<>();
        body.put("status", status.value());
        body.put("error", status instanceof HttpStatus ? ((HttpStatus) status).getReasonPhrase() : "not provided");
        return new ResponseEntity<>(body, status);
    }
}
"#;
        assert_eq!(run.unit.to_source(), expected);
        assert_eq!(run.report.rewritten, 1);
        assert!(run.report.imports_added.is_empty());
        assert!(run.report.skipped.is_empty());
    }

    #[test]
    fn validate_sample() {
        let run = recipe().run(validate_unit());
        let expected = r#"package com.example;

import org.springframework.http.HttpStatus;
import org.springframework.http.ResponseEntity;
import org.springframework.web.client.HttpClientErrorException;

public class TestSample {

    private void validate(ResponseEntity<Object> response) {
        HttpStatus status = response.getStatusCode();
        throw HttpClientErrorException.create(status, status instanceof HttpStatus ? ((HttpStatus) status).getReasonPhrase() : "not provided", response.getHeaders(), null, null);
    }
}
"#;
        assert_eq!(run.unit.to_source(), expected);
        assert_eq!(run.report.rewritten, 1);
    }

    #[test]
    fn two_level_chain_uses_inner_receiver() {
        let inner = call_on(
            Some(response()),
            RESPONSE_ENTITY,
            "getStatusCode",
            JavaType::class(HTTP_STATUS),
        );
        let unit = unit_with(&[HTTP_STATUS], returning(reason_phrase(Some(inner.into())).into()));
        let run = recipe().run(unit);
        let Statement::Return { value: Some(value) } = &run.unit.types[0].methods[0].body[0] else {
            panic!("expected a return statement");
        };
        assert_eq!(
            value.to_source(),
            r#"response instanceof HttpStatus ? ((HttpStatus) response).getReasonPhrase() : "not provided""#
        );
    }

    #[test]
    fn import_added_exactly_once() {
        let method = returning(reason_phrase(Some(status())).into())
            .with_statement(Statement::expr(reason_phrase(Some(status()))));
        let unit = unit_with(&["java.util.Map"], method);
        let run = recipe().run(unit);
        assert_eq!(run.report.rewritten, 2);
        assert_eq!(run.report.imports_added, vec![HTTP_STATUS.to_string()]);
        let paths: Vec<_> = run.unit.imports.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["java.util.Map", HTTP_STATUS]);
    }

    #[test]
    fn default_package_target() {
        let recipe = ReplaceMethodCallWithTernary::new("HttpStatus getReasonPhrase()", "HttpStatus").unwrap();
        let call = call_on(Some(status()), "HttpStatus", "getReasonPhrase", JavaType::string());
        let run = recipe.run(unit_with(&[], returning(call.into())));
        assert_eq!(run.report.rewritten, 1);
        assert!(run.unit.imports.is_empty());
        assert!(run
            .unit
            .to_source()
            .contains(r#"return status instanceof HttpStatus ? ((HttpStatus) status).getReasonPhrase() : "not provided";"#));
    }
}

// ============================================================================
// Calls nested in operand positions
// ============================================================================

mod nested_positions {
    use super::*;

    const GUARDED: &str =
        r#"(status instanceof HttpStatus ? ((HttpStatus) status).getReasonPhrase() : "not provided")"#;

    #[test]
    fn receiver_of_further_call() {
        let length = call_on(
            Some(reason_phrase(Some(status())).into()),
            "java.lang.String",
            "length",
            JavaType::primitive(Primitive::Int),
        );
        let run = recipe().run(unit_with(&[HTTP_STATUS], returning(length.into())));
        assert_eq!(run.report.rewritten, 1);
        assert_eq!(returned_source(&run), format!("{}.length()", GUARDED));
    }

    #[test]
    fn right_operand_of_concatenation() {
        let value = concat(Expression::string("Error: "), reason_phrase(Some(status())).into());
        let run = recipe().run(unit_with(&[HTTP_STATUS], returning(value)));
        assert_eq!(run.report.rewritten, 1);
        assert_eq!(returned_source(&run), format!(r#""Error: " + {}"#, GUARDED));
    }

    #[test]
    fn left_operand_of_concatenation() {
        let value = concat(reason_phrase(Some(status())).into(), Expression::string("!"));
        let run = recipe().run(unit_with(&[HTTP_STATUS], returning(value)));
        assert_eq!(returned_source(&run), format!(r#"{} + "!""#, GUARDED));
    }

    #[test]
    fn target_of_field_access() {
        let value = Expression::FieldAccess(FieldAccess {
            target: Box::new(reason_phrase(Some(status())).into()),
            name: "CASE_INSENSITIVE_ORDER".to_string(),
            ty: None,
        });
        let run = recipe().run(unit_with(&[HTTP_STATUS], returning(value)));
        assert_eq!(returned_source(&run), format!("{}.CASE_INSENSITIVE_ORDER", GUARDED));
    }

    #[test]
    fn argument_position_stays_bare() {
        let value = call_on(
            Some(Expression::ident("String", None)),
            "java.lang.String",
            "valueOf",
            JavaType::string(),
        )
        .with_arguments(vec![reason_phrase(Some(status())).into()]);
        let run = recipe().run(unit_with(&[HTTP_STATUS], returning(value.into())));
        assert_eq!(
            returned_source(&run),
            format!("String.valueOf({})", GUARDED.trim_start_matches('(').trim_end_matches(')'))
        );
    }

    #[test]
    fn second_run_keeps_parentheses() {
        let value = concat(Expression::string("Error: "), reason_phrase(Some(status())).into());
        let once = recipe().run(unit_with(&[HTTP_STATUS], returning(value)));
        let twice = recipe().run(once.unit.clone());
        assert_eq!(twice.unit, once.unit);
        assert_eq!(skip_codes(&twice), vec!["already_rewritten"]);
    }
}

// ============================================================================
// Simple-name conflicts
// ============================================================================

mod name_conflicts {
    use super::*;

    #[test]
    fn conflicting_import_spells_target_in_full() {
        let input = unit_with(&["com.acme.HttpStatus"], returning(reason_phrase(Some(status())).into()));
        let run = recipe().run(input);
        assert_eq!(run.report.rewritten, 1);
        assert!(run.report.imports_added.is_empty());
        let paths: Vec<_> = run.unit.imports.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["com.acme.HttpStatus"]);
        assert_eq!(
            returned_source(&run),
            r#"status instanceof org.springframework.http.HttpStatus ? ((org.springframework.http.HttpStatus) status).getReasonPhrase() : "not provided""#
        );
    }

    #[test]
    fn second_run_changes_nothing() {
        let input = unit_with(&["com.acme.HttpStatus"], returning(reason_phrase(Some(status())).into()));
        let once = recipe().run(input);
        let twice = recipe().run(once.unit.clone());
        assert_eq!(twice.unit, once.unit);
        assert_eq!(skip_codes(&twice), vec!["already_rewritten"]);
    }
}

// ============================================================================
// Unchanged trees
// ============================================================================

mod unchanged {
    use super::*;

    #[test]
    fn non_matching_method_name() {
        let recipe = ReplaceMethodCallWithTernary::new("org.springframework..* name()", HTTP_STATUS).unwrap();
        let input = error_response_unit();
        let run = recipe.run(input.clone());
        assert_eq!(run.unit, input);
        assert_eq!(run.unit.to_source(), input.to_source());
        assert!(!run.changed());
        assert!(run.report.skipped.is_empty());
    }

    #[test]
    fn declaring_type_mismatch() {
        let call = call_on(
            Some(status()),
            "org.springframework.http.HttpStatusCode",
            "getReasonPhrase",
            JavaType::string(),
        );
        let input = unit_with(&[], returning(call.into()));
        let run = recipe().run(input.clone());
        assert_eq!(run.unit, input);
        assert_eq!(skip_codes(&run), vec!["type_mismatch"]);
    }

    #[test]
    fn unresolved_call() {
        let call = MethodInvocation::new(Some(status()), "getReasonPhrase");
        let input = unit_with(&[], returning(call.into()));
        let run = recipe().run(input.clone());
        assert_eq!(run.unit, input);
        assert!(run.report.skipped.is_empty());
    }

    #[test]
    fn unsupported_receiver() {
        let input = unit_with(&[], returning(reason_phrase(None).into()));
        let run = recipe().run(input.clone());
        assert_eq!(run.unit, input);
        assert_eq!(skip_codes(&run), vec!["unsupported_receiver"]);
        assert_eq!(run.report.skipped[0].scope, "TestSample.reason");
        assert_eq!(run.report.skipped[0].call, "getReasonPhrase()");
    }

    #[test]
    fn classpath_failure_leaves_call_and_imports() {
        let recipe = recipe().with_classpath(Classpath::from_types(["org.springframework.http.HttpMethod"]));
        let input = unit_with(&[], returning(reason_phrase(Some(status())).into()));
        let run = recipe.run(input.clone());
        assert_eq!(run.unit, input);
        assert_eq!(skip_codes(&run), vec!["template_failure"]);
        assert!(matches!(run.report.skipped[0].reason, SkipReason::Template(_)));
    }

    #[test]
    fn failure_does_not_affect_siblings() {
        let method = returning(reason_phrase(Some(status())).into())
            .with_statement(Statement::expr(reason_phrase(None)));
        let run = recipe().run(unit_with(&[HTTP_STATUS], method));
        assert_eq!(run.report.rewritten, 1);
        assert_eq!(skip_codes(&run), vec!["unsupported_receiver"]);
    }
}

// ============================================================================
// Idempotence
// ============================================================================

mod idempotence {
    use super::*;

    #[test]
    fn second_run_changes_nothing() {
        for input in [error_response_unit(), validate_unit()] {
            let once = recipe().run(input);
            let twice = recipe().run(once.unit.clone());
            assert_eq!(twice.unit, once.unit);
            assert_eq!(twice.report.rewritten, 0);
            assert!(twice.report.imports_added.is_empty());
            assert_eq!(skip_codes(&twice), vec!["already_rewritten"]);
        }
    }

    #[test]
    fn second_run_after_import_was_added() {
        let input = unit_with(&[], returning(reason_phrase(Some(status())).into()));
        let once = recipe().run(input);
        assert_eq!(once.report.imports_added.len(), 1);
        let twice = recipe().run(once.unit.clone());
        assert_eq!(twice.unit, once.unit);
        assert_eq!(twice.unit.imports.len(), 1);
    }
}

// ============================================================================
// Batches
// ============================================================================

#[test]
fn run_all_processes_units_independently() {
    let units = vec![error_response_unit(), validate_unit(), unit_with(&[], returning(reason_phrase(None).into()))];
    let recipe = recipe();
    let runs = run_all(&recipe, units);
    let rewritten: Vec<_> = runs.iter().map(|r| r.report.rewritten).collect();
    assert_eq!(rewritten, vec![1, 1, 0]);
    assert!(runs[0].changed() && runs[1].changed() && !runs[2].changed());
}

#[test]
fn rewritten_tree_survives_json() {
    let run = recipe().run(validate_unit());
    let json = serde_json::to_string(&run.unit).unwrap();
    let back: CompilationUnit = serde_json::from_str(&json).unwrap();
    assert_eq!(back, run.unit);
}
