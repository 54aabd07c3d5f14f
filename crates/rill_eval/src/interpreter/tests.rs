#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use rill_parse::Host;

use super::*;
use crate::errors::EvalErrorKind;
use crate::print_handler::{buffer_handler, silent_handler};

fn buffered() -> Interpreter {
    InterpreterBuilder::new().print_handler(buffer_handler()).build()
}

#[test]
fn test_print_handler_integration() {
    let mut interp = buffered();
    interp.run_source(r#"print "hello world""#).unwrap();
    assert_eq!(interp.print_handler().get_output(), "hello world\n");
    interp.print_handler().clear();
    interp.run_source(r#"print "second""#).unwrap();
    assert_eq!(interp.print_handler().get_output(), "second\n");
}

#[test]
fn test_silent_handler_discards_output() {
    let mut interp = InterpreterBuilder::new().print_handler(silent_handler()).build();
    interp.run_source("print 1").unwrap();
    assert_eq!(interp.print_handler().get_output(), "");
}

#[test]
fn test_globals_are_defined() {
    let interp = Interpreter::new();
    assert_eq!(interp.get_var("true"), Some(Value::Logic(true)));
    assert_eq!(interp.get_var("none"), Some(Value::None));
    assert!(matches!(interp.get_var("parse"), Some(Value::Native(_))));
    assert_eq!(interp.get_var("nothing-here"), None);
}

#[test]
fn test_set_var_is_visible_to_code() {
    let mut interp = buffered();
    interp.set_var("greeting", Value::text("hi"));
    let value = interp.run_source("greeting").unwrap();
    assert_eq!(value, Value::text("hi"));
}

#[test]
fn test_set_word_assigns_expression() {
    let mut interp = buffered();
    interp.run_source("x: 1 + 2 * 3").unwrap();
    assert_eq!(interp.get_var("x"), Some(Value::Integer(9)));
}

#[test]
fn test_set_word_without_value() {
    let mut interp = buffered();
    let err = interp.run_source("x:").unwrap_err();
    assert_eq!(
        err,
        ControlAction::Error(EvalError::from_kind(EvalErrorKind::MissingArgument { native: "set-word" }))
    );
}

#[test]
fn test_lit_and_get_words() {
    let mut interp = buffered();
    let value = interp.run_source("'foo").unwrap();
    assert_eq!(value, Value::Word(interp.interner().intern("foo")));
    let value = interp.run_source(":add").unwrap();
    assert!(matches!(value, Value::Native(native) if native.name == "add"));
}

#[test]
fn test_groups_evaluate() {
    let mut interp = buffered();
    assert_eq!(interp.run_source("(1 + 1) * 5").unwrap(), Value::Integer(10));
}

#[test]
fn test_missing_operand() {
    let mut interp = buffered();
    let err = interp.run_source("1 +").unwrap_err();
    assert_eq!(
        err,
        ControlAction::Error(EvalError::from_kind(EvalErrorKind::MissingOperand { op: "+" }))
    );
}

#[test]
fn test_recursion_limit() {
    let mut interp = InterpreterBuilder::new()
        .print_handler(silent_handler())
        .max_depth(3)
        .build();
    let err = interp.run_source("do [do [do [do [1]]]]").unwrap_err();
    assert_eq!(
        err,
        ControlAction::Error(EvalError::from_kind(EvalErrorKind::RecursionLimit { limit: 3 }))
    );
}

#[test]
fn test_load_error() {
    let mut interp = buffered();
    let err = interp.run_source(r#""unterminated"#).unwrap_err();
    assert!(matches!(
        err,
        ControlAction::Error(EvalError {
            kind: EvalErrorKind::Load { .. }
        })
    ));
}

#[test]
fn test_host_get_and_set() {
    let mut interp = buffered();
    let name = interp.interner().intern("captured");
    Host::set(&mut interp, name, Value::Integer(4));
    assert_eq!(Host::get(&interp, name), Some(Value::Integer(4)));
    assert_eq!(interp.get_var("captured"), Some(Value::Integer(4)));
}

#[test]
fn test_host_evaluate_runs_code() {
    let mut interp = buffered();
    let Value::Block(code) = interp.load("2 * 21").unwrap() else {
        panic!("expected a block");
    };
    assert_eq!(interp.evaluate(&code), Ok(Value::Integer(42)));
}

#[test]
fn test_checkpoint_honors_step_limit() {
    let mut interp = InterpreterBuilder::new().step_limit(2).build();
    assert_eq!(interp.checkpoint(), Ok(()));
    assert_eq!(interp.checkpoint(), Ok(()));
    assert_eq!(
        interp.checkpoint(),
        Err(ControlAction::Error(EvalError::from_kind(EvalErrorKind::StepLimit { limit: 2 })))
    );
}

#[test]
fn test_checkpoint_unlimited_by_default() {
    let mut interp = Interpreter::new();
    for _ in 0..1000 {
        assert_eq!(interp.checkpoint(), Ok(()));
    }
}

#[test]
fn test_parse_options_from_builder() {
    let options = ParseOptions::default().with_case_sensitive(true);
    let mut interp = InterpreterBuilder::new()
        .print_handler(silent_handler())
        .parse_options(options)
        .build();
    assert_eq!(interp.parse_options(), options);
    assert_eq!(interp.run_source(r#"parse "ABC" ["abc"]"#).unwrap(), Value::Logic(false));
}

#[test]
fn test_shared_interner() {
    let first = Interpreter::new();
    let second = InterpreterBuilder::new().interner(first.shared_interner()).build();
    assert_eq!(first.interner().intern("shared"), second.interner().intern("shared"));
}
