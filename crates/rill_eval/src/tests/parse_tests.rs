use pretty_assertions::assert_eq;
use rill_ir::Value;

use super::{interpreter, run, run_err};
use crate::{ControlAction, EvalError, EvalErrorKind, InterpreterBuilder};

fn value_of(source: &str) -> Value {
    run(source).0.unwrap()
}

#[test]
fn test_parse_returns_logic() {
    assert_eq!(value_of(r#"parse "aabb" [some "a" some "b"]"#), Value::Logic(true));
    assert_eq!(value_of(r#"parse "abc" ["a" "b"]"#), Value::Logic(false));
    assert_eq!(value_of(r#"parse [1 2 3] [integer! integer! integer!]"#), Value::Logic(true));
}

#[test]
fn test_code_rules_update_variables() {
    let source = r#"n: 0 parse "aaa" [some ["a" (n: n + 1)]] n"#;
    assert_eq!(value_of(source), Value::Integer(3));
}

#[test]
fn test_copy_capture_lands_in_environment() {
    let source = r#"parse "hello world" [copy w to " " skip to end] w"#;
    assert_eq!(value_of(source), Value::text("hello"));
}

#[test]
fn test_collect_into_variable() {
    let source = r#"parse "ab" [collect set out some [keep "a" | keep "b"]] out"#;
    assert_eq!(
        value_of(source),
        Value::block(vec![Value::Char('a'), Value::Char('b')])
    );
}

#[test]
fn test_bare_collect_is_the_result() {
    assert_eq!(
        value_of(r#"parse "ab" [collect some [keep skip]]"#),
        Value::block(vec![Value::Char('a'), Value::Char('b')])
    );
}

#[test]
fn test_accept_value_is_the_result() {
    let mut interp = interpreter();
    let value = interp.run_source(r#"parse "abc" ["a" accept ('found)]"#).unwrap();
    assert_eq!(value, Value::Word(interp.interner().intern("found")));
}

#[test]
fn test_parse_case() {
    assert_eq!(value_of(r#"parse "ABC" ["abc"]"#), Value::Logic(true));
    assert_eq!(value_of(r#"parse-case "ABC" ["abc"]"#), Value::Logic(false));
    assert_eq!(value_of(r#"parse-case "abc" ["abc"]"#), Value::Logic(true));
}

#[test]
fn test_rules_from_variables() {
    let source = r#"
        digit: charset "0-9"
        number: [some digit]
        parse "12+34" [number "+" number]
    "#;
    assert_eq!(value_of(source), Value::Logic(true));
}

#[test]
fn test_removal_is_visible_afterwards() {
    assert_eq!(value_of(r#"s: "aab" parse s [remove "a" "a" "b"] s"#), Value::text("ab"));
}

#[test]
fn test_position_capture() {
    assert_eq!(value_of(r#"parse "abc" ["a" mark: to end] index? mark"#), Value::Integer(2));
}

#[test]
fn test_if_rule_reads_code() {
    assert_eq!(value_of(r#"n: 2 parse "aa" [if (n = 2) some "a"]"#), Value::Logic(true));
    assert_eq!(value_of(r#"n: 3 parse "aa" [if (n = 2) some "a"]"#), Value::Logic(false));
}

#[test]
fn test_nested_parse_from_code_rule() {
    let source = r#"parse "ab" ["a" (inner: parse "zz" [some "z"]) "b"] inner"#;
    assert_eq!(value_of(source), Value::Logic(true));
}

#[test]
fn test_change_with_code_value() {
    let source = r#"s: "a-b" parse s [thru "a" change "-" (form 1 + 1) "b"] s"#;
    assert_eq!(value_of(source), Value::text("a2b"));
}

#[test]
fn test_throw_crosses_parse() {
    assert_eq!(value_of(r#"catch [parse "a" ["a" (throw 7)]]"#), Value::Integer(7));
}

#[test]
fn test_return_crosses_parse() {
    assert_eq!(value_of(r#"do [parse "a" [(return 5)] 6]"#), Value::Integer(5));
}

#[test]
fn test_code_rule_error_aborts_parse() {
    assert_eq!(
        run_err(r#"parse "a" ["a" (no-such-word)]"#),
        EvalErrorKind::UndefinedWord {
            name: "no-such-word".to_owned()
        }
    );
}

#[test]
fn test_rule_error_becomes_eval_error() {
    assert!(matches!(run_err(r#"parse "a" [some]"#), EvalErrorKind::Rule(_)));
}

#[test]
fn test_step_limit_stops_parse() {
    let mut interp = InterpreterBuilder::new().step_limit(3).build();
    let err = interp.run_source(r#"parse "aaaaaaaa" [some ["a"]]"#).unwrap_err();
    assert_eq!(
        err,
        ControlAction::Error(EvalError::from_kind(EvalErrorKind::StepLimit { limit: 3 }))
    );
}

#[test]
fn test_step_limit_guards_zero_width_while() {
    let mut interp = InterpreterBuilder::new().step_limit(100).build();
    let err = interp.run_source(r#"parse "a" [while [opt "b"] "a"]"#).unwrap_err();
    assert_eq!(
        err,
        ControlAction::Error(EvalError::from_kind(EvalErrorKind::StepLimit { limit: 100 }))
    );
}
