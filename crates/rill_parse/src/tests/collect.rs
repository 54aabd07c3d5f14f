use pretty_assertions::assert_eq;
use rill_ir::Value;

use super::Fixture;
use crate::{Parsed, RuleErrorKind};

#[test]
fn test_collect_set_keeps_chars() {
    let mut fx = Fixture::new();
    assert!(fx.matches_text("ab", r#"collect set out some [keep "a" | keep "b"]"#));
    assert_eq!(fx.var("out"), Some(Value::block(vec![Value::Char('a'), Value::Char('b')])));
}

#[test]
fn test_bare_outermost_collect_is_parse_result() {
    let mut fx = Fixture::new();
    let parsed = fx.parse_text("ab", "collect some [keep skip]").unwrap();
    assert_eq!(
        parsed,
        Parsed::Matched {
            position: 2,
            collected: Some(Value::block(vec![Value::Char('a'), Value::Char('b')])),
        }
    );
}

#[test]
fn test_keep_span_keeps_series() {
    let mut fx = Fixture::new();
    assert!(fx.matches_text("abcd", "collect set out [keep 2 skip keep to end]"));
    assert_eq!(fx.var("out"), Some(Value::block(vec![Value::text("ab"), Value::text("cd")])));
}

#[test]
fn test_keep_block_elements() {
    let mut fx = Fixture::new();
    let input = fx.value("[1 2 x]");
    assert!(fx.matches(&input, "collect set out [keep 2 integer! keep only word!]"));
    assert_eq!(fx.var("out"), Some(fx.value("[1 2 x]")));

    let input = fx.value("[1 2 x]");
    assert!(fx.matches(&input, "collect set out [keep only 2 integer! skip]"));
    assert_eq!(fx.var("out"), Some(fx.value("[[1 2]]")));
}

#[test]
fn test_keep_zero_width_keeps_nothing() {
    let mut fx = Fixture::new();
    assert!(fx.matches_text("a", r#"collect set out [keep opt "x" keep skip]"#));
    assert_eq!(fx.var("out"), Some(Value::block(vec![Value::Char('a')])));
}

#[test]
fn test_failed_alternative_rolls_back_keeps() {
    let mut fx = Fixture::new();
    assert!(fx.matches_text("ac", r#"collect set out [keep "a" "b" | keep "a" "c"]"#));
    assert_eq!(fx.var("out"), Some(Value::block(vec![Value::Char('a')])));
}

#[test]
fn test_nested_collect_appends_to_enclosing() {
    let mut fx = Fixture::new();
    let input = fx.value("[1 2]");
    assert!(fx.matches(&input, "collect set out [collect [keep integer!] keep integer!]"));
    assert_eq!(fx.var("out"), Some(fx.value("[[1] 2]")));
}

#[test]
fn test_collect_into_inserts_at_series_position() {
    let mut fx = Fixture::new();
    let buf = fx.value("[x]");
    fx.set_var("buf", buf.clone());
    let input = fx.value("[1 2]");
    assert!(fx.matches(&input, "collect into buf some keep integer!"));
    assert_eq!(buf, fx.value("[1 2 x]"));
}

#[test]
fn test_collect_into_non_block_is_rule_error() {
    let mut fx = Fixture::new();
    fx.set_var("buf", Value::text("x"));
    assert_eq!(
        fx.rule_error(&Value::text("a"), "collect into buf keep skip"),
        RuleErrorKind::InvalidCaptureTarget {
            keyword: "collect into"
        }
    );
}

#[test]
fn test_failed_collect_does_not_set_target() {
    let mut fx = Fixture::new();
    assert!(fx.matches_text("b", r#"collect set out [keep "a"] | skip"#));
    assert_eq!(fx.var("out"), None);
}

#[test]
fn test_keep_code_result() {
    let mut fx = Fixture::new();
    fx.set_var("v", fx.value("[7 8]"));
    assert!(fx.matches_text("a", "collect set out [keep (v) skip]"));
    assert_eq!(fx.var("out"), Some(fx.value("[7 8]")));

    assert!(fx.matches_text("a", "collect set out [keep only (v) skip]"));
    assert_eq!(fx.var("out"), Some(fx.value("[[7 8]]")));
}

#[test]
fn test_keep_outside_collect_is_rule_error() {
    let mut fx = Fixture::new();
    assert_eq!(fx.rule_error(&Value::text("a"), "keep skip"), RuleErrorKind::KeepOutsideCollect);
}

#[test]
fn test_quantified_collect_uses_one_buffer() {
    let mut fx = Fixture::new();
    assert!(fx.matches_text("aa", r#"some collect set out keep "a""#));
    assert_eq!(fx.var("out"), Some(Value::block(vec![Value::text("aa")])));
}

#[test]
fn test_failed_sequence_drops_its_keeps() {
    let mut fx = Fixture::new().partial();
    let parsed = fx.parse_text("abac", r#"collect set out some [keep "a" "b"]"#).unwrap();
    assert_eq!(parsed, super::matched(2));
    assert_eq!(fx.var("out"), Some(Value::block(vec![Value::Char('a')])));
}

#[test]
fn test_failed_optional_block_drops_its_keeps() {
    let mut fx = Fixture::new();
    assert!(fx.matches_text("ac", r#"collect set out [opt [keep "a" "b"] skip skip]"#));
    assert_eq!(fx.var("out"), Some(Value::block(vec![])));
}

#[test]
fn test_rejected_iteration_drops_its_keeps() {
    let mut fx = Fixture::new();
    assert!(fx.matches_text("abc", r#"collect set out [some ["a" keep "b" | keep "c" reject] skip]"#));
    assert_eq!(fx.var("out"), Some(Value::block(vec![Value::Char('b')])));
}

#[test]
fn test_keep_beside_collect_fills_own_buffer() {
    let mut fx = Fixture::new();
    assert!(fx.matches_text("ab", "collect set out keep 2 skip"));
    assert_eq!(fx.var("out"), Some(Value::block(vec![Value::text("ab")])));
}
