//! Literals, datatypes, alternation and case handling.

use pretty_assertions::assert_eq;
use rill_ir::{Bitset, Kind, Value};

use super::{matched, Fixture};
use crate::{Dialect, ParseError, ParseOptions, Parsed, RuleErrorKind};

#[test]
fn test_sequence_of_quantified_literals() {
    let mut fx = Fixture::new();
    assert_eq!(fx.parse_text("aabb", r#"some "a" some "b""#).unwrap(), matched(4));
}

#[test]
fn test_datatype_rules_on_block() {
    let mut fx = Fixture::new();
    let input = fx.value("[1 2 3]");
    assert_eq!(fx.parse(&input, "integer! integer! integer!").unwrap(), matched(3));
}

#[test]
fn test_literal_sequence_full_match() {
    let mut fx = Fixture::new();
    assert!(fx.matches_text("abc", r#""a" "b" "c""#));
}

#[test]
fn test_incomplete_match_reports_position() {
    let mut fx = Fixture::new();
    let err = fx.parse_text("abc", r#""a" "b""#).unwrap_err();
    assert!(matches!(err, ParseError::Incomplete { position: 2, length: 3 }));
}

#[test]
fn test_partial_match_allowed() {
    let mut fx = Fixture::new().partial();
    assert_eq!(fx.parse_text("abc", r#""a" "b""#).unwrap(), matched(2));
}

#[test]
fn test_parse_rules_maps_failures_to_none() {
    let mut fx = Fixture::new();
    let rules = fx.rules(r#""a" "b""#);
    let input = Value::text("abc");
    let result = crate::Parser::new(&fx.interner, &mut fx.host).parse_rules(&input, &rules);
    assert!(matches!(result, Ok(None)));
}

#[test]
fn test_mismatch_reports_farthest_position() {
    let mut fx = Fixture::new();
    let err = fx.parse_text("aab", r#"some "a" "c""#).unwrap_err();
    assert!(matches!(err, ParseError::Mismatch { farthest: 2 }));
}

#[test]
fn test_alternation() {
    let mut fx = Fixture::new();
    assert!(fx.matches_text("b", r#""a" | "b""#));
    assert!(fx.matches_text("a", r#""a" | "b""#));
    assert!(!fx.matches_text("c", r#""a" | "b""#));
}

#[test]
fn test_alternation_resets_position() {
    let mut fx = Fixture::new();
    assert!(fx.matches_text("ac", r#""a" "b" | "a" "c""#));
}

#[test]
fn test_nested_block_alternation() {
    let mut fx = Fixture::new();
    assert!(fx.matches_text("xbz", r#""x" ["a" | "b"] "z""#));
}

#[test]
fn test_case_insensitive_by_default() {
    let mut fx = Fixture::new();
    assert!(fx.matches_text("ABC", r#""abc""#));
    assert!(fx.matches_text("A", r##"#"a""##));
}

#[test]
fn test_case_sensitive_option() {
    let mut fx = Fixture::new().with_options(ParseOptions::default().with_case_sensitive(true));
    assert!(!fx.matches_text("ABC", r#""abc""#));
    assert!(fx.matches_text("abc", r#""abc""#));
}

#[test]
fn test_case_insensitive_words_in_block() {
    let mut fx = Fixture::new();
    let input = fx.value("[Foo]");
    assert!(fx.matches(&input, "'foo"));
}

#[test]
fn test_bitset_rule() {
    let mut fx = Fixture::new();
    fx.set_var("digit", Value::Bitset(Bitset::from_spec("0-9")));
    assert!(fx.matches_text("123", "some digit"));
    assert!(!fx.matches_text("12a", "some digit"));
}

#[test]
fn test_bitset_against_block_chars() {
    let mut fx = Fixture::new();
    fx.set_var("vowel", Value::Bitset(Bitset::from_spec("aeiou")));
    let input = fx.value(r##"[#"a" #"e" 1]"##);
    assert!(fx.matches(&input, "2 vowel integer!"));
}

#[test]
fn test_skip_and_end() {
    let mut fx = Fixture::new();
    assert!(fx.matches_text("ab", "skip skip end"));
    assert!(!fx.matches_text("ab", "skip end"));
    assert!(fx.matches_text("", "end"));
    assert!(fx.matches_text("ab", "<any> <any> <end>"));
}

#[test]
fn test_blank_rule() {
    let mut fx = Fixture::new();
    assert!(fx.matches_text(" a", r#"_ "a""#));
    let input = fx.value("[1]");
    assert!(fx.matches(&input, "_ integer!"));
    assert!(!fx.matches(&input, "_ string!"));
}

#[test]
fn test_logic_rules() {
    let mut fx = Fixture::new();
    fx.set_var("yes", Value::Logic(true));
    fx.set_var("no", Value::Logic(false));
    assert!(fx.matches_text("a", r#"yes "a""#));
    assert!(!fx.matches_text("a", r#"no "a""#));
    assert!(fx.matches_text("a", r#"none "a" <here>"#));
}

#[test]
fn test_lit_word_rules() {
    let mut fx = Fixture::new();
    let input = fx.value("[foo bar]");
    assert!(fx.matches(&input, "'foo 'bar"));
    assert!(fx.matches_text("foo", "'foo"));
}

#[test]
fn test_tag_literal_in_text() {
    let mut fx = Fixture::new();
    assert!(fx.matches_text("<b>x", r#"<b> "x""#));
}

#[test]
fn test_binary_input() {
    let mut fx = Fixture::new();
    let input = fx.value("#{0102}");
    assert!(fx.matches(&input, "#{01} #{02}"));
    let input = fx.value("#{616263}");
    assert!(fx.matches(&input, r#""abc""#));
    let input = fx.value("#{0A0B}");
    assert!(fx.matches(&input, "quote 10 skip"));
}

#[test]
fn test_binary_is_byte_exact() {
    let mut fx = Fixture::new();
    let input = fx.value("#{41}");
    assert!(!fx.matches(&input, r#""a""#));
}

#[test]
fn test_empty_literal_matches_at_end() {
    let mut fx = Fixture::new();
    assert!(fx.matches_text("", r#""""#));
}

#[test]
fn test_typeset_rule() {
    let mut fx = Fixture::new();
    let input = fx.value(r#"[1 "a" x]"#);
    assert!(fx.matches(&input, "3 any-type!"));
    assert!(fx.matches(&input, "integer! any-string! word!"));
}

#[test]
fn test_datatype_on_text_is_rule_error() {
    let mut fx = Fixture::new();
    let kind = fx.rule_error(&Value::text("abc"), "integer!");
    assert_eq!(
        kind,
        RuleErrorKind::UnsupportedRule {
            rule: "integer!".to_owned(),
            input: Kind::Text
        }
    );
}

#[test]
fn test_rules_through_variable() {
    let mut fx = Fixture::new();
    let digits = fx.rules(r#"some ["0" | "1"]"#);
    fx.set_var("bits", digits);
    assert!(fx.matches_text("0110", "bits"));
}

#[test]
fn test_word_indirection_chain() {
    let mut fx = Fixture::new();
    fx.set_var("a", Value::text("x"));
    let b = fx.word("a");
    fx.set_var("b", b);
    assert!(fx.matches_text("x", "b"));
}

#[test]
fn test_get_group_injects_rule() {
    let mut fx = Fixture::new();
    let rule = fx.rules(r#""a" "b""#);
    fx.set_var("r", rule);
    assert!(fx.matches_text("ab", ":(r)"));
}

#[test]
fn test_input_at_series_index() {
    let mut fx = Fixture::new();
    let input = Value::text("xxab").at_index(2);
    assert_eq!(fx.parse(&input, r#""a" "b""#).unwrap(), matched(4));
}

#[test]
fn test_group_input_parses_like_block() {
    let mut fx = Fixture::new();
    let input = Value::group(vec![Value::Integer(1)]);
    assert!(fx.matches(&input, "integer!"));
}

#[test]
fn test_redbol_dialect_still_matches() {
    let mut fx = Fixture::new().with_options(ParseOptions::default().with_dialect(Dialect::Redbol));
    assert!(fx.matches_text("ab", r#""a" and "b" "b""#));
    assert!(matches!(
        fx.parse_text("b", "end"),
        Err(ParseError::Mismatch { .. })
    ));
    assert_eq!(fx.parse_text("", "end").unwrap(), Parsed::Matched { position: 0, collected: None });
}
