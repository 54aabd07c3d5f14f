#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use rill_eval::{buffer_handler, silent_handler};

use super::*;

fn args(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

#[test]
fn test_parse_args_flags() {
    let command = ParseCommand::from_args(&args(&["abc", "\"abc\"", "--case", "--part"])).unwrap();
    assert_eq!(command.input, "abc");
    assert_eq!(command.rules, "\"abc\"");
    assert!(command.case_sensitive);
    assert!(command.partial);
    assert!(!command.redbol);
    assert!(!command.options().require_full_match);
}

#[test]
fn test_parse_args_errors() {
    assert!(ParseCommand::from_args(&args(&["abc"])).is_err());
    assert!(ParseCommand::from_args(&args(&["a", "b", "c"])).is_err());
    assert!(ParseCommand::from_args(&args(&["a", "b", "--fast"])).is_err());
    assert!(ParseCommand::from_args(&args(&["a", "b", "--block", "--binary"])).is_err());
}

#[test]
fn test_parse_text_match() {
    let command = ParseCommand::from_args(&args(&["aabb", r#"some "a" some "b""#])).unwrap();
    assert_eq!(
        command.execute(silent_handler()).unwrap(),
        ParseOutcome::Matched { position: 4 }
    );
}

#[test]
fn test_parse_incomplete_is_no_match() {
    let command = ParseCommand::from_args(&args(&["abc", r#""a" "b""#])).unwrap();
    assert_eq!(
        command.execute(silent_handler()).unwrap(),
        ParseOutcome::NoMatch("rules matched up to position 2 of 3".to_owned())
    );
    let partial = ParseCommand::from_args(&args(&["abc", r#""a" "b""#, "--part"])).unwrap();
    assert_eq!(
        partial.execute(silent_handler()).unwrap(),
        ParseOutcome::Matched { position: 2 }
    );
}

#[test]
fn test_parse_block_input() {
    let command = ParseCommand::from_args(&args(&["1 2 x", "some integer! word!", "--block"])).unwrap();
    assert_eq!(
        command.execute(silent_handler()).unwrap(),
        ParseOutcome::Matched { position: 3 }
    );
}

#[test]
fn test_parse_binary_input() {
    let command = ParseCommand::from_args(&args(&["AB", "#{41} skip", "--binary"])).unwrap();
    assert_eq!(
        command.execute(silent_handler()).unwrap(),
        ParseOutcome::Matched { position: 2 }
    );
}

#[test]
fn test_parse_collect_and_accept() {
    let collect = ParseCommand::from_args(&args(&["ab", "collect some [keep skip]"])).unwrap();
    assert_eq!(
        collect.execute(silent_handler()).unwrap(),
        ParseOutcome::Collected(r##"[#"a" #"b"]"##.to_owned())
    );
    let accept = ParseCommand::from_args(&args(&["ab", r#""a" accept (1 + 1)"#])).unwrap();
    assert_eq!(
        accept.execute(silent_handler()).unwrap(),
        ParseOutcome::Accepted("2".to_owned())
    );
}

#[test]
fn test_parse_code_rules_print() {
    let handler = buffer_handler();
    let command = ParseCommand::from_args(&args(&["ab", r#""a" (print "seen a") "b""#])).unwrap();
    command.execute(handler.clone()).unwrap();
    assert_eq!(handler.get_output(), "seen a\n");
}

#[test]
fn test_parse_rule_error() {
    let command = ParseCommand::from_args(&args(&["a", "some"])).unwrap();
    let err = command.execute(silent_handler()).unwrap_err();
    assert!(err.contains("some"), "{err}");
}

#[test]
fn test_parse_code_rule_error() {
    let command = ParseCommand::from_args(&args(&["a", r#""a" (missing)"#])).unwrap();
    assert_eq!(
        command.execute(silent_handler()).unwrap_err(),
        "`missing` has no value"
    );
}

#[test]
fn test_run_program_output_and_quit() {
    let handler = buffer_handler();
    assert_eq!(run_program(r#"print "hi""#, handler.clone()), Ok(0));
    assert_eq!(handler.get_output(), "hi\n");
    assert_eq!(run_program("quit 3", silent_handler()), Ok(3));
    assert_eq!(
        run_program("throw 1", silent_handler()),
        Err("no `catch` for thrown value".to_owned())
    );
}

#[test]
fn test_load_source_molds_values() {
    assert_eq!(
        load_source(r#"x: [1 "a"] 'y <end>"#).unwrap(),
        "x:\n[1 \"a\"]\n'y\n<end>"
    );
    assert!(load_source("[1 2").is_err());
}

#[test]
fn test_read_missing_file() {
    let err = read_file("/definitely/not/here.rill").unwrap_err();
    assert_eq!(err, "cannot find file '/definitely/not/here.rill'");
}
