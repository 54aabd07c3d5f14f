use pretty_assertions::assert_eq;
use rill_ir::{Keyword, Kind, StringInterner, TypeSet, Value};

use super::*;

fn mold_all(source: &str) -> String {
    let interner = StringInterner::new();
    let block = load_block(source, &interner).unwrap();
    block.mold(&interner)
}

#[test]
fn test_load_scalars() {
    let interner = StringInterner::new();
    let values = load(r#"1 -42 "hi" #"x" #{0aff} <end> _"#, &interner).unwrap();
    assert_eq!(
        values,
        vec![
            Value::Integer(1),
            Value::Integer(-42),
            Value::text("hi"),
            Value::Char('x'),
            Value::binary(vec![0x0A, 0xFF]),
            Value::tag("end"),
            Value::Blank,
        ]
    );
}

#[test]
fn test_load_word_forms() {
    let interner = StringInterner::new();
    let values = load("digit out: :mark 'foo", &interner).unwrap();
    assert_eq!(
        values,
        vec![
            Value::Word(interner.intern("digit")),
            Value::SetWord(interner.intern("out")),
            Value::GetWord(interner.intern("mark")),
            Value::LitWord(interner.intern("foo")),
        ]
    );
}

#[test]
fn test_keywords_load_as_pre_interned_words() {
    let interner = StringInterner::new();
    let values = load("some | thru", &interner).unwrap();
    assert_eq!(
        values,
        vec![
            Value::Word(Keyword::Some.name()),
            Value::Word(Keyword::Bar.name()),
            Value::Word(Keyword::Thru.name()),
        ]
    );
}

#[test]
fn test_datatypes_and_typesets() {
    let interner = StringInterner::new();
    let values = load("integer! any-string! hello!", &interner).unwrap();
    assert_eq!(values[0], Value::Datatype(Kind::Integer));
    assert_eq!(values[1], Value::Typeset(TypeSet::ANY_STRING));
    assert_eq!(values[2], Value::Word(interner.intern("hello!")));
}

#[test]
fn test_nesting() {
    assert_eq!(
        mold_all("some [keep \"a\" | (n: n + 1)] :(rule)"),
        r#"[some [keep "a" | (n: n + 1)] :(rule)]"#
    );
}

#[test]
fn test_comments_are_skipped() {
    assert_eq!(mold_all("1 ; one\n2"), "[1 2]");
}

#[test]
fn test_text_escapes() {
    let interner = StringInterner::new();
    let values = load(r#""a\"b\n" #"\n""#, &interner).unwrap();
    assert_eq!(values, vec![Value::text("a\"b\n"), Value::Char('\n')]);
}

#[test]
fn test_operators_are_words() {
    let interner = StringInterner::new();
    let values = load("<= + -", &interner).unwrap();
    assert_eq!(
        values,
        vec![
            Value::Word(interner.intern("<=")),
            Value::Word(interner.intern("+")),
            Value::Word(interner.intern("-")),
        ]
    );
}

#[test]
fn test_unclosed_block() {
    let interner = StringInterner::new();
    let err = load("[1 2", &interner).unwrap_err();
    assert_eq!(err.kind, LexErrorKind::Unclosed { expected: ']' });
    assert_eq!(err.span, 0..4);
}

#[test]
fn test_mismatched_close() {
    let interner = StringInterner::new();
    let err = load("[1)", &interner).unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnexpectedClose { found: ')' });
}

#[test]
fn test_bad_escape() {
    let interner = StringInterner::new();
    let err = load(r#""a\q""#, &interner).unwrap_err();
    assert_eq!(err.kind, LexErrorKind::InvalidEscape { escape: 'q' });
}

#[test]
fn test_odd_binary() {
    let interner = StringInterner::new();
    let err = load("#{abc}", &interner).unwrap_err();
    assert_eq!(err.kind, LexErrorKind::OddBinary);
}

#[test]
fn test_integer_overflow() {
    let interner = StringInterner::new();
    let err = load("99999999999999999999", &interner).unwrap_err();
    assert_eq!(err.kind, LexErrorKind::IntegerOverflow);
}
