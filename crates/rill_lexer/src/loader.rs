//! Source text to values.
//!
//! Tokens come from logos; the loader interns words, resolves escapes and
//! builds block/group nesting with an explicit frame stack.

use std::ops::Range;

use logos::Logos;
use rill_ir::{Kind, Series, StringInterner, TypeSet, Value};

use crate::lex_error::{LexError, LexErrorKind};
use crate::raw_token::RawToken;

#[derive(Copy, Clone)]
enum FrameKind {
    Block,
    Group,
    GetGroup,
}

impl FrameKind {
    fn close(self) -> char {
        match self {
            FrameKind::Block => ']',
            FrameKind::Group | FrameKind::GetGroup => ')',
        }
    }

    fn finish(self, items: Vec<Value>) -> Value {
        match self {
            FrameKind::Block => Value::block(items),
            FrameKind::Group => Value::group(items),
            FrameKind::GetGroup => Value::get_group(items),
        }
    }
}

struct Frame {
    kind: FrameKind,
    start: usize,
    items: Vec<Value>,
}

/// Load source text into a sequence of values.
pub fn load(source: &str, interner: &StringInterner) -> Result<Vec<Value>, LexError> {
    let mut top: Vec<Value> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut lexer = RawToken::lexer(source);

    while let Some(token) = lexer.next() {
        let span = lexer.span();
        let slice = lexer.slice();
        let raw = token.map_err(|()| invalid_token(span.clone(), slice))?;

        let value = match raw {
            RawToken::LineComment => continue,
            RawToken::LBracket | RawToken::LParen | RawToken::ColonParen => {
                let kind = match raw {
                    RawToken::LBracket => FrameKind::Block,
                    RawToken::LParen => FrameKind::Group,
                    _ => FrameKind::GetGroup,
                };
                stack.push(Frame {
                    kind,
                    start: span.start,
                    items: Vec::new(),
                });
                continue;
            }
            RawToken::RBracket | RawToken::RParen => {
                let found = if raw == RawToken::RBracket { ']' } else { ')' };
                match stack.pop() {
                    Some(frame) if frame.kind.close() == found => frame.kind.finish(frame.items),
                    _ => {
                        return Err(LexError::new(span, LexErrorKind::UnexpectedClose { found }));
                    }
                }
            }
            RawToken::Integer(n) => Value::Integer(n),
            RawToken::Text => {
                let text = unescape(&slice[1..slice.len() - 1], span.clone())?;
                Value::text(&text)
            }
            RawToken::Char => {
                let text = unescape(&slice[2..slice.len() - 1], span.clone())?;
                match text.chars().next() {
                    Some(c) => Value::Char(c),
                    None => return Err(invalid_token(span, slice)),
                }
            }
            RawToken::Binary => Value::binary(decode_hex(&slice[2..slice.len() - 1], span)?),
            RawToken::Tag => Value::Tag(Series::from_text(&slice[1..slice.len() - 1])),
            RawToken::Word => word(slice, interner),
            RawToken::SetWord => Value::SetWord(interner.intern(&slice[..slice.len() - 1])),
            RawToken::GetWord => Value::GetWord(interner.intern(&slice[1..])),
            RawToken::LitWord => Value::LitWord(interner.intern(&slice[1..])),
        };

        match stack.last_mut() {
            Some(frame) => frame.items.push(value),
            None => top.push(value),
        }
    }

    if let Some(frame) = stack.pop() {
        return Err(LexError::new(
            frame.start..source.len(),
            LexErrorKind::Unclosed {
                expected: frame.kind.close(),
            },
        ));
    }
    Ok(top)
}

/// Load source text as one block.
pub fn load_block(source: &str, interner: &StringInterner) -> Result<Value, LexError> {
    load(source, interner).map(Value::block)
}

fn word(slice: &str, interner: &StringInterner) -> Value {
    if slice == "_" {
        return Value::Blank;
    }
    if slice.ends_with('!') {
        if let Some(kind) = Kind::from_name(slice) {
            return Value::Datatype(kind);
        }
        if let Some(typeset) = TypeSet::from_spelling(slice) {
            return Value::Typeset(typeset);
        }
    }
    Value::Word(interner.intern(slice))
}

fn invalid_token(span: Range<usize>, slice: &str) -> LexError {
    let digits = slice.strip_prefix('-').unwrap_or(slice);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        return LexError::new(span, LexErrorKind::IntegerOverflow);
    }
    LexError::new(
        span,
        LexErrorKind::InvalidToken {
            text: slice.to_owned(),
        },
    )
}

fn unescape(content: &str, span: Range<usize>) -> Result<String, LexError> {
    if !content.contains('\\') {
        return Ok(content.to_owned());
    }
    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        let resolved = match chars.next() {
            Some('"') => '"',
            Some('\\') => '\\',
            Some('n') => '\n',
            Some('t') => '\t',
            Some('r') => '\r',
            Some('0') => '\0',
            Some(other) => {
                return Err(LexError::new(span, LexErrorKind::InvalidEscape { escape: other }));
            }
            None => {
                return Err(LexError::new(span, LexErrorKind::InvalidEscape { escape: ' ' }));
            }
        };
        result.push(resolved);
    }
    Ok(result)
}

fn decode_hex(content: &str, span: Range<usize>) -> Result<Vec<u8>, LexError> {
    let digits: Vec<u8> = content
        .chars()
        .filter_map(|c| c.to_digit(16))
        .filter_map(|d| u8::try_from(d).ok())
        .collect();
    if digits.len() % 2 != 0 {
        return Err(LexError::new(span, LexErrorKind::OddBinary));
    }
    Ok(digits.chunks(2).map(|pair| (pair[0] << 4) | pair[1]).collect())
}

#[cfg(test)]
mod tests;
