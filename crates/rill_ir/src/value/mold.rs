//! Source rendering of values.
//!
//! `mold` produces text that loads back to an equivalent value; `form` is the
//! human-readable rendering used by `print` and by text mutation rules.

use std::fmt::Write as _;

use super::Value;
use crate::StringInterner;

impl Value {
    /// Render as loadable source.
    pub fn mold(&self, interner: &StringInterner) -> String {
        let mut out = String::new();
        mold_into(&mut out, self, interner);
        out
    }

    /// Render for display: text without quotes, blocks without brackets.
    pub fn form(&self, interner: &StringInterner) -> String {
        match self {
            Value::Text(s) => s.to_text(),
            Value::Char(c) => c.to_string(),
            Value::Block(s) | Value::Group(s) => {
                let items = s.to_vec();
                let mut out = String::new();
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    out.push_str(&item.form(interner));
                }
                out
            }
            other => other.mold(interner),
        }
    }
}

fn mold_into(out: &mut String, value: &Value, interner: &StringInterner) {
    match value {
        Value::None => out.push_str("none"),
        Value::Blank => out.push('_'),
        Value::Logic(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Integer(n) => {
            let _ = write!(out, "{n}");
        }
        Value::Char(c) => {
            out.push_str("#\"");
            escape_char(out, *c);
            out.push('"');
        }
        Value::Word(n) => out.push_str(interner.lookup(*n)),
        Value::SetWord(n) => {
            out.push_str(interner.lookup(*n));
            out.push(':');
        }
        Value::GetWord(n) => {
            out.push(':');
            out.push_str(interner.lookup(*n));
        }
        Value::LitWord(n) => {
            out.push('\'');
            out.push_str(interner.lookup(*n));
        }
        Value::Datatype(k) => out.push_str(k.as_str()),
        Value::Typeset(t) => out.push_str(t.name().unwrap_or("typeset!")),
        Value::Bitset(b) => {
            let _ = write!(out, "#[bitset {}]", b.count());
        }
        Value::Text(s) => {
            out.push('"');
            for c in s.to_vec() {
                escape_char(out, c);
            }
            out.push('"');
        }
        Value::Tag(s) => {
            out.push('<');
            out.push_str(&s.to_text());
            out.push('>');
        }
        Value::Binary(s) => {
            out.push_str("#{");
            for b in s.to_vec() {
                let _ = write!(out, "{b:02X}");
            }
            out.push('}');
        }
        Value::Block(s) => mold_items(out, "[", &s.to_vec(), "]", interner),
        Value::Group(s) => mold_items(out, "(", &s.to_vec(), ")", interner),
        Value::GetGroup(s) => mold_items(out, ":(", &s.to_vec(), ")", interner),
        Value::Native(n) => {
            let _ = write!(out, "#[native {}]", n.name);
        }
    }
}

fn mold_items(out: &mut String, open: &str, items: &[Value], close: &str, interner: &StringInterner) {
    out.push_str(open);
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        mold_into(out, item, interner);
    }
    out.push_str(close);
}

fn escape_char(out: &mut String, c: char) {
    match c {
        '"' => out.push_str("\\\""),
        '\\' => out.push_str("\\\\"),
        '\n' => out.push_str("\\n"),
        '\t' => out.push_str("\\t"),
        c => out.push(c),
    }
}
