//! The `load` command: show how source text loads, one molded value per line.

use rill_ir::StringInterner;

pub fn load_source(source: &str) -> Result<String, String> {
    let interner = StringInterner::new();
    let values = rill_lexer::load(source, &interner).map_err(|err| err.to_string())?;
    let lines: Vec<String> = values.iter().map(|value| value.mold(&interner)).collect();
    Ok(lines.join("\n"))
}
