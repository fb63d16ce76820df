//! Canonical layout for generated declaration text.
//!
//! Indentation follows brace depth, runs of blank lines collapse to one, and
//! import and member lines are terminated with `;`.

use crate::errors::{GenerateError, Result};

const INDENT: &str = "    ";

pub fn print_source(source: &str) -> Result<String> {
    let mut printed = String::with_capacity(source.len());
    let mut depth: usize = 0;
    let mut pending_blank = false;

    for (index, raw) in source.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            pending_blank = !printed.is_empty();
            continue;
        }

        let opens = line.matches('{').count();
        let closes = line.matches('}').count();
        let leading_close = line.starts_with('}');

        if leading_close && depth == 0 {
            return Err(GenerateError::Print(format!(
                "unbalanced '}}' on line {}",
                index + 1
            )));
        }
        let indent = if leading_close { depth - 1 } else { depth };

        if pending_blank && !(leading_close && closes > opens) {
            printed.push('\n');
        }
        pending_blank = false;

        for _ in 0..indent {
            printed.push_str(INDENT);
        }
        printed.push_str(line);
        if needs_terminator(line, depth) {
            printed.push(';');
        }
        printed.push('\n');

        depth = (depth + opens).checked_sub(closes).ok_or_else(|| {
            GenerateError::Print(format!("unbalanced '}}' on line {}", index + 1))
        })?;
    }

    if depth != 0 {
        return Err(GenerateError::Print(format!(
            "{depth} unclosed '{{' at end of output"
        )));
    }

    Ok(printed)
}

fn needs_terminator(line: &str, depth: usize) -> bool {
    if line.starts_with("//") || line.starts_with("/*") || line.starts_with('*') {
        return false;
    }
    if line.ends_with('{') || line.ends_with(';') || line.ends_with(',') {
        return false;
    }
    if depth == 0 {
        return line.starts_with("import ") || line.starts_with("export type ");
    }
    !line.starts_with('}')
}
