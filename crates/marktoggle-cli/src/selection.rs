//! `--selection` argument parsing.

use marktoggle_core::{Position, TextRange};

/// Parse `L:C` (a caret) or `L:C-L:C`. Lines and columns are 1-based.
pub fn parse_selection(s: &str) -> Result<TextRange, String> {
    let s = s.trim();
    match s.split_once('-') {
        Some((start, end)) => {
            let start = parse_position(start)?;
            let end = parse_position(end)?;
            Ok(TextRange::new(start.line, start.column, end.line, end.column))
        }
        None => {
            let caret = parse_position(s)?;
            Ok(TextRange::caret(caret.line, caret.column))
        }
    }
}

fn parse_position(s: &str) -> Result<Position, String> {
    let (line, column) = s
        .trim()
        .split_once(':')
        .ok_or_else(|| format!("expected LINE:COLUMN, got {s:?}"))?;
    let line = parse_index(line, "line")?;
    let column = parse_index(column, "column")?;
    Ok(Position::new(line, column))
}

fn parse_index(s: &str, what: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(0) => Err(format!("{what} numbers start at 1")),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("invalid {what} {s:?}")),
    }
}
