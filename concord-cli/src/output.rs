//! Output formatting utilities for CLI commands

use serde::Serialize;
use std::io::{self, IsTerminal, Write};

use concord::EntityMention;

/// Wrap text in an ANSI color when stderr is a terminal.
pub fn color(code: &str, text: &str) -> String {
    if io::stderr().is_terminal() {
        format!("\x1b[{code}m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

/// Write a line to stdout, reporting broken pipes as errors.
pub fn write_line(line: &str) -> Result<(), String> {
    let mut out = io::stdout().lock();
    writeln!(out, "{line}").map_err(|e| format!("Failed to write to stdout: {e}"))
}

/// Print a value as pretty JSON.
pub fn write_json<T: Serialize>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize output: {e}"))?;
    write_line(&json)
}

/// Comma-separated mentions, tentative ones marked with `?`.
pub fn mention_list(mentions: &[EntityMention]) -> String {
    if mentions.is_empty() {
        "-".to_string()
    } else {
        mentions
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Comma-separated tags.
pub fn tag_list(tags: &[String]) -> String {
    if tags.is_empty() {
        "-".to_string()
    } else {
        tags.join(", ")
    }
}

/// Collapse runs of whitespace so excerpts fit on one line.
pub fn one_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists() {
        let m = vec![EntityMention::confident("A"), EntityMention::tentative("B")];
        assert_eq!(mention_list(&m), "A, B?");
        assert_eq!(mention_list(&[]), "-");
        assert_eq!(tag_list(&["x".to_string()]), "x");
    }

    #[test]
    fn one_line_collapses_whitespace() {
        assert_eq!(one_line(" a\n\n b\tc "), "a b c");
    }
}
