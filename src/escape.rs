//! Brace escaping and closing-tag validation.
//!
//! Template authors write `{{{{` and `}}}}` to get literal `{{` and `}}` in
//! the output. Those sequences are swapped for sentinels before tokenizing so
//! the tokenizer never sees them, and swapped back after rendering.

use crate::error::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

const ESCAPED_OPEN: &str = "{{{{";
const ESCAPED_CLOSE: &str = "}}}}";

// NUL cannot appear in a `\w` name, so these never form part of a delimiter.
const ESCAPE_OPEN: &str = "\0STENCIL_ESCAPE_OPEN\0";
const ESCAPE_CLOSE: &str = "\0STENCIL_ESCAPE_CLOSE\0";

static NAMED_CLOSE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{/\w+\}\}").expect("close tag pattern is valid"));

/// Replaces escaped braces with sentinels.
pub fn escape(template: &str) -> String {
    template
        .replace(ESCAPED_OPEN, ESCAPE_OPEN)
        .replace(ESCAPED_CLOSE, ESCAPE_CLOSE)
}

/// Turns sentinels back into literal braces.
pub fn unescape(output: &str) -> String {
    output.replace(ESCAPE_OPEN, "{{").replace(ESCAPE_CLOSE, "}}")
}

/// Rejects named closing tags such as `{{/ifdef}}`.
///
/// Must run on escaped text so `{{{{/x}}}}` stays legal.
pub fn validate_close_tags(template: &str) -> Result<()> {
    match NAMED_CLOSE_PATTERN.find(template) {
        Some(found) => Err(Error::SyntaxError {
            tag: found.as_str().to_string(),
        }),
        None => Ok(()),
    }
}
