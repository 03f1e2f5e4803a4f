//! Template tokenizer.
//! Splits template text into text runs, variable references and logic block
//! delimiters. Nesting is not checked here; that is the renderer's job.

use regex::Regex;
use std::sync::LazyLock;

/// The only legal block closing tag.
pub const LOGIC_END: &str = "{{/}}";

// Alternation order is the match priority at a given position.
static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?s)\{{\{{#(?P<logic>\w+)\s+(?P<key>\w+)\}}\}}|{}|\{{\{{(?P<var>\w+)\}}\}}",
        regex::escape(LOGIC_END)
    ))
    .expect("token pattern is valid")
});

/// A single lexical element of a template, borrowed from its source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Literal text copied to the output unchanged
    Text(&'a str),
    /// `{{name}}`
    Variable(&'a str),
    /// `{{#name key}}`
    LogicStart { name: &'a str, key: &'a str },
    /// `{{/}}`
    LogicEnd,
}

/// Tokenizes `template` in a single left-to-right pass.
///
/// Text between delimiters is emitted as one `Text` token; empty runs are
/// dropped.
pub fn tokenize(template: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    for caps in TOKEN_PATTERN.captures_iter(template) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > pos {
            tokens.push(Token::Text(&template[pos..whole.start()]));
        }

        // Only the closing tag matches without capturing a name.
        let token = match (caps.name("logic"), caps.name("key"), caps.name("var")) {
            (Some(name), Some(key), _) => Token::LogicStart {
                name: name.as_str(),
                key: key.as_str(),
            },
            (_, _, Some(var)) => Token::Variable(var.as_str()),
            _ => Token::LogicEnd,
        };
        tokens.push(token);

        pos = whole.end();
    }

    if pos < template.len() {
        tokens.push(Token::Text(&template[pos..]));
    }

    tokens
}
