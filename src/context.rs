//! Render context: the key/value mapping templates are expanded against.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use std::io::Read;

/// Variable values for one render, keyed by name.
pub type Context = IndexMap<String, String>;

/// Parses a single `KEY=VALUE` assignment.
///
/// The value may be empty and may itself contain `=`.
pub fn parse_assignment(s: &str) -> Result<(String, String)> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| Error::ConfigError(format!("expected KEY=VALUE, got '{s}'")))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(Error::ConfigError(format!("empty key in assignment '{s}'")));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Converts a JSON object of answers into a context.
///
/// `null` itself yields an empty context; see [`context_from_entries`] for how
/// individual values are converted.
pub fn context_from_json(value: &serde_json::Value) -> Result<Context> {
    match value {
        serde_json::Value::Null => Ok(Context::new()),
        serde_json::Value::Object(object) => Ok(context_from_entries(object)),
        other => Err(Error::ConfigError(format!(
            "context must be a JSON object, got '{other}'"
        ))),
    }
}

/// Builds a context from key/value pairs of JSON values.
///
/// Strings are taken as-is, `null` entries are skipped so they count as
/// undefined, and every other value uses its JSON representation.
pub fn context_from_entries<'a, I>(entries: I) -> Context
where
    I: IntoIterator<Item = (&'a String, &'a serde_json::Value)>,
{
    let mut context = Context::new();
    for (key, value) in entries {
        match value {
            serde_json::Value::Null => continue,
            serde_json::Value::String(s) => context.insert(key.clone(), s.clone()),
            other => context.insert(key.clone(), other.to_string()),
        };
    }
    context
}

pub fn load_from_stdin() -> Result<Context> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    let out = buffer.trim();
    if out.is_empty() {
        return Ok(Context::new());
    }
    let value: serde_json::Value = serde_json::from_str(out)
        .map_err(|e| Error::ConfigError(format!("invalid JSON on stdin: {e}")))?;
    context_from_json(&value)
}

/// Assembles the render context from its sources, lowest precedence first:
/// configuration defaults, answers read from stdin, then explicit assignments.
pub fn resolve_context<I>(defaults: Context, answers: Option<Context>, defines: I) -> Context
where
    I: IntoIterator<Item = (String, String)>,
{
    let context = match answers {
        Some(answers) => merge(defaults, answers),
        None => defaults,
    };
    merge(context, defines)
}

/// Layers `overrides` on top of `base`; later values win.
pub fn merge<I>(mut base: Context, overrides: I) -> Context
where
    I: IntoIterator<Item = (String, String)>,
{
    base.extend(overrides);
    base
}
