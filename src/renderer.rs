//! Template renderer and rendering functionality for Stencil.
//! Expands `{{variable}}` references and `{{#logic key}}...{{/}}` blocks
//! with a recursive-descent parser over the token stream.
use crate::context::Context;
use crate::error::{Error, Result};
use crate::escape::{escape, unescape, validate_close_tags};
use crate::logic::{self, Logic, LogicRegistry};
use crate::token::{tokenize, Token};
use log::{debug, warn};

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `template` - Template string to render
    /// * `context` - Context variables for rendering
    ///
    /// # Returns
    /// * `Result<String>` - Rendered template string
    fn render(&self, template: &str, context: &Context) -> Result<String>;
}

/// Output of one parse level and the index of the first unconsumed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult {
    pub output: String,
    pub next_index: usize,
    /// True when this level stopped on a closing tag rather than end of input
    pub closed: bool,
}

/// Brace-template engine holding the registered logic predicates.
#[derive(Debug, Default)]
pub struct TemplateEngine {
    logic: LogicRegistry,
}

impl TemplateEngine {
    /// Creates an engine with no logic registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with `ifdef` and `ifundef` registered.
    pub fn with_default_logic() -> Self {
        let mut engine = Self::new();
        engine.register_logic("ifdef", logic::ifdef);
        engine.register_logic("ifundef", logic::ifundef);
        engine
    }

    /// Registers a predicate for `{{#name key}}` blocks.
    /// Registering an existing name replaces the previous predicate.
    pub fn register_logic<S, L>(&mut self, name: S, handler: L)
    where
        S: Into<String>,
        L: Logic + 'static,
    {
        let name = name.into();
        debug!("Registering logic '{name}'");
        self.logic.register(name, handler);
    }

    pub fn logic(&self) -> &LogicRegistry {
        &self.logic
    }

    /// Renders tokens starting at `index` until a closing tag or the end of
    /// the stream.
    ///
    /// A block body is always parsed, even when its predicate rejects it, so
    /// that the returned index skips past the whole block.
    ///
    /// # Errors
    /// * `Error::UnregisteredLogic` if a block names an unknown predicate
    pub fn parse(
        &self,
        tokens: &[Token<'_>],
        context: &Context,
        index: usize,
    ) -> Result<ParseResult> {
        let mut output = String::new();
        let mut index = index;

        while let Some(token) = tokens.get(index) {
            match *token {
                Token::Text(text) => {
                    output.push_str(text);
                    index += 1;
                }
                Token::Variable(name) => {
                    match context.get(name) {
                        Some(value) => output.push_str(value),
                        None => debug!("Variable '{name}' is not defined, rendering as empty"),
                    }
                    index += 1;
                }
                Token::LogicStart { name, key } => {
                    let handler = self
                        .logic
                        .get(name)
                        .ok_or_else(|| Error::UnregisteredLogic {
                            name: name.to_string(),
                        })?;

                    let inner = self.parse(tokens, context, index + 1)?;
                    if handler.evaluate(key, context) {
                        output.push_str(&inner.output);
                    } else {
                        debug!("Logic '{name} {key}' is false, discarding block");
                    }
                    index = inner.next_index;
                }
                Token::LogicEnd => {
                    return Ok(ParseResult {
                        output,
                        next_index: index + 1,
                        closed: true,
                    });
                }
            }
        }

        Ok(ParseResult {
            output,
            next_index: index,
            closed: false,
        })
    }
}

impl TemplateRenderer for TemplateEngine {
    /// Renders a template string.
    ///
    /// # Errors
    /// * `Error::SyntaxError` if a named closing tag such as `{{/foo}}` is present
    /// * `Error::UnregisteredLogic` if a block references an unknown predicate
    fn render(&self, template: &str, context: &Context) -> Result<String> {
        let escaped = escape(template);
        validate_close_tags(&escaped)?;

        let tokens = tokenize(&escaped);
        let parsed = self.parse(&tokens, context, 0)?;
        if parsed.closed {
            warn!(
                "Stray closing tag outside of any block, {} trailing token(s) not rendered",
                tokens.len() - parsed.next_index
            );
        }

        Ok(unescape(&parsed.output))
    }
}
