//! Named predicates that decide whether a logic block is rendered.

use crate::context::Context;
use std::collections::HashMap;
use std::fmt;

/// A boolean predicate evaluated for `{{#name key}}` blocks.
pub trait Logic {
    /// Returns whether the block guarded by `key` should be kept.
    fn evaluate(&self, key: &str, context: &Context) -> bool;
}

impl<F> Logic for F
where
    F: Fn(&str, &Context) -> bool,
{
    fn evaluate(&self, key: &str, context: &Context) -> bool {
        self(key, context)
    }
}

/// Boxed predicate as stored in a [`LogicRegistry`].
pub type LogicHandler = Box<dyn Logic>;

/// Keeps the block when `key` is present in the context.
pub fn ifdef(key: &str, context: &Context) -> bool {
    context.contains_key(key)
}

/// Keeps the block when `key` is absent from the context.
pub fn ifundef(key: &str, context: &Context) -> bool {
    !context.contains_key(key)
}

/// Maps logic block names to their predicates.
#[derive(Default)]
pub struct LogicRegistry {
    handlers: HashMap<String, LogicHandler>,
}

impl LogicRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` under `name`, replacing any previous handler.
    pub fn register<S, L>(&mut self, name: S, handler: L)
    where
        S: Into<String>,
        L: Logic + 'static,
    {
        self.handlers.insert(name.into(), Box::new(handler));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Logic> {
        self.handlers.get(name).map(|handler| handler.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }
}

impl fmt::Debug for LogicRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("LogicRegistry").field("handlers", &names).finish()
    }
}
