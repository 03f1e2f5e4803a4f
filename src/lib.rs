//! Stencil is a small brace-template engine for project scaffolding.
//! It expands `{{variable}}` references and `{{#logic key}}...{{/}}` blocks
//! in text, and renders whole directory trees (file names included).

/// Command-line interface module for the Stencil application
pub mod cli;

/// Configuration handling for Stencil templates
/// Supports JSON and YAML formats (stencil.json, stencil.yml, stencil.yaml)
pub mod config;

pub mod constants;

/// Render context type and builders
pub mod context;

/// Error types and handling for the Stencil application
pub mod error;

/// Literal brace escaping and closing-tag validation
pub mod escape;

/// Relative path ignore list used by tree rendering
pub mod ignore;

pub mod logger;

/// Named predicates for logic blocks
pub mod logic;

/// Directory tree rendering
pub mod processor;

/// Template parsing and rendering functionality
pub mod renderer;

/// Template tokenizer
pub mod token;
