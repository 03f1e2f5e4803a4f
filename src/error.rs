//! Error handling for the Stencil application.
//! Defines custom error types and results used throughout the application.

use std::io;
use thiserror::Error;

/// Custom error types for Stencil operations.
///
/// Structural template problems (illegal close tags, unknown logic blocks,
/// unusable rendered paths) are errors. Missing variables are not.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// A named closing tag such as `{{/foo}}` was found in a template
    #[error("Syntax error: found '{tag}', only {{{{/}}}} is permitted as a block closing tag.")]
    SyntaxError { tag: String },

    /// A logic block references a predicate that was never registered
    #[error("No handler registered for logic: '{name}'.")]
    UnregisteredLogic { name: String },

    /// A path segment rendered into something that cannot be used as a file name
    #[error("Invalid path component: '{part}' rendered to '{rendered}' ({reason}).")]
    InvalidPathComponent {
        part: String,
        rendered: String,
        reason: String,
    },

    /// Represents errors in the template tree itself
    #[error("Template error: {0}.")]
    TemplateError(String),

    /// Represents errors that occur during configuration parsing or processing
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// Output directory already exists and overwriting was not requested
    #[error("Output directory '{output_dir}' already exists. Use --force to overwrite it.")]
    OutputDirectoryExistsError { output_dir: String },
}

/// Convenience type alias for Results with Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
