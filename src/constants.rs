//! Common constants used throughout the Stencil application.

/// Supported configuration file names, in lookup order
pub const CONFIG_FILES: [&str; 3] = ["stencil.json", "stencil.yml", "stencil.yaml"];
