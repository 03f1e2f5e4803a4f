//! Configuration handling for Stencil templates.
//! A template root may carry a `stencil.json`, `stencil.yml` or
//! `stencil.yaml` file with default context values and extra ignore entries.

use crate::constants::CONFIG_FILES;
use crate::context::{context_from_entries, Context};
use crate::error::{Error, Result};
use crate::ignore::IgnoreList;
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::path::Path;

/// Parsed template configuration.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TemplateConfig {
    /// Default values for template variables, as written in the file
    #[serde(default)]
    pub context: IndexMap<String, serde_json::Value>,

    /// Relative paths that are never rendered
    #[serde(default)]
    pub ignore: Vec<String>,
}

impl TemplateConfig {
    /// Default context values. `null` (or YAML `~`) entries are left out so
    /// they count as undefined; other scalars are stringified.
    pub fn context(&self) -> Context {
        context_from_entries(&self.context)
    }

    /// Builds the ignore list for this template: the configured entries plus
    /// every configuration file name.
    pub fn ignore_list(&self) -> IgnoreList {
        let mut list: IgnoreList = self.ignore.iter().collect();
        list.extend(CONFIG_FILES);
        list
    }
}

/// Loads configuration from a template directory, trying multiple file formats.
///
/// # Arguments
/// * `template_dir` - Directory containing the template configuration
/// * `config_files` - List of configuration files to try
///
/// # Returns
/// * `Result<Option<String>>` - Contents of the first found configuration file
pub fn load_config<P: AsRef<Path>>(
    template_dir: P,
    config_files: &[&str],
) -> Result<Option<String>> {
    for file in config_files {
        let config_path = template_dir.as_ref().join(file);
        if config_path.is_file() {
            debug!("Loading configuration from {}", config_path.display());
            return Ok(Some(std::fs::read_to_string(&config_path)?));
        }
    }

    debug!("No configuration file found (tried: {})", config_files.join(", "));
    Ok(None)
}

/// Parses configuration content, trying JSON first and YAML second.
///
/// # Errors
/// * `Error::ConfigError` if the content is neither valid JSON nor valid YAML
pub fn parse_config(content: &str) -> Result<TemplateConfig> {
    if content.trim().is_empty() {
        return Ok(TemplateConfig::default());
    }

    match serde_json::from_str(content) {
        Ok(config) => Ok(config),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {e}"))),
    }
}

/// Reads the template configuration, falling back to defaults when the
/// template has none.
pub fn get_config<P: AsRef<Path>>(template_dir: P) -> Result<TemplateConfig> {
    match load_config(template_dir, &CONFIG_FILES)? {
        Some(content) => parse_config(&content),
        None => Ok(TemplateConfig::default()),
    }
}
