//! Tool configuration.
//!
//! docdex reads an optional `docdex.toml` from the source root. One key is
//! consumed: `search_regex`, the pattern deciding which files are mirrored.
//! The rest of the file is left alone, so it can carry sections for other
//! tools without tripping validation.
//!
//! ```toml
//! # docdex.toml
//! search_regex = '\.(html|md|jpg|png|gif)$'
//! ```
//!
//! When the file or the key is absent, the built-in default pattern is used,
//! which matches the `html`, `md`, `jpg` and `png` extensions.

use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Config file name, looked up in the source root.
pub const CONFIG_FILE_NAME: &str = "docdex.toml";

/// Pattern used when no `search_regex` is configured.
pub const DEFAULT_SEARCH_REGEX: &str = r"\.(html|md|jpg|png)$";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error in {CONFIG_FILE_NAME}: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid search_regex pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Settings read from `docdex.toml`.
///
/// Unknown keys are deliberately ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Regex selecting which source files are mirrored.
    pub search_regex: Option<String>,
}

/// Load `docdex.toml` from the source root, falling back to defaults when
/// the file does not exist.
pub fn load_config(source_root: &Path) -> Result<Config, ConfigError> {
    let path = source_root.join(CONFIG_FILE_NAME);
    if !path.is_file() {
        return Ok(Config::default());
    }
    let content = fs::read_to_string(&path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

impl Config {
    /// Compile the selection pattern, using the default when none is set.
    ///
    /// A pattern that fails to compile is a fatal configuration error; the
    /// run cannot produce a meaningful result without knowing what is in
    /// scope.
    pub fn selection_pattern(&self) -> Result<Regex, ConfigError> {
        let pattern = self.search_regex.as_deref().unwrap_or(DEFAULT_SEARCH_REGEX);
        Ok(Regex::new(pattern)?)
    }
}

/// A documented stock config, printed by `docdex gen-config`.
pub fn stock_config_toml() -> String {
    format!(
        r#"# docdex configuration
#
# Place this file next to the tree you run `docdex make` in. Only the keys
# below are read; anything else in this file is ignored.

# Regex selecting which source files are mirrored into the publication tree.
# Matched against the path relative to the source root.
search_regex = '{DEFAULT_SEARCH_REGEX}'
"#
    )
}
