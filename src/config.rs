//! Per-request settings, loadable from TOML

use crate::error::{PwmError, Result};
use crate::logo::LogoOptions;
use crate::types::AlphabetPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings for one PWM generation request.
///
/// Every field has a default, so an empty document is a valid configuration:
///
/// ```toml
/// alphabet = "strict"
/// render_logo = true
///
/// [logo]
/// stack_width = 32
/// color_scheme = "monochrome"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Handling of characters outside A, T, G, C
    pub alphabet: AlphabetPolicy,
    /// Whether a logo is drawn next to the table
    pub render_logo: bool,
    pub logo: LogoOptions,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            alphabet: AlphabetPolicy::Tolerant,
            render_logo: true,
            logo: LogoOptions::default(),
        }
    }
}

impl GenerateConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| PwmError::Config(e.to_string()))
    }

    /// Loads a configuration file, or the defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_toml_str(&fs::read_to_string(path)?),
            None => Ok(Self::default()),
        }
    }
}
