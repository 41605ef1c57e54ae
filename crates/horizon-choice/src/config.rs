//! Declarative choice configuration.
//!
//! [`ChoiceConfig`] holds the construction-time flags of a selection
//! controller. It can be embedded in an application's settings file and fed
//! to [`SelectionBuilder::config`](crate::SelectionBuilder::config).
//!
//! ```
//! use horizon_choice::ChoiceConfig;
//!
//! let config = ChoiceConfig::from_toml_str(r#"
//! multiple = true
//! clearable = true
//! title = "Fruits"
//! "#)?;
//!
//! assert!(config.multiple);
//! assert!(!config.confirmation);
//! # Ok::<(), horizon_choice::Error>(())
//! ```

use std::path::Path;

use horizon_choice_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Construction-time flags for a selection controller.
///
/// Missing keys fall back to [`Default`]: single selection, not clearable,
/// no confirmation step, no title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChoiceConfig {
    /// Additive (multi) selection instead of single-replace.
    pub multiple: bool,
    /// Whether the selection may become empty through removal.
    pub clearable: bool,
    /// Whether choosing waits for an explicit confirm before closing.
    pub confirmation: bool,
    /// Prompt title, passive metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl ChoiceConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `multiple`.
    pub fn with_multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    /// Set `clearable`.
    pub fn with_clearable(mut self, clearable: bool) -> Self {
        self.clearable = clearable;
        self
    }

    /// Set `confirmation`.
    pub fn with_confirmation(mut self, confirmation: bool) -> Self {
        self.confirmation = confirmation;
        self
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Serialize the configuration to TOML text.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Read a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(
            target: targets::CONFIG,
            path = %path.display(),
            ?config,
            "loaded choice config"
        );
        Ok(config)
    }
}
