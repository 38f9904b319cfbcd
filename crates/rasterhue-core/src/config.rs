//! Where named color scales come from.

use std::path::{Path, PathBuf};

/// Directory holding `<name>.xml` / `<name>.json` definitions.
pub const BASE_DIR_VAR: &str = "RASTERHUE_COLORSCALE_BASE";
/// Name of the scale to install as the process default.
pub const DEFAULT_NAME_VAR: &str = "RASTERHUE_DEFAULT_COLORSCALE";

/// Runtime configuration for a [`ColorScaleLibrary`](crate::library::ColorScaleLibrary).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryConfig {
    /// Directory searched for definitions. `None` disables named lookups.
    pub base_dir: Option<PathBuf>,
    /// Scale used when a renderer asks for the default.
    pub default_name: Option<String>,
}

impl LibraryConfig {
    /// Read [`BASE_DIR_VAR`] and [`DEFAULT_NAME_VAR`]. Unset or blank
    /// variables leave the field empty.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| var(key).filter(|v: &String| !v.trim().is_empty());
        Self {
            base_dir: non_blank(BASE_DIR_VAR).map(PathBuf::from),
            default_name: non_blank(DEFAULT_NAME_VAR).map(|v| v.trim().to_string()),
        }
    }

    pub fn with_base_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.base_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn with_default_name(mut self, name: impl Into<String>) -> Self {
        self.default_name = Some(name.into());
        self
    }
}
