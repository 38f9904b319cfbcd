//! Named color scales loaded from a definitions directory.
//!
//! A name resolves to `<base>/<name>.xml`, then `<base>/<name>.json`. Parsed
//! scales are cached by name and every lookup hands back an independent copy.

use std::collections::HashMap;
use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use crate::config::LibraryConfig;
use crate::error::{ColorScaleError, Result};
use crate::scale::ColorScale;

pub struct ColorScaleLibrary {
    config: LibraryConfig,
    cache: RwLock<HashMap<String, ColorScale>>,
}

impl ColorScaleLibrary {
    pub fn new(config: LibraryConfig) -> Self {
        Self {
            config,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Library configured from the process environment.
    pub fn from_env() -> Self {
        Self::new(LibraryConfig::from_env())
    }

    pub fn config(&self) -> &LibraryConfig {
        &self.config
    }

    /// Load (or reuse) the scale called `name`.
    pub fn get(&self, name: &str) -> Result<ColorScale> {
        validate_name(name)?;
        if let Some(scale) = self.cache.read().get(name) {
            return Ok(scale.clone());
        }

        let scale = self.load(name)?;
        self.cache.write().insert(name.to_string(), scale.clone());
        Ok(scale)
    }

    /// The configured default scale, or the process default when none is
    /// configured or it cannot be loaded.
    pub fn default_scale(&self) -> ColorScale {
        let Some(name) = &self.config.default_name else {
            return ColorScale::create_default();
        };
        match self.get(name) {
            Ok(scale) => scale,
            Err(err) => {
                tracing::warn!(name = %name, error = %err, "falling back to built-in default color scale");
                ColorScale::create_default()
            }
        }
    }

    /// Install the configured default as the process default.
    ///
    /// Returns `Ok(false)` when no default name is configured.
    pub fn install_default(&self) -> Result<bool> {
        let Some(name) = &self.config.default_name else {
            return Ok(false);
        };
        let scale = self.get(name)?;
        ColorScale::set_default(Some(scale));
        Ok(true)
    }

    /// Drop cached definitions so the next `get` rereads them from disk.
    pub fn invalidate(&self) {
        self.cache.write().clear();
    }

    fn load(&self, name: &str) -> Result<ColorScale> {
        let base = self
            .config
            .base_dir
            .as_deref()
            .ok_or_else(|| ColorScaleError::NotFound(name.to_string()))?;

        let xml = definition_path(base, name, "xml");
        if xml.is_file() {
            tracing::debug!(path = %xml.display(), "loading color scale");
            let file = fs::File::open(&xml)?;
            return ColorScale::from_xml_reader(BufReader::new(file));
        }

        let json = definition_path(base, name, "json");
        if json.is_file() {
            tracing::debug!(path = %json.display(), "loading color scale");
            return ColorScale::from_json_str(&fs::read_to_string(&json)?);
        }

        Err(ColorScaleError::NotFound(name.to_string()))
    }
}

fn definition_path(base: &Path, name: &str, extension: &str) -> PathBuf {
    base.join(format!("{name}.{extension}"))
}

/// Names are single path components: no separators, no `..`.
fn validate_name(name: &str) -> Result<()> {
    let invalid = name.trim().is_empty()
        || name.contains(['/', '\\'])
        || name.contains("..")
        || name.contains('\0');
    if invalid {
        return Err(ColorScaleError::InvalidName(name.to_string()));
    }
    Ok(())
}
