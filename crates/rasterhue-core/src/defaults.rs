//! Process-wide default color scale.
//!
//! Renderers that have no scale of their own start from
//! [`ColorScale::create_default`]. The template can be replaced at runtime
//! with [`ColorScale::set_default`]; every read hands out an independent copy,
//! so mutating a scale never aliases the template.

use parking_lot::RwLock;

use crate::color::Rgba;
use crate::scale::ColorScale;
use crate::scaling::Scaling;

/// Replacement template installed with `set_default`. `None` means built-in.
static DEFAULT_TEMPLATE: RwLock<Option<ColorScale>> = parking_lot::const_rwlock(None);

/// Stops of the built-in template over its native `0..1` domain: transparent,
/// translucent white, a nine-class blue-green sequential ramp, opaque black.
const BUILTIN_STOPS: [(f64, Rgba); 12] = [
    (0.0, Rgba::TRANSPARENT),
    (0.05, Rgba::new(255, 255, 255, 128)),
    (0.1, Rgba::rgb(247, 252, 253)),
    (0.2, Rgba::rgb(229, 245, 249)),
    (0.3, Rgba::rgb(204, 236, 230)),
    (0.4, Rgba::rgb(153, 216, 201)),
    (0.5, Rgba::rgb(102, 194, 164)),
    (0.6, Rgba::rgb(65, 174, 118)),
    (0.7, Rgba::rgb(35, 139, 69)),
    (0.8, Rgba::rgb(0, 109, 44)),
    (0.9, Rgba::rgb(0, 68, 27)),
    (1.0, Rgba::rgb(0, 0, 0)),
];

impl ColorScale {
    /// The built-in "Default" template: a MinMax ramp stretched over the
    /// data's range once [`ColorScale::set_scale_range`] is applied.
    pub fn builtin_default() -> Self {
        let mut scale = Self::empty();
        scale.set_scaling(Scaling::MinMax);
        for (value, color) in BUILTIN_STOPS {
            scale.put(value, color);
        }
        scale
    }

    /// A fresh copy of the current process default.
    pub fn create_default() -> Self {
        DEFAULT_TEMPLATE
            .read()
            .clone()
            .unwrap_or_else(Self::builtin_default)
    }

    /// Replace the process default. `None` restores the built-in template.
    pub fn set_default(template: Option<ColorScale>) {
        match &template {
            Some(scale) => tracing::info!(
                stops = scale.size(),
                scaling = %scale.scaling(),
                "installed custom default color scale"
            ),
            None => tracing::info!("restored built-in default color scale"),
        }
        *DEFAULT_TEMPLATE.write() = template;
    }
}

/// Serializes tests that read or replace the process default.
#[cfg(test)]
pub(crate) fn default_test_lock() -> &'static std::sync::Mutex<()> {
    static LOCK: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();
    LOCK.get_or_init(|| std::sync::Mutex::new(()))
}
