//! Rasterhue Core — value-to-color classification for raster rendering.
//!
//! This crate contains the color scale engine: breakpoint tables, Absolute,
//! MinMax and Quantile scaling, the interpolation and clamping policy, the
//! XML/JSON definition formats and named scale libraries. No I/O happens on
//! the per-pixel path.

pub mod color;
pub mod config;
pub mod error;
pub mod library;
pub mod palette;
pub mod raster;
pub mod scale;
pub mod scaling;
pub mod stops;

mod defaults;
mod format;
mod resolve;

// Re-exports for convenience.
pub use color::Rgba;
pub use config::LibraryConfig;
pub use error::{ColorScaleError, Result};
pub use library::ColorScaleLibrary;
pub use raster::{as_rgba8, colorize, colorize_into};
pub use scale::ColorScale;
pub use scaling::{ScaleRange, Scaling};
pub use stops::{Breakpoints, ColorStop};
