//! 8-bit RGBA colors and the channel blending rules used by the ramp.

use std::fmt;

use bytemuck::{Pod, Zeroable};

use crate::error::{ColorScaleError, Result};

/// An 8-bit straight-alpha color.
///
/// Laid out as four consecutive bytes so colorized buffers can be handed to
/// image writers or GPU uploads through [`bytemuck::cast_slice`].
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black. Returned for out-of-range and transparent values.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color (alpha 255).
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Blend towards `other` by `frac`, rounding each channel half-up.
    ///
    /// ```text
    /// out = round(self + (other − self) × frac)
    /// ```
    pub fn blend_rounded(self, other: Self, frac: f64) -> Self {
        self.zip_channels(other, |lo, hi| {
            let v = f64::from(lo) + (f64::from(hi) - f64::from(lo)) * frac;
            clamp_channel(v.round())
        })
    }

    /// Blend towards `other` by `frac`, truncating the channel delta toward zero.
    ///
    /// ```text
    /// out = self + trunc((other − self) × frac)
    /// ```
    ///
    /// Used for synthesized quantile breakpoints, which always stay on the
    /// `self` side of a fractional channel value.
    pub fn blend_truncated(self, other: Self, frac: f64) -> Self {
        self.zip_channels(other, |lo, hi| {
            let delta = (f64::from(hi) - f64::from(lo)) * frac;
            clamp_channel(f64::from(lo) + delta.trunc())
        })
    }

    /// Format the color channels as the `"r,g,b"` attribute used by definitions.
    pub fn rgb_attr(self) -> String {
        format!("{},{},{}", self.r, self.g, self.b)
    }

    fn zip_channels(self, other: Self, f: impl Fn(u8, u8) -> u8) -> Self {
        Self {
            r: f(self.r, other.r),
            g: f(self.g, other.g),
            b: f(self.b, other.b),
            a: f(self.a, other.a),
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl From<[u8; 4]> for Rgba {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

impl From<Rgba> for [u8; 4] {
    fn from(c: Rgba) -> Self {
        c.to_array()
    }
}

fn clamp_channel(v: f64) -> u8 {
    v.clamp(0.0, 255.0) as u8
}

/// Parse a `"r,g,b"` color attribute plus an optional opacity.
///
/// A missing or blank opacity means fully opaque.
pub fn parse_color(rgb: &str, opacity: Option<&str>) -> Result<Rgba> {
    let invalid = || ColorScaleError::InvalidColor(rgb.to_string());

    let mut channels = [0_u8; 3];
    let mut parts = rgb.split(',');
    for channel in &mut channels {
        let part = parts.next().ok_or_else(invalid)?;
        *channel = part.trim().parse().map_err(|_| invalid())?;
    }
    if parts.next().is_some() {
        return Err(invalid());
    }

    let alpha = match opacity.map(str::trim) {
        None | Some("") => 255,
        Some(text) => text
            .parse()
            .map_err(|_| ColorScaleError::InvalidOpacity(text.to_string()))?,
    };

    Ok(Rgba::new(channels[0], channels[1], channels[2], alpha))
}
