//! Colorizing whole pixel buffers.
//!
//! NoData is decided here, before classification: a pixel equal to the
//! band's NoData value gets the scale's null color and never reaches
//! [`ColorScale::lookup`].

use crate::color::Rgba;
use crate::scale::ColorScale;

/// Colorize `pixels` into a new buffer of the same length.
pub fn colorize(scale: &ColorScale, pixels: &[f64], nodata: Option<f64>) -> Vec<Rgba> {
    let mut out = vec![Rgba::TRANSPARENT; pixels.len()];
    colorize_into(scale, pixels, nodata, &mut out);
    out
}

/// Colorize `pixels` into `out`, pairwise. Extra entries on either side are
/// left untouched.
pub fn colorize_into(scale: &ColorScale, pixels: &[f64], nodata: Option<f64>, out: &mut [Rgba]) {
    let null = scale.null_color();
    for (dst, &value) in out.iter_mut().zip(pixels) {
        *dst = if is_nodata(value, nodata) {
            null
        } else {
            scale.lookup(value).unwrap_or(null)
        };
    }
}

/// View colors as packed RGBA8 bytes.
pub fn as_rgba8(colors: &[Rgba]) -> &[u8] {
    bytemuck::cast_slice(colors)
}

fn is_nodata(value: f64, nodata: Option<f64>) -> bool {
    match nodata {
        Some(nd) if nd.is_nan() => value.is_nan(),
        Some(nd) => value.to_bits() == nd.to_bits(),
        None => false,
    }
}
