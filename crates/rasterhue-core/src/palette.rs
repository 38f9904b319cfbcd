//! Baked 1D palette for constant-time interpolated lookups.
//!
//! An evenly spaced ramp is sampled at [`PALETTE_SIZE`] points across the
//! extent of its effective breakpoints. Classifying an in-range value then
//! costs one multiply and one index instead of a bracket search and blend.
//!
//! ```text
//! entry[i] = blend_at(first + span × i / (SIZE − 1))
//! lookup(v) = entry[round((v − first) / span × (SIZE − 1))]
//! ```

use crate::color::Rgba;
use crate::stops::ColorStop;

/// Number of entries in a baked palette.
pub const PALETTE_SIZE: usize = 1024;

/// Ramp colors sampled at uniform positions over `[start, start + span]`.
#[derive(Debug, Clone)]
pub struct Palette {
    start: f64,
    span: f64,
    entries: Vec<Rgba>,
}

impl Palette {
    /// Bake a palette from sorted breakpoints.
    ///
    /// Returns `None` when the breakpoints cover no positive, finite extent.
    pub fn bake(stops: &[ColorStop]) -> Option<Self> {
        let (first, last) = (stops.first()?, stops.last()?);
        let span = last.value - first.value;
        if !(span.is_finite() && span > 0.0) {
            return None;
        }

        let last_index = (PALETTE_SIZE - 1) as f64;
        let entries = (0..PALETTE_SIZE)
            .map(|i| {
                let sample = first.value + span * i as f64 / last_index;
                blend_at(stops, sample)
            })
            .collect();

        Some(Self {
            start: first.value,
            span,
            entries,
        })
    }

    /// Color of the palette entry nearest to `value`, clamped to the ends.
    pub fn apply(&self, value: f64) -> Rgba {
        let last_index = (PALETTE_SIZE - 1) as f64;
        let pos = ((value - self.start) / self.span * last_index).round();
        let index = pos.clamp(0.0, last_index) as usize;
        self.entries[index]
    }

    pub fn entries(&self) -> &[Rgba] {
        &self.entries
    }
}

/// Exact color at `value` by rounded linear blend between bracketing stops.
///
/// A value that hits a stop returns that stop's color. Values outside the
/// stops clamp to the nearest end. `stops` must be sorted and non-empty.
pub(crate) fn blend_at(stops: &[ColorStop], value: f64) -> Rgba {
    let upper = stops.partition_point(|s| s.value <= value);
    if upper == 0 {
        return stops[0].color;
    }
    let low = &stops[upper - 1];
    if low.value == value || upper == stops.len() {
        return low.color;
    }
    let high = &stops[upper];
    let frac = (value - low.value) / (high.value - low.value);
    low.color.blend_rounded(high.color, frac)
}
