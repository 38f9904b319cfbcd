//! Scale-range resolution and per-value classification.
//!
//! Resolution turns the stored stops plus a [`Projection`] into the
//! *effective* breakpoints that values are classified against. Every mode
//! produces the same shape, so classification never branches on the mode.
//!
//! # Quantile projection
//! With `S = stops − 1` ramp segments and `N = cuts − 1` cut segments, the
//! denser side is anchored onto the sparser one by floor division:
//!
//! ```text
//! S <= N:  stop i  → cut   floor(i × N / S)   cuts in between get blended colors
//! S >  N:  cut j   → stop  floor(j × S / N)   stops in between are spread by value
//! ```

use crate::color::Rgba;
use crate::palette::Palette;
use crate::scaling::Projection;
use crate::stops::ColorStop;

/// Breakpoints actually used for classification, plus the baked palette when
/// the ramp is evenly stretched and interpolated.
#[derive(Debug, Clone)]
pub(crate) struct EffectiveTable {
    stops: Vec<ColorStop>,
    palette: Option<Palette>,
}

impl EffectiveTable {
    pub(crate) fn resolve(stops: &[ColorStop], projection: &Projection, interpolate: bool) -> Self {
        let (stops, uniform) = match projection {
            Projection::Identity => (stops.to_vec(), true),
            Projection::Linear { min, max } => (stretch_linear(stops, *min, *max), true),
            Projection::Quantile { cuts } => (project_quantiles(stops, cuts), false),
        };
        let palette = if interpolate && uniform {
            Palette::bake(&stops)
        } else {
            None
        };
        tracing::trace!(
            stops = stops.len(),
            baked = palette.is_some(),
            "resolved effective breakpoints"
        );
        Self { stops, palette }
    }

    pub(crate) fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Classify `value`. Returns `None` only when there are no breakpoints.
    pub(crate) fn classify(&self, value: f64, interpolate: bool, force_into_range: bool) -> Option<Rgba> {
        let first = self.stops.first()?;
        let last = self.stops.last()?;
        let clamp_or_clear = |stop: &ColorStop| {
            if force_into_range {
                stop.color
            } else {
                Rgba::TRANSPARENT
            }
        };

        // NaN compares false everywhere; classify it with the values below range.
        if value.is_nan() || value < first.value {
            return Some(clamp_or_clear(first));
        }
        if value > last.value {
            return Some(clamp_or_clear(last));
        }

        let upper = self.stops.partition_point(|s| s.value <= value);
        let Some(low) = upper.checked_sub(1).map(|i| &self.stops[i]) else {
            return Some(clamp_or_clear(first));
        };
        if low.value == value || !interpolate {
            return Some(low.color);
        }
        let Some(high) = self.stops.get(upper) else {
            return Some(low.color);
        };

        Some(match &self.palette {
            Some(palette) => palette.apply(value),
            None => {
                let frac = (value - low.value) / (high.value - low.value);
                low.color.blend_rounded(high.color, frac)
            }
        })
    }
}

/// Remap stops from their own extent onto `[min, max]`.
///
/// ```text
/// v' = min + (v − first) × (max − min) / (last − first)
/// ```
fn stretch_linear(stops: &[ColorStop], min: f64, max: f64) -> Vec<ColorStop> {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return Vec::new();
    };
    let ref_span = last.value - first.value;
    if !(ref_span.is_finite() && ref_span > 0.0) {
        return stops.iter().map(|s| ColorStop::new(min, s.color)).collect();
    }

    let span = max - min;
    let end = stops.len() - 1;
    stops
        .iter()
        .enumerate()
        .map(|(i, s)| {
            // Pin the ends so rounding never pushes `max` out of range.
            let value = match i {
                0 => min,
                i if i == end => max,
                _ => (min + (s.value - first.value) * span / ref_span).min(max),
            };
            ColorStop::new(value, s.color)
        })
        .collect()
}

/// Anchor stops onto sorted cut points `[min, q1, …, qn, max]`.
fn project_quantiles(stops: &[ColorStop], cuts: &[f64]) -> Vec<ColorStop> {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return Vec::new();
    };
    let (Some(&min), Some(&max)) = (cuts.first(), cuts.last()) else {
        return stops.to_vec();
    };
    if stops.len() == 1 {
        return vec![ColorStop::new(min, first.color)];
    }

    let segments = stops.len() - 1;
    let cut_segments = cuts.len() - 1;
    let mut out = Vec::with_capacity(segments.max(cut_segments) + 1);

    if segments <= cut_segments {
        for (i, pair) in stops.windows(2).enumerate() {
            let from = i * cut_segments / segments;
            let to = (i + 1) * cut_segments / segments;
            for j in from..to {
                let frac = (j - from) as f64 / (to - from) as f64;
                let color = pair[0].color.blend_truncated(pair[1].color, frac);
                out.push(ColorStop::new(cuts[j], color));
            }
        }
    } else {
        for (j, bounds) in cuts.windows(2).enumerate() {
            let from = j * segments / cut_segments;
            let to = (j + 1) * segments / cut_segments;
            for (k, stop) in stops.iter().enumerate().take(to).skip(from) {
                let frac = (k - from) as f64 / (to - from) as f64;
                let value = (bounds[0] + frac * (bounds[1] - bounds[0])).min(bounds[1]);
                out.push(ColorStop::new(value, stop.color));
            }
        }
    }

    out.push(ColorStop::new(max, last.color));
    out
}
