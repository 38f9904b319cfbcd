//! `ColorScale` — value-to-color classification for raster rendering.
//!
//! A scale owns a breakpoint table, a [`Scaling`] mode, the interpolation and
//! clamping policy, an optional transparent sentinel and the domain
//! statistics last applied with [`ColorScale::set_scale_range`] or
//! [`ColorScale::set_scale_range_with_quantiles`].
//!
//! The effective breakpoints are resolved lazily on the first lookup after a
//! change and cached, so a fully configured scale can be shared by reference
//! across rendering threads.

use std::sync::OnceLock;

use crate::color::Rgba;
use crate::resolve::EffectiveTable;
use crate::scaling::{ScaleRange, Scaling};
use crate::stops::{Breakpoints, ColorStop};

/// A color ramp plus the policy for classifying raw values against it.
#[derive(Debug, Clone)]
pub struct ColorScale {
    stops: Breakpoints,
    scaling: Scaling,
    interpolate: bool,
    force_values_into_range: bool,
    /// Raw value that always renders transparent. Never NaN.
    transparent_value: Option<f64>,
    /// Color for pixels the caller has flagged as NoData.
    null_color: Rgba,
    range: Option<ScaleRange>,
    resolved: OnceLock<EffectiveTable>,
}

impl Default for ColorScale {
    fn default() -> Self {
        Self::empty()
    }
}

impl ColorScale {
    /// An empty Absolute scale: interpolating, not clamping, no transparent value.
    pub fn empty() -> Self {
        Self {
            stops: Breakpoints::new(),
            scaling: Scaling::Absolute,
            interpolate: true,
            force_values_into_range: false,
            transparent_value: None,
            null_color: Rgba::TRANSPARENT,
            range: None,
            resolved: OnceLock::new(),
        }
    }

    // ── Breakpoints ──────────────────────────────────────────────

    /// Insert a stop, replacing any stop already at `value`.
    pub fn put(&mut self, value: f64, color: Rgba) {
        self.stops.put(value, color);
        self.invalidate();
    }

    /// Insert an opaque stop.
    pub fn put_rgb(&mut self, value: f64, r: u8, g: u8, b: u8) {
        self.put(value, Rgba::rgb(r, g, b));
    }

    pub fn put_rgba(&mut self, value: f64, r: u8, g: u8, b: u8, a: u8) {
        self.put(value, Rgba::new(r, g, b, a));
    }

    /// Remove every stop and drop the applied range. Resets scaling to Absolute;
    /// interpolation, clamping, transparent value and null color are kept.
    pub fn clear(&mut self) {
        self.stops.clear();
        self.scaling = Scaling::Absolute;
        self.range = None;
        self.invalidate();
    }

    /// Number of stops.
    pub fn size(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// The stops as defined, before any scaling is applied.
    pub fn stops(&self) -> &Breakpoints {
        &self.stops
    }

    // ── Policy flags ─────────────────────────────────────────────

    pub fn scaling(&self) -> Scaling {
        self.scaling
    }

    pub fn set_scaling(&mut self, scaling: Scaling) {
        self.scaling = scaling;
        self.invalidate();
    }

    pub fn interpolate(&self) -> bool {
        self.interpolate
    }

    pub fn set_interpolate(&mut self, interpolate: bool) {
        self.interpolate = interpolate;
        self.invalidate();
    }

    pub fn force_values_into_range(&self) -> bool {
        self.force_values_into_range
    }

    /// Clamp out-of-range values to the end stops instead of rendering them
    /// transparent.
    pub fn set_force_values_into_range(&mut self, force: bool) {
        self.force_values_into_range = force;
    }

    pub fn transparent_value(&self) -> Option<f64> {
        self.transparent_value
    }

    /// Set the raw value that always renders transparent. NaN clears it.
    pub fn set_transparent_value(&mut self, value: f64) {
        self.transparent_value = (!value.is_nan()).then_some(value);
    }

    pub fn clear_transparent_value(&mut self) {
        self.transparent_value = None;
    }

    pub fn null_color(&self) -> Rgba {
        self.null_color
    }

    pub fn set_null_color(&mut self, color: Rgba) {
        self.null_color = color;
    }

    // ── Domain statistics ────────────────────────────────────────

    /// Apply the data's `[min, max]`. Used by MinMax scaling.
    pub fn set_scale_range(&mut self, min: f64, max: f64) {
        self.range = Some(ScaleRange::new(min, max, None));
        self.invalidate();
    }

    /// Apply the data's `[min, max]` and quantile cut points. Used by Quantile
    /// scaling; absent or empty quantiles stretch the ramp like MinMax.
    pub fn set_scale_range_with_quantiles(&mut self, min: f64, max: f64, quantiles: Option<&[f64]>) {
        self.range = Some(ScaleRange::new(min, max, quantiles.map(<[f64]>::to_vec)));
        self.invalidate();
    }

    pub fn scale_range(&self) -> Option<&ScaleRange> {
        self.range.as_ref()
    }

    pub fn min(&self) -> Option<f64> {
        self.range.as_ref().map(|r| r.min)
    }

    pub fn max(&self) -> Option<f64> {
        self.range.as_ref().map(|r| r.max)
    }

    pub fn quantiles(&self) -> Option<&[f64]> {
        self.range.as_ref().and_then(|r| r.quantiles.as_deref())
    }

    // ── Classification ───────────────────────────────────────────

    /// Classify a raw value.
    ///
    /// 1. The transparent value (bit-for-bit) is always `(0, 0, 0, 0)`.
    /// 2. Below/above the effective stops: the end stop's color when forcing
    ///    values into range, otherwise transparent. NaN counts as below.
    /// 3. A value on a stop returns that stop's color.
    /// 4. Between stops: the lower stop's color, or a linear blend when
    ///    interpolating.
    ///
    /// Returns `None` when the scale has no stops; callers treat that as NoData.
    pub fn lookup(&self, value: f64) -> Option<Rgba> {
        if self.is_transparent(value) {
            return Some(Rgba::TRANSPARENT);
        }
        self.effective()
            .classify(value, self.interpolate, self.force_values_into_range)
    }

    /// Breakpoints after scaling has been applied.
    pub fn effective_stops(&self) -> &[ColorStop] {
        self.effective().stops()
    }

    fn is_transparent(&self, value: f64) -> bool {
        self.transparent_value
            .is_some_and(|t| t.to_bits() == value.to_bits())
    }

    fn effective(&self) -> &EffectiveTable {
        self.resolved.get_or_init(|| {
            let projection = ScaleRange::projection(self.range.as_ref(), self.scaling);
            EffectiveTable::resolve(self.stops.as_slice(), &projection, self.interpolate)
        })
    }

    fn invalidate(&mut self) {
        self.resolved.take();
    }
}

impl PartialEq for ColorScale {
    fn eq(&self, other: &Self) -> bool {
        self.scaling == other.scaling
            && self.interpolate == other.interpolate
            && self.force_values_into_range == other.force_values_into_range
            && self.transparent_value.map(f64::to_bits) == other.transparent_value.map(f64::to_bits)
            && self.null_color == other.null_color
            && self.stops == other.stops
            && self.range == other.range
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five_stop_scale() -> ColorScale {
        let mut cs = ColorScale::empty();
        cs.set_transparent_value(-1.0);
        cs.put_rgba(0.0, 255, 0, 0, 0);
        cs.put_rgb(25.0, 172, 0, 64);
        cs.put_rgb(50.0, 128, 0, 128);
        cs.put_rgb(75.0, 64, 0, 172);
        cs.put_rgb(100.0, 0, 0, 255);
        cs
    }

    #[test]
    fn test_empty_scale_defaults() {
        let cs = ColorScale::empty();
        assert_eq!(cs.scaling(), Scaling::Absolute);
        assert!(cs.interpolate());
        assert!(!cs.force_values_into_range());
        assert_eq!(cs.transparent_value(), None);
        assert_eq!(cs.null_color(), Rgba::TRANSPARENT);
        assert_eq!(cs.min(), None);
        assert_eq!(cs.max(), None);
        assert_eq!(cs.size(), 0);
    }

    #[test]
    fn test_lookup_on_empty_scale_is_undefined() {
        let cs = ColorScale::empty();
        assert_eq!(cs.lookup(1.0), None);
    }

    #[test]
    fn test_transparent_value_wins_even_when_empty() {
        let mut cs = ColorScale::empty();
        cs.set_transparent_value(7.0);
        assert_eq!(cs.lookup(7.0), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_transparent_value_is_bitwise() {
        let mut cs = five_stop_scale();
        cs.set_force_values_into_range(true);
        cs.set_transparent_value(0.0);
        assert_eq!(cs.lookup(0.0), Some(Rgba::TRANSPARENT));
        // -0.0 is a different bit pattern, so it classifies normally.
        assert_eq!(cs.lookup(-0.0), Some(Rgba::new(255, 0, 0, 0)));
    }

    #[test]
    fn test_nan_transparent_value_clears_sentinel() {
        let mut cs = five_stop_scale();
        cs.set_transparent_value(f64::NAN);
        assert_eq!(cs.transparent_value(), None);
    }

    #[test]
    fn test_no_interpolate_floors_between_stops() {
        let mut cs = five_stop_scale();
        cs.set_interpolate(false);
        assert_eq!(cs.lookup(24.0), Some(Rgba::new(255, 0, 0, 0)));
        assert_eq!(cs.lookup(60.0), Some(Rgba::rgb(128, 0, 128)));
        assert_eq!(cs.lookup(-10.0), Some(Rgba::TRANSPARENT));
        assert_eq!(cs.lookup(110.0), Some(Rgba::TRANSPARENT));
        assert_eq!(cs.lookup(-1.0), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_force_into_range_returns_end_colors_unmodified() {
        let mut cs = five_stop_scale();
        cs.set_interpolate(false);
        cs.set_force_values_into_range(true);
        assert_eq!(cs.lookup(-10.0), Some(Rgba::new(255, 0, 0, 0)));
        assert_eq!(cs.lookup(110.0), Some(Rgba::rgb(0, 0, 255)));
    }

    #[test]
    fn test_exact_stop_ignores_interpolate_flag() {
        let mut cs = five_stop_scale();
        for interpolate in [true, false] {
            cs.set_interpolate(interpolate);
            for stop in cs.stops() {
                assert_eq!(cs.lookup(stop.value), Some(stop.color));
            }
        }
    }

    #[test]
    fn test_changing_flags_re_resolves() {
        let mut cs = five_stop_scale();
        cs.set_interpolate(false);
        assert_eq!(cs.lookup(37.5), Some(Rgba::rgb(172, 0, 64)));
        cs.set_interpolate(true);
        assert_ne!(cs.lookup(37.5), Some(Rgba::rgb(172, 0, 64)));
        cs.put_rgb(37.5, 1, 2, 3);
        assert_eq!(cs.lookup(37.5), Some(Rgba::rgb(1, 2, 3)));
    }

    #[test]
    fn test_minmax_range_can_precede_scaling() {
        let mut cs = ColorScale::empty();
        cs.put_rgb(0.0, 0, 0, 0);
        cs.put_rgb(1.0, 255, 255, 255);
        cs.set_scale_range(-10.0, 10.0);
        cs.set_scaling(Scaling::MinMax);
        assert_eq!(cs.lookup(-10.0), Some(Rgba::rgb(0, 0, 0)));
        assert_eq!(cs.lookup(10.0), Some(Rgba::rgb(255, 255, 255)));
        let values: Vec<f64> = cs.effective_stops().iter().map(|s| s.value).collect();
        assert_eq!(values, vec![-10.0, 10.0]);
    }

    #[test]
    fn test_absolute_ignores_applied_range() {
        let mut cs = five_stop_scale();
        cs.set_scale_range(1000.0, 2000.0);
        assert_eq!(cs.lookup(50.0), Some(Rgba::rgb(128, 0, 128)));
        assert_eq!(cs.min(), Some(1000.0));
        assert_eq!(cs.max(), Some(2000.0));
    }

    #[test]
    fn test_clear_resets_scaling_and_range_only() {
        let mut cs = five_stop_scale();
        cs.set_scaling(Scaling::MinMax);
        cs.set_interpolate(false);
        cs.set_scale_range(0.0, 1.0);
        cs.clear();
        assert_eq!(cs.size(), 0);
        assert_eq!(cs.scaling(), Scaling::Absolute);
        assert_eq!(cs.min(), None);
        assert!(!cs.interpolate());
        assert_eq!(cs.transparent_value(), Some(-1.0));
    }

    #[test]
    fn test_equality_includes_scale_range() {
        let a = five_stop_scale();
        let mut b = five_stop_scale();
        assert_eq!(a, b);
        b.set_scale_range(0.0, 1000.0);
        assert_ne!(a, b);
        let mut c = a.clone();
        c.set_scale_range(0.0, 500.0);
        b.set_scale_range(0.0, 500.0);
        assert_eq!(b, c);
    }

    #[test]
    fn test_equality_ignores_resolution_cache() {
        let a = five_stop_scale();
        let b = five_stop_scale();
        let _ = a.lookup(10.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_equality_distinguishes_flags() {
        let a = five_stop_scale();
        let mut b = five_stop_scale();
        b.set_null_color(Rgba::rgb(1, 1, 1));
        assert_ne!(a, b);
        let mut c = five_stop_scale();
        c.clear_transparent_value();
        assert_ne!(a, c);
    }

    #[test]
    fn test_scale_is_shareable_across_threads() {
        fn assert_sync<T: Send + Sync>() {}
        assert_sync::<ColorScale>();

        let cs = five_stop_scale();
        let expected: Vec<_> = (0..=100).map(|v| cs.lookup(f64::from(v))).collect();
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    let got: Vec<_> = (0..=100).map(|v| cs.lookup(f64::from(v))).collect();
                    assert_eq!(got, expected);
                });
            }
        });
    }
}
