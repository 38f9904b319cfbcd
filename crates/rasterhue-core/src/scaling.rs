//! Scaling modes and the domain statistics they are resolved against.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ColorScaleError;

/// How stop values relate to raw pixel values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scaling {
    /// Stop values are raw pixel values.
    #[default]
    Absolute,
    /// Stops are stretched linearly across the data's `[min, max]`.
    MinMax,
    /// Stops are spread across the data's quantile cut points.
    Quantile,
}

impl Scaling {
    /// Name as written in XML and JSON definitions.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Absolute => "Absolute",
            Self::MinMax => "MinMax",
            Self::Quantile => "Quantile",
        }
    }

    pub fn all() -> &'static [Self] {
        const ALL: [Scaling; 3] = [Scaling::Absolute, Scaling::MinMax, Scaling::Quantile];
        &ALL
    }
}

impl fmt::Display for Scaling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scaling {
    type Err = ColorScaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ColorScaleError::UnknownScaling(s.to_string()))
    }
}

/// Domain statistics applied with `set_scale_range*`.
///
/// This is observable state: two scales that differ only in their range are
/// not equal.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleRange {
    pub min: f64,
    pub max: f64,
    /// Quantile cut points exactly as supplied. `None` for a plain min/max range.
    pub quantiles: Option<Vec<f64>>,
}

impl ScaleRange {
    /// Build a range, swapping the bounds if they arrive reversed.
    pub fn new(min: f64, max: f64, quantiles: Option<Vec<f64>>) -> Self {
        let (min, max) = if min > max {
            tracing::warn!("scale range given as [{min}, {max}], storing it swapped");
            (max, min)
        } else {
            (min, max)
        };
        Self {
            min,
            max,
            quantiles,
        }
    }

    /// Select the projection that places the stops for `scaling`.
    pub(crate) fn projection(range: Option<&Self>, scaling: Scaling) -> Projection {
        let Some(range) = range else {
            return Projection::Identity;
        };
        let (min, max) = (range.min, range.max);
        match scaling {
            Scaling::Absolute => Projection::Identity,
            Scaling::MinMax => Projection::Linear { min, max },
            Scaling::Quantile => match range.quantiles.as_deref() {
                None | Some([]) => Projection::Linear { min, max },
                Some(quantiles) => {
                    // Cut points outside the range are pinned to its ends.
                    let mut cuts = Vec::with_capacity(quantiles.len() + 2);
                    cuts.push(min);
                    cuts.extend(quantiles.iter().map(|q| q.max(min).min(max)));
                    cuts[1..].sort_by(f64::total_cmp);
                    cuts.push(max);
                    Projection::Quantile { cuts }
                }
            },
        }
    }
}

/// Mode-specific placement of stops, carrying only what that placement needs.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Projection {
    /// Stops are used verbatim.
    Identity,
    /// Stops are remapped from their own extent onto `[min, max]`.
    Linear { min: f64, max: f64 },
    /// Stops are anchored to `[min, q1, …, qn, max]`.
    Quantile { cuts: Vec<f64> },
}
