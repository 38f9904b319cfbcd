//! Textual color scale definitions (XML and JSON).
//!
//! Both formats are decoded into the same [`ColorScaleDoc`] before a
//! [`ColorScale`] is built, so field defaults and the "present but empty means
//! default" rule live in one place ([`ColorScaleDoc::into_scale`]).
//!
//! ```text
//! <ColorMap name="Rainbow">                 {
//!   <Scaling>MinMax</Scaling>                 "Scaling": "MinMax",
//!   <Interpolate>1</Interpolate>              "Interpolate": "1",
//!   <ForceValuesIntoRange/>                   "ForceValuesIntoRange": "",
//!   <NullColor color="0,0,0" opacity="0"/>    "NullColor": {"color": "0,0,0", "opacity": "0"},
//!   <Color value="0.0" color="0,0,127"/>      "Colors": [{"value": "0.0", "color": "0,0,127"}]
//! </ColorMap>                               }
//! ```

mod json;
mod xml;

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::color::{Rgba, parse_color};
use crate::error::{ColorScaleError, Result};
use crate::scale::ColorScale;
use crate::scaling::Scaling;

/// Format-neutral view of a definition, as read from or written to text.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ColorScaleDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaling: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpolate: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_values_into_range: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transparent_value: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub null_color: Option<ColorDoc>,
    #[serde(default)]
    pub colors: Vec<ColorDoc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_range: Option<ScaleRangeDoc>,
}

/// A `<Color>`/`<NullColor>` element or a `Colors[]` entry.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub(crate) struct ColorDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<Scalar>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub(crate) struct ScaleRangeDoc {
    #[serde(default)]
    pub min: Option<Scalar>,
    #[serde(default)]
    pub max: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantiles: Option<Vec<Scalar>>,
}

/// A leaf value. Definitions in the wild quote everything, but bare JSON
/// numbers and booleans are accepted too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum Scalar {
    Text(String),
    Number(f64),
    Flag(bool),
}

impl Scalar {
    pub(crate) fn number(value: f64) -> Self {
        Self::Text(value.to_string())
    }

    pub(crate) fn text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) => Cow::Borrowed(s.trim()),
            Self::Number(n) => Cow::Owned(n.to_string()),
            Self::Flag(b) => Cow::Owned(b.to_string()),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// The field's text, or `None` when it is absent or blank.
fn non_empty(field: Option<&Scalar>) -> Option<Cow<'_, str>> {
    field.map(Scalar::text).filter(|text| !text.is_empty())
}

/// `"1"` and `"true"` (any case) are true; every other value is false.
fn parse_flag(text: &str) -> bool {
    text == "1" || text.eq_ignore_ascii_case("true")
}

fn parse_number(text: &str) -> Result<f64> {
    text.trim()
        .parse()
        .map_err(|_| ColorScaleError::InvalidNumber(text.to_string()))
}

fn required<'a>(
    field: Option<&'a Scalar>,
    element: &'static str,
    attribute: &'static str,
) -> Result<Cow<'a, str>> {
    non_empty(field).ok_or(ColorScaleError::MissingAttribute { element, attribute })
}

impl ColorDoc {
    fn from_color(value: Option<f64>, color: Rgba) -> Self {
        Self {
            value: value.map(Scalar::number),
            color: Some(Scalar::Text(color.rgb_attr())),
            opacity: Some(Scalar::Text(color.a.to_string())),
        }
    }

    fn rgba(&self, element: &'static str) -> Result<Rgba> {
        let rgb = required(self.color.as_ref(), element, "color")?;
        let opacity = self.opacity.as_ref().map(Scalar::text);
        parse_color(&rgb, opacity.as_deref())
    }
}

impl ColorScaleDoc {
    /// Build a scale, applying defaults for absent or blank fields.
    ///
    /// Any invalid field fails the whole document.
    pub(crate) fn into_scale(self) -> Result<ColorScale> {
        let mut scale = ColorScale::empty();

        if let Some(mode) = non_empty(self.scaling.as_ref()) {
            scale.set_scaling(mode.parse::<Scaling>()?);
        }
        if let Some(text) = non_empty(self.interpolate.as_ref()) {
            scale.set_interpolate(parse_flag(&text));
        }
        if let Some(text) = non_empty(self.force_values_into_range.as_ref()) {
            scale.set_force_values_into_range(parse_flag(&text));
        }
        if let Some(text) = non_empty(self.transparent_value.as_ref()) {
            scale.set_transparent_value(parse_number(&text)?);
        }
        if let Some(null) = &self.null_color {
            scale.set_null_color(null.rgba("NullColor")?);
        }

        for stop in &self.colors {
            let value = parse_number(&required(stop.value.as_ref(), "Color", "value")?)?;
            scale.put(value, stop.rgba("Color")?);
        }

        if let Some(range) = &self.scale_range {
            let min = parse_number(&required(range.min.as_ref(), "ScaleRange", "min")?)?;
            let max = parse_number(&required(range.max.as_ref(), "ScaleRange", "max")?)?;
            match &range.quantiles {
                None => scale.set_scale_range(min, max),
                Some(quantiles) => {
                    let cuts = quantiles
                        .iter()
                        .map(|q| parse_number(&q.text()))
                        .collect::<Result<Vec<_>>>()?;
                    scale.set_scale_range_with_quantiles(min, max, Some(&cuts));
                }
            }
        }

        Ok(scale)
    }

    /// Describe every observable field of `scale`.
    pub(crate) fn from_scale(scale: &ColorScale) -> Self {
        Self {
            scaling: Some(scale.scaling().name().into()),
            interpolate: Some(Scalar::Text(scale.interpolate().to_string())),
            force_values_into_range: Some(Scalar::Text(scale.force_values_into_range().to_string())),
            transparent_value: scale.transparent_value().map(Scalar::number),
            null_color: Some(ColorDoc::from_color(None, scale.null_color())),
            colors: scale
                .stops()
                .iter()
                .map(|stop| ColorDoc::from_color(Some(stop.value), stop.color))
                .collect(),
            scale_range: scale.scale_range().map(|range| ScaleRangeDoc {
                min: Some(Scalar::number(range.min)),
                max: Some(Scalar::number(range.max)),
                quantiles: range
                    .quantiles
                    .as_ref()
                    .map(|q| q.iter().copied().map(Scalar::number).collect()),
            }),
        }
    }
}
