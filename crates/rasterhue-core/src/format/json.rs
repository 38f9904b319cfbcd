//! JSON definitions, field-for-field equivalent to the XML form.

use super::ColorScaleDoc;
use crate::error::Result;
use crate::scale::ColorScale;

impl ColorScale {
    /// Parse a JSON definition.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let doc: ColorScaleDoc = serde_json::from_str(json)?;
        doc.into_scale()
    }

    /// Serialize every observable field as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&ColorScaleDoc::from_scale(self))?)
    }
}
