//! `<ColorMap>` XML reader and writer.

use std::io::BufRead;

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use super::{ColorDoc, ColorScaleDoc, Scalar, ScaleRangeDoc};
use crate::error::{ColorScaleError, Result};
use crate::scale::ColorScale;

const ROOT: &str = "ColorMap";

impl ColorScale {
    /// Parse an XML definition held in memory.
    pub fn from_xml_str(xml: &str) -> Result<Self> {
        Self::from_xml_reader(xml.as_bytes())
    }

    /// Parse an XML definition from a buffered stream.
    pub fn from_xml_reader<R: BufRead>(input: R) -> Result<Self> {
        read_doc(input)?.into_scale()
    }

    /// Serialize every observable field as an indented `<ColorMap>` document.
    pub fn to_xml_string(&self) -> Result<String> {
        write_doc(&ColorScaleDoc::from_scale(self))
    }
}

// ── Reading ──────────────────────────────────────────────────────

/// Accumulates a document while walking reader events.
#[derive(Default)]
struct DocBuilder {
    doc: ColorScaleDoc,
    /// Open elements below the root, innermost last.
    stack: Vec<String>,
    root_open: bool,
    root_seen: bool,
}

impl DocBuilder {
    fn open(&mut self, e: &BytesStart<'_>, empty: bool) -> Result<()> {
        let name = element_name(e);

        if !self.root_open {
            if self.root_seen {
                return Err(ColorScaleError::XmlStructure(format!(
                    "unexpected <{name}> after the root element"
                )));
            }
            if name != ROOT {
                return Err(ColorScaleError::UnexpectedRoot(name));
            }
            self.root_seen = true;
            self.root_open = !empty;
            return Ok(());
        }

        let parent = self.stack.last().cloned();
        match (parent.as_deref(), name.as_str()) {
            (None, "Color") => {
                let stop = ColorDoc {
                    value: attribute(e, "value")?,
                    color: attribute(e, "color")?,
                    opacity: attribute(e, "opacity")?,
                };
                self.doc.colors.push(stop);
            }
            (None, "NullColor") => {
                self.doc.null_color = Some(ColorDoc {
                    value: None,
                    color: attribute(e, "color")?,
                    opacity: attribute(e, "opacity")?,
                });
            }
            (None, "ScaleRange") => {
                self.doc.scale_range = Some(ScaleRangeDoc {
                    min: attribute(e, "min")?,
                    max: attribute(e, "max")?,
                    quantiles: (!empty).then(Vec::new),
                });
            }
            (Some("ScaleRange"), "Quantile") => {
                let value = attribute(e, "value")?.ok_or(ColorScaleError::MissingAttribute {
                    element: "Quantile",
                    attribute: "value",
                })?;
                if let Some(range) = &mut self.doc.scale_range {
                    range.quantiles.get_or_insert_with(Vec::new).push(value);
                }
            }
            (None, field) => match self.text_field(field) {
                Some(slot) => *slot = Some(Scalar::Text(String::new())),
                None => tracing::debug!(element = field, "ignoring unknown color map element"),
            },
            (Some(parent), child) => {
                tracing::debug!(parent, element = child, "ignoring nested color map element");
            }
        }

        if !empty {
            self.stack.push(name);
        }
        Ok(())
    }

    fn close(&mut self) {
        if self.stack.pop().is_none() {
            self.root_open = false;
        }
    }

    fn text(&mut self, text: &str) {
        let [field] = self.stack.as_slice() else {
            return;
        };
        let field = field.clone();
        if let Some(Some(Scalar::Text(slot))) = self.text_field(&field) {
            slot.push_str(text);
        }
    }

    /// Slot for a text-valued child of the root.
    fn text_field(&mut self, name: &str) -> Option<&mut Option<Scalar>> {
        match name {
            "Scaling" => Some(&mut self.doc.scaling),
            "Interpolate" => Some(&mut self.doc.interpolate),
            "ForceValuesIntoRange" => Some(&mut self.doc.force_values_into_range),
            "TransparentValue" => Some(&mut self.doc.transparent_value),
            _ => None,
        }
    }

    fn finish(self) -> Result<ColorScaleDoc> {
        if !self.root_seen {
            return Err(ColorScaleError::XmlStructure(format!(
                "document has no <{ROOT}> element"
            )));
        }
        if self.root_open {
            return Err(ColorScaleError::XmlStructure(format!(
                "<{ROOT}> is not closed"
            )));
        }
        Ok(self.doc)
    }
}

fn read_doc<R: BufRead>(input: R) -> Result<ColorScaleDoc> {
    let mut reader = Reader::from_reader(input);
    reader.config_mut().trim_text(true);

    let mut builder = DocBuilder::default();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => builder.open(&e, false)?,
            Event::Empty(e) => builder.open(&e, true)?,
            Event::End(_) => builder.close(),
            Event::Text(t) => builder.text(&t.unescape()?),
            Event::CData(c) => builder.text(&String::from_utf8_lossy(&c)),
            Event::Eof => break,
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
        }
        buf.clear();
    }
    builder.finish()
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

/// The unescaped value of attribute `key`, if present.
fn attribute(e: &BytesStart<'_>, key: &str) -> Result<Option<Scalar>> {
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.local_name().as_ref() == key.as_bytes() {
            let value = attr.unescape_value()?;
            return Ok(Some(Scalar::Text(value.into_owned())));
        }
    }
    Ok(None)
}

// ── Writing ──────────────────────────────────────────────────────

fn write_doc(doc: &ColorScaleDoc) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new(ROOT)))?;

    let text_fields = [
        ("Scaling", &doc.scaling),
        ("Interpolate", &doc.interpolate),
        ("ForceValuesIntoRange", &doc.force_values_into_range),
        ("TransparentValue", &doc.transparent_value),
    ];
    for (name, field) in text_fields {
        if let Some(value) = field {
            writer.write_event(Event::Start(BytesStart::new(name)))?;
            writer.write_event(Event::Text(BytesText::new(&value.text())))?;
            writer.write_event(Event::End(BytesEnd::new(name)))?;
        }
    }

    if let Some(null) = &doc.null_color {
        writer.write_event(Event::Empty(color_element("NullColor", null)))?;
    }
    for stop in &doc.colors {
        writer.write_event(Event::Empty(color_element("Color", stop)))?;
    }

    if let Some(range) = &doc.scale_range {
        let mut start = BytesStart::new("ScaleRange");
        push_scalar(&mut start, "min", range.min.as_ref());
        push_scalar(&mut start, "max", range.max.as_ref());
        match &range.quantiles {
            None => writer.write_event(Event::Empty(start))?,
            Some(quantiles) => {
                writer.write_event(Event::Start(start))?;
                for q in quantiles {
                    let mut cut = BytesStart::new("Quantile");
                    push_scalar(&mut cut, "value", Some(q));
                    writer.write_event(Event::Empty(cut))?;
                }
                writer.write_event(Event::End(BytesEnd::new("ScaleRange")))?;
            }
        }
    }

    writer.write_event(Event::End(BytesEnd::new(ROOT)))?;
    String::from_utf8(writer.into_inner())
        .map_err(|e| ColorScaleError::XmlStructure(e.to_string()))
}

fn color_element<'a>(name: &'a str, doc: &ColorDoc) -> BytesStart<'a> {
    let mut element = BytesStart::new(name);
    push_scalar(&mut element, "value", doc.value.as_ref());
    push_scalar(&mut element, "color", doc.color.as_ref());
    push_scalar(&mut element, "opacity", doc.opacity.as_ref());
    element
}

fn push_scalar(element: &mut BytesStart<'_>, key: &str, value: Option<&Scalar>) {
    if let Some(value) = value {
        element.push_attribute((key, value.text().as_ref()));
    }
}
