//! Error type shared by parsing, serialization and the scale library.

/// Errors produced while building, loading or writing a color scale.
#[derive(Debug, thiserror::Error)]
pub enum ColorScaleError {
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed XML: {0}")]
    XmlStructure(String),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown scaling mode {0:?}, expected Absolute, MinMax or Quantile")]
    UnknownScaling(String),

    #[error("invalid color {0:?}, expected \"r,g,b\" with components in 0..=255")]
    InvalidColor(String),

    #[error("invalid opacity {0:?}, expected an integer in 0..=255")]
    InvalidOpacity(String),

    #[error("invalid number {0:?}")]
    InvalidNumber(String),

    #[error("<{element}> is missing required attribute `{attribute}`")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("unexpected root element <{0}>, expected <ColorMap>")]
    UnexpectedRoot(String),

    #[error("invalid color scale name {0:?}")]
    InvalidName(String),

    #[error("color scale {0:?} not found")]
    NotFound(String),
}

pub type Result<T, E = ColorScaleError> = std::result::Result<T, E>;
