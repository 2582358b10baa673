use thiserror::Error;

/// Type alias for results that can return a [`DecodeError`]
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Errors raised while decoding a SoundTouch XML document
///
/// Absent optional elements are not errors; they decode to `None` per the
/// crate-level rules. A `DecodeError` means the document was malformed or
/// missing a part the shape requires.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The document is not well-formed XML
    #[error("malformed XML: {0}")]
    Malformed(#[from] xmltree::ParseError),

    /// A required element is missing
    #[error("missing element <{0}>")]
    MissingElement(&'static str),

    /// A required attribute is missing
    #[error("missing attribute '{attribute}' on <{element}>")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    /// A numeric field is present but does not parse as a number
    #[error("invalid number in '{field}': {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    /// A source string outside the known closed set
    #[error("unknown source: {0:?}")]
    UnknownSource(String),
}
