// crates/iec61850-scl/src/error.rs

use alloc::fmt;
use alloc::string::String;
use core::num::ParseIntError;
use quick_xml::errors::serialize::DeError;

/// Errors that can occur while loading an SCL file.
#[derive(Debug)]
pub enum SclError {
    /// An error from the underlying `quick-xml` deserializer.
    XmlParsing(DeError),

    /// A required XML element was missing.
    MissingElement { element: &'static str },

    /// A required attribute was missing or empty (e.g., `FCDA@ldInst`).
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    /// An attribute had an invalid format (e.g., `EnumVal@ord` is not a number).
    InvalidAttributeFormat {
        attribute: &'static str,
        value: String,
        cause: ParseIntError,
    },

    /// A template id was declared twice within the same template kind.
    DuplicateTemplate { kind: &'static str, id: String },
}

impl From<DeError> for SclError {
    fn from(e: DeError) -> Self {
        SclError::XmlParsing(e)
    }
}

impl fmt::Display for SclError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SclError::XmlParsing(e) => write!(f, "XML parsing error: {}", e),
            SclError::MissingElement { element } => {
                write!(f, "Missing required XML element: {}", element)
            }
            SclError::MissingAttribute { element, attribute } => {
                write!(f, "Missing required attribute: {}@{}", element, attribute)
            }
            SclError::InvalidAttributeFormat {
                attribute,
                value,
                cause,
            } => write!(
                f,
                "Invalid format for attribute {}: '{}' ({})",
                attribute, value, cause
            ),
            SclError::DuplicateTemplate { kind, id } => {
                write!(f, "Duplicate {} id '{}' in DataTypeTemplates", kind, id)
            }
        }
    }
}

impl core::error::Error for SclError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            SclError::InvalidAttributeFormat { cause, .. } => Some(cause),
            _ => None,
        }
    }
}

/// Builds an [`SclError::InvalidAttributeFormat`] from a failed integer parse.
pub(crate) fn invalid_int(attribute: &'static str, value: &str, cause: ParseIntError) -> SclError {
    SclError::InvalidAttributeFormat {
        attribute,
        value: value.into(),
        cause,
    }
}
