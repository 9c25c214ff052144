// crates/iec61850-coder/src/error.rs

use core::fmt;

/// Errors that stop the generation of one function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoderError {
    /// The type mapping has no coder token or printed type for a node.
    UnmappedType { node: String, b_type: String },
    /// An FCDA reference does not point at an existing data object or attribute.
    UnresolvedReference { reference: String, reason: String },
    /// The containment chain of an FCDA is not the six levels
    /// dataset / logical node / logical device / server / access point / IED.
    MalformedContainment { reference: String, depth: usize },
    /// One canonical dataset name was bound to two different dataset shapes.
    DuplicateDatasetName { name: String },
    /// A node of this kind cannot appear in a generated body.
    UnsupportedNodeKind { kind: &'static str, node: String },
    /// Writing generated text failed.
    Formatting(fmt::Error),
}

impl From<fmt::Error> for CoderError {
    fn from(e: fmt::Error) -> Self {
        CoderError::Formatting(e)
    }
}

impl fmt::Display for CoderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnmappedType { node, b_type } => {
                write!(f, "No coder type mapping for '{}' (bType {})", node, b_type)
            }
            Self::UnresolvedReference { reference, reason } => {
                write!(f, "Cannot resolve reference {}: {}", reference, reason)
            }
            Self::MalformedContainment { reference, depth } => write!(
                f,
                "Malformed containment for {}: expected 6 levels up to the IED, found {}",
                reference, depth
            ),
            Self::DuplicateDatasetName { name } => {
                write!(f, "Dataset name '{}' is bound to two different shapes", name)
            }
            Self::UnsupportedNodeKind { kind, node } => {
                write!(f, "Unsupported node kind {} for '{}'", kind, node)
            }
            Self::Formatting(e) => write!(f, "Formatting error: {}", e),
        }
    }
}

impl std::error::Error for CoderError {}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;

    #[test]
    fn test_display_names_the_offender() {
        let err = CoderError::MalformedContainment {
            reference: "C1/XCBR1.Pos.stVal [ST]".into(),
            depth: 3,
        };
        assert_eq!(
            err.to_string(),
            "Malformed containment for C1/XCBR1.Pos.stVal [ST]: expected 6 levels up to the IED, found 3"
        );

        let err = CoderError::UnmappedType {
            node: "mag".into(),
            b_type: "FLOAT128".into(),
        };
        assert_eq!(err.to_string(), "No coder type mapping for 'mag' (bType FLOAT128)");
    }

    #[test]
    fn test_from_fmt_error() {
        struct Failing;
        impl Write for Failing {
            fn write_str(&mut self, _: &str) -> fmt::Result {
                Err(fmt::Error)
            }
        }
        let err: CoderError = write!(Failing, "x").unwrap_err().into();
        assert_eq!(err, CoderError::Formatting(fmt::Error));
    }
}
