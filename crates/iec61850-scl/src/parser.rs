// crates/iec61850-scl/src/parser.rs

use crate::error::{SclError, invalid_int};
use crate::model;
use crate::resolver::resolve_scl;
use crate::types::SclFile;
use alloc::string::String;

/// Parses an SCL (SCD, ICD, CID or IID) string slice into an [`SclFile`].
///
/// # Arguments
/// * `xml_content` - A string slice containing the full SCL XML document.
///
/// # Errors
/// Returns an `SclError` if the XML is malformed, if mandatory attributes are
/// missing or invalid, or if the data type templates are inconsistent.
pub fn load_scl_from_str(xml_content: &str) -> Result<SclFile, SclError> {
    // 1. Deserialize the raw XML string into our internal model.
    let scl: model::Scl = quick_xml::de::from_str(xml_content)?;

    // 2. Resolve the raw model into the public types.
    resolve_scl(scl)
}

// --- Helper Functions (Public for use in the resolver) ---

/// Parses an optional decimal attribute, treating absence as `None`.
pub(crate) fn parse_opt_u32(
    attribute: &'static str,
    value: Option<&String>,
) -> Result<Option<u32>, SclError> {
    value
        .map(|v| v.trim().parse::<u32>().map_err(|e| invalid_int(attribute, v, e)))
        .transpose()
}

/// Returns a required, non-empty attribute value.
pub(crate) fn required<'a>(
    element: &'static str,
    attribute: &'static str,
    value: Option<&'a String>,
) -> Result<&'a str, SclError> {
    match value.map(|s| s.as_str()) {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(SclError::MissingAttribute { element, attribute }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_parse_opt_u32() {
        assert_eq!(parse_opt_u32("smpRate", None).unwrap(), None);
        assert_eq!(
            parse_opt_u32("smpRate", Some(&"80".to_string())).unwrap(),
            Some(80)
        );
        assert!(matches!(
            parse_opt_u32("smpRate", Some(&"fast".to_string())),
            Err(SclError::InvalidAttributeFormat {
                attribute: "smpRate",
                ..
            })
        ));
    }

    #[test]
    fn test_required_rejects_empty() {
        let empty = String::new();
        assert!(matches!(
            required("FCDA", "ldInst", Some(&empty)),
            Err(SclError::MissingAttribute {
                element: "FCDA",
                attribute: "ldInst"
            })
        ));
        assert!(required("FCDA", "ldInst", None).is_err());
        let inst = "C1".to_string();
        assert_eq!(required("FCDA", "ldInst", Some(&inst)).unwrap(), "C1");
    }
}
