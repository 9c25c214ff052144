//! Integration tests focused on error handling and edge cases.
//!
//! These tests ensure the loader reports malformed XML, missing mandatory
//! elements and invalid attributes as errors without panicking.

use iec61850_scl::{BasicType, SclError, load_scl_from_str};

/// Wraps a logical device body and a templates body into a minimal SCL document.
fn scl_doc(ld_body: &str, templates: Option<&str>) -> String {
    let templates = templates
        .map(|t| format!("<DataTypeTemplates>{}</DataTypeTemplates>", t))
        .unwrap_or_default();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<SCL xmlns="http://www.iec.ch/61850/2003/SCL" version="2007" revision="B">
  <Header id="Test"/>
  <IED name="IED1">
    <AccessPoint name="AP1">
      <Server>
        <LDevice inst="C1">{}</LDevice>
      </Server>
    </AccessPoint>
  </IED>
  {}
</SCL>"#,
        ld_body, templates
    )
}

const LN0: &str = r#"<LN0 lnClass="LLN0" inst="" lnType="LLN0_T"/>"#;
const LLN0_TYPE: &str = r#"<LNodeType id="LLN0_T" lnClass="LLN0"/>"#;

#[test]
fn test_malformed_xml() {
    let result = load_scl_from_str("<SCL><IED name=\"x\"></SCL>");
    assert!(matches!(result, Err(SclError::XmlParsing(_))));
}

#[test]
fn test_missing_templates_with_logical_nodes() {
    let result = load_scl_from_str(&scl_doc(LN0, None));
    assert!(matches!(
        result,
        Err(SclError::MissingElement {
            element: "DataTypeTemplates"
        })
    ));
}

#[test]
fn test_empty_logical_device_needs_no_templates() {
    let scl = load_scl_from_str(&scl_doc("", None)).expect("should load");
    assert!(scl.templates.do_types.is_empty());
}

#[test]
fn test_fcda_without_ld_inst() {
    let body = r#"<LN0 lnClass="LLN0" inst="" lnType="LLN0_T">
        <DataSet name="DS"><FCDA lnClass="XCBR" lnInst="1" doName="Pos" fc="ST"/></DataSet>
    </LN0>"#;
    let result = load_scl_from_str(&scl_doc(body, Some(LLN0_TYPE)));
    assert!(matches!(
        result,
        Err(SclError::MissingAttribute {
            element: "FCDA",
            attribute: "ldInst"
        })
    ));
}

#[test]
fn test_invalid_sample_rate() {
    let body = r#"<LN0 lnClass="LLN0" inst="" lnType="LLN0_T">
        <SampledValueControl name="sv" datSet="DS" smvID="SV" smpRate="fast"/>
    </LN0>"#;
    let err = load_scl_from_str(&scl_doc(body, Some(LLN0_TYPE))).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid format for attribute SampledValueControl@smpRate: 'fast' (invalid digit found in string)"
    );
}

#[test]
fn test_duplicate_do_type() {
    let templates = r#"<LNodeType id="LLN0_T" lnClass="LLN0"/>
        <DOType id="SPS_T" cdc="SPS"><DA name="stVal" bType="BOOLEAN" fc="ST"/></DOType>
        <DOType id="SPS_T" cdc="SPS"><DA name="q" bType="Quality" fc="ST"/></DOType>"#;
    let err = load_scl_from_str(&scl_doc(LN0, Some(templates))).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Duplicate DOType id 'SPS_T' in DataTypeTemplates"
    );
}

/// An unknown `bType` is not a load error; it only fails once something tries
/// to code it.
#[test]
fn test_unknown_b_type_is_kept() {
    let templates = r#"<LNodeType id="LLN0_T" lnClass="LLN0"/>
        <DAType id="Odd"><BDA name="x" bType="FLOAT128"/></DAType>"#;
    let scl = load_scl_from_str(&scl_doc(LN0, Some(templates))).expect("should load");
    let odd = scl.templates.da_type("Odd").unwrap();
    assert_eq!(
        odd.attributes[0].b_type,
        BasicType::Other("FLOAT128".to_string())
    );
}
