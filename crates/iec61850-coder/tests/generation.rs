// crates/iec61850-coder/tests/generation.rs

use iec61850_coder::{
    AttributeNode, CoderError, ContainmentIndex, Generator, LogicalNodeInfo, StandardTypeMapping,
    TypeMapping,
};
use iec61850_scl::{Fcda, SclFile, load_scl_from_str};
use std::fs;
use std::path::PathBuf;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Helper function to load a test file from the `tests/data/` directory.
fn load_test_file(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("data");
    path.push(name);

    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read test file {:?}: {}", path, e))
}

fn load_model() -> SclFile {
    load_scl_from_str(&load_test_file("protection.scd")).expect("Failed to parse SCD")
}

#[test]
fn test_generate_whole_file() {
    init_logger();
    let scl = load_model();
    let output = Generator::new(&scl).generate();

    // 6 DOTypes and 2 DATypes with five functions each, then the datasets.
    let dataset_functions: Vec<&str> = output.functions[40..].iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        dataset_functions,
        vec![
            "decode_Measurands",
            "encode_Measurands",
            "decode_Positions",
            "encode_Positions",
            "ber_decode_Positions",
            "ber_encode_Positions",
            "ber_decode_Health",
            "ber_encode_Health",
        ]
    );
    assert_eq!(output.functions.len(), 48);

    let structs: Vec<&str> = output
        .structs
        .iter()
        .filter_map(|s| s.lines().next())
        .collect();
    assert_eq!(
        structs,
        vec!["struct Measurands {", "struct Positions {", "struct Health {"]
    );

    for name in ["decode_Status", "ber_encode_DPC_T", "ber_get_length_Vector", "encode_CMV_T"] {
        assert!(output.function(name).is_some(), "{} missing", name);
    }
    // Only the framed transport has composite length functions.
    assert!(output.function("get_length_Status").is_none());
}

#[test]
fn test_unpublished_and_missing_datasets_are_skipped() {
    let scl = load_model();
    let output = Generator::new(&scl).generate();

    assert!(output.functions.iter().all(|f| !f.name.ends_with("Unused")));
    assert!(output.functions.iter().all(|f| !f.name.ends_with("Ghost")));
    // A dataset without an SV control block gets no SV coders.
    assert!(output.function("decode_Health").is_none());
}

#[test]
fn test_identical_datasets_share_coders() {
    let scl = load_model();
    let output = Generator::new(&scl).generate();

    // IED1 and IED2 both publish an identical "Positions" over GSE.
    let count = output
        .functions
        .iter()
        .filter(|f| f.name == "ber_encode_Positions")
        .count();
    assert_eq!(count, 1);
    assert!(output.functions.iter().all(|f| !f.name.contains("Positions_")));

    // The first publisher's data model is the encoding source.
    let encode = output.function("ber_encode_Positions").unwrap();
    assert!(encode.body.contains("&IED1.AP1.C1.XCBR_T_1.Pos.stVal"));
}

#[test]
fn test_generation_is_deterministic() {
    let scl = load_model();
    let first = Generator::new(&scl).generate();
    let second = Generator::new(&scl).generate();
    assert_eq!(first.functions, second.functions);
    assert_eq!(first.structs, second.structs);
    assert_eq!(first.render_source(), second.render_source());
}

#[test]
fn test_broken_dataset_fails_alone() {
    init_logger();
    let scl = load_model();
    let output = Generator::new(&scl).generate();

    assert!(!output.is_complete());
    let functions: Vec<&str> = output.failures.iter().map(|f| f.function.as_str()).collect();
    assert_eq!(
        functions,
        vec!["struct Broken", "ber_decode_Broken", "ber_encode_Broken"]
    );
    for failure in &output.failures {
        assert_eq!(failure.entity, "Broken");
        match &failure.error {
            CoderError::UnresolvedReference { reference, reason } => {
                assert_eq!(reference, "C1/XCBR1.Pos.stVal.x [ST]");
                assert_eq!(reason, "'stVal' is not a structured attribute");
            }
            other => panic!("expected UnresolvedReference, got {:?}", other),
        }
    }
    assert!(output.function("ber_encode_Health").is_some());
    assert!(output.function("ber_encode_Status").is_some());
}

/// Delegates to the standard mapping but knows no logical nodes.
struct NoLogicalNodes<'a>(StandardTypeMapping<'a>);

impl TypeMapping for NoLogicalNodes<'_> {
    fn coder_type_of(&self, node: &AttributeNode<'_>) -> Result<String, CoderError> {
        self.0.coder_type_of(node)
    }

    fn member_coder_type_of(&self, fcda: &Fcda) -> Result<String, CoderError> {
        self.0.member_coder_type_of(fcda)
    }

    fn printed_type_of(&self, fcda: &Fcda) -> Result<String, CoderError> {
        self.0.printed_type_of(fcda)
    }

    fn logical_node_of(&self, fcda: &Fcda) -> Result<LogicalNodeInfo, CoderError> {
        Err(CoderError::UnresolvedReference {
            reference: fcda.to_string(),
            reason: "no logical nodes".into(),
        })
    }
}

#[test]
fn test_custom_mapping_only_breaks_encoders() {
    let scl = load_model();
    let index = ContainmentIndex::build(&scl);
    let mapping = NoLogicalNodes(StandardTypeMapping::new(&scl, &index));
    let output = Generator::new(&scl).generate_with(&index, &mapping);

    // Dataset decoders never need the source path.
    assert!(output.function("decode_Measurands").is_some());
    assert!(output.function("ber_decode_Health").is_some());
    assert!(output.function("encode_Measurands").is_none());
    assert!(output.function("ber_encode_Health").is_none());
    // Composite coders are unaffected.
    assert!(output.function("ber_encode_Status").is_some());

    assert!(
        output
            .failures
            .iter()
            .filter(|f| f.entity != "Broken")
            .all(|f| f.function.starts_with("encode_") || f.function.starts_with("ber_encode_"))
    );
}
