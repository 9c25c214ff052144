// crates/iec61850-coder/src/classify.rs

use crate::error::CoderError;
use crate::mapping::TypeMapping;
use crate::node::AttributeNode;
use iec61850_scl::{BasicType, Fcda};

/// The primitive shape of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasicTag {
    /// A nested type with its own coder functions.
    Structured,
    /// Any enumeration. All share one physical encoding.
    Enumerated,
    OtherScalar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    BasicLeaf,
    EnumeratedLeaf,
    Structured,
    /// An FCDA inside a dataset.
    DatasetMember,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub kind: NodeKind,
    pub tag: BasicTag,
}

impl Classification {
    /// Scalars (including enumerations) use the upper-case coder family.
    pub fn is_basic(&self) -> bool {
        self.tag != BasicTag::Structured
    }

    pub fn is_enumerated(&self) -> bool {
        self.tag == BasicTag::Enumerated
    }
}

/// Maps a `bType` to its tag.
pub fn tag_of_b_type(b_type: &BasicType) -> BasicTag {
    match b_type {
        BasicType::Struct => BasicTag::Structured,
        BasicType::Enum => BasicTag::Enumerated,
        _ => BasicTag::OtherScalar,
    }
}

/// Infers the tag from a printed C type such as `struct Vector` or `enum Beh`.
pub fn tag_of_printed_type(printed: &str) -> BasicTag {
    let printed = printed.trim_start();
    if printed.starts_with("struct ") {
        BasicTag::Structured
    } else if printed.starts_with("enum ") {
        BasicTag::Enumerated
    } else {
        BasicTag::OtherScalar
    }
}

/// Classifies one node of the attribute tree.
pub fn classify(node: &AttributeNode<'_>) -> Result<Classification, CoderError> {
    match node {
        AttributeNode::DataObject(_) | AttributeNode::SubDataObject(_) => Ok(Classification {
            kind: NodeKind::Structured,
            tag: BasicTag::Structured,
        }),
        AttributeNode::DataAttribute(_) | AttributeNode::BasicDataAttribute(_) => {
            let tag = node.b_type().map_or(BasicTag::OtherScalar, tag_of_b_type);
            let kind = match tag {
                BasicTag::Structured => NodeKind::Structured,
                BasicTag::Enumerated => NodeKind::EnumeratedLeaf,
                BasicTag::OtherScalar => NodeKind::BasicLeaf,
            };
            Ok(Classification { kind, tag })
        }
        AttributeNode::ExternalReference(e) => Err(CoderError::UnsupportedNodeKind {
            kind: node.kind_name(),
            node: e.to_string(),
        }),
    }
}

/// Classifies a dataset member. The member may live in another logical node,
/// so the tag comes from the printed type the mapping reports for it.
pub fn classify_member(fcda: &Fcda, mapping: &dyn TypeMapping) -> Result<Classification, CoderError> {
    let printed = mapping.printed_type_of(fcda)?;
    Ok(Classification {
        kind: NodeKind::DatasetMember,
        tag: tag_of_printed_type(&printed),
    })
}
