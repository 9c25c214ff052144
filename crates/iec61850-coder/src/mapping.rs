// crates/iec61850-coder/src/mapping.rs

//! Maps attribute nodes and dataset members to coder tokens, C types and
//! variable names.

use crate::containment::ContainmentIndex;
use crate::error::CoderError;
use crate::node::AttributeNode;
use crate::path::c_identifier;
use iec61850_scl::{BasicType, DoTypeChild, Fcda, LogicalNode, SclFile};
use std::collections::BTreeMap;

/// The logical node an FCDA points into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalNodeInfo {
    pub prefix: String,
    /// The `LNodeType` id.
    pub ln_type: String,
    pub inst: String,
}

impl From<&LogicalNode> for LogicalNodeInfo {
    fn from(ln: &LogicalNode) -> Self {
        Self {
            prefix: ln.prefix.clone(),
            ln_type: ln.ln_type.clone(),
            inst: ln.inst.clone(),
        }
    }
}

/// Resolves nodes to the names the generated code uses.
///
/// Every method fails with a definite error when no mapping exists; an empty
/// string is never a valid answer.
pub trait TypeMapping {
    /// The token appended to the coder prefix, e.g. `CTYPE_FLOAT32` or `Vector`.
    fn coder_type_of(&self, node: &AttributeNode<'_>) -> Result<String, CoderError>;

    /// The struct member a node is stored in.
    fn variable_name_of(&self, node: &AttributeNode<'_>) -> Result<String, CoderError> {
        match node {
            AttributeNode::ExternalReference(e) => Err(CoderError::UnsupportedNodeKind {
                kind: node.kind_name(),
                node: e.to_string(),
            }),
            _ => Ok(node.name().to_string()),
        }
    }

    /// The coder token of the attribute or data object an FCDA references.
    fn member_coder_type_of(&self, fcda: &Fcda) -> Result<String, CoderError>;

    /// The member of the dataset struct holding an FCDA's value:
    /// `ldInst_prefixlnClasslnInst_doName[_daName]`.
    fn member_variable_name_of(&self, fcda: &Fcda) -> Result<String, CoderError> {
        let mut name = format!(
            "{}_{}{}{}_{}",
            fcda.ld_inst, fcda.prefix, fcda.ln_class, fcda.ln_inst, fcda.do_name
        );
        if let Some(da) = fcda.da_name() {
            name.push('_');
            name.push_str(da);
        }
        Ok(c_identifier(&name))
    }

    /// The C type of the value an FCDA references, e.g. `struct Vector`.
    fn printed_type_of(&self, fcda: &Fcda) -> Result<String, CoderError>;

    fn logical_node_of(&self, fcda: &Fcda) -> Result<LogicalNodeInfo, CoderError>;
}

/// A caller-supplied mapping for one `bType`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarType {
    pub coder: String,
    pub printed: String,
}

impl ScalarType {
    pub fn new(coder: impl Into<String>, printed: impl Into<String>) -> Self {
        Self {
            coder: coder.into(),
            printed: printed.into(),
        }
    }
}

/// Coder token of a scalar `bType`. The same name is the C typedef.
pub fn standard_scalar(b_type: &BasicType) -> Option<&'static str> {
    let token = match b_type {
        BasicType::Boolean => "CTYPE_BOOLEAN",
        BasicType::Int8 => "CTYPE_INT8",
        BasicType::Int16 => "CTYPE_INT16",
        BasicType::Int24 | BasicType::Int32 => "CTYPE_INT32",
        BasicType::Int64 => "CTYPE_INT64",
        BasicType::Int8U => "CTYPE_INT8U",
        BasicType::Int16U => "CTYPE_INT16U",
        BasicType::Int24U | BasicType::Int32U => "CTYPE_INT32U",
        BasicType::Float32 => "CTYPE_FLOAT32",
        BasicType::Float64 => "CTYPE_FLOAT64",
        BasicType::Dbpos => "CTYPE_DBPOS",
        BasicType::Tcmd => "CTYPE_TCMD",
        BasicType::Quality => "CTYPE_QUALITY",
        BasicType::Timestamp => "CTYPE_TIMESTAMP",
        BasicType::VisString32 => "CTYPE_VISSTRING32",
        BasicType::VisString64 => "CTYPE_VISSTRING64",
        BasicType::VisString65 => "CTYPE_VISSTRING65",
        BasicType::VisString129 => "CTYPE_VISSTRING129",
        BasicType::VisString255 => "CTYPE_VISSTRING255",
        BasicType::Octet6 => "CTYPE_OCTET6",
        BasicType::Octet16 => "CTYPE_OCTET16",
        BasicType::Octet64 => "CTYPE_OCTET64",
        BasicType::Unicode255 => "CTYPE_UNICODE255",
        BasicType::EntryTime => "CTYPE_ENTRYTIME",
        BasicType::Check => "CTYPE_CHECK",
        BasicType::ObjRef => "CTYPE_OBJREF",
        BasicType::Currency => "CTYPE_CURRENCY",
        BasicType::PhyComAddr => "CTYPE_PHYCOMADDR",
        BasicType::TrgOps => "CTYPE_TRGOPS",
        BasicType::OptFlds => "CTYPE_OPTFLDS",
        BasicType::SvOptFlds => "CTYPE_SVOPTFLDS",
        BasicType::EntryId => "CTYPE_ENTRYID",
        // No fixed-width C representation.
        BasicType::Int128 => return None,
        BasicType::Enum | BasicType::Struct | BasicType::Other(_) => return None,
    };
    Some(token)
}

const ENUM_TOKEN: &str = "CTYPE_ENUM";

/// Table-driven [`TypeMapping`] over a loaded SCL file.
pub struct StandardTypeMapping<'a> {
    scl: &'a SclFile,
    index: &'a ContainmentIndex<'a>,
    overrides: BTreeMap<String, ScalarType>,
}

impl<'a> StandardTypeMapping<'a> {
    pub fn new(scl: &'a SclFile, index: &'a ContainmentIndex<'a>) -> Self {
        Self {
            scl,
            index,
            overrides: BTreeMap::new(),
        }
    }

    /// Maps a `bType` (by its SCL spelling) to a custom scalar, replacing the
    /// standard entry. `Struct` cannot be overridden.
    pub fn with_override(mut self, b_type: impl Into<String>, scalar: ScalarType) -> Self {
        self.overrides.insert(b_type.into(), scalar);
        self
    }

    pub fn with_overrides(mut self, overrides: BTreeMap<String, ScalarType>) -> Self {
        self.overrides.extend(overrides);
        self
    }

    fn unmapped(node: &AttributeNode<'_>) -> CoderError {
        CoderError::UnmappedType {
            node: node.name().to_string(),
            b_type: node.b_type().map_or_else(|| node.kind_name().to_string(), |b| b.to_string()),
        }
    }

    /// The C type a node is stored as.
    pub fn printed_type_of_node(&self, node: &AttributeNode<'_>) -> Result<String, CoderError> {
        match node {
            AttributeNode::DataObject(_) | AttributeNode::SubDataObject(_) => node
                .type_id()
                .map(|id| format!("struct {}", id))
                .ok_or_else(|| Self::unmapped(node)),
            AttributeNode::DataAttribute(_) | AttributeNode::BasicDataAttribute(_) => {
                let b_type = node.b_type().ok_or_else(|| Self::unmapped(node))?;
                if let Some(o) = self.override_for(b_type) {
                    return Ok(o.printed.clone());
                }
                match b_type {
                    BasicType::Struct => node.type_id().map(|id| format!("struct {}", id)),
                    BasicType::Enum => node.type_id().map(|id| format!("enum {}", id)),
                    other => standard_scalar(other).map(String::from),
                }
                .ok_or_else(|| Self::unmapped(node))
            }
            AttributeNode::ExternalReference(e) => Err(CoderError::UnsupportedNodeKind {
                kind: node.kind_name(),
                node: e.to_string(),
            }),
        }
    }

    fn override_for(&self, b_type: &BasicType) -> Option<&ScalarType> {
        if b_type.is_struct() {
            return None;
        }
        self.overrides.get(b_type.as_str())
    }

    fn unresolved(fcda: &Fcda, reason: String) -> CoderError {
        CoderError::UnresolvedReference {
            reference: fcda.to_string(),
            reason,
        }
    }

    /// Finds the data object or attribute an FCDA points at, together with
    /// the logical node holding it.
    pub fn resolve_member(
        &self,
        fcda: &Fcda,
    ) -> Result<(AttributeNode<'a>, &'a LogicalNode), CoderError> {
        let templates = &self.scl.templates;
        let ied = self
            .index
            .ied_of(fcda)
            .ok_or_else(|| Self::unresolved(fcda, "not a member of any indexed dataset".into()))?;

        let ld = ied
            .access_points
            .iter()
            .filter_map(|ap| ap.server.as_ref())
            .flat_map(|server| server.logical_devices.iter())
            .find(|ld| ld.inst == fcda.ld_inst)
            .ok_or_else(|| {
                Self::unresolved(fcda, format!("no LDevice '{}' in IED '{}'", fcda.ld_inst, ied.name))
            })?;

        let ln = ld
            .find_logical_node(&fcda.prefix, &fcda.ln_class, &fcda.ln_inst)
            .ok_or_else(|| Self::unresolved(fcda, "no such logical node".into()))?;

        let ln_type = templates
            .ln_type(&ln.ln_type)
            .ok_or_else(|| Self::unresolved(fcda, format!("unknown LNodeType '{}'", ln.ln_type)))?;

        // doName: DO, then SDOs.
        let mut segments = fcda.do_name.split('.');
        let first = segments.next().unwrap_or_default();
        let data_object = ln_type.data_object(first).ok_or_else(|| {
            Self::unresolved(fcda, format!("no DO '{}' in LNodeType '{}'", first, ln_type.id))
        })?;
        let mut node = AttributeNode::DataObject(data_object);
        let mut do_type = templates.do_type(&data_object.type_id).ok_or_else(|| {
            Self::unresolved(fcda, format!("unknown DOType '{}'", data_object.type_id))
        })?;
        for segment in segments {
            let Some(DoTypeChild::SubDataObject(sdo)) = do_type.child(segment) else {
                return Err(Self::unresolved(
                    fcda,
                    format!("no SDO '{}' in DOType '{}'", segment, do_type.id),
                ));
            };
            node = AttributeNode::SubDataObject(sdo);
            do_type = templates
                .do_type(&sdo.type_id)
                .ok_or_else(|| Self::unresolved(fcda, format!("unknown DOType '{}'", sdo.type_id)))?;
        }

        // daName: DA, then BDAs.
        if let Some(da_name) = fcda.da_name() {
            let mut segments = da_name.split('.');
            let first = segments.next().unwrap_or_default();
            let Some(DoTypeChild::DataAttribute(da)) = do_type.child(first) else {
                return Err(Self::unresolved(
                    fcda,
                    format!("no DA '{}' in DOType '{}'", first, do_type.id),
                ));
            };
            node = AttributeNode::DataAttribute(da);
            for segment in segments {
                let da_type = node
                    .type_id()
                    .filter(|_| node.b_type().is_some_and(BasicType::is_struct))
                    .and_then(|id| templates.da_type(id))
                    .ok_or_else(|| {
                        Self::unresolved(fcda, format!("'{}' is not a structured attribute", node.name()))
                    })?;
                let bda = da_type.attribute(segment).ok_or_else(|| {
                    Self::unresolved(fcda, format!("no BDA '{}' in DAType '{}'", segment, da_type.id))
                })?;
                node = AttributeNode::BasicDataAttribute(bda);
            }
        }

        Ok((node, ln))
    }
}

impl TypeMapping for StandardTypeMapping<'_> {
    fn coder_type_of(&self, node: &AttributeNode<'_>) -> Result<String, CoderError> {
        match node {
            AttributeNode::DataObject(_) | AttributeNode::SubDataObject(_) => node
                .type_id()
                .map(String::from)
                .ok_or_else(|| Self::unmapped(node)),
            AttributeNode::DataAttribute(_) | AttributeNode::BasicDataAttribute(_) => {
                let b_type = node.b_type().ok_or_else(|| Self::unmapped(node))?;
                if let Some(o) = self.override_for(b_type) {
                    return Ok(o.coder.clone());
                }
                match b_type {
                    BasicType::Struct => node.type_id().map(String::from),
                    BasicType::Enum => Some(ENUM_TOKEN.to_string()),
                    other => standard_scalar(other).map(String::from),
                }
                .ok_or_else(|| Self::unmapped(node))
            }
            AttributeNode::ExternalReference(e) => Err(CoderError::UnsupportedNodeKind {
                kind: node.kind_name(),
                node: e.to_string(),
            }),
        }
    }

    fn member_coder_type_of(&self, fcda: &Fcda) -> Result<String, CoderError> {
        let (node, _) = self.resolve_member(fcda)?;
        self.coder_type_of(&node)
    }

    fn printed_type_of(&self, fcda: &Fcda) -> Result<String, CoderError> {
        let (node, _) = self.resolve_member(fcda)?;
        self.printed_type_of_node(&node)
    }

    fn logical_node_of(&self, fcda: &Fcda) -> Result<LogicalNodeInfo, CoderError> {
        let (_, ln) = self.resolve_member(fcda)?;
        Ok(LogicalNodeInfo::from(ln))
    }
}
