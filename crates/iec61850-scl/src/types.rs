// crates/iec61850-scl/src/types.rs

//! Public, ergonomic data structures for representing a parsed SCL file.
//!
//! Everything here is read-only once loaded: consumers such as the coder
//! generator borrow into this tree and never mutate it.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

// --- Root SCL Structure ---

/// Represents a fully parsed and resolved SCL file.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SclFile {
    /// The `<Header>` identification, if present.
    pub header: Option<Header>,

    /// Every IED, in declaration order.
    pub ieds: Vec<Ied>,

    /// The `<DataTypeTemplates>` section (empty if the file had none).
    pub templates: DataTypeTemplates,
}

impl SclFile {
    /// Finds an IED by name.
    pub fn ied(&self, name: &str) -> Option<&Ied> {
        self.ieds.iter().find(|ied| ied.name == name)
    }
}

/// Represents the `<Header>` element.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Header {
    pub id: String,
    pub version: Option<String>,
    pub revision: Option<String>,
    pub tool_id: Option<String>,
}

// --- IED Section ---

/// An Intelligent Electronic Device.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Ied {
    pub name: String,
    pub manufacturer: Option<String>,
    pub access_points: Vec<AccessPoint>,
}

/// An access point of an IED.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AccessPoint {
    pub name: String,
    /// `None` for client-only access points.
    pub server: Option<Server>,
}

/// The server of an access point, holding its logical devices.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Server {
    pub logical_devices: Vec<LogicalDevice>,
}

/// A logical device (`<LDevice>`).
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LogicalDevice {
    pub inst: String,
    /// The mandatory `LLN0`. Missing in some hand-written files.
    pub ln0: Option<LogicalNode>,
    /// All other logical nodes, in declaration order.
    pub logical_nodes: Vec<LogicalNode>,
}

impl LogicalDevice {
    /// Iterates `LN0` (if present) followed by every `LN`.
    pub fn all_logical_nodes(&self) -> impl Iterator<Item = &LogicalNode> {
        self.ln0.iter().chain(self.logical_nodes.iter())
    }

    /// Finds a logical node by its `prefix`, `lnClass` and `inst` triple.
    /// An absent prefix or instance matches the empty string.
    pub fn find_logical_node(&self, prefix: &str, ln_class: &str, inst: &str) -> Option<&LogicalNode> {
        self.all_logical_nodes()
            .find(|ln| ln.prefix == prefix && ln.ln_class == ln_class && ln.inst == inst)
    }
}

/// A logical node (`<LN0>` or `<LN>`).
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LogicalNode {
    /// Empty when the attribute is absent.
    pub prefix: String,
    pub ln_class: String,
    /// Empty for `LLN0`.
    pub inst: String,
    /// The `LNodeType` id.
    pub ln_type: String,
    pub data_sets: Vec<DataSet>,
    pub gse_controls: Vec<ControlBlock>,
    pub sampled_value_controls: Vec<ControlBlock>,
    pub inputs: Vec<ExtRef>,
}

impl LogicalNode {
    /// The `prefix + lnClass + inst` reference used in object names.
    pub fn reference(&self) -> String {
        let mut s = String::with_capacity(self.prefix.len() + self.ln_class.len() + self.inst.len());
        s.push_str(&self.prefix);
        s.push_str(&self.ln_class);
        s.push_str(&self.inst);
        s
    }

    /// Finds a dataset declared in this logical node.
    pub fn data_set(&self, name: &str) -> Option<&DataSet> {
        self.data_sets.iter().find(|ds| ds.name == name)
    }
}

/// A dataset: an ordered list of FCDA references.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DataSet {
    pub name: String,
    pub members: Vec<Fcda>,
}

/// A Functional Constraint Data Attribute reference.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fcda {
    pub ld_inst: String,
    pub prefix: String,
    pub ln_class: String,
    pub ln_inst: String,
    /// May be a dotted path through sub-data-objects (e.g. `A.phsA`).
    pub do_name: String,
    /// `None` when the whole data object is referenced. May be dotted.
    pub da_name: Option<String>,
    pub fc: String,
}

impl Fcda {
    /// Returns the data attribute name, treating an empty name as absent.
    pub fn da_name(&self) -> Option<&str> {
        self.da_name.as_deref().filter(|s| !s.is_empty())
    }
}

impl fmt::Display for Fcda {
    /// Formats as the IEC 61850 object reference `ld/lnRef.do[.da] [fc]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}{}{}.{}",
            self.ld_inst, self.prefix, self.ln_class, self.ln_inst, self.do_name
        )?;
        if let Some(da) = self.da_name() {
            write!(f, ".{}", da)?;
        }
        write!(f, " [{}]", self.fc)
    }
}

/// A publishing control block (`<GSEControl>` or `<SampledValueControl>`).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ControlBlock {
    pub name: String,
    /// The name of the dataset in the same logical node, if any.
    pub data_set: Option<String>,
    /// `appID` for GSE, `smvID` for SV.
    pub id: Option<String>,
    /// Samples per period (SV only).
    pub sample_rate: Option<u32>,
    /// ASDUs per frame (SV only).
    pub asdu_count: Option<u32>,
}

/// An input binding to another IED's data.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExtRef {
    pub ied_name: String,
    pub ld_inst: String,
    pub prefix: String,
    pub ln_class: String,
    pub ln_inst: String,
    pub do_name: String,
    pub da_name: Option<String>,
    pub int_addr: Option<String>,
}

impl fmt::Display for ExtRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}/{}{}{}.{}",
            self.ied_name, self.ld_inst, self.prefix, self.ln_class, self.ln_inst, self.do_name
        )?;
        if let Some(da) = self.da_name.as_deref() {
            write!(f, ".{}", da)?;
        }
        Ok(())
    }
}

// --- Data Type Templates ---

/// The `<DataTypeTemplates>` section.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DataTypeTemplates {
    pub ln_types: Vec<LNodeType>,
    pub do_types: Vec<DoType>,
    pub da_types: Vec<DaType>,
    pub enum_types: Vec<EnumType>,
}

impl DataTypeTemplates {
    pub fn ln_type(&self, id: &str) -> Option<&LNodeType> {
        self.ln_types.iter().find(|t| t.id == id)
    }

    pub fn do_type(&self, id: &str) -> Option<&DoType> {
        self.do_types.iter().find(|t| t.id == id)
    }

    pub fn da_type(&self, id: &str) -> Option<&DaType> {
        self.da_types.iter().find(|t| t.id == id)
    }

    pub fn enum_type(&self, id: &str) -> Option<&EnumType> {
        self.enum_types.iter().find(|t| t.id == id)
    }
}

/// A logical node type.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LNodeType {
    pub id: String,
    pub ln_class: String,
    pub data_objects: Vec<DataObject>,
}

impl LNodeType {
    pub fn data_object(&self, name: &str) -> Option<&DataObject> {
        self.data_objects.iter().find(|d| d.name == name)
    }
}

/// A `<DO>` inside a logical node type.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DataObject {
    pub name: String,
    /// The `DOType` id.
    pub type_id: String,
}

/// A data object type.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DoType {
    pub id: String,
    pub cdc: String,
    /// `SDO` and `DA` children in declaration order.
    pub children: Vec<DoTypeChild>,
}

impl DoType {
    /// Finds a direct child (SDO or DA) by name.
    pub fn child(&self, name: &str) -> Option<&DoTypeChild> {
        self.children.iter().find(|c| c.name() == name)
    }
}

/// One child of a `DOType`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DoTypeChild {
    SubDataObject(SubDataObject),
    DataAttribute(DataAttribute),
}

impl DoTypeChild {
    pub fn name(&self) -> &str {
        match self {
            DoTypeChild::SubDataObject(sdo) => &sdo.name,
            DoTypeChild::DataAttribute(da) => &da.name,
        }
    }
}

/// An `<SDO>`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SubDataObject {
    pub name: String,
    /// The `DOType` id.
    pub type_id: String,
}

/// A `<DA>` inside a `DOType`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DataAttribute {
    pub name: String,
    pub b_type: BasicType,
    /// The `DAType` (for `Struct`) or `EnumType` (for `Enum`) id.
    pub type_id: Option<String>,
    pub fc: String,
    /// Array element count, `0` for scalars.
    pub count: u32,
}

/// A data attribute type.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DaType {
    pub id: String,
    /// `BDA` children in declaration order.
    pub attributes: Vec<BasicDataAttribute>,
}

impl DaType {
    pub fn attribute(&self, name: &str) -> Option<&BasicDataAttribute> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

/// A `<BDA>` inside a `DAType`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BasicDataAttribute {
    pub name: String,
    pub b_type: BasicType,
    pub type_id: Option<String>,
    pub count: u32,
}

/// An enumeration type.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnumType {
    pub id: String,
    pub values: Vec<EnumValue>,
}

/// One `<EnumVal>`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub ord: i32,
    pub name: String,
}

/// The SCL `bType` of a DA/BDA.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BasicType {
    #[default]
    Boolean,
    Int8,
    Int16,
    Int24,
    Int32,
    Int64,
    Int128,
    Int8U,
    Int16U,
    Int24U,
    Int32U,
    Float32,
    Float64,
    Enum,
    Dbpos,
    Tcmd,
    Quality,
    Timestamp,
    VisString32,
    VisString64,
    VisString65,
    VisString129,
    VisString255,
    Octet64,
    Unicode255,
    Struct,
    EntryTime,
    Check,
    ObjRef,
    Currency,
    PhyComAddr,
    TrgOps,
    OptFlds,
    SvOptFlds,
    EntryId,
    Octet6,
    Octet16,
    /// Any `bType` not defined by the edition this crate knows about.
    Other(String),
}

impl BasicType {
    /// Parses the `bType` attribute text. Never fails; unknown values are kept
    /// verbatim in [`BasicType::Other`].
    pub fn parse(s: &str) -> Self {
        match s {
            "BOOLEAN" => BasicType::Boolean,
            "INT8" => BasicType::Int8,
            "INT16" => BasicType::Int16,
            "INT24" => BasicType::Int24,
            "INT32" => BasicType::Int32,
            "INT64" => BasicType::Int64,
            "INT128" => BasicType::Int128,
            "INT8U" => BasicType::Int8U,
            "INT16U" => BasicType::Int16U,
            "INT24U" => BasicType::Int24U,
            "INT32U" => BasicType::Int32U,
            "FLOAT32" => BasicType::Float32,
            "FLOAT64" => BasicType::Float64,
            "Enum" => BasicType::Enum,
            "Dbpos" => BasicType::Dbpos,
            "Tcmd" => BasicType::Tcmd,
            "Quality" => BasicType::Quality,
            "Timestamp" => BasicType::Timestamp,
            "VisString32" => BasicType::VisString32,
            "VisString64" => BasicType::VisString64,
            "VisString65" => BasicType::VisString65,
            "VisString129" => BasicType::VisString129,
            "VisString255" => BasicType::VisString255,
            "Octet64" => BasicType::Octet64,
            "Unicode255" => BasicType::Unicode255,
            "Struct" => BasicType::Struct,
            "EntryTime" => BasicType::EntryTime,
            "Check" => BasicType::Check,
            "ObjRef" => BasicType::ObjRef,
            "Currency" => BasicType::Currency,
            "PhyComAddr" => BasicType::PhyComAddr,
            "TrgOps" => BasicType::TrgOps,
            "OptFlds" => BasicType::OptFlds,
            "SvOptFlds" => BasicType::SvOptFlds,
            "EntryID" => BasicType::EntryId,
            "Octet6" => BasicType::Octet6,
            "Octet16" => BasicType::Octet16,
            other => BasicType::Other(other.into()),
        }
    }

    /// The attribute text as it appears in SCL.
    pub fn as_str(&self) -> &str {
        match self {
            BasicType::Boolean => "BOOLEAN",
            BasicType::Int8 => "INT8",
            BasicType::Int16 => "INT16",
            BasicType::Int24 => "INT24",
            BasicType::Int32 => "INT32",
            BasicType::Int64 => "INT64",
            BasicType::Int128 => "INT128",
            BasicType::Int8U => "INT8U",
            BasicType::Int16U => "INT16U",
            BasicType::Int24U => "INT24U",
            BasicType::Int32U => "INT32U",
            BasicType::Float32 => "FLOAT32",
            BasicType::Float64 => "FLOAT64",
            BasicType::Enum => "Enum",
            BasicType::Dbpos => "Dbpos",
            BasicType::Tcmd => "Tcmd",
            BasicType::Quality => "Quality",
            BasicType::Timestamp => "Timestamp",
            BasicType::VisString32 => "VisString32",
            BasicType::VisString64 => "VisString64",
            BasicType::VisString65 => "VisString65",
            BasicType::VisString129 => "VisString129",
            BasicType::VisString255 => "VisString255",
            BasicType::Octet64 => "Octet64",
            BasicType::Unicode255 => "Unicode255",
            BasicType::Struct => "Struct",
            BasicType::EntryTime => "EntryTime",
            BasicType::Check => "Check",
            BasicType::ObjRef => "ObjRef",
            BasicType::Currency => "Currency",
            BasicType::PhyComAddr => "PhyComAddr",
            BasicType::TrgOps => "TrgOps",
            BasicType::OptFlds => "OptFlds",
            BasicType::SvOptFlds => "SvOptFlds",
            BasicType::EntryId => "EntryID",
            BasicType::Octet6 => "Octet6",
            BasicType::Octet16 => "Octet16",
            BasicType::Other(s) => s,
        }
    }

    pub fn is_struct(&self) -> bool {
        matches!(self, BasicType::Struct)
    }

    pub fn is_enum(&self) -> bool {
        matches!(self, BasicType::Enum)
    }
}

impl fmt::Display for BasicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
