// crates/iec61850-scl/src/model/templates.rs

//! Contains model structs related to `<DataTypeTemplates>`.
//! (Schema: `SCL_DataTypeTemplates.xsd`)

use alloc::string::String;
use alloc::vec::Vec;
use serde::Deserialize;
use serde::de::IgnoredAny;

/// The `<DataTypeTemplates>` section.
#[derive(Debug, Deserialize, Default)]
pub struct DataTypeTemplates {
    #[serde(rename = "LNodeType", default)]
    pub lnode_type: Vec<LNodeType>,

    #[serde(rename = "DOType", default)]
    pub do_type: Vec<DoType>,

    #[serde(rename = "DAType", default)]
    pub da_type: Vec<DaType>,

    #[serde(rename = "EnumType", default)]
    pub enum_type: Vec<EnumType>,
}

/// A logical node type: an ordered list of `<DO>` elements.
#[derive(Debug, Deserialize, Default)]
pub struct LNodeType {
    #[serde(rename = "@id")]
    pub id: String,

    #[serde(rename = "@lnClass")]
    pub ln_class: String,

    #[serde(rename = "DO", default)]
    pub data_object: Vec<Do>,
}

/// A `<DO>` element inside an `<LNodeType>`.
#[derive(Debug, Deserialize, Default)]
pub struct Do {
    #[serde(rename = "@name")]
    pub name: String,

    #[serde(rename = "@type")]
    pub do_type: String,
}

/// A data object type. `<SDO>` and `<DA>` may be interleaved and their
/// relative order is the wire order, so both are captured in one list.
#[derive(Debug, Deserialize, Default)]
pub struct DoType {
    #[serde(rename = "@id")]
    pub id: String,

    #[serde(rename = "@cdc")]
    pub cdc: String,

    #[serde(rename = "$value", default)]
    pub items: Vec<DoTypeItem>,
}

/// The `xsd:choice` of children inside `<DOType>`.
#[derive(Debug, Deserialize)]
pub enum DoTypeItem {
    #[serde(rename = "SDO")]
    Sdo(Sdo),
    #[serde(rename = "DA")]
    Da(AttributeElement),
    #[serde(rename = "Private")]
    Private(IgnoredAny),
    #[serde(rename = "Text")]
    Text(IgnoredAny),
}

/// An `<SDO>` element.
#[derive(Debug, Deserialize, Default)]
pub struct Sdo {
    #[serde(rename = "@name")]
    pub name: String,

    #[serde(rename = "@type")]
    pub sdo_type: String,
}

/// A `<DA>` or `<BDA>` element. `fc` is only present on `<DA>`.
#[derive(Debug, Deserialize, Default)]
pub struct AttributeElement {
    #[serde(rename = "@name")]
    pub name: String,

    #[serde(rename = "@bType")]
    pub b_type: String,

    /// The referenced `DAType` (for `Struct`) or `EnumType` (for `Enum`).
    #[serde(rename = "@type", default)]
    pub attr_type: Option<String>,

    #[serde(rename = "@fc", default)]
    pub fc: Option<String>,

    #[serde(rename = "@count", default)]
    pub count: Option<String>,
}

/// A data attribute type: an ordered list of `<BDA>` elements.
#[derive(Debug, Deserialize, Default)]
pub struct DaType {
    #[serde(rename = "@id")]
    pub id: String,

    #[serde(rename = "BDA", default)]
    pub bda: Vec<AttributeElement>,
}

/// An `<EnumType>` with its ordinal values.
#[derive(Debug, Deserialize, Default)]
pub struct EnumType {
    #[serde(rename = "@id")]
    pub id: String,

    #[serde(rename = "EnumVal", default)]
    pub enum_val: Vec<EnumVal>,
}

/// `<EnumVal ord="1">on</EnumVal>`
#[derive(Debug, Deserialize, Default)]
pub struct EnumVal {
    #[serde(rename = "@ord")]
    pub ord: String,

    #[serde(rename = "$text", default)]
    pub value: String,
}
