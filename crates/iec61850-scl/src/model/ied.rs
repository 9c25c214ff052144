// crates/iec61850-scl/src/model/ied.rs

//! Contains model structs related to `<IED>` and everything nested below it.
//! (Schema: `SCL_IED.xsd`)

use alloc::string::String;
use alloc::vec::Vec;
use serde::Deserialize;

/// An Intelligent Electronic Device.
#[derive(Debug, Deserialize, Default)]
pub struct Ied {
    #[serde(rename = "@name")]
    pub name: String,

    #[serde(rename = "@manufacturer", default)]
    pub manufacturer: Option<String>,

    #[serde(rename = "@type", default)]
    pub ied_type: Option<String>,

    #[serde(rename = "AccessPoint", default)]
    pub access_point: Vec<AccessPoint>,
}

/// An `<AccessPoint>` of an IED.
#[derive(Debug, Deserialize, Default)]
pub struct AccessPoint {
    #[serde(rename = "@name")]
    pub name: String,

    /// Client-only access points have no server.
    #[serde(rename = "Server", default)]
    pub server: Option<Server>,
}

/// The `<Server>` of an access point.
#[derive(Debug, Deserialize, Default)]
pub struct Server {
    #[serde(rename = "LDevice", default)]
    pub ldevice: Vec<LDevice>,
}

/// A logical device.
#[derive(Debug, Deserialize, Default)]
pub struct LDevice {
    #[serde(rename = "@inst")]
    pub inst: String,

    #[serde(rename = "LN0", default)]
    pub ln0: Option<Ln>,

    #[serde(rename = "LN", default)]
    pub ln: Vec<Ln>,
}

/// An `<LN0>` or `<LN>` element. Both share the same shape here; `LN0`
/// simply always carries `lnClass="LLN0"` and an empty `inst`.
#[derive(Debug, Deserialize, Default)]
pub struct Ln {
    #[serde(rename = "@prefix", default)]
    pub prefix: Option<String>,

    #[serde(rename = "@lnClass")]
    pub ln_class: String,

    #[serde(rename = "@inst", default)]
    pub inst: Option<String>,

    #[serde(rename = "@lnType")]
    pub ln_type: String,

    #[serde(rename = "DataSet", default)]
    pub data_set: Vec<DataSet>,

    #[serde(rename = "GSEControl", default)]
    pub gse_control: Vec<GseControl>,

    #[serde(rename = "SampledValueControl", default)]
    pub sampled_value_control: Vec<SampledValueControl>,

    #[serde(rename = "Inputs", default)]
    pub inputs: Option<Inputs>,
}

/// A `<DataSet>` and its ordered `<FCDA>` members.
#[derive(Debug, Deserialize, Default)]
pub struct DataSet {
    #[serde(rename = "@name")]
    pub name: String,

    #[serde(rename = "FCDA", default)]
    pub fcda: Vec<Fcda>,
}

/// A Functional Constraint Data Attribute reference.
#[derive(Debug, Deserialize, Default)]
pub struct Fcda {
    #[serde(rename = "@ldInst", default)]
    pub ld_inst: Option<String>,

    #[serde(rename = "@prefix", default)]
    pub prefix: Option<String>,

    #[serde(rename = "@lnClass", default)]
    pub ln_class: Option<String>,

    #[serde(rename = "@lnInst", default)]
    pub ln_inst: Option<String>,

    #[serde(rename = "@doName", default)]
    pub do_name: Option<String>,

    #[serde(rename = "@daName", default)]
    pub da_name: Option<String>,

    #[serde(rename = "@fc")]
    pub fc: String,
}

/// A `<GSEControl>` block (GOOSE publication).
#[derive(Debug, Deserialize, Default)]
pub struct GseControl {
    #[serde(rename = "@name")]
    pub name: String,

    #[serde(rename = "@datSet", default)]
    pub dat_set: Option<String>,

    #[serde(rename = "@appID", default)]
    pub app_id: Option<String>,

    #[serde(rename = "@confRev", default)]
    pub conf_rev: Option<String>,
}

/// A `<SampledValueControl>` block (SV publication).
#[derive(Debug, Deserialize, Default)]
pub struct SampledValueControl {
    #[serde(rename = "@name")]
    pub name: String,

    #[serde(rename = "@datSet", default)]
    pub dat_set: Option<String>,

    #[serde(rename = "@smvID", default)]
    pub smv_id: Option<String>,

    #[serde(rename = "@smpRate", default)]
    pub smp_rate: Option<String>,

    #[serde(rename = "@nofASDU", default)]
    pub nof_asdu: Option<String>,
}

/// The `<Inputs>` section of a logical node.
#[derive(Debug, Deserialize, Default)]
pub struct Inputs {
    #[serde(rename = "ExtRef", default)]
    pub ext_ref: Vec<ExtRef>,
}

/// An `<ExtRef>` binding an input to another IED's data.
#[derive(Debug, Deserialize, Default)]
pub struct ExtRef {
    #[serde(rename = "@iedName", default)]
    pub ied_name: Option<String>,

    #[serde(rename = "@ldInst", default)]
    pub ld_inst: Option<String>,

    #[serde(rename = "@prefix", default)]
    pub prefix: Option<String>,

    #[serde(rename = "@lnClass", default)]
    pub ln_class: Option<String>,

    #[serde(rename = "@lnInst", default)]
    pub ln_inst: Option<String>,

    #[serde(rename = "@doName", default)]
    pub do_name: Option<String>,

    #[serde(rename = "@daName", default)]
    pub da_name: Option<String>,

    #[serde(rename = "@intAddr", default)]
    pub int_addr: Option<String>,
}
