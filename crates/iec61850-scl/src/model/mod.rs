//! Internal `serde` data structures that map directly to the SCL XML schema.
//!
//! This module defines the raw structure of an SCL file (IEC 61850-6) as far
//! as the coder generator needs it. These structs are annotated with `serde`
//! attributes to facilitate parsing via `quick-xml` and are not intended for
//! direct public use.

#![allow(clippy::pedantic)] // XML schema naming conventions differ from Rust

use alloc::string::String;
use alloc::vec::Vec;
use serde::Deserialize;

pub mod ied;
pub mod templates;

// Re-export key components for internal use
pub use ied::Ied;
pub use templates::DataTypeTemplates;

/// The root `<SCL>` element.
#[derive(Debug, Deserialize, Default)]
#[serde(rename = "SCL")]
pub struct Scl {
    #[serde(rename = "@version", default)]
    pub version: Option<String>,

    #[serde(rename = "@revision", default)]
    pub revision: Option<String>,

    #[serde(rename = "Header", default)]
    pub header: Option<Header>,

    /// Every `<IED>` in declaration order.
    #[serde(rename = "IED", default)]
    pub ied: Vec<Ied>,

    #[serde(rename = "DataTypeTemplates", default)]
    pub data_type_templates: Option<DataTypeTemplates>,
}

/// The `<Header>` element. Only the identification attributes are kept.
#[derive(Debug, Deserialize, Default)]
pub struct Header {
    #[serde(rename = "@id")]
    pub id: String,

    #[serde(rename = "@version", default)]
    pub version: Option<String>,

    #[serde(rename = "@revision", default)]
    pub revision: Option<String>,

    #[serde(rename = "@toolID", default)]
    pub tool_id: Option<String>,
}
