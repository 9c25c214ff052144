// src/lib.rs

#![no_std]
#![doc = "Loads IEC 61850 SCL (Substation Configuration Language) files."]
#![doc = ""]
#![doc = "This `no_std + alloc` library parses an SCD/ICD/CID document into a read-only"]
#![doc = "tree of IEDs, logical devices, logical nodes, datasets and data type templates."]
#![doc = ""]
#![doc = "- `load_scl_from_str`: Parsing and resolving a complete SCL document."]

extern crate alloc;

// --- Crate Modules ---

mod error;
mod model;
mod parser;
mod resolver;
mod types;

// --- Public API Re-exports ---

pub use error::SclError;
pub use parser::load_scl_from_str;
pub use types::{
    AccessPoint, BasicDataAttribute, BasicType, ControlBlock, DaType, DataAttribute, DataObject,
    DataSet, DataTypeTemplates, DoType, DoTypeChild, EnumType, EnumValue, ExtRef, Fcda, Header,
    Ied, LNodeType, LogicalDevice, LogicalNode, SclFile, Server, SubDataObject,
};
