// crates/iec61850-coder/src/lib.rs

//! Generates C encode/decode routines for IEC 61850 Sampled Values (flat)
//! and GSE (BER-framed) messages from a loaded SCL data model.
//!
//! The entry point is [`Generator`]. The lower layers ([`FunctionAssembler`],
//! [`emit_item`], [`TypeMapping`]) are public so a surrounding code generator
//! can drive them directly with its own mapping.

// --- Foundation ---
pub mod coder;
pub mod config;
pub mod error;
mod log;
pub mod node;

// --- Resolution ---
pub mod classify;
pub mod containment;
pub mod mapping;
pub mod path;

// --- Emission ---
pub mod assembler;
pub mod emit;
pub mod framing;
pub mod naming;

// --- Batch ---
pub mod generator;

// --- Top-level Exports ---
pub use assembler::{FunctionAssembler, GeneratedFunction};
pub use coder::{CoderDirective, Direction, EmitMode, TransportKind};
pub use config::{CoderConfig, FramingMismatchPolicy};
pub use containment::{Container, ContainmentIndex};
pub use emit::{EmitContext, Item, emit_item};
pub use error::CoderError;
pub use generator::{GenerationFailure, GenerationOutput, Generator};
pub use mapping::{LogicalNodeInfo, ScalarType, StandardTypeMapping, TypeMapping};
pub use naming::NamingContext;
pub use node::{AttributeNode, CompositeType, Entity};
