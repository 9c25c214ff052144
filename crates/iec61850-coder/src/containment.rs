// crates/iec61850-coder/src/containment.rs

//! A read-only index from each FCDA to the chain of elements containing it.
//!
//! The SCL model has no parent links. The index is built once per generation
//! run by walking the model top-down and is then queried by FCDA identity
//! (its address inside the borrowed model).

use iec61850_scl::{AccessPoint, DataSet, Fcda, Ied, LogicalDevice, LogicalNode, SclFile, Server};
use log::debug;
use std::collections::HashMap;

/// One level of a containment chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Container<'a> {
    DataSet(&'a DataSet),
    LogicalNode(&'a LogicalNode),
    LogicalDevice(&'a LogicalDevice),
    Server(&'a Server),
    AccessPoint(&'a AccessPoint),
    Ied(&'a Ied),
}

impl Container<'_> {
    pub fn level_name(&self) -> &'static str {
        match self {
            Container::DataSet(_) => "DataSet",
            Container::LogicalNode(_) => "LN",
            Container::LogicalDevice(_) => "LDevice",
            Container::Server(_) => "Server",
            Container::AccessPoint(_) => "AccessPoint",
            Container::Ied(_) => "IED",
        }
    }
}

/// Maps FCDA identity to its containers, innermost first.
#[derive(Debug, Default, Clone)]
pub struct ContainmentIndex<'a> {
    chains: HashMap<usize, Vec<Container<'a>>>,
}

fn key(fcda: &Fcda) -> usize {
    fcda as *const Fcda as usize
}

impl<'a> ContainmentIndex<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes every FCDA of every dataset in the model.
    pub fn build(scl: &'a SclFile) -> Self {
        let mut index = Self::new();
        for ied in &scl.ieds {
            for ap in &ied.access_points {
                let Some(server) = ap.server.as_ref() else {
                    continue;
                };
                for ld in &server.logical_devices {
                    for ln in ld.all_logical_nodes() {
                        for ds in &ln.data_sets {
                            for fcda in &ds.members {
                                index.insert(
                                    fcda,
                                    vec![
                                        Container::DataSet(ds),
                                        Container::LogicalNode(ln),
                                        Container::LogicalDevice(ld),
                                        Container::Server(server),
                                        Container::AccessPoint(ap),
                                        Container::Ied(ied),
                                    ],
                                );
                            }
                        }
                    }
                }
            }
        }
        debug!("Containment index built for {} FCDAs.", index.len());
        index
    }

    /// Registers (or replaces) the chain of one FCDA.
    pub fn insert(&mut self, fcda: &'a Fcda, chain: Vec<Container<'a>>) {
        self.chains.insert(key(fcda), chain);
    }

    /// The containers of `fcda`, innermost first.
    pub fn chain_of(&self, fcda: &Fcda) -> Option<&[Container<'a>]> {
        self.chains.get(&key(fcda)).map(Vec::as_slice)
    }

    /// The outermost IED of a fully indexed FCDA.
    pub fn ied_of(&self, fcda: &Fcda) -> Option<&'a Ied> {
        self.chain_of(fcda)?.iter().rev().find_map(|c| match c {
            Container::Ied(ied) => Some(*ied),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}
