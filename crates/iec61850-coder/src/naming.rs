// crates/iec61850-coder/src/naming.rs

//! Allocates one canonical name per distinct dataset shape, so structurally
//! identical datasets share a single struct and coder pair.

use crate::error::CoderError;
use crate::path::c_identifier;
use iec61850_scl::{DataSet, Fcda};
use log::trace;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// The ordered member references of a dataset. Two datasets with equal
/// shapes have the same wire layout.
pub type DatasetShape = Vec<Fcda>;

fn shape_of(ds: &DataSet) -> DatasetShape {
    ds.members
        .iter()
        .map(|m| Fcda {
            da_name: m.da_name().map(String::from),
            ..m.clone()
        })
        .collect()
}

#[derive(Debug, Default)]
struct NameTable {
    by_shape: HashMap<DatasetShape, String>,
    by_name: HashMap<String, DatasetShape>,
}

/// Canonical dataset names for one generation run.
///
/// Allocation is serialized by a mutex, so a context can be shared by
/// generation tasks running on several threads.
#[derive(Debug, Default)]
pub struct NamingContext {
    table: Mutex<NameTable>,
}

impl NamingContext {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, NameTable> {
        // The table is consistent after every insert, so a poisoned lock is still usable.
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the canonical name of `ds`, allocating one on first sight of
    /// its shape. The first dataset of a shape gives its (sanitized) name;
    /// a later, different shape with a taken name gets `<name>_<n>`.
    pub fn canonical_name(&self, ds: &DataSet) -> Result<String, CoderError> {
        let shape = shape_of(ds);
        let mut table = self.lock();

        if let Some(name) = table.by_shape.get(&shape) {
            return match table.by_name.get(name) {
                Some(bound) if *bound == shape => Ok(name.clone()),
                _ => Err(CoderError::DuplicateDatasetName { name: name.clone() }),
            };
        }

        let preferred = match c_identifier(&ds.name) {
            s if s.is_empty() => "DataSet".to_string(),
            s => s,
        };
        let mut name = preferred.clone();
        let mut n = 1;
        while table.by_name.contains_key(&name) {
            name = format!("{}_{}", preferred, n);
            n += 1;
        }

        trace!("Dataset '{}' allocated canonical name '{}'.", ds.name, name);
        table.by_name.insert(name.clone(), shape.clone());
        table.by_shape.insert(shape, name.clone());
        Ok(name)
    }

    /// Number of distinct shapes named so far.
    pub fn len(&self) -> usize {
        self.lock().by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A sorted snapshot of the allocated names.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock().by_name.keys().cloned().collect();
        names.sort();
        names
    }
}
