// crates/iec61850-scl/src/resolver/mod.rs

//! Handles the business logic of resolving a deserialized SCL model.
//!
//! This module contains the main `resolve_scl` orchestrator and sub-modules
//! for the IED section and the data type templates.

use crate::error::SclError;
use crate::model;
use crate::types;
use log::debug;

// --- Sub-modules ---

mod ied;
mod templates;

/// Resolves the final `SclFile` from the raw deserialized `<SCL>` element.
/// This function contains all the logic for mapping the internal `model`
/// to the public, ergonomic `types`.
pub(crate) fn resolve_scl(scl: model::Scl) -> Result<types::SclFile, SclError> {
    let header = scl.header.as_ref().map(|h| types::Header {
        id: h.id.clone(),
        version: h.version.clone(),
        revision: h.revision.clone(),
        tool_id: h.tool_id.clone(),
    });

    // --- Pass 1: IED section ---
    let ieds = scl
        .ied
        .iter()
        .map(ied::resolve_ied)
        .collect::<Result<alloc::vec::Vec<_>, _>>()?;

    // --- Pass 2: Data type templates ---
    let has_logical_nodes = ieds
        .iter()
        .flat_map(|ied| ied.access_points.iter())
        .filter_map(|ap| ap.server.as_ref())
        .flat_map(|server| server.logical_devices.iter())
        .any(|ld| ld.all_logical_nodes().next().is_some());

    let templates = match scl.data_type_templates.as_ref() {
        Some(t) => templates::resolve_templates(t)?,
        // Logical nodes are typed by the templates; without them nothing can be coded.
        None if has_logical_nodes => {
            return Err(SclError::MissingElement {
                element: "DataTypeTemplates",
            });
        }
        None => types::DataTypeTemplates::default(),
    };

    debug!(
        "Resolved SCL: {} IEDs, {} LNodeTypes, {} DOTypes, {} DATypes, {} EnumTypes.",
        ieds.len(),
        templates.ln_types.len(),
        templates.do_types.len(),
        templates.da_types.len(),
        templates.enum_types.len()
    );

    Ok(types::SclFile {
        header,
        ieds,
        templates,
    })
}
