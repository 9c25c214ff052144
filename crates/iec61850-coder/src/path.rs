// crates/iec61850-coder/src/path.rs

//! Builds the access path of an FCDA's value on the encoding side.

use crate::containment::{Container, ContainmentIndex};
use crate::error::CoderError;
use crate::mapping::TypeMapping;
use iec61850_scl::Fcda;

/// Replaces every character outside `[A-Za-z0-9]` with `_`.
pub fn sanitize(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Replaces every character outside `[A-Za-z0-9_]` with `_`.
pub fn c_identifier(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Where an encoder reads an FCDA's value from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePath {
    /// `ied.accessPoint.ldInst.lnInstance[.doName]`
    pub source: String,
    /// The data object (whole-DO member) or data attribute name.
    pub member: String,
}

/// Resolves the source path of `fcda` through its six-level containment
/// chain. The logical-node segment names the node the FCDA references, which
/// is generally not the node holding the dataset.
pub fn resolve_source_path(
    fcda: &Fcda,
    index: &ContainmentIndex<'_>,
    mapping: &dyn TypeMapping,
) -> Result<SourcePath, CoderError> {
    let malformed = |depth: usize| CoderError::MalformedContainment {
        reference: fcda.to_string(),
        depth,
    };

    let chain = index.chain_of(fcda).ok_or_else(|| malformed(0))?;
    let (ap, ied) = match chain {
        [
            Container::DataSet(_),
            Container::LogicalNode(_),
            Container::LogicalDevice(_),
            Container::Server(_),
            Container::AccessPoint(ap),
            Container::Ied(ied),
        ] => (*ap, *ied),
        _ => {
            // Depth is the number of levels that matched before the chain broke.
            let expected = ["DataSet", "LN", "LDevice", "Server", "AccessPoint", "IED"];
            let depth = chain
                .iter()
                .zip(expected)
                .take_while(|(c, e)| c.level_name() == *e)
                .count();
            return Err(malformed(depth));
        }
    };

    let ln = mapping.logical_node_of(fcda)?;
    let mut source = format!(
        "{}.{}.{}.{}{}_{}",
        ied.name,
        ap.name,
        fcda.ld_inst,
        ln.prefix,
        sanitize(&ln.ln_type),
        ln.inst
    );

    let member = match fcda.da_name() {
        None => fcda.do_name.clone(),
        Some(da) => {
            source.push('.');
            source.push_str(&fcda.do_name);
            da.to_string()
        }
    };

    Ok(SourcePath { source, member })
}
