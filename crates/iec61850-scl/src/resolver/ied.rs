// crates/iec61850-scl/src/resolver/ied.rs

use crate::error::SclError;
use crate::model::ied as raw;
use crate::parser::{parse_opt_u32, required};
use crate::types;
use alloc::string::String;
use alloc::vec::Vec;

fn or_empty(value: Option<&String>) -> String {
    value.cloned().unwrap_or_default()
}

/// Parses a `model::Ied` into a `types::Ied`.
pub(super) fn resolve_ied(model: &raw::Ied) -> Result<types::Ied, SclError> {
    let access_points = model
        .access_point
        .iter()
        .map(resolve_access_point)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(types::Ied {
        name: model.name.clone(),
        manufacturer: model.manufacturer.clone(),
        access_points,
    })
}

fn resolve_access_point(model: &raw::AccessPoint) -> Result<types::AccessPoint, SclError> {
    let server = model
        .server
        .as_ref()
        .map(|server| {
            server
                .ldevice
                .iter()
                .map(resolve_logical_device)
                .collect::<Result<Vec<_>, _>>()
                .map(|logical_devices| types::Server { logical_devices })
        })
        .transpose()?;

    Ok(types::AccessPoint {
        name: model.name.clone(),
        server,
    })
}

fn resolve_logical_device(model: &raw::LDevice) -> Result<types::LogicalDevice, SclError> {
    let ln0 = model.ln0.as_ref().map(resolve_logical_node).transpose()?;
    let logical_nodes = model
        .ln
        .iter()
        .map(resolve_logical_node)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(types::LogicalDevice {
        inst: model.inst.clone(),
        ln0,
        logical_nodes,
    })
}

fn resolve_logical_node(model: &raw::Ln) -> Result<types::LogicalNode, SclError> {
    let data_sets = model
        .data_set
        .iter()
        .map(resolve_data_set)
        .collect::<Result<Vec<_>, _>>()?;

    let gse_controls = model
        .gse_control
        .iter()
        .map(|gse| types::ControlBlock {
            name: gse.name.clone(),
            data_set: gse.dat_set.clone(),
            id: gse.app_id.clone(),
            sample_rate: None,
            asdu_count: None,
        })
        .collect();

    let sampled_value_controls = model
        .sampled_value_control
        .iter()
        .map(|svc| {
            Ok(types::ControlBlock {
                name: svc.name.clone(),
                data_set: svc.dat_set.clone(),
                id: svc.smv_id.clone(),
                sample_rate: parse_opt_u32("SampledValueControl@smpRate", svc.smp_rate.as_ref())?,
                asdu_count: parse_opt_u32("SampledValueControl@nofASDU", svc.nof_asdu.as_ref())?,
            })
        })
        .collect::<Result<Vec<_>, SclError>>()?;

    let inputs = model
        .inputs
        .as_ref()
        .map_or(Vec::new(), |inputs| inputs.ext_ref.iter().map(resolve_ext_ref).collect());

    Ok(types::LogicalNode {
        prefix: or_empty(model.prefix.as_ref()),
        ln_class: model.ln_class.clone(),
        inst: or_empty(model.inst.as_ref()),
        ln_type: model.ln_type.clone(),
        data_sets,
        gse_controls,
        sampled_value_controls,
        inputs,
    })
}

fn resolve_data_set(model: &raw::DataSet) -> Result<types::DataSet, SclError> {
    let members = model
        .fcda
        .iter()
        .map(resolve_fcda)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(types::DataSet {
        name: model.name.clone(),
        members,
    })
}

/// Parses a `model::Fcda`. `ldInst`, `lnClass` and `doName` are optional in the
/// schema but a reference without them cannot be resolved to any data.
fn resolve_fcda(model: &raw::Fcda) -> Result<types::Fcda, SclError> {
    Ok(types::Fcda {
        ld_inst: required("FCDA", "ldInst", model.ld_inst.as_ref())?.into(),
        prefix: or_empty(model.prefix.as_ref()),
        ln_class: required("FCDA", "lnClass", model.ln_class.as_ref())?.into(),
        ln_inst: or_empty(model.ln_inst.as_ref()),
        do_name: required("FCDA", "doName", model.do_name.as_ref())?.into(),
        da_name: model.da_name.clone().filter(|s| !s.is_empty()),
        fc: model.fc.clone(),
    })
}

fn resolve_ext_ref(model: &raw::ExtRef) -> types::ExtRef {
    types::ExtRef {
        ied_name: or_empty(model.ied_name.as_ref()),
        ld_inst: or_empty(model.ld_inst.as_ref()),
        prefix: or_empty(model.prefix.as_ref()),
        ln_class: or_empty(model.ln_class.as_ref()),
        ln_inst: or_empty(model.ln_inst.as_ref()),
        do_name: or_empty(model.do_name.as_ref()),
        da_name: model.da_name.clone().filter(|s| !s.is_empty()),
        int_addr: model.int_addr.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    fn raw_fcda(da: Option<&str>) -> raw::Fcda {
        raw::Fcda {
            ld_inst: Some("C1".to_string()),
            prefix: None,
            ln_class: Some("MMXU".to_string()),
            ln_inst: Some("1".to_string()),
            do_name: Some("TotW".to_string()),
            da_name: da.map(|s| s.to_string()),
            fc: "MX".to_string(),
        }
    }

    #[test]
    fn test_resolve_fcda_defaults() {
        let fcda = resolve_fcda(&raw_fcda(Some(""))).unwrap();
        assert_eq!(fcda.prefix, "");
        assert_eq!(fcda.da_name, None, "empty daName must mean 'whole DO'");

        let fcda = resolve_fcda(&raw_fcda(Some("mag.f"))).unwrap();
        assert_eq!(fcda.da_name.as_deref(), Some("mag.f"));
    }

    #[test]
    fn test_resolve_fcda_missing_do_name() {
        let mut model = raw_fcda(None);
        model.do_name = None;
        assert!(matches!(
            resolve_fcda(&model),
            Err(SclError::MissingAttribute {
                element: "FCDA",
                attribute: "doName"
            })
        ));
    }

    #[test]
    fn test_resolve_logical_node_keeps_dataset_order() {
        let model = raw::Ln {
            prefix: None,
            ln_class: "LLN0".to_string(),
            inst: None,
            ln_type: "LLN0_T".to_string(),
            data_set: vec![raw::DataSet {
                name: "Meas".to_string(),
                fcda: vec![raw_fcda(Some("mag.f")), raw_fcda(Some("q"))],
            }],
            sampled_value_control: vec![raw::SampledValueControl {
                name: "MSVCB01".to_string(),
                dat_set: Some("Meas".to_string()),
                smv_id: Some("SV01".to_string()),
                smp_rate: Some("80".to_string()),
                nof_asdu: Some("1".to_string()),
            }],
            ..Default::default()
        };

        let ln = resolve_logical_node(&model).unwrap();
        assert_eq!(ln.inst, "");
        let ds = ln.data_set("Meas").expect("dataset resolved");
        let names: Vec<_> = ds.members.iter().map(|m| m.da_name.clone().unwrap()).collect();
        assert_eq!(names, vec!["mag.f".to_string(), "q".to_string()]);
        assert_eq!(ln.sampled_value_controls[0].sample_rate, Some(80));
        assert_eq!(ln.sampled_value_controls[0].data_set.as_deref(), Some("Meas"));
    }
}
